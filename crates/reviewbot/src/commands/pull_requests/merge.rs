use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::pulls::MergePullRequestInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Mark a pull request as merged
#[derive(Parser)]
pub(crate) struct PullRequestMergeCommand {
    /// Pull request ID
    pull_request_id: String,
}

#[async_trait]
impl Command for PullRequestMergeCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
        let pr = merge_pull_request
            .run(&ctx.as_core_context(), &self.pull_request_id)
            .await?;

        writeln!(ctx.writer.write().await, "Pull request '{}' merged.", pr.id)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;
    use reviewbot_database_interface::DbService;
    use reviewbot_models::PullRequestStatus;

    use crate::testutils::{seed_pull_request, seed_team, test_command, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        seed_team(&ctx, "backend", &["author", "u1"]).await?;
        seed_pull_request(&ctx, "pr-1", "author", &["u1"]).await?;
        ctx.db_service
            .pull_requests_set_status("pr-1", PullRequestStatus::Merged)
            .await?;

        // Already merged pull requests are accepted as is
        assert_eq!(
            test_command(ctx, &["pull-requests", "merge", "pr-1"]).await,
            "Pull request 'pr-1' merged.\n"
        );

        Ok(())
    }
}
