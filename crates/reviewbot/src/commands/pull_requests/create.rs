use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::pulls::CreatePullRequestInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Create a pull request and assign its reviewers
#[derive(Parser)]
pub(crate) struct PullRequestCreateCommand {
    /// Pull request ID
    pull_request_id: String,
    /// Pull request name
    pull_request_name: String,
    /// Author ID
    author_id: String,
}

#[async_trait]
impl Command for PullRequestCreateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let create_pull_request: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
        let pr = create_pull_request
            .run(
                &ctx.as_core_context(),
                &self.pull_request_id,
                &self.pull_request_name,
                &self.author_id,
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Pull request '{}' created, reviewers: {}.",
            pr.id,
            pr.reviewers.join(", ")
        )?;

        Ok(())
    }
}
