use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::pulls::ReassignReviewerInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Replace one reviewer of a pull request
#[derive(Parser)]
pub(crate) struct PullRequestReassignCommand {
    /// Pull request ID
    pull_request_id: String,
    /// Reviewer to replace
    old_reviewer_id: String,
}

#[async_trait]
impl Command for PullRequestReassignCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let reassign_reviewer: &dyn ReassignReviewerInterface = ctx.core_module.resolve_ref();
        let reassignment = reassign_reviewer
            .run(
                &ctx.as_core_context(),
                &self.pull_request_id,
                &self.old_reviewer_id,
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Reviewer '{}' replaced by '{}' on pull request '{}'.",
            self.old_reviewer_id,
            reassignment.replaced_by,
            reassignment.pull_request.id
        )?;

        Ok(())
    }
}
