use async_trait::async_trait;
use clap::Parser;
use time::format_description::well_known::Rfc3339;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show pull request info
#[derive(Parser)]
pub(crate) struct PullRequestShowCommand {
    /// Pull request ID
    pull_request_id: String,
}

#[async_trait]
impl Command for PullRequestShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let pr = ctx
            .db_service
            .pull_requests_get_expect(&self.pull_request_id)
            .await?;

        let mut writer = ctx.writer.write().await;
        writeln!(writer, "Pull request '{}': {}", pr.id, pr.name)?;
        writeln!(writer, "Author: {}", pr.author_id)?;
        writeln!(writer, "Status: {}", pr.status)?;
        writeln!(writer, "Reviewers: {}", pr.reviewers.join(", "))?;
        writeln!(writer, "Created at: {}", pr.created_at.format(&Rfc3339)?)?;
        if let Some(merged_at) = pr.merged_at {
            writeln!(writer, "Merged at: {}", merged_at.format(&Rfc3339)?)?;
        }

        Ok(())
    }
}
