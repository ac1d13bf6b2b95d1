use async_trait::async_trait;
use clap::Parser;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List known pull requests
#[derive(Parser)]
pub(crate) struct PullRequestListCommand;

#[async_trait]
impl Command for PullRequestListCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let pull_requests = ctx.db_service.pull_requests_all().await?;

        let mut writer = ctx.writer.write().await;
        if pull_requests.is_empty() {
            writeln!(writer, "No pull request known.")?;
        } else {
            for pr in pull_requests {
                writeln!(
                    writer,
                    "- {}: {} [{}] reviewers: {}",
                    pr.id,
                    pr.name,
                    pr.status,
                    pr.reviewers.join(", ")
                )?;
            }
        }

        Ok(())
    }
}
