use async_trait::async_trait;
use clap::Parser;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List known teams
#[derive(Parser)]
pub(crate) struct TeamListCommand;

#[async_trait]
impl Command for TeamListCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let teams = ctx.db_service.teams_all().await?;

        let mut writer = ctx.writer.write().await;
        if teams.is_empty() {
            writeln!(writer, "No team known.")?;
        } else {
            for team in teams {
                writeln!(writer, "- {} ({} member(s))", team.name, team.members.len())?;
            }
        }

        Ok(())
    }
}
