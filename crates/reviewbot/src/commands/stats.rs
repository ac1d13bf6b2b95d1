use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::stats::GetStatsInterface;
use shaku::HasComponent;

use super::{Command, CommandContext};
use crate::Result;

/// Show assignment statistics
#[derive(Parser)]
pub(crate) struct StatsCommand;

#[async_trait]
impl Command for StatsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let get_stats: &dyn GetStatsInterface = ctx.core_module.resolve_ref();
        let stats = get_stats.run(&ctx.as_core_context()).await?;

        let mut writer = ctx.writer.write().await;
        writeln!(
            writer,
            "Pull requests: {} total, {} open, {} merged",
            stats.pr_stats.total, stats.pr_stats.open, stats.pr_stats.merged
        )?;

        if stats.assignments_per_user.is_empty() {
            writeln!(writer, "No reviewer assigned.")?;
        } else {
            writeln!(writer, "Assignments:")?;
            for stat in stats.assignments_per_user {
                writeln!(writer, "- {}: {}", stat.user_id, stat.count)?;
            }
        }

        Ok(())
    }
}
