use async_trait::async_trait;
use reviewbot_models::Stats;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetStatsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Stats>;
}

#[derive(Component)]
#[shaku(interface = GetStatsInterface)]
pub(crate) struct GetStats;

#[async_trait]
impl GetStatsInterface for GetStats {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Stats> {
        Ok(Stats {
            pr_stats: ctx.db_service.stats_pull_requests().await?,
            assignments_per_user: ctx.db_service.stats_assignments().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;
    use reviewbot_database_interface::DbService;
    use reviewbot_models::{
        PullRequest, PullRequestStats, PullRequestStatus, Stats, Team, User, UserAssignmentStat,
    };

    use super::{GetStats, GetStatsInterface};
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn empty() -> Result<(), Box<dyn Error>> {
        let ctx = CoreContextTest::new();

        assert_eq!(GetStats.run(&ctx.as_context()).await?, Stats::default());

        Ok(())
    }

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CoreContextTest::new();
        ctx.db_service
            .teams_create(
                Team {
                    name: "backend".into(),
                    ..Default::default()
                }
                .with_members(
                    ["author", "u1", "u2"]
                        .into_iter()
                        .map(|id| User {
                            id: id.into(),
                            name: id.into(),
                            is_active: true,
                            ..Default::default()
                        })
                        .collect(),
                ),
            )
            .await?;

        ctx.db_service
            .pull_requests_create(PullRequest {
                id: "pr-1".into(),
                author_id: "author".into(),
                reviewers: vec!["u1".into(), "u2".into()],
                ..Default::default()
            })
            .await?;
        ctx.db_service
            .pull_requests_create(PullRequest {
                id: "pr-2".into(),
                author_id: "author".into(),
                reviewers: vec!["u1".into()],
                ..Default::default()
            })
            .await?;
        ctx.db_service
            .pull_requests_set_status("pr-2", PullRequestStatus::Merged)
            .await?;

        assert_eq!(
            GetStats.run(&ctx.as_context()).await?,
            Stats {
                pr_stats: PullRequestStats {
                    total: 2,
                    open: 1,
                    merged: 1
                },
                assignments_per_user: vec![
                    UserAssignmentStat {
                        user_id: "u1".into(),
                        count: 2
                    },
                    UserAssignmentStat {
                        user_id: "u2".into(),
                        count: 1
                    }
                ]
            }
        );

        Ok(())
    }
}
