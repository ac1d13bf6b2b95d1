use async_trait::async_trait;
use reviewbot_models::Team;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = GetTeamInterface)]
pub(crate) struct GetTeam;

#[async_trait]
impl GetTeamInterface for GetTeam {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Team> {
        if team_name.is_empty() {
            return Err(DomainError::invalid_input("team_name is required"));
        }

        Ok(ctx.db_service.teams_get_expect(team_name).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;
    use reviewbot_database_interface::DbService;
    use reviewbot_models::{Team, User};

    use super::{GetTeam, GetTeamInterface};
    use crate::{context::tests::CoreContextTest, ErrorCode};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CoreContextTest::new();
        let team = ctx
            .db_service
            .teams_create(
                Team {
                    name: "backend".into(),
                    ..Default::default()
                }
                .with_members(vec![User {
                    id: "u1".into(),
                    name: "Alice".into(),
                    is_active: true,
                    ..Default::default()
                }]),
            )
            .await?;

        assert_eq!(GetTeam.run(&ctx.as_context(), "backend").await?, team);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_team() {
        let ctx = CoreContextTest::new();

        let err = GetTeam.run(&ctx.as_context(), "backend").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = GetTeam.run(&ctx.as_context(), "").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidInput);
    }
}
