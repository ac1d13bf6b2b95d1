use std::collections::HashSet;

use async_trait::async_trait;
use reviewbot_models::{Team, User};
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait AddTeamInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        members: Vec<User>,
    ) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = AddTeamInterface)]
pub(crate) struct AddTeam;

#[async_trait]
impl AddTeamInterface for AddTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        members: Vec<User>,
    ) -> Result<Team> {
        if team_name.is_empty() {
            return Err(DomainError::invalid_input("team_name is required"));
        }
        if members.is_empty() {
            return Err(DomainError::invalid_input("members are required"));
        }

        let mut seen = HashSet::new();
        for member in &members {
            if member.id.is_empty() {
                return Err(DomainError::invalid_input("user_id is required"));
            }
            if !seen.insert(member.id.as_str()) {
                return Err(DomainError::InvalidInput {
                    message: format!("user '{}' is listed twice", member.id),
                });
            }
        }

        let team = Team {
            name: team_name.into(),
            ..Default::default()
        }
        .with_members(members);

        Ok(ctx.db_service.teams_create(team).await?)
    }
}
