use std::str::FromStr;

use async_trait::async_trait;
use clap::Parser;
use reviewbot_core::use_cases::teams::AddTeamInterface;
use reviewbot_models::User;
use shaku::HasComponent;
use thiserror::Error;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid member '{value}', expected 'id:username' or 'id:username:inactive'")]
pub(crate) struct InvalidMemberError {
    value: String,
}

/// Team member given as `id:username[:inactive]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MemberArg {
    id: String,
    username: String,
    is_active: bool,
}

impl FromStr for MemberArg {
    type Err = InvalidMemberError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let error = || InvalidMemberError { value: s.into() };

        let mut parts = s.split(':');
        let (id, username) = match (parts.next(), parts.next()) {
            (Some(id), Some(username)) if !id.is_empty() && !username.is_empty() => {
                (id, username)
            }
            _ => return Err(error()),
        };
        let is_active = match parts.next() {
            None => true,
            Some("inactive") => false,
            Some(_) => return Err(error()),
        };
        if parts.next().is_some() {
            return Err(error());
        }

        Ok(Self {
            id: id.into(),
            username: username.into(),
            is_active,
        })
    }
}

impl From<MemberArg> for User {
    fn from(member: MemberArg) -> Self {
        User {
            id: member.id,
            name: member.username,
            is_active: member.is_active,
            ..Default::default()
        }
    }
}

/// Create a team with its members
#[derive(Parser)]
pub(crate) struct TeamAddCommand {
    /// Team name
    team_name: String,
    /// Members, as `id:username` or `id:username:inactive`
    #[arg(required = true)]
    members: Vec<MemberArg>,
}

#[async_trait]
impl Command for TeamAddCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let add_team: &dyn AddTeamInterface = ctx.core_module.resolve_ref();
        let team = add_team
            .run(
                &ctx.as_core_context(),
                &self.team_name,
                self.members.into_iter().map(Into::into).collect(),
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Team '{}' created with {} member(s).",
            team.name,
            team.members.len()
        )?;

        Ok(())
    }
}
