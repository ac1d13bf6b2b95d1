use actix_web::{web, HttpResponse, Result};
use reviewbot_core::use_cases::teams::{AddTeamInterface, GetTeamInterface};
use reviewbot_models::{Team, User};
use serde::{Deserialize, Serialize};
use shaku::HasComponent;

use super::with_deadline;
use crate::server::AppContext;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct TeamMemberJson {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct TeamJson {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberJson>,
}

impl From<Team> for TeamJson {
    fn from(team: Team) -> Self {
        Self {
            team_name: team.name,
            members: team
                .members
                .into_iter()
                .map(|m| TeamMemberJson {
                    user_id: m.id,
                    username: m.name,
                    is_active: m.is_active,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamQuery {
    #[serde(default)]
    team_name: String,
}

#[tracing::instrument(skip_all, fields(team_name = data.team_name))]
pub(crate) async fn add_team(
    ctx: web::Data<AppContext>,
    data: web::Json<TeamJson>,
) -> Result<HttpResponse> {
    let TeamJson { team_name, members } = data.into_inner();
    let members = members
        .into_iter()
        .map(|m| User {
            id: m.user_id,
            name: m.username,
            is_active: m.is_active,
            ..Default::default()
        })
        .collect();

    let add_team: &dyn AddTeamInterface = ctx.core_module.resolve_ref();
    let team = with_deadline(
        &ctx.config,
        add_team.run(&ctx.as_core_context(), &team_name, members),
    )
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "team": TeamJson::from(team) })))
}

#[tracing::instrument(skip_all, fields(team_name = query.team_name))]
pub(crate) async fn get_team(
    ctx: web::Data<AppContext>,
    query: web::Query<TeamQuery>,
) -> Result<HttpResponse> {
    let get_team: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
    let team = with_deadline(
        &ctx.config,
        get_team.run(&ctx.as_core_context(), &query.team_name),
    )
    .await?;

    Ok(HttpResponse::Ok().json(TeamJson::from(team)))
}
