use actix_web::{web, HttpResponse, Result};
use reviewbot_core::use_cases::users::{ListUserReviewsInterface, SetUserActiveInterface};
use reviewbot_models::User;
use serde::{Deserialize, Serialize};
use shaku::HasComponent;

use super::{pulls::PullRequestShortJson, with_deadline};
use crate::server::AppContext;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct UserJson {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<User> for UserJson {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.name,
            team_name: user.team_name,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SetIsActiveJson {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserQuery {
    #[serde(default)]
    user_id: String,
}

#[derive(Debug, Serialize)]
struct UserReviewsJson {
    user_id: String,
    pull_requests: Vec<PullRequestShortJson>,
}

#[tracing::instrument(skip_all, fields(user_id = data.user_id, is_active = data.is_active))]
pub(crate) async fn set_is_active(
    ctx: web::Data<AppContext>,
    data: web::Json<SetIsActiveJson>,
) -> Result<HttpResponse> {
    let set_user_active: &dyn SetUserActiveInterface = ctx.core_module.resolve_ref();
    let user = with_deadline(
        &ctx.config,
        set_user_active.run(&ctx.as_core_context(), &data.user_id, data.is_active),
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": UserJson::from(user) })))
}

#[tracing::instrument(skip_all, fields(user_id = query.user_id))]
pub(crate) async fn get_review(
    ctx: web::Data<AppContext>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    let list_user_reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
    let pull_requests = with_deadline(
        &ctx.config,
        list_user_reviews.run(&ctx.as_core_context(), &query.user_id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(UserReviewsJson {
        user_id: query.into_inner().user_id,
        pull_requests: pull_requests.into_iter().map(Into::into).collect(),
    }))
}
