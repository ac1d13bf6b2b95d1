use actix_web::{web, HttpResponse, Result};
use reviewbot_core::use_cases::pulls::{
    CreatePullRequestInterface, MergePullRequestInterface, ReassignReviewerInterface,
    ReviewerReassignment,
};
use reviewbot_models::{PullRequest, PullRequestStatus};
use serde::{Deserialize, Serialize};
use shaku::HasComponent;
use time::OffsetDateTime;

use super::with_deadline;
use crate::server::AppContext;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct PullRequestJson {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
    status: PullRequestStatus,
    assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(
        rename = "mergedAt",
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    merged_at: Option<OffsetDateTime>,
}

impl From<PullRequest> for PullRequestJson {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.name,
            author_id: pr.author_id,
            status: pr.status,
            assigned_reviewers: pr.reviewers,
            created_at: pr.created_at,
            merged_at: pr.merged_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct PullRequestShortJson {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
    status: PullRequestStatus,
}

impl From<PullRequest> for PullRequestShortJson {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.name,
            author_id: pr.author_id,
            status: pr.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePullRequestJson {
    #[serde(default)]
    pull_request_id: String,
    #[serde(default)]
    pull_request_name: String,
    #[serde(default)]
    author_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MergePullRequestJson {
    #[serde(default)]
    pull_request_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReassignReviewerJson {
    #[serde(default)]
    pull_request_id: String,
    #[serde(default)]
    old_user_id: String,
}

#[derive(Debug, Serialize)]
struct PullRequestResponse {
    pr: PullRequestJson,
}

#[derive(Debug, Serialize)]
struct ReassignResponse {
    pr: PullRequestJson,
    replaced_by: String,
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    author_id = data.author_id
))]
pub(crate) async fn create(
    ctx: web::Data<AppContext>,
    data: web::Json<CreatePullRequestJson>,
) -> Result<HttpResponse> {
    let create_pull_request: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
    let pr = with_deadline(
        &ctx.config,
        create_pull_request.run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.pull_request_name,
            &data.author_id,
        ),
    )
    .await?;

    Ok(HttpResponse::Created().json(PullRequestResponse { pr: pr.into() }))
}

#[tracing::instrument(skip_all, fields(pull_request_id = data.pull_request_id))]
pub(crate) async fn merge(
    ctx: web::Data<AppContext>,
    data: web::Json<MergePullRequestJson>,
) -> Result<HttpResponse> {
    let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
    let pr = with_deadline(
        &ctx.config,
        merge_pull_request.run(&ctx.as_core_context(), &data.pull_request_id),
    )
    .await?;

    Ok(HttpResponse::Ok().json(PullRequestResponse { pr: pr.into() }))
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    old_user_id = data.old_user_id
))]
pub(crate) async fn reassign(
    ctx: web::Data<AppContext>,
    data: web::Json<ReassignReviewerJson>,
) -> Result<HttpResponse> {
    let reassign_reviewer: &dyn ReassignReviewerInterface = ctx.core_module.resolve_ref();
    let ReviewerReassignment {
        pull_request,
        replaced_by,
    } = with_deadline(
        &ctx.config,
        reassign_reviewer.run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.old_user_id,
        ),
    )
    .await?;

    Ok(HttpResponse::Ok().json(ReassignResponse {
        pr: pull_request.into(),
        replaced_by,
    }))
}
