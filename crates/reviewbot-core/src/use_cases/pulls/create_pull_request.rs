use async_trait::async_trait;
use reviewbot_models::{PullRequest, PullRequestStatus};
use shaku::{Component, Interface};
use tracing::info;

use crate::{assignment::select_initial_reviewers, CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreatePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        pull_request_name: &str,
        author_id: &str,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = CreatePullRequestInterface)]
pub(crate) struct CreatePullRequest;

#[async_trait]
impl CreatePullRequestInterface for CreatePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        pull_request_name: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        if pull_request_id.is_empty() {
            return Err(DomainError::invalid_input("pull_request_id is required"));
        }
        if pull_request_name.is_empty() {
            return Err(DomainError::invalid_input("pull_request_name is required"));
        }
        if author_id.is_empty() {
            return Err(DomainError::invalid_input("author_id is required"));
        }

        if ctx
            .db_service
            .pull_requests_get(pull_request_id)
            .await?
            .is_some()
        {
            return Err(DomainError::PullRequestExists {
                message: format!("pull request '{pull_request_id}' already exists"),
            });
        }

        let author = ctx.db_service.users_get_expect(author_id).await?;
        if !author.has_team() {
            return Err(DomainError::NotFound {
                message: format!("user '{author_id}' has no team"),
            });
        }
        ctx.db_service.teams_get_expect(&author.team_name).await?;

        let candidates = ctx
            .db_service
            .users_list_review_candidates(&author.team_name, &author.id)
            .await?;
        let reviewers =
            select_initial_reviewers(&author.id, &candidates, ctx.config.reviewers.max_count)?;

        let pull_request = ctx
            .db_service
            .pull_requests_create(PullRequest {
                id: pull_request_id.into(),
                name: pull_request_name.into(),
                author_id: author.id,
                status: PullRequestStatus::Open,
                reviewers,
                ..Default::default()
            })
            .await?;

        info!(
            pull_request_id = %pull_request.id,
            reviewers = ?pull_request.reviewers,
            message = "Assigned reviewers"
        );

        Ok(pull_request)
    }
}
