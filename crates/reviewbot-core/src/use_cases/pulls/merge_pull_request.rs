use async_trait::async_trait;
use reviewbot_models::{PullRequest, PullRequestStatus};
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MergePullRequestInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = MergePullRequestInterface)]
pub(crate) struct MergePullRequest;

#[async_trait]
impl MergePullRequestInterface for MergePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest> {
        if pull_request_id.is_empty() {
            return Err(DomainError::invalid_input("pull_request_id is required"));
        }

        let pull_request = ctx
            .db_service
            .pull_requests_get_expect(pull_request_id)
            .await?;
        if pull_request.is_merged() {
            return Ok(pull_request);
        }

        Ok(ctx
            .db_service
            .pull_requests_set_status(pull_request_id, PullRequestStatus::Merged)
            .await?)
    }
}
