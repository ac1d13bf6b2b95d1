use async_trait::async_trait;
use reviewbot_models::PullRequest;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListUserReviewsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str) -> Result<Vec<PullRequest>>;
}

#[derive(Component)]
#[shaku(interface = ListUserReviewsInterface)]
pub(crate) struct ListUserReviews;

#[async_trait]
impl ListUserReviewsInterface for ListUserReviews {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str) -> Result<Vec<PullRequest>> {
        if user_id.is_empty() {
            return Err(DomainError::invalid_input("user_id is required"));
        }

        // Unknown users are reported instead of yielding an empty list
        ctx.db_service.users_get_expect(user_id).await?;

        Ok(ctx
            .db_service
            .pull_requests_list_by_reviewer(user_id)
            .await?)
    }
}
