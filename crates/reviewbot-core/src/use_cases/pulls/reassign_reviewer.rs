use async_trait::async_trait;
use reviewbot_models::PullRequest;
use shaku::{Component, Interface};
use tracing::info;

use crate::{
    assignment::{check_reassignable, replace_reviewer, select_replacement_reviewer},
    CoreContext, DomainError, Result,
};

/// Outcome of a reviewer reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerReassignment {
    pub pull_request: PullRequest,
    pub replaced_by: String,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignReviewerInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<ReviewerReassignment>;
}

#[derive(Component)]
#[shaku(interface = ReassignReviewerInterface)]
pub(crate) struct ReassignReviewer;

#[async_trait]
impl ReassignReviewerInterface for ReassignReviewer {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<ReviewerReassignment> {
        if pull_request_id.is_empty() {
            return Err(DomainError::invalid_input("pull_request_id is required"));
        }
        if old_reviewer_id.is_empty() {
            return Err(DomainError::invalid_input("old_user_id is required"));
        }

        let pull_request = ctx
            .db_service
            .pull_requests_get_expect(pull_request_id)
            .await?;
        let current = ctx
            .db_service
            .pull_request_reviewers_list(pull_request_id)
            .await?;

        check_reassignable(pull_request.status, &current, old_reviewer_id)?;

        let author = ctx
            .db_service
            .users_get_expect(&pull_request.author_id)
            .await?;
        let candidates = ctx
            .db_service
            .users_list_review_candidates(&author.team_name, &author.id)
            .await?;
        let replaced_by = select_replacement_reviewer(
            pull_request.status,
            &current,
            old_reviewer_id,
            &author.id,
            &candidates,
        )?;

        let reviewers = replace_reviewer(&current, old_reviewer_id, &replaced_by);
        ctx.db_service
            .pull_request_reviewers_replace(pull_request_id, reviewers)
            .await?;
        let pull_request = ctx
            .db_service
            .pull_requests_get_expect(pull_request_id)
            .await?;

        info!(
            pull_request_id = %pull_request.id,
            old_reviewer_id = old_reviewer_id,
            replaced_by = %replaced_by,
            message = "Reassigned reviewer"
        );

        Ok(ReviewerReassignment {
            pull_request,
            replaced_by,
        })
    }
}
