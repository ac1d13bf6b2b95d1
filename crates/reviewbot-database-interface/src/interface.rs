use async_trait::async_trait;
use reviewbot_models::{
    PullRequest, PullRequestStats, PullRequestStatus, Team, User, UserAssignmentStat,
};

use crate::{DatabaseError, Result};

/// Storage for users, teams, pull requests and reviewer assignments.
///
/// Lists are always returned in a stable order: users by id, teams by name,
/// pull requests by id, reviewers by assignment position.
#[async_trait]
pub trait DbService: Send + Sync {
    async fn health_check(&self) -> Result<()>;

    async fn users_get(&self, id: &str) -> Result<Option<User>>;
    async fn users_get_expect(&self, id: &str) -> Result<User> {
        self.users_get(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))
    }
    async fn users_set_is_active(&self, id: &str, value: bool) -> Result<User>;
    /// Active members of `team_name`, minus `exclude_user_id`.
    async fn users_list_review_candidates(
        &self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>>;

    /// Create the team and upsert its members in a single unit.
    async fn teams_create(&self, instance: Team) -> Result<Team>;
    async fn teams_get(&self, name: &str) -> Result<Option<Team>>;
    async fn teams_get_expect(&self, name: &str) -> Result<Team> {
        self.teams_get(name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(name.into()))
    }
    async fn teams_all(&self) -> Result<Vec<Team>>;

    /// Create the pull request along with its reviewers in a single unit.
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(&self, id: &str) -> Result<PullRequest> {
        self.pull_requests_get(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))
    }
    async fn pull_requests_set_status(
        &self,
        id: &str,
        status: PullRequestStatus,
    ) -> Result<PullRequest>;
    async fn pull_requests_list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>>;
    async fn pull_requests_all(&self) -> Result<Vec<PullRequest>>;

    async fn pull_request_reviewers_list(&self, pull_request_id: &str) -> Result<Vec<String>>;
    /// Replace the whole reviewer set. Readers never see a partial set.
    ///
    /// Fails with `PullRequestMerged` when the pull request is merged at write time.
    async fn pull_request_reviewers_replace(
        &self,
        pull_request_id: &str,
        reviewers: Vec<String>,
    ) -> Result<()>;

    async fn stats_pull_requests(&self) -> Result<PullRequestStats>;
    async fn stats_assignments(&self) -> Result<Vec<UserAssignmentStat>>;
}
