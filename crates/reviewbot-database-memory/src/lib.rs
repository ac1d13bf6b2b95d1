use std::{
    collections::{BTreeMap, HashMap},
    sync::RwLock,
};

use async_trait::async_trait;
use reviewbot_database_interface::{DatabaseError, DbService, Result};
use reviewbot_models::{
    PullRequest, PullRequestStats, PullRequestStatus, Team, User, UserAssignmentStat,
};
use time::OffsetDateTime;

/// In-memory storage.
///
/// Compound operations take their write locks in a fixed order
/// (teams, users, pull requests) and never yield while holding them.
#[derive(Debug, Default)]
pub struct MemoryDb {
    teams: RwLock<HashMap<String, Team>>,
    users: RwLock<HashMap<String, User>>,
    pull_requests: RwLock<HashMap<String, PullRequest>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    fn team_members(users: &HashMap<String, User>, team_name: &str) -> Vec<User> {
        let mut members: Vec<_> = users
            .values()
            .filter(|u| u.team_name == team_name)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));
        members
    }

    fn check_users_exist<'a>(
        users: &HashMap<String, User>,
        mut ids: impl Iterator<Item = &'a String>,
    ) -> Result<()> {
        match ids.find(|id| !users.contains_key(*id)) {
            Some(id) => Err(DatabaseError::UnknownUser(id.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    ////////
    // Users

    async fn users_get(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn users_set_is_active(&self, id: &str, value: bool) -> Result<User> {
        let mut users = self.users.write().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))?;
        user.is_active = value;
        Ok(user.clone())
    }

    async fn users_list_review_candidates(
        &self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>> {
        let users = self.users.read().unwrap();
        Ok(Self::team_members(&users, team_name)
            .into_iter()
            .filter(|u| u.is_active && u.id != exclude_user_id)
            .collect())
    }

    ////////
    // Teams

    async fn teams_create(&self, instance: Team) -> Result<Team> {
        let mut teams = self.teams.write().unwrap();
        if teams.contains_key(&instance.name) {
            return Err(DatabaseError::TeamAlreadyExists(instance.name));
        }

        let mut users = self.users.write().unwrap();
        for member in &instance.members {
            users.insert(
                member.id.clone(),
                User {
                    team_name: instance.name.clone(),
                    ..member.clone()
                },
            );
        }

        teams.insert(
            instance.name.clone(),
            Team {
                name: instance.name.clone(),
                members: vec![],
            },
        );

        Ok(Team {
            members: Self::team_members(&users, &instance.name),
            name: instance.name,
        })
    }

    async fn teams_get(&self, name: &str) -> Result<Option<Team>> {
        let teams = self.teams.read().unwrap();
        let users = self.users.read().unwrap();

        Ok(teams.get(name).map(|t| Team {
            name: t.name.clone(),
            members: Self::team_members(&users, name),
        }))
    }

    async fn teams_all(&self) -> Result<Vec<Team>> {
        let teams = self.teams.read().unwrap();
        let users = self.users.read().unwrap();

        let mut values: Vec<_> = teams
            .keys()
            .map(|name| Team {
                name: name.clone(),
                members: Self::team_members(&users, name),
            })
            .collect();
        values.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(values)
    }

    ////////////////
    // Pull requests

    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        let users = self.users.read().unwrap();
        let mut pull_requests = self.pull_requests.write().unwrap();

        if pull_requests.contains_key(&instance.id) {
            return Err(DatabaseError::PullRequestAlreadyExists(instance.id));
        }
        Self::check_users_exist(
            &users,
            std::iter::once(&instance.author_id).chain(instance.reviewers.iter()),
        )?;

        let now = OffsetDateTime::now_utc();
        let instance = PullRequest {
            created_at: now,
            merged_at: match instance.status {
                PullRequestStatus::Merged => Some(now),
                PullRequestStatus::Open => None,
            },
            ..instance
        };

        pull_requests.insert(instance.id.clone(), instance.clone());
        Ok(instance)
    }

    async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>> {
        Ok(self.pull_requests.read().unwrap().get(id).cloned())
    }

    async fn pull_requests_set_status(
        &self,
        id: &str,
        status: PullRequestStatus,
    ) -> Result<PullRequest> {
        let mut pull_requests = self.pull_requests.write().unwrap();
        let pr = pull_requests
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))?;

        pr.status = status;
        if status == PullRequestStatus::Merged && pr.merged_at.is_none() {
            pr.merged_at = Some(OffsetDateTime::now_utc());
        }

        Ok(pr.clone())
    }

    async fn pull_requests_list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        let mut values: Vec<_> = self
            .pull_requests
            .read()
            .unwrap()
            .values()
            .filter(|pr| pr.has_reviewer(user_id))
            .cloned()
            .collect();
        values.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(values)
    }

    async fn pull_requests_all(&self) -> Result<Vec<PullRequest>> {
        let mut values: Vec<_> = self
            .pull_requests
            .read()
            .unwrap()
            .values()
            .cloned()
            .collect();
        values.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(values)
    }

    ////////////
    // Reviewers

    async fn pull_request_reviewers_list(&self, pull_request_id: &str) -> Result<Vec<String>> {
        self.pull_requests
            .read()
            .unwrap()
            .get(pull_request_id)
            .map(|pr| pr.reviewers.clone())
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))
    }

    async fn pull_request_reviewers_replace(
        &self,
        pull_request_id: &str,
        reviewers: Vec<String>,
    ) -> Result<()> {
        let users = self.users.read().unwrap();
        let mut pull_requests = self.pull_requests.write().unwrap();

        let pr = pull_requests
            .get_mut(pull_request_id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))?;
        if pr.is_merged() {
            return Err(DatabaseError::PullRequestMerged(pull_request_id.into()));
        }
        Self::check_users_exist(&users, reviewers.iter())?;

        pr.reviewers = reviewers;
        Ok(())
    }

    ////////
    // Stats

    async fn stats_pull_requests(&self) -> Result<PullRequestStats> {
        let pull_requests = self.pull_requests.read().unwrap();
        let merged = pull_requests.values().filter(|pr| pr.is_merged()).count() as u64;
        let total = pull_requests.len() as u64;

        Ok(PullRequestStats {
            total,
            open: total - merged,
            merged,
        })
    }

    async fn stats_assignments(&self) -> Result<Vec<UserAssignmentStat>> {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for pr in self.pull_requests.read().unwrap().values() {
            for reviewer in &pr.reviewers {
                *counts.entry(reviewer.clone()).or_default() += 1;
            }
        }

        Ok(counts
            .into_iter()
            .map(|(user_id, count)| UserAssignmentStat { user_id, count })
            .collect())
    }
}
