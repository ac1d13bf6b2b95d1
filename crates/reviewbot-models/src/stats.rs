use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestStats {
    pub total: u64,
    pub open: u64,
    pub merged: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAssignmentStat {
    pub user_id: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub pr_stats: PullRequestStats,
    pub assignments_per_user: Vec<UserAssignmentStat>,
}
