//! Logic module.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

pub mod assignment;
mod context;
pub mod errors;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, ErrorCode, Result};
use shaku::module;
use use_cases::{
    pulls::{
        create_pull_request::CreatePullRequest, merge_pull_request::MergePullRequest,
        reassign_reviewer::ReassignReviewer,
    },
    stats::get_stats::GetStats,
    teams::{add_team::AddTeam, get_team::GetTeam},
    users::{list_user_reviews::ListUserReviews, set_user_active::SetUserActive},
};

module! {
    pub CoreModule {
        components = [
            AddTeam, GetTeam, SetUserActive, ListUserReviews,
            CreatePullRequest, MergePullRequest, ReassignReviewer,
            GetStats
        ],
        providers = []
    }
}
