//! Domain models.

mod pull_request;
mod pull_request_status;
mod stats;
mod team;
mod user;

pub use pull_request::PullRequest;
pub use pull_request_status::{PullRequestStatus, PullRequestStatusError};
pub use stats::{PullRequestStats, Stats, UserAssignmentStat};
pub use team::Team;
pub use user::User;
