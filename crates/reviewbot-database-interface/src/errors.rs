use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Unknown pull request '{0}'")]
    UnknownPullRequest(String),

    #[error("Team '{0}' already exists")]
    TeamAlreadyExists(String),

    #[error("Pull request '{0}' already exists")]
    PullRequestAlreadyExists(String),

    #[error("Pull request '{0}' is merged")]
    PullRequestMerged(String),

    #[error("Could not {operation}: {source}")]
    ImplementationError {
        operation: &'static str,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
