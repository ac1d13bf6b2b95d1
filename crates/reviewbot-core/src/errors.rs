//! Logic errors.

use reviewbot_database_interface::DatabaseError;
use thiserror::Error;

/// Machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    TeamExists,
    PullRequestExists,
    PullRequestMerged,
    NotAssigned,
    NoCandidate,
    InvalidInput,
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::TeamExists => "TEAM_EXISTS",
            Self::PullRequestExists => "PR_EXISTS",
            Self::PullRequestMerged => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoCandidate => "NO_CANDIDATE",
            Self::InvalidInput => "INVALID_INPUT",
            Self::Internal => "INTERNAL",
        }
    }
}

/// Logic error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    TeamExists { message: String },

    #[error("{message}")]
    PullRequestExists { message: String },

    #[error("{message}")]
    PullRequestMerged { message: String },

    #[error("{message}")]
    NotAssigned { message: String },

    #[error("{message}")]
    NoCandidate { message: String },

    #[error("{message}")]
    InvalidInput { message: String },

    /// Wraps [`reviewbot_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError { source: DatabaseError },
}

impl DomainError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::TeamExists { .. } => ErrorCode::TeamExists,
            Self::PullRequestExists { .. } => ErrorCode::PullRequestExists,
            Self::PullRequestMerged { .. } => ErrorCode::PullRequestMerged,
            Self::NotAssigned { .. } => ErrorCode::NotAssigned,
            Self::NoCandidate { .. } => ErrorCode::NoCandidate,
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
            Self::DatabaseError { .. } => ErrorCode::Internal,
        }
    }

    pub(crate) fn invalid_input(message: &str) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<DatabaseError> for DomainError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::UnknownUser(id) => Self::NotFound {
                message: format!("user '{id}' not found"),
            },
            DatabaseError::UnknownTeam(name) => Self::NotFound {
                message: format!("team '{name}' not found"),
            },
            DatabaseError::UnknownPullRequest(id) => Self::NotFound {
                message: format!("pull request '{id}' not found"),
            },
            DatabaseError::TeamAlreadyExists(name) => Self::TeamExists {
                message: format!("team '{name}' already exists"),
            },
            DatabaseError::PullRequestAlreadyExists(id) => Self::PullRequestExists {
                message: format!("pull request '{id}' already exists"),
            },
            DatabaseError::PullRequestMerged(id) => Self::PullRequestMerged {
                message: format!("pull request '{id}' already merged"),
            },
            e @ DatabaseError::ImplementationError { .. } => Self::DatabaseError { source: e },
        }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
