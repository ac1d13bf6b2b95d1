use reviewbot_models::{PullRequest, User, UserAssignmentStat};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::fields::PullRequestStatusDecode;

pub(crate) struct UserRow(User);
pub(crate) struct PullRequestRow(PullRequest);
pub(crate) struct UserAssignmentStatRow(UserAssignmentStat);

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        r.0
    }
}

impl From<PullRequestRow> for PullRequest {
    fn from(r: PullRequestRow) -> Self {
        r.0
    }
}

impl From<UserAssignmentStatRow> for UserAssignmentStat {
    fn from(r: UserAssignmentStatRow) -> Self {
        r.0
    }
}

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            team_name: row
                .try_get::<Option<String>, _>("team_name")?
                .unwrap_or_default(),
            is_active: row.try_get("is_active")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for PullRequestRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(PullRequest {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            author_id: row.try_get("author_id")?,
            status: *row.try_get::<PullRequestStatusDecode, _>("status")?,
            reviewers: row.try_get("reviewers")?,
            created_at: row.try_get("created_at")?,
            merged_at: row.try_get("merged_at")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for UserAssignmentStatRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(UserAssignmentStat {
            user_id: row.try_get("reviewer_id")?,
            count: row.try_get::<i64, _>("count")? as u64,
        }))
    }
}
