use async_trait::async_trait;
use reviewbot_database_interface::{DatabaseError, DbService, Result};
use reviewbot_models::{
    PullRequest, PullRequestStats, PullRequestStatus, Team, User, UserAssignmentStat,
};
use sqlx::{PgConnection, PgPool, Postgres, Row, Transaction};

use crate::row::{PullRequestRow, UserAssignmentStatRow, UserRow};

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn wrap_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DatabaseError {
        move |e| DatabaseError::ImplementationError {
            operation,
            source: e.into(),
        }
    }

    fn wrap_constraint_violation(
        e: sqlx::Error,
        code: &str,
        target: DatabaseError,
        operation: &'static str,
    ) -> DatabaseError {
        let matches = match &e {
            sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some(code),
            _ => false,
        };

        if matches {
            target
        } else {
            Self::wrap_error(operation)(e)
        }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(Self::wrap_error("begin transaction"))
    }

    async fn commit(transaction: Transaction<'static, Postgres>) -> Result<()> {
        transaction
            .commit()
            .await
            .map_err(Self::wrap_error("commit transaction"))
    }

    /// Fail with the first id which does not match a known user.
    async fn check_users_exist(conn: &mut PgConnection, ids: &[String]) -> Result<()> {
        let known: Vec<String> = sqlx::query(
            r#"
                SELECT id
                FROM app_user
                WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(Self::wrap_error("check users"))?
        .into_iter()
        .map(|row| row.get::<String, _>(0))
        .collect();

        match ids.iter().find(|id| !known.contains(id)) {
            Some(id) => Err(DatabaseError::UnknownUser(id.clone())),
            None => Ok(()),
        }
    }

    async fn insert_reviewers(
        conn: &mut PgConnection,
        pull_request_id: &str,
        reviewers: &[String],
    ) -> Result<()> {
        for (position, reviewer_id) in reviewers.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO pull_request_reviewer
                (
                    pull_request_id,
                    reviewer_id,
                    position
                )
                VALUES
                (
                    $1,
                    $2,
                    $3
                )
                ;
            "#,
            )
            .bind(pull_request_id)
            .bind(reviewer_id)
            .bind(position as i32)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                Self::wrap_constraint_violation(
                    e,
                    FOREIGN_KEY_VIOLATION,
                    DatabaseError::UnknownUser(reviewer_id.clone()),
                    "insert reviewer",
                )
            })?;
        }

        Ok(())
    }

    async fn team_members(&self, name: &str) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM app_user
                WHERE team_name = $1
                ORDER BY id COLLATE "C"
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error("list team members"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl DbService for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Self::wrap_error("check database health"))?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn users_get(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM app_user
                WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error("get user"))?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn users_set_is_active(&self, id: &str, value: bool) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE app_user
            SET is_active = $2
            WHERE id = $1
            RETURNING *
            ;
        "#,
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error("set user activity"))?;

        row.map(Into::into)
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))
    }

    #[tracing::instrument(skip(self))]
    async fn users_list_review_candidates(
        &self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM app_user
                WHERE team_name = $1
                AND is_active = TRUE
                AND id <> $2
                ORDER BY id COLLATE "C"
            "#,
        )
        .bind(team_name)
        .bind(exclude_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error("list review candidates"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn teams_create(&self, instance: Team) -> Result<Team> {
        let mut transaction = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO team
            (
                name
            )
            VALUES
            (
                $1
            )
            ;
        "#,
        )
        .bind(&instance.name)
        .execute(&mut *transaction)
        .await
        .map_err(|e| {
            Self::wrap_constraint_violation(
                e,
                UNIQUE_VIOLATION,
                DatabaseError::TeamAlreadyExists(instance.name.clone()),
                "create team",
            )
        })?;

        for member in &instance.members {
            sqlx::query(
                r#"
                INSERT INTO app_user
                (
                    id,
                    name,
                    team_name,
                    is_active
                )
                VALUES
                (
                    $1,
                    $2,
                    $3,
                    $4
                )
                ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    team_name = EXCLUDED.team_name,
                    is_active = EXCLUDED.is_active
                ;
            "#,
            )
            .bind(&member.id)
            .bind(&member.name)
            .bind(&instance.name)
            .bind(member.is_active)
            .execute(&mut *transaction)
            .await
            .map_err(Self::wrap_error("save team member"))?;
        }

        Self::commit(transaction).await?;
        self.teams_get_expect(&instance.name).await
    }

    #[tracing::instrument(skip(self))]
    async fn teams_get(&self, name: &str) -> Result<Option<Team>> {
        let row = sqlx::query(
            r#"
                SELECT name
                FROM team
                WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error("get team"))?;

        match row {
            Some(row) => {
                let name: String = row.get(0);
                let members = self.team_members(&name).await?;
                Ok(Some(Team { name, members }))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn teams_all(&self) -> Result<Vec<Team>> {
        let names: Vec<String> = sqlx::query(
            r#"
                SELECT name
                FROM team
                ORDER BY name COLLATE "C"
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error("list teams"))?
        .into_iter()
        .map(|row| row.get(0))
        .collect();

        let mut teams = Vec::with_capacity(names.len());
        for name in names {
            let members = self.team_members(&name).await?;
            teams.push(Team { name, members });
        }

        Ok(teams)
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        let mut transaction = self.begin().await?;

        let mut user_ids = vec![instance.author_id.clone()];
        user_ids.extend(instance.reviewers.iter().cloned());
        Self::check_users_exist(&mut transaction, &user_ids).await?;

        sqlx::query(
            r#"
            INSERT INTO pull_request
            (
                id,
                name,
                author_id,
                status,
                merged_at
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4,
                CASE WHEN $4 = 'MERGED' THEN NOW() ELSE NULL END
            )
            ;
        "#,
        )
        .bind(&instance.id)
        .bind(&instance.name)
        .bind(&instance.author_id)
        .bind(instance.status.to_str())
        .execute(&mut *transaction)
        .await
        .map_err(|e| {
            Self::wrap_constraint_violation(
                e,
                UNIQUE_VIOLATION,
                DatabaseError::PullRequestAlreadyExists(instance.id.clone()),
                "create pull request",
            )
        })?;

        Self::insert_reviewers(&mut transaction, &instance.id, &instance.reviewers).await?;
        Self::commit(transaction).await?;

        self.pull_requests_get_expect(&instance.id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>> {
        let row = sqlx::query_as::<_, PullRequestRow>(
            r#"
                SELECT *
                FROM pull_request_view
                WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error("get pull request"))?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_set_status(
        &self,
        id: &str,
        status: PullRequestStatus,
    ) -> Result<PullRequest> {
        let row = sqlx::query(
            r#"
            UPDATE pull_request
            SET status = $2,
                merged_at = CASE WHEN $2 = 'MERGED' THEN COALESCE(merged_at, NOW()) ELSE merged_at END
            WHERE id = $1
            RETURNING id
            ;
        "#,
        )
        .bind(id)
        .bind(status.to_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error("set pull request status"))?;

        if row.is_none() {
            return Err(DatabaseError::UnknownPullRequest(id.into()));
        }

        self.pull_requests_get_expect(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        let rows = sqlx::query_as::<_, PullRequestRow>(
            r#"
                SELECT pr.*
                FROM pull_request_view pr
                INNER JOIN pull_request_reviewer r ON r.pull_request_id = pr.id
                WHERE r.reviewer_id = $1
                ORDER BY pr.id COLLATE "C"
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error("list pull requests by reviewer"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_all(&self) -> Result<Vec<PullRequest>> {
        let rows = sqlx::query_as::<_, PullRequestRow>(
            r#"
                SELECT *
                FROM pull_request_view
                ORDER BY id COLLATE "C"
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error("list pull requests"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn pull_request_reviewers_list(&self, pull_request_id: &str) -> Result<Vec<String>> {
        let row = sqlx::query(
            r#"
                SELECT reviewers
                FROM pull_request_view
                WHERE id = $1
            "#,
        )
        .bind(pull_request_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error("list reviewers"))?;

        row.map(|r| r.get::<Vec<String>, _>(0))
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))
    }

    #[tracing::instrument(skip(self))]
    async fn pull_request_reviewers_replace(
        &self,
        pull_request_id: &str,
        reviewers: Vec<String>,
    ) -> Result<()> {
        let mut transaction = self.begin().await?;

        // Concurrent replacements and merges on the same pull request wait for this lock.
        let status: Option<String> = sqlx::query(
            r#"
                SELECT status
                FROM pull_request
                WHERE id = $1
                FOR UPDATE
            "#,
        )
        .bind(pull_request_id)
        .fetch_optional(&mut *transaction)
        .await
        .map_err(Self::wrap_error("lock pull request"))?
        .map(|row| row.get(0));

        match status.as_deref() {
            None => return Err(DatabaseError::UnknownPullRequest(pull_request_id.into())),
            Some(s) if s == PullRequestStatus::Merged.to_str() => {
                return Err(DatabaseError::PullRequestMerged(pull_request_id.into()))
            }
            Some(_) => (),
        }

        Self::check_users_exist(&mut transaction, &reviewers).await?;

        sqlx::query(
            r#"
            DELETE FROM pull_request_reviewer
            WHERE pull_request_id = $1
            ;
        "#,
        )
        .bind(pull_request_id)
        .execute(&mut *transaction)
        .await
        .map_err(Self::wrap_error("delete reviewers"))?;

        Self::insert_reviewers(&mut transaction, pull_request_id, &reviewers).await?;
        Self::commit(transaction).await
    }

    #[tracing::instrument(skip(self))]
    async fn stats_pull_requests(&self) -> Result<PullRequestStats> {
        let row = sqlx::query(
            r#"
                SELECT
                    COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'OPEN') AS open,
                    COUNT(*) FILTER (WHERE status = 'MERGED') AS merged
                FROM pull_request
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(Self::wrap_error("count pull requests"))?;

        Ok(PullRequestStats {
            total: row.get::<i64, _>("total") as u64,
            open: row.get::<i64, _>("open") as u64,
            merged: row.get::<i64, _>("merged") as u64,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn stats_assignments(&self) -> Result<Vec<UserAssignmentStat>> {
        let rows = sqlx::query_as::<_, UserAssignmentStatRow>(
            r#"
                SELECT reviewer_id, COUNT(*) AS count
                FROM pull_request_reviewer
                GROUP BY reviewer_id
                ORDER BY reviewer_id COLLATE "C"
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error("count assignments"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
