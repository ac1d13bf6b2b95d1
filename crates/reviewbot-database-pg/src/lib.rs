mod fields;
mod postgres;
mod row;
mod utils;

use std::{ops::Deref, time::Duration};

use backoff::backoff::Backoff;
use reviewbot_config::Config;
use reviewbot_database_interface::{DatabaseError, Result};
use sqlx::{migrate::Migrate, postgres::PgPoolOptions, Acquire};
use tracing::{info, warn};

pub type DbPool = sqlx::postgres::PgPool;
pub use postgres::PostgresDb;
pub use utils::{create_db_url, get_base_url, TestDatabase};

pub async fn run_migrations<'a, A>(migrator: A) -> Result<()>
where
    A: Acquire<'a>,
    <A::Connection as Deref>::Target: Migrate,
{
    info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(migrator)
        .await
        .map_err(|e| DatabaseError::ImplementationError {
            operation: "run migrations",
            source: e.into(),
        })?;

    Ok(())
}

/// Fixed delay between attempts, giving up after a number of retries.
struct ConnectBackoff {
    delay: Duration,
    retries_left: u32,
}

impl ConnectBackoff {
    fn new(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            retries_left: max_attempts.saturating_sub(1),
        }
    }
}

impl Backoff for ConnectBackoff {
    fn next_backoff(&mut self) -> Option<Duration> {
        if self.retries_left == 0 {
            None
        } else {
            self.retries_left -= 1;
            Some(self.delay)
        }
    }
}

pub async fn establish_pool_connection(config: &Config) -> Result<DbPool> {
    info!("Establishing connection to database pool...");

    let pg_config = &config.database.pg;
    let options = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(pg_config.connection_timeout.into()))
        .max_connections(pg_config.pool_size);

    let mut attempt = 1;
    let pool = backoff::future::retry_notify(
        ConnectBackoff::new(
            Duration::from_millis(pg_config.connect_retry_delay),
            pg_config.connect_max_attempts,
        ),
        || {
            let options = options.clone();
            let url = pg_config.url.clone();
            async move {
                options
                    .connect(&url)
                    .await
                    .map_err(backoff::Error::transient)
            }
        },
        |e: sqlx::Error, delay: Duration| {
            warn!(
                attempt = attempt,
                max_attempts = pg_config.connect_max_attempts,
                error = %e,
                message = "Could not connect to database, retrying",
                delay_ms = delay.as_millis() as u64,
            );
            attempt += 1;
        },
    )
    .await
    .map_err(|e| DatabaseError::ImplementationError {
        operation: "connect to database",
        source: e.into(),
    })?;

    info!("Connected to database");
    Ok(pool)
}
