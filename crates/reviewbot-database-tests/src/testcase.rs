use futures::Future;
use reviewbot_config::Config;
use reviewbot_database_interface::DbService;
use reviewbot_database_memory::MemoryDb;
use reviewbot_database_pg::{PostgresDb, TestDatabase};
use tracing::info;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Run the block against every storage driver.
///
/// Postgres runs only when `BOT_DATABASE_PG_URL` is set.
pub async fn db_test_case<F, Fut>(test_name: &str, block: F)
where
    F: Fn(Box<dyn DbService>) -> Fut,
    Fut: Future<Output = TestResult>,
{
    {
        // In memory
        let mem_db = Box::new(MemoryDb::new());
        info!("running memory test {test_name} ...");
        block(mem_db).await.unwrap();
    }

    db_test_case_pg(test_name, block).await;
}

pub async fn db_test_case_pg<F, Fut>(test_name: &str, block: F)
where
    F: Fn(Box<dyn DbService>) -> Fut,
    Fut: Future<Output = TestResult>,
{
    let config = Config::from_env_no_version();
    if config.database.pg.url.is_empty() {
        info!("skipping postgres test {test_name}: no database URL");
        return;
    }

    let full_name = format!("test-bot-{test_name}");
    let database = TestDatabase::new(&config.database.pg.url, &full_name);
    let pool = database.setup(2).await.unwrap();

    info!("running postgres test {full_name} ...");
    block(Box::new(PostgresDb::new(pool.clone()))).await.unwrap();

    pool.close().await;
    database.teardown().await.unwrap();
}
