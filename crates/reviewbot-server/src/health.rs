use std::future::Future;

use actix_http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use reviewbot_config::Config;
use tracing::warn;

use crate::{handlers::within_deadline, server::AppContext};

async fn database_status<F>(config: &Config, check: F) -> bool
where
    F: Future<Output = reviewbot_database_interface::Result<()>>,
{
    match within_deadline(config, check).await {
        Some(result) => result.is_ok(),
        None => {
            warn!(message = "Database health check timed out");
            false
        }
    }
}

pub(crate) async fn health_check_route(ctx: web::Data<AppContext>) -> impl Responder {
    let database_status = database_status(&ctx.config, ctx.db_service.health_check()).await;
    let status_code = if database_status {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    HttpResponse::build(status_code).json(serde_json::json!({
        "database": database_status,
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reviewbot_config::Config;
    use reviewbot_database_interface::DatabaseError;

    use super::database_status;

    #[tokio::test]
    async fn slow_database_is_down() {
        let mut config = Config::from_env_no_version();
        config.server.request_timeout = 10;

        let status = database_status(&config, async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(())
        })
        .await;
        assert!(!status);
    }

    #[tokio::test]
    async fn database_up_or_failing() {
        let mut config = Config::from_env_no_version();
        config.server.request_timeout = 1000;

        assert!(database_status(&config, async { Ok(()) }).await);
        assert!(
            !database_status(&config, async {
                Err(DatabaseError::ImplementationError {
                    operation: "check database health",
                    source: "connection refused".into(),
                })
            })
            .await
        );
    }
}
