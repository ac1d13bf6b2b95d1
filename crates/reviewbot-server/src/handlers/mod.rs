//! API handlers.

use std::{future::Future, time::Duration};

use actix_web::web;
use reviewbot_config::Config;

use crate::{Result, ServerError};

mod pulls;
mod stats;
mod teams;
mod users;

pub(crate) fn configure_api_handlers(cfg: &mut web::ServiceConfig) {
    cfg.route("/team/add", web::post().to(teams::add_team))
        .route("/team/get", web::get().to(teams::get_team))
        .route("/users/setIsActive", web::post().to(users::set_is_active))
        .route("/users/getReview", web::get().to(users::get_review))
        .route("/pullRequest/create", web::post().to(pulls::create))
        .route("/pullRequest/merge", web::post().to(pulls::merge))
        .route("/pullRequest/reassign", web::post().to(pulls::reassign))
        .route("/stats", web::get().to(stats::get_stats));
}

/// Run `future` under the configured request deadline, `None` on expiry.
///
/// On expiry the future is dropped, rolling back any open transaction.
pub(crate) async fn within_deadline<F: Future>(config: &Config, future: F) -> Option<F::Output> {
    let timeout = config.server.request_timeout;
    if timeout == 0 {
        return Some(future.await);
    }

    tokio::time::timeout(Duration::from_millis(timeout), future)
        .await
        .ok()
}

/// Run a use case under the configured request deadline.
pub(crate) async fn with_deadline<T, F>(config: &Config, future: F) -> Result<T>
where
    F: Future<Output = reviewbot_core::Result<T>>,
{
    match within_deadline(config, future).await {
        Some(result) => Ok(result?),
        None => Err(ServerError::Timeout),
    }
}
