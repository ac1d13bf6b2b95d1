use actix_web::{web, HttpResponse, Result};
use reviewbot_core::use_cases::stats::GetStatsInterface;
use shaku::HasComponent;

use super::with_deadline;
use crate::server::AppContext;

#[tracing::instrument(skip_all)]
pub(crate) async fn get_stats(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let get_stats: &dyn GetStatsInterface = ctx.core_module.resolve_ref();
    let stats = with_deadline(&ctx.config, get_stats.run(&ctx.as_core_context())).await?;

    Ok(HttpResponse::Ok().json(stats))
}
