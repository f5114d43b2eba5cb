use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::database::client::Database;
use crate::entities::local_user_entity::LocalUserDbService;
use crate::entities::post_entity::PostDbService;
use crate::middleware::{ctx::Ctx, error::AppResult, mw_ctx::CtxState};
use crate::routes::{auth_routes, posts};

pub async fn run_migrations(database: &Database) -> AppResult<()> {
    let db = &database.client;
    let c = Ctx::new(Ok("migrations".to_string()), Uuid::new_v4());

    LocalUserDbService { db, ctx: &c }.mutate_db().await?;
    PostDbService { db, ctx: &c }.mutate_db().await?;
    Ok(())
}

pub fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .route("/hc", get(get_hc))
        .merge(auth_routes::routes())
        .merge(posts::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx_state.clone())
}

async fn get_hc() -> &'static str {
    "ok"
}
