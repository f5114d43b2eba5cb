use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::{
    middleware::{ctx::Ctx, error::CtxResult, mw_ctx::CtxState},
    middleware::utils::extractor_utils::JsonValidated,
    services::auth_service::{AuthLoginInput, AuthRegisterInput, AuthService},
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: String,
    pub username: String,
    pub token: String,
}

async fn register(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    JsonValidated(body): JsonValidated<AuthRegisterInput>,
) -> CtxResult<Json<AuthResponse>> {
    let auth_service = AuthService::new(&state.db.client, &ctx, &state.jwt);

    let (token, user) = auth_service.register_password(body).await?;

    Ok(Json(AuthResponse {
        id: user.id.as_ref().unwrap().to_raw(),
        username: user.username,
        token,
    }))
}

async fn login(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    JsonValidated(body): JsonValidated<AuthLoginInput>,
) -> CtxResult<Json<AuthResponse>> {
    let auth_service = AuthService::new(&state.db.client, &ctx, &state.jwt);

    let (token, user) = auth_service.login_password(body).await?;

    Ok(Json(AuthResponse {
        id: user.id.as_ref().unwrap().to_raw(),
        username: user.username,
        token,
    }))
}
