use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::Duration;

use crate::config::AppConfig;
use crate::database::client::Database;
use crate::utils::jwt::JWT;

pub struct CtxState {
    pub db: Database,
    pub jwt: JWT,
    pub is_development: bool,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CtxState")
    }
}

pub fn create_ctx_state(db: Database, config: &AppConfig) -> Arc<CtxState> {
    Arc::new(CtxState {
        db,
        jwt: JWT::new(config.jwt_secret.clone(), Duration::days(7)),
        is_development: config.is_development,
    })
}
