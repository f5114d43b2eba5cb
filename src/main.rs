use std::net::{Ipv4Addr, SocketAddr};

use tracing::info;
use tracing_subscriber::EnvFilter;

use pulse_server::config::AppConfig;
use pulse_server::database::client::{Database, DbConfig};
use pulse_server::init;
use pulse_server::middleware::error::AppResult;
use pulse_server::middleware::mw_ctx::create_ctx_state;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if config.is_development {
                EnvFilter::new("pulse_server=debug,tower_http=debug")
            } else {
                EnvFilter::new("pulse_server=info")
            }
        }))
        .init();

    let db = Database::connect(DbConfig {
        url: &config.db_url,
        database: &config.db_database,
        namespace: &config.db_namespace,
        username: config.db_username.as_deref(),
        password: config.db_password.as_deref(),
    })
    .await?;

    init::run_migrations(&db).await?;

    let ctx_state = create_ctx_state(db, &config);
    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.listen_port));
    info!("->> LISTENING on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind listen address");

    axum::serve(listener, routes_all.into_make_service())
        .await
        .expect("server run");

    Ok(())
}
