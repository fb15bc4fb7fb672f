use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::email::SesNotifier;
use service::registration::service::RegistrationConfig;

use crate::routes::{self, users::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: &Option<configs::AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(cfg) => (cfg.server.host.clone(), cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = configs::AppConfig::load_and_validate().ok();

    // DB connection + schema
    let db = match &cfg {
        Some(cfg) => models::db::connect_with_config(&cfg.database).await?,
        None => models::db::connect().await?,
    };
    migration::Migrator::up(&db, None).await?;

    let email_cfg = cfg.as_ref().map(|c| c.email.clone()).unwrap_or_default();
    let notifier = SesNotifier::connect(
        email_cfg.region.clone(),
        email_cfg.from_address.clone(),
        email_cfg.from_name.clone(),
        email_cfg.verification_base_url.clone(),
    )
    .await;

    let ids = cfg
        .as_ref()
        .map(|c| RegistrationConfig {
            user_id_length: c.ids.user_id_length,
            address_id_length: c.ids.address_id_length,
            verification_token_length: c.ids.verification_token_length,
        })
        .unwrap_or_default();

    let state = ServerState { db, notifier: Arc::new(notifier), ids };

    // Build router
    let app: Router = routes::build_router(build_cors(), state);

    // Bind and serve
    let addr = load_bind_addr(&cfg)?;
    info!(%addr, "starting registration server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
