//! crudhub entry point: loads settings, opens storage and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crudhub::inbound::http::health::HealthState;
use crudhub::inbound::http::session_config::{BuildMode, session_settings_from_env};
use crudhub::inbound::http::state::CookiePolicy;
use crudhub::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use crudhub::outbound::security::SigningSecret;

use server::{AppSettings, ServerConfig, StoragePaths, create_server, drain_on_shutdown_signal};

async fn connect_database(database_url: &str) -> color_eyre::Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply database migrations")?;
    info!(applied, "database migrations up to date");

    DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("failed to build database pool")
}

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    let storage = StoragePaths {
        nlu_data_path: settings.nlu_data_path()?,
        upload_root: settings.upload_root()?,
    };
    let cookies = CookiePolicy {
        secure: session.cookie_secure,
        same_site: session.same_site,
    };
    let mut config = ServerConfig::new(
        session.key,
        cookies,
        settings.bind_addr(),
        storage,
        SigningSecret::new(session.token_secret.to_vec()),
    )
    .with_token_lifetimes(settings.token_lifetimes()?);

    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect_database(database_url).await?);
    }

    #[cfg(feature = "metrics")]
    {
        let metrics = server::prometheus_middleware()
            .map_err(|err| eyre!("failed to configure Prometheus metrics: {err}"))?;
        config = config.with_metrics(Some(metrics));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on_shutdown_signal(health_state, server.handle()));
    server.await?;
    Ok(())
}
