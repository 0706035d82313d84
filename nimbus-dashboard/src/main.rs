/**
 * NIMBUS DASHBOARD - Point d'entrée du serveur web
 *
 * RÔLE : Charge la config (compte de service GCE + mapping des charts),
 * construit le driver et les templates une seule fois, puis sert les routes HTTP.
 *
 * ARCHITECTURE : état explicite (AppState) passé à chaque handler, aucun global.
 */

mod config;
mod error;
mod http;
mod render;

use crate::config::{load_charts, load_config};
use crate::http::AppState;

use anyhow::Context;
use nimbus_gce::GceDriver;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Charger les variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = load_config().await.context("loading dashboard config")?;

    let driver = GceDriver::connect(&cfg.email, &cfg.key_file, &cfg.project)
        .await
        .context("initialising Compute Engine driver")?;

    let charts = load_charts().await.context("loading chart mapping")?;
    tracing::info!(nodes_with_charts = charts.len(), "[dashboard] chart mapping loaded");

    let templates = render::build_registry(cfg.templates.as_deref()).context("loading templates")?;

    // fabrique l'état unique pour Axum
    let app_state = AppState {
        driver: Arc::new(driver),
        charts: Arc::new(charts),
        templates: Arc::new(templates),
    };

    let app = http::build_router(app_state);

    let listener = TcpListener::bind(cfg.listen)
        .await
        .with_context(|| format!("binding {}", cfg.listen))?;
    tracing::info!(addr = %cfg.listen, "[dashboard] listening on http://{}", cfg.listen);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
