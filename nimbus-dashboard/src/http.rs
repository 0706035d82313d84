/**
 * DASHBOARD HTTP - Routes du serveur web
 *
 * RÔLE :
 * Chaque route = au plus un appel au driver cloud + un filtre sur la liste des nodes.
 *
 * ROUTES :
 * - GET /                    liste des nodes (+ bandeaux ?error= / ?success=)
 * - GET /info/{id}           détail d'un node + charts de monitoring
 * - GET /start_server/{id}   démarrage, puis redirection vers / avec message
 * - GET /stop_server/{id}    arrêt, puis redirection vers / avec message
 * - GET /health              liveness
 *
 * ERREURS :
 * - lookup (0 ou >1 nodes) : redirection 302 vers /?error=..., driver non appelé
 * - erreurs du driver : page 500 générique (voir error.rs)
 */

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use handlebars::Handlebars;
use nimbus_core::{resolve_node, ChartUrls, ComputeDriver, LookupError};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::DashboardError;
use crate::render::{self, IndexPage, InfoPage};

#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<dyn ComputeDriver>,
    pub charts: Arc<ChartUrls>,
    pub templates: Arc<Handlebars<'static>>,
}

#[derive(Debug, Deserialize)]
struct StatusParams {
    error: Option<String>,
    success: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Power {
    Start,
    Stop,
}

impl Power {
    fn failure_message(self, id: &str, err: &LookupError) -> String {
        match (self, err) {
            (Power::Start, LookupError::NotFound) => {
                format!("Cannot start server with UUID {}: Not Found", id)
            }
            (Power::Start, LookupError::AmbiguousCount(n)) => {
                format!("Error starting server {}: {} nodes found", id, n)
            }
            (Power::Stop, LookupError::NotFound) => {
                format!("Cannot stop server with UUID {}: Not Found", id)
            }
            (Power::Stop, LookupError::AmbiguousCount(n)) => {
                format!("Error stopping server {}: {} nodes found", id, n)
            }
        }
    }

    fn success_message(self, id: &str) -> String {
        match self {
            Power::Start => format!("Successfully started server {}", id),
            Power::Stop => format!("Successfully stopped server {}", id),
        }
    }
}

fn info_failure_message(id: &str, err: &LookupError) -> String {
    match err {
        LookupError::NotFound => format!("Cannot get info for server with UUID {}: Not Found", id),
        LookupError::AmbiguousCount(n) => {
            format!("Error getting info for server {}: {} nodes found", id, n)
        }
    }
}

fn redirect_home(key: &str, message: &str) -> Response {
    let location = format!("/?{}={}", key, urlencoding::encode(message));
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn home_with_error(message: &str) -> Response {
    redirect_home("error", message)
}

fn home_with_success(message: &str) -> Response {
    redirect_home("success", message)
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/", get(index))
        .route("/info/{id}", get(info))
        .route("/start_server/{id}", get(start_server))
        .route("/stop_server/{id}", get(stop_server))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

// GET / (liste)
async fn index(
    State(app): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<Html<String>, DashboardError> {
    let servers = app.driver.list_nodes().await?;
    let page = IndexPage {
        error: params.error,
        success: params.success,
        servers,
    };
    Ok(Html(app.templates.render(render::INDEX, &page)?))
}

// GET /info/{id} (détail + charts)
async fn info(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, DashboardError> {
    let nodes = app.driver.list_nodes().await?;
    let server = match resolve_node(&nodes, &id) {
        Ok(node) => node,
        Err(e) => return Ok(home_with_error(&info_failure_message(&id, &e))),
    };

    let page = InfoPage {
        server,
        chart_urls: app.charts.for_node(&id),
    };
    Ok(Html(app.templates.render(render::INFO, &page)?).into_response())
}

// GET /start_server/{id}
async fn start_server(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, DashboardError> {
    power(&app, &id, Power::Start).await
}

// GET /stop_server/{id}
async fn stop_server(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, DashboardError> {
    power(&app, &id, Power::Stop).await
}

async fn power(app: &AppState, id: &str, action: Power) -> Result<Response, DashboardError> {
    let nodes = app.driver.list_nodes().await?;
    let node = match resolve_node(&nodes, id) {
        Ok(node) => node,
        Err(e) => {
            tracing::warn!(node = id, ?action, error = %e, "[dashboard] lookup failed");
            return Ok(home_with_error(&action.failure_message(id, &e)));
        }
    };

    // pas de vérification d'état: un double start part tel quel chez le provider
    tracing::info!(node = id, name = %node.name, ?action, "[dashboard] power action");
    match action {
        Power::Start => app.driver.start_node(node).await?,
        Power::Stop => app.driver.stop_node(node).await?,
    }
    Ok(home_with_success(&action.success_message(id)))
}
