use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use nimbus_core::DriverError;

/// Erreurs non récupérables d'une requête: elles deviennent une page 500 générique.
/// Les erreurs de lookup ne passent jamais par ici (redirection avec message).
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("compute driver: {0}")]
    Driver(#[from] DriverError),
    #[error("template rendering: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "[dashboard] request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Internal Server Error</h1>"),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_is_generic_500() {
        let response = DashboardError::from(DriverError::Http("timeout".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
