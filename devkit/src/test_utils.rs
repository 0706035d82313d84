/*!
Test Harness pour le dashboard

Envoie des requêtes HTTP directement au Router Axum (sans socket) et
facilite les assertions sur les redirections et le HTML rendu.
*/

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

/// Init du logging pour tests (idempotent)
pub fn init_test_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init()
        .ok();
}

pub struct TestHarness {
    router: Router,
}

impl TestHarness {
    pub fn new(router: Router) -> Self {
        init_test_tracing();
        Self { router }
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .context("invalid request")?;

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = String::from_utf8(bytes.to_vec()).context("body is not UTF-8")?;

        tracing::debug!(uri, %status, "[harness] response");
        Ok(TestResponse { status, headers, body })
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// Valeur décodée d'un paramètre de la redirection (ex: "error" dans "/?error=...")
    pub fn redirect_param(&self, key: &str) -> Option<String> {
        let location = self.location()?;
        let (_, query) = location.split_once('?')?;
        query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            if k != key {
                return None;
            }
            urlencoding::decode(v).ok().map(|decoded| decoded.into_owned())
        })
    }

    /// Assert redirection 302 vers "/" avec `key` = `expected`
    pub fn assert_redirect(&self, key: &str, expected: &str) -> Result<()> {
        if self.status != StatusCode::FOUND {
            anyhow::bail!("expected 302 redirect, got {} (body: {})", self.status, self.body);
        }
        let location = self.location().unwrap_or_default();
        if !location.starts_with("/?") {
            anyhow::bail!("redirect target is not the home page: {}", location);
        }
        match self.redirect_param(key) {
            Some(actual) if actual == expected => Ok(()),
            Some(actual) => anyhow::bail!("{} mismatch: expected {:?}, got {:?}", key, expected, actual),
            None => anyhow::bail!("no {} parameter in redirect {}", key, location),
        }
    }

    pub fn assert_body_contains(&self, needle: &str) -> Result<()> {
        if self.body.contains(needle) {
            Ok(())
        } else {
            anyhow::bail!("body does not contain {:?}: {}", needle, self.body)
        }
    }
}
