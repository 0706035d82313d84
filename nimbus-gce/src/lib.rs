/**
 * DRIVER GOOGLE COMPUTE ENGINE - Implémentation de ComputeDriver via le SDK google-cloud-rust
 *
 * RÔLE :
 * - list_nodes : liste agrégée des instances de toutes les zones du projet (pagination SDK)
 * - start_node / stop_node : action sur l'instance puis attente de l'opération de zone (poller LRO)
 *
 * Authentification, transport et retries sont délégués au client `Instances`.
 */

pub mod api;
pub mod credentials;

use async_trait::async_trait;
use google_cloud_auth::credentials::Credentials;
use google_cloud_compute_v1::client::Instances;
use google_cloud_compute_v1::model::Operation;
use google_cloud_gax::paginator::Paginator;
use google_cloud_lro::Poller;
use nimbus_core::{ComputeDriver, DriverError, Node};
use std::path::Path;

use crate::api::{aggregated_nodes, operation_failure};

pub struct GceDriver {
    project: String,
    client: Instances,
}

impl GceDriver {
    pub fn new(client: Instances, project: impl Into<String>) -> Self {
        Self { project: project.into(), client }
    }

    /// Charge la clé du compte de service et construit le client Compute Engine.
    pub async fn connect(email: &str, key_path: &Path, project: &str) -> Result<Self, DriverError> {
        let creds = credentials::from_key_file(email, project, key_path).await?;
        let driver = Self::with_credentials(creds, project, None).await?;
        tracing::info!(account = %email, project, "[gce] driver ready");
        Ok(driver)
    }

    /// `endpoint` remplace `https://compute.googleapis.com` (tests, endpoints privés).
    pub async fn with_credentials(
        creds: Credentials,
        project: &str,
        endpoint: Option<&str>,
    ) -> Result<Self, DriverError> {
        let mut builder = Instances::builder().with_credentials(creds);
        if let Some(endpoint) = endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        let client = builder
            .build()
            .await
            .map_err(|e| DriverError::Credentials(format!("cannot build Compute Engine client: {}", e)))?;
        Ok(Self::new(client, project))
    }

    fn zone_of<'a>(node: &'a Node) -> Result<&'a str, DriverError> {
        node.zone
            .as_deref()
            .ok_or_else(|| DriverError::InvalidNode(node.id.clone()))
    }
}

fn api_error(e: google_cloud_compute_v1::Error) -> DriverError {
    match e.http_status_code() {
        Some(status) => DriverError::Api { status, body: e.to_string() },
        None => DriverError::Http(e.to_string()),
    }
}

/// Une opération DONE peut quand même porter une erreur (quota, capacité de zone...).
fn check_operation(op: Operation) -> Result<(), DriverError> {
    match operation_failure(&op) {
        Some(message) => Err(DriverError::Operation { name: op.name.unwrap_or_default(), message }),
        None => Ok(()),
    }
}

#[async_trait]
impl ComputeDriver for GceDriver {
    async fn list_nodes(&self) -> Result<Vec<Node>, DriverError> {
        let mut pages = self
            .client
            .aggregated_list()
            .set_project(self.project.as_str())
            .by_page();

        let mut nodes = Vec::new();
        while let Some(page) = pages.next().await {
            nodes.extend(aggregated_nodes(page.map_err(api_error)?));
        }

        tracing::debug!(count = nodes.len(), "[gce] listed nodes");
        Ok(nodes)
    }

    async fn start_node(&self, node: &Node) -> Result<(), DriverError> {
        let zone = Self::zone_of(node)?;
        tracing::info!(node = %node.name, zone, "[gce] starting instance");
        let op = self
            .client
            .start()
            .set_project(self.project.as_str())
            .set_zone(zone)
            .set_instance(node.name.as_str())
            .poller()
            .until_done()
            .await
            .map_err(api_error)?;
        check_operation(op)
    }

    async fn stop_node(&self, node: &Node) -> Result<(), DriverError> {
        let zone = Self::zone_of(node)?;
        tracing::info!(node = %node.name, zone, "[gce] stopping instance");
        let op = self
            .client
            .stop()
            .set_project(self.project.as_str())
            .set_zone(zone)
            .set_instance(node.name.as_str())
            .poller()
            .until_done()
            .await
            .map_err(api_error)?;
        check_operation(op)
    }
}
