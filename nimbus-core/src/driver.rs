use async_trait::async_trait;

use crate::error::DriverError;
use crate::node::Node;

/// Adaptateur vers le provider cloud. Les transitions d'état sont validées par
/// le provider : l'appelant transmet les commandes sans vérifier l'état courant.
#[async_trait]
pub trait ComputeDriver: Send + Sync {
    /// Tous les nodes visibles par le compte configuré, dans l'ordre du provider.
    async fn list_nodes(&self) -> Result<Vec<Node>, DriverError>;

    async fn start_node(&self, node: &Node) -> Result<(), DriverError>;

    async fn stop_node(&self, node: &Node) -> Result<(), DriverError>;
}
