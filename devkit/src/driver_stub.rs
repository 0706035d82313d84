/*!
Stub ComputeDriver pour développement sans compte cloud

Sert une liste de nodes en mémoire et enregistre chaque appel (list/start/stop)
pour les assertions de tests. Les transitions d'état sont simulées comme le
ferait le provider.
*/

use async_trait::async_trait;
use nimbus_core::{ComputeDriver, DriverError, Node, NodeState};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    List,
    Start(String),
    Stop(String),
}

/// Driver en mémoire, clonable (état partagé entre clones)
#[derive(Clone, Default)]
pub struct StubDriver {
    nodes: Arc<Mutex<Vec<Node>>>,
    calls: Arc<Mutex<Vec<DriverCall>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl StubDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        let stub = Self::new();
        stub.set_nodes(nodes);
        stub
    }

    pub fn set_nodes(&self, nodes: Vec<Node>) {
        *self.nodes.lock() = nodes;
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.nodes.lock().clone()
    }

    /// Tous les appels suivants échouent avec une erreur réseau simulée
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().clone()
    }

    /// Ids des nodes passés à start_node, dans l'ordre
    pub fn start_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                DriverCall::Start(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn stop_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                DriverCall::Stop(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
        *self.failure.lock() = None;
    }

    fn record(&self, call: DriverCall) -> Result<(), DriverError> {
        tracing::debug!(?call, "[stub] driver call");
        self.calls.lock().push(call);
        match self.failure.lock().as_ref() {
            Some(message) => Err(DriverError::Http(message.clone())),
            None => Ok(()),
        }
    }

    fn set_state(&self, target: &Node, state: NodeState) {
        for node in self.nodes.lock().iter_mut() {
            if node.instance_id == target.instance_id {
                node.state = state;
            }
        }
    }
}

#[async_trait]
impl ComputeDriver for StubDriver {
    async fn list_nodes(&self) -> Result<Vec<Node>, DriverError> {
        self.record(DriverCall::List)?;
        Ok(self.nodes())
    }

    async fn start_node(&self, node: &Node) -> Result<(), DriverError> {
        self.record(DriverCall::Start(node.id.clone()))?;
        self.set_state(node, NodeState::Running);
        Ok(())
    }

    async fn stop_node(&self, node: &Node) -> Result<(), DriverError> {
        self.record(DriverCall::Stop(node.id.clone()))?;
        self.set_state(node, NodeState::Stopped);
        Ok(())
    }
}

/// Helper pour construire des nodes de test
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self { node: Node::new(id.clone(), format!("node-{id}")) }
    }

    pub fn instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.node.instance_id = instance_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.node.name = name.into();
        self
    }

    pub fn state(mut self, state: NodeState) -> Self {
        self.node.state = state;
        self
    }

    pub fn zone(mut self, zone: impl Into<String>) -> Self {
        self.node.zone = Some(zone.into());
        self
    }

    pub fn machine_type(mut self, machine_type: impl Into<String>) -> Self {
        self.node.machine_type = Some(machine_type.into());
        self
    }

    pub fn public_ip(mut self, ip: impl Into<String>) -> Self {
        self.node.public_ips.push(ip.into());
        self
    }

    pub fn private_ip(mut self, ip: impl Into<String>) -> Self {
        self.node.private_ips.push(ip.into());
        self
    }

    pub fn build(self) -> Node {
        self.node
    }
}
