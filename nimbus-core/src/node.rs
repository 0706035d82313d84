use serde::{Deserialize, Serialize};
use std::fmt;

/// État d'alimentation d'une instance, normalisé entre providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Running,
    Pending,
    Stopping,
    Stopped,
    Suspended,
    Unknown,
}

impl NodeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::Running => "running",
            NodeState::Pending => "pending",
            NodeState::Stopping => "stopping",
            NodeState::Stopped => "stopped",
            NodeState::Suspended => "suspended",
            NodeState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instance de calcul vue par le dashboard.
///
/// `id` sert dans les URLs et le mapping des charts : il est dérivé par le
/// driver et diffère en général de l'id du provider (gardé dans `instance_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub instance_id: String,
    pub name: String,
    pub state: NodeState,
    pub zone: Option<String>,
    pub machine_type: Option<String>,
    pub public_ips: Vec<String>,
    pub private_ips: Vec<String>,
    pub created_at: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            instance_id: id.clone(),
            id,
            name: name.into(),
            state: NodeState::Unknown,
            zone: None,
            machine_type: None,
            public_ips: Vec::new(),
            private_ips: Vec::new(),
            created_at: None,
        }
    }
}
