/**
 * CONVERSION GCE -> NODE - Modèle du SDK Compute Engine vers le modèle du dashboard
 *
 * RÔLE : Aplatit la liste agrégée (une entrée par zone) en `Node`, calcule
 * l'identifiant compatible avec les fichiers de charts existants et traduit
 * les statuts du provider.
 */

use google_cloud_compute_v1::model::{Instance, InstanceAggregatedList, Operation};
use nimbus_core::{Node, NodeState};
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

/// Tag provider mélangé à l'identifiant des nodes.
const PROVIDER_TYPE: &str = "gce";

/// Identifiant dashboard d'une instance : SHA-1 hex de "{instance_id}:gce".
/// Les fichiers charts.json existants sont indexés ainsi.
pub fn node_uuid(instance_id: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{instance_id}:{PROVIDER_TYPE}").as_bytes());
    hex::encode(hasher.finalize())
}

pub fn parse_status(status: &str) -> NodeState {
    match status {
        "RUNNING" => NodeState::Running,
        "PROVISIONING" | "STAGING" => NodeState::Pending,
        "STOPPING" => NodeState::Stopping,
        "STOPPED" | "TERMINATED" => NodeState::Stopped,
        "SUSPENDING" | "SUSPENDED" => NodeState::Suspended,
        _ => NodeState::Unknown,
    }
}

/// Dernier segment d'une URL de ressource ("…/zones/us-central1-a" -> "us-central1-a").
pub fn short_name(resource_url: &str) -> &str {
    resource_url.rsplit('/').next().unwrap_or(resource_url)
}

pub fn instance_to_node(instance: Instance) -> Node {
    let mut public_ips = Vec::new();
    let mut private_ips = Vec::new();
    for nic in &instance.network_interfaces {
        if let Some(ip) = &nic.network_ip {
            private_ips.push(ip.clone());
        }
        public_ips.extend(nic.access_configs.iter().filter_map(|ac| ac.nat_ip.clone()));
    }

    let instance_id = instance.id.map(|id| id.to_string()).unwrap_or_default();
    let state = instance
        .status
        .as_ref()
        .and_then(|s| s.name())
        .map(parse_status)
        .unwrap_or(NodeState::Unknown);

    Node {
        id: node_uuid(&instance_id),
        instance_id,
        name: instance.name.unwrap_or_default(),
        state,
        zone: instance.zone.as_deref().map(|z| short_name(z).to_string()),
        machine_type: instance.machine_type.as_deref().map(|m| short_name(m).to_string()),
        public_ips,
        private_ips,
        created_at: instance.creation_timestamp,
    }
}

/// Nodes d'une page agrégée, triés par nom de scope puis dans l'ordre du provider.
/// Les zones sans instance ne portent qu'un `warning` et ne donnent rien.
pub fn aggregated_nodes(page: InstanceAggregatedList) -> Vec<Node> {
    let zones: BTreeMap<_, _> = page.items.into_iter().collect();
    zones
        .into_values()
        .flat_map(|scoped| scoped.instances)
        .map(instance_to_node)
        .collect()
}

/// Messages d'erreur joints d'une opération terminée, si elle a échoué.
pub fn operation_failure(op: &Operation) -> Option<String> {
    if let Some(error) = &op.error {
        let parts: Vec<String> = error
            .errors
            .iter()
            .map(|e| match (&e.code, &e.message) {
                (Some(code), Some(msg)) => format!("{code}: {msg}"),
                (None, Some(msg)) => msg.clone(),
                (Some(code), None) => code.clone(),
                (None, None) => "unknown error".to_string(),
            })
            .collect();
        return Some(if parts.is_empty() { "unknown error".to_string() } else { parts.join("; ") });
    }
    op.http_error_message.clone()
}
