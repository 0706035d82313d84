use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping statique node id -> URLs de charts de monitoring (iframes).
///
/// Chargé une fois au démarrage, lecture seule ensuite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartUrls {
    urls: HashMap<String, Vec<String>>,
}

impl ChartUrls {
    pub fn new(urls: HashMap<String, Vec<String>>) -> Self {
        Self { urls }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, node_id: &str) -> Option<&[String]> {
        self.urls.get(node_id).map(Vec::as_slice)
    }

    /// URLs de charts d'un node, vide si le node n'a pas d'entrée.
    pub fn for_node(&self, node_id: &str) -> &[String] {
        self.get(node_id).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
