use nimbus_core::ChartUrls;
use serde::Deserialize;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const CONFIG_ENV: &str = "NIMBUS_CONFIG";
pub const CHARTS_ENV: &str = "NIMBUS_CHARTS";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_CHARTS_PATH: &str = "charts.json";

/// Compte de service + projet GCE, lus une seule fois au démarrage.
/// Le YAML étant un sur-ensemble du JSON, un `config.json` est accepté tel quel.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// email du compte de service
    pub email: String,
    /// chemin de la clé (JSON de compte de service ou PEM)
    #[serde(rename = "config")]
    pub key_file: PathBuf,
    pub project: String,
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// dossier de templates qui remplace les templates embarqués
    pub templates: Option<PathBuf>,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid chart mapping {path}: {source}")]
    Charts {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn path_from_env(var: &str, default: &str) -> PathBuf {
    std::env::var(var).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

pub async fn load_config() -> Result<DashboardConfig, ConfigError> {
    load_config_from(&path_from_env(CONFIG_ENV, DEFAULT_CONFIG_PATH)).await
}

pub async fn load_config_from(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let txt = fs::read_to_string(path).await.map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&txt).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn load_charts() -> Result<ChartUrls, ConfigError> {
    load_charts_from(&path_from_env(CHARTS_ENV, DEFAULT_CHARTS_PATH)).await
}

/// Mapping node id -> URLs de charts. Fichier absent = mapping vide.
pub async fn load_charts_from(path: &Path) -> Result<ChartUrls, ConfigError> {
    let txt = match fs::read_to_string(path).await {
        Ok(txt) => txt,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "[dashboard] no chart mapping, charts disabled");
            return Ok(ChartUrls::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if txt.trim().is_empty() {
        return Ok(ChartUrls::default());
    }
    ChartUrls::from_json_str(&txt).map_err(|source| ConfigError::Charts {
        path: path.to_path_buf(),
        source,
    })
}
