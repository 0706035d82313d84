/**
 * IDENTITÉ COMPTE DE SERVICE - Clé locale vers credentials du SDK Google Cloud
 *
 * RÔLE : Lit le fichier de clé indiqué dans la config (clé JSON de la console
 * ou PEM PKCS#8 nu accompagné de l'email) et le confie à google-cloud-auth,
 * qui gère signature, échange et cache des tokens.
 */

use google_cloud_auth::credentials::service_account::{AccessSpecifier, Builder};
use google_cloud_auth::credentials::Credentials;
use nimbus_core::DriverError;
use serde_json::{json, Value};
use std::path::Path;

pub const COMPUTE_SCOPE: &str = "https://www.googleapis.com/auth/compute";

pub async fn from_key_file(email: &str, project: &str, path: &Path) -> Result<Credentials, DriverError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        DriverError::Credentials(format!("cannot read key file {}: {}", path.display(), e))
    })?;
    let key = service_account_key(email, project, &contents)?;
    Builder::new(key)
        .with_access_specifier(AccessSpecifier::from_scopes([COMPUTE_SCOPE]))
        .build()
        .map_err(|e| DriverError::Credentials(format!("invalid service-account key: {}", e)))
}

/// Normalise le contenu du fichier en clé JSON de compte de service.
pub fn service_account_key(email: &str, project: &str, contents: &str) -> Result<Value, DriverError> {
    let trimmed = contents.trim_start();
    if trimmed.starts_with('{') {
        let mut key: Value = serde_json::from_str(trimmed)
            .map_err(|e| DriverError::Credentials(format!("invalid JSON key file: {}", e)))?;
        let Some(fields) = key.as_object_mut() else {
            return Err(DriverError::Credentials("JSON key file is not an object".into()));
        };
        // l'email de la config fait foi, comme pour une clé PEM
        fields.insert("client_email".into(), Value::from(email));
        fields.entry("project_id").or_insert_with(|| Value::from(project));
        return Ok(key);
    }

    if trimmed.contains("PRIVATE KEY") {
        return Ok(json!({
            "type": "service_account",
            "client_email": email,
            "private_key_id": "",
            "private_key": contents,
            "project_id": project,
        }));
    }

    Err(DriverError::Credentials(
        "key file is neither a JSON service-account key nor a PEM private key".into(),
    ))
}
