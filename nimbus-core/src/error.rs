/// Résultat de la résolution d'un node unique par identifiant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Not Found")]
    NotFound,
    /// Les identifiants devraient être uniques, rien ici ne le garantit.
    #[error("{0} nodes found")]
    AmbiguousCount(usize),
}

/// Échecs remontés par un `ComputeDriver`.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("invalid credentials: {0}")]
    Credentials(String),
    #[error("request failed: {0}")]
    Http(String),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("node {0} cannot be addressed by the provider")]
    InvalidNode(String),
    #[error("operation {name} failed: {message}")]
    Operation { name: String, message: String },
}
