/**
 * NIMBUS CORE - Modèle partagé du dashboard de calcul
 *
 * RÔLE :
 * - Node / NodeState : instances telles que rapportées par un provider cloud
 * - ComputeDriver : point d'intégration avec le provider (list, start, stop)
 * - lookup : résolution d'un node par son identifiant dashboard
 * - ChartUrls : mapping statique node id -> liens de charts de monitoring
 */

pub mod charts;
pub mod driver;
pub mod error;
pub mod lookup;
pub mod node;

pub use charts::ChartUrls;
pub use driver::ComputeDriver;
pub use error::{DriverError, LookupError};
pub use lookup::{find_nodes, resolve_node};
pub use node::{Node, NodeState};
