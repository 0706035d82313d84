/*!
# Nimbus DevKit - Stubs et Utilitaires pour Développement

Bibliothèque facilitant le test du dashboard sans compte cloud:
- Driver en mémoire qui enregistre les appels start/stop
- Builder de nodes de test
- Harness HTTP qui pilote le Router directement
*/

pub mod driver_stub;
pub mod test_utils;

pub use driver_stub::{DriverCall, NodeBuilder, StubDriver};
pub use test_utils::{init_test_tracing, TestHarness, TestResponse};
