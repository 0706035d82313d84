/**
 * LOOKUP NODES - Résolution d'un identifiant dashboard dans la liste du provider
 *
 * RÔLE : filtre O(n) sans effet de bord. Zéro ou plusieurs correspondances
 * restent des erreurs récupérables, transformées en message par les handlers.
 */

use crate::error::LookupError;
use crate::node::Node;

/// Tous les nodes dont l'identifiant vaut `id`, dans l'ordre d'origine.
pub fn find_nodes<'a>(nodes: &'a [Node], id: &str) -> Vec<&'a Node> {
    nodes.iter().filter(|node| node.id == id).collect()
}

/// Exactement un node pour `id`, sinon `NotFound` ou `AmbiguousCount`.
pub fn resolve_node<'a>(nodes: &'a [Node], id: &str) -> Result<&'a Node, LookupError> {
    match find_nodes(nodes, id).as_slice() {
        [] => Err(LookupError::NotFound),
        [node] => Ok(*node),
        many => Err(LookupError::AmbiguousCount(many.len())),
    }
}
