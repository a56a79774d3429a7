use super::{Distance, LocationTree, NodeId};
use std::sync::Arc;

/// One row of the flattened network: enough to render a location and the
/// edge connecting it to its parent without touching the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub parent_node_id: Option<NodeId>,
    pub node_id: NodeId,
    pub name: Arc<str>,
    pub distance: Option<Distance>,
    pub depth: usize,
    pub is_leaf: bool,
    pub edge_idx: usize,
}

pub(super) fn flatten_tree(tree: &LocationTree) -> Vec<Edge> {
    let mut edges: Vec<Edge> = Vec::new();
    let root_id = tree.root_id();
    _flatten_tree(&root_id, None, 0, tree, &mut edges);
    edges
}

fn _flatten_tree(
    node_id: &NodeId, parent_node_id: Option<NodeId>, depth: usize, tree: &LocationTree,
    edges: &mut Vec<Edge>,
) {
    let child_node_ids: &[NodeId] = tree.child_ids(node_id);

    edges.push(Edge {
        parent_node_id,
        node_id: *node_id,
        name: tree.name(node_id),
        distance: tree.distance(*node_id),
        depth,
        is_leaf: child_node_ids.is_empty(),
        edge_idx: 0,
    });

    for child_node_id in child_node_ids {
        _flatten_tree(child_node_id, Some(*node_id), depth + 1, tree, edges);
    }
}
