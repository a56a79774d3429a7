use super::Distance;
use slotmap::new_key_type;
use std::{fmt::Display, sync::Arc};

new_key_type! { pub struct NodeId; }

/// A single location in the shipping network.
///
/// Every node carries a name that is unique across the whole tree. Non-root
/// nodes additionally carry the distance (in Km) of the edge connecting them
/// to their parent; the root carries none.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    node_id: Option<NodeId>,
    parent_id: Option<NodeId>,
    child_ids: Vec<NodeId>,
    distance: Option<Distance>,
    name: Arc<str>,
}

impl Node {
    pub(crate) fn new(name: Arc<str>, distance: Option<Distance>) -> Self {
        Self {
            node_id: None,
            parent_id: None,
            child_ids: Vec::new(),
            distance,
            name,
        }
    }

    pub fn name(&self) -> Arc<str> { self.name.clone() }

    /// Distance in Km from this node's parent. `None` on the root.
    pub fn distance(&self) -> Option<Distance> { self.distance }

    pub fn node_id(&self) -> Option<&NodeId> { self.node_id.as_ref() }
    pub(crate) fn set_node_id(&mut self, node_id: NodeId) { self.node_id = Some(node_id); }
    pub fn parent_id(&self) -> Option<&NodeId> { self.parent_id.as_ref() }
    pub(crate) fn set_parent_id(&mut self, node_id: Option<NodeId>) { self.parent_id = node_id; }
    pub fn child_ids(&self) -> &[NodeId] { &self.child_ids }
    pub fn child_node_count(&self) -> usize { self.child_ids.len() }
    pub(crate) fn add_child_id(&mut self, node_id: NodeId) { self.child_ids.push(node_id) }
    pub fn is_leaf(&self) -> bool { self.child_ids.is_empty() }
    pub fn is_root(&self) -> bool { self.parent_id.is_none() }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let disp = format!("{self:?}");
        write!(f, "{}", &disp[7..disp.len() - 1])
    }
}

impl From<NodeId> for String {
    fn from(node_id: NodeId) -> Self { format!("{node_id}") }
}
