use super::Distance;
use super::flatten::{Edge, flatten_tree};
use super::node::{Node, NodeId};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use std::fmt::Display;
use std::iter::zip;
use std::sync::Arc;
use thiserror::Error;

/// Name of the fixed root location. Always present, never removed.
pub const DISTRIBUTION_CENTER: &str = "Distribution Center";

/// A shipping network: a rooted tree of uniquely named locations where every
/// non-root node stores the distance (Km) of the edge to its parent. The
/// path between any two locations runs through their lowest common ancestor
/// and is, by tree structure, the only path and therefore the shortest one.
#[derive(Debug, Clone)]
pub struct LocationTree {
    nodes: SlotMap<NodeId, Node>,
    edges: Option<Vec<Edge>>,
    root_id: NodeId,
    name_index: FxHashMap<Arc<str>, NodeId>,
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Location '{0}' already exists in the network.")]
    DuplicateName(String),
    #[error("Location '{0}' does not exist in the network.")]
    NotFound(String),
}

/// The resolved path between two locations: the ordered stop names, origin
/// first and destination last, and the total distance over every edge
/// crossed on the way up to and back down from the common ancestor.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub stops: Vec<Arc<str>>,
    pub total_distance: Distance,
}

impl LocationTree {
    // =========================================================================
    // Construction
    // =========================================================================

    pub fn new() -> Self {
        let mut nodes: SlotMap<NodeId, Node> = SlotMap::with_key();
        let root_name: Arc<str> = Arc::from(DISTRIBUTION_CENTER);

        let mut root = Node::new(root_name.clone(), None);
        let root_id = nodes.insert_with_key(|node_id| {
            root.set_node_id(node_id);
            root
        });

        let mut name_index: FxHashMap<Arc<str>, NodeId> = FxHashMap::default();
        let _ = name_index.insert(root_name, root_id);

        Self { nodes, edges: None, root_id, name_index }
    }

    /// Registers a new location as a direct child of the distribution
    /// center, with no route (and therefore no distance) attached yet.
    ///
    /// Fails with [`NetworkError::DuplicateName`] if any location in the
    /// network, the root included, already carries `name`; the network is
    /// left untouched in that case.
    pub fn add_location<'a>(
        &mut self,
        name: impl Into<&'a str>,
    ) -> Result<NodeId, NetworkError> {
        let name: &str = name.into();
        if self.name_index.contains_key(name) {
            return Err(NetworkError::DuplicateName(name.to_string()));
        }
        Ok(self.attach_node(Arc::from(name), None, self.root_id))
    }

    /// Creates the location `destination` and connects it to the existing
    /// location `origin` with an edge of the given length.
    ///
    /// The two endpoints are deliberately asymmetric: `origin` must already
    /// exist ([`NetworkError::NotFound`] otherwise) while `destination` must
    /// not exist anywhere in the network ([`NetworkError::DuplicateName`]
    /// otherwise). The duplicate check also means a route can never
    /// re-parent a location that was previously added.
    pub fn add_route(
        &mut self,
        origin: &str,
        destination: &str,
        distance: Distance,
    ) -> Result<NodeId, NetworkError> {
        let origin_id = self
            .node_id_by_name(origin)
            .ok_or_else(|| NetworkError::NotFound(origin.to_string()))?;

        if self.name_index.contains_key(destination) {
            return Err(NetworkError::DuplicateName(destination.to_string()));
        }

        Ok(self.attach_node(Arc::from(destination), Some(distance), origin_id))
    }

    fn attach_node(
        &mut self,
        name: Arc<str>,
        distance: Option<Distance>,
        parent_node_id: NodeId,
    ) -> NodeId {
        let mut node = Node::new(name.clone(), distance);
        node.set_parent_id(Some(parent_node_id));

        let node_id = self.nodes.insert_with_key(|node_id| {
            node.set_node_id(node_id);
            node
        });

        if let Some(parent_node) = self.nodes.get_mut(parent_node_id) {
            parent_node.add_child_id(node_id);
        }

        let _ = self.name_index.insert(name, node_id);
        self.edges = None;

        node_id
    }

    // =========================================================================
    // Network Properties
    // =========================================================================

    /// True iff nothing hangs off the distribution center yet.
    pub fn is_empty(&self) -> bool {
        self.nodes[self.root_id].child_node_count() == 0
    }

    /// Number of locations in the network, the root excluded.
    pub fn location_count(&self) -> usize {
        self.nodes.len() - 1
    }

    // =========================================================================
    // Node Access
    // =========================================================================

    pub fn node(&self, node_id: Option<NodeId>) -> Option<&Node> {
        if let Some(node_id) = node_id { self.nodes.get(node_id) } else { None }
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    /// Every name resolution in the network goes through this index; it is
    /// maintained on insert, so lookups are O(1) and the tree-wide name
    /// uniqueness invariant has a single enforcement point.
    pub fn node_id_by_name<'a>(&self, name: impl Into<&'a str>) -> Option<NodeId> {
        let name: &str = name.into();
        self.name_index.get(name).copied()
    }

    pub fn find_location<'a>(
        &self,
        name: impl Into<&'a str>,
    ) -> Result<&Node, NetworkError> {
        let name: &str = name.into();
        match self.node_id_by_name(name) {
            Some(node_id) => Ok(&self.nodes[node_id]),
            None => Err(NetworkError::NotFound(name.to_string())),
        }
    }

    pub fn name(&self, node_id: &NodeId) -> Arc<str> {
        self.nodes[*node_id].name()
    }

    pub fn distance(&self, node_id: NodeId) -> Option<Distance> {
        self.nodes[node_id].distance()
    }

    // =========================================================================
    // Network Traversal
    // =========================================================================

    pub fn parent_id(&self, node_id: &NodeId) -> Option<&NodeId> {
        self.nodes[*node_id].parent_id()
    }

    pub fn child_ids(&self, node_id: &NodeId) -> &[NodeId] {
        self.nodes[*node_id].child_ids()
    }

    pub fn children(&self, node_id: &NodeId) -> Vec<&Node> {
        let mut result = Vec::new();
        for &child_id in self.child_ids(node_id) {
            let child_node = &self.nodes[child_id];
            result.push(child_node);
        }
        result
    }

    /// All location names except the root, sorted lexicographically.
    pub fn sorted_locations(&self) -> Vec<Arc<str>> {
        let mut names: Vec<Arc<str>> = self
            .nodes
            .values()
            .filter(|node| !node.is_root())
            .map(|node| node.name())
            .collect();

        // Use parallel sorting for larger networks
        if names.len() > 100 {
            names.par_sort();
        } else {
            names.sort();
        }

        names
    }

    /// Ancestors of `node_id` from the root down to and including the node
    /// itself, root first.
    fn root_path(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut path = vec![node_id];
        let mut current_node_id = node_id;

        while let Some(&parent_node_id) = self.nodes[current_node_id].parent_id() {
            path.push(parent_node_id);
            current_node_id = parent_node_id;
        }

        path.reverse();
        path
    }

    /// The deepest node that is an ancestor of both arguments: the last
    /// position at which the two root paths still agree. Since every node
    /// descends from the root, the common prefix is never empty.
    pub fn lowest_common_ancestor(
        &self,
        left_node_id: NodeId,
        right_node_id: NodeId,
    ) -> NodeId {
        let left_path = self.root_path(left_node_id);
        let right_path = self.root_path(right_node_id);

        let mut lca_id = self.root_id;
        for (left_id, right_id) in zip(left_path, right_path) {
            if left_id == right_id {
                lca_id = left_id;
            } else {
                break;
            }
        }

        lca_id
    }

    /// Resolves the unique tree path between two locations.
    ///
    /// Both legs ascend toward the lowest common ancestor, each visited node
    /// contributing its own edge distance exactly once; the ancestor itself
    /// contributes nothing and is emitted once when the legs are joined.
    /// When one endpoint is an ancestor of the other, one leg is simply
    /// empty. When the endpoints coincide, the result is a single stop with
    /// total distance zero.
    pub fn shortest_path(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Itinerary, NetworkError> {
        let origin_id = self
            .node_id_by_name(origin)
            .ok_or_else(|| NetworkError::NotFound(origin.to_string()))?;
        let destination_id = self
            .node_id_by_name(destination)
            .ok_or_else(|| NetworkError::NotFound(destination.to_string()))?;

        let lca_id = self.lowest_common_ancestor(origin_id, destination_id);

        let mut stops: Vec<Arc<str>> = Vec::new();
        let mut total_distance: Distance = 0.0;

        // Ascend from the origin, stopping short of the common ancestor.
        let mut current_node_id = origin_id;
        while current_node_id != lca_id {
            let node = &self.nodes[current_node_id];
            stops.push(node.name());
            total_distance += node.distance().unwrap_or(0.0);
            match node.parent_id() {
                Some(&parent_node_id) => current_node_id = parent_node_id,
                None => break,
            }
        }

        stops.push(self.name(&lca_id));

        // Ascend from the destination the same way; this leg is collected
        // destination-first and reversed so the joined path reads
        // origin → ancestor → destination.
        let mut descent: Vec<Arc<str>> = Vec::new();
        let mut current_node_id = destination_id;
        while current_node_id != lca_id {
            let node = &self.nodes[current_node_id];
            descent.push(node.name());
            total_distance += node.distance().unwrap_or(0.0);
            match node.parent_id() {
                Some(&parent_node_id) => current_node_id = parent_node_id,
                None => break,
            }
        }

        descent.reverse();
        stops.extend(descent);

        Ok(Itinerary { stops, total_distance })
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    pub fn needs_edge_rebuild(&self) -> bool {
        self.edges.is_none()
    }

    /// Rebuilds the flattened pre-order export of the network. Mutations
    /// invalidate the cache; rendering callers rebuild once per change.
    pub fn rebuild_edges(&mut self) {
        if self.needs_edge_rebuild() {
            let mut edges = flatten_tree(self);

            for (edge_idx, edge) in edges.iter_mut().enumerate() {
                edge.edge_idx = edge_idx;
            }

            self.edges = Some(edges);
        }
    }

    pub fn edges(&self) -> Option<&Vec<Edge>> {
        self.edges.as_ref()
    }

    // =========================================================================
    // Display
    // =========================================================================

    fn print_tree(&self) -> String {
        let mut result: String = String::new();
        result.push_str(&format!(
            "Locations: {}\n{}\n\n",
            self.location_count(),
            match self.is_empty() {
                true => "Empty",
                false => "Populated",
            },
        ));

        if let Some(node) = self.node(Some(self.root_id)) {
            result.push_str(&self.print_node(node, 0));
        }

        result
    }

    fn print_node(&self, node: &Node, level: usize) -> String {
        let mut result: String = String::new();
        result.push_str(&format!(
            "{}- {}{}\n",
            " ".repeat(level * 4),
            node.name(),
            if let Some(distance) = node.distance() {
                format!(" | {distance} Km")
            } else {
                String::new()
            },
        ));

        for &child_node_id in node.child_ids() {
            result.push_str(&self.print_node(&self.nodes[child_node_id], level + 1));
        }

        result
    }
}

impl Default for LocationTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for LocationTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.print_tree())
    }
}

impl Display for Itinerary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} Km)", self.stops.join(" → "), self.total_distance)
    }
}
