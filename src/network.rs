mod flatten;
mod node;
mod tree;

pub type Distance = f64;

pub use flatten::Edge;
pub use node::{Node, NodeId};
pub use tree::{DISTRIBUTION_CENTER, Itinerary, LocationTree, NetworkError};
