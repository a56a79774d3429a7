mod network;

pub type Distance = f64;

pub use network::DISTRIBUTION_CENTER;
pub use network::Edge;
pub use network::Itinerary;
pub use network::LocationTree;
pub use network::NetworkError;
pub use network::Node;
pub use network::NodeId;
