pub mod connections;
pub mod counter_node;
pub mod endpoint;
pub mod logging;
pub mod msg;
pub mod params;
pub mod qos;
pub mod reporter;
pub mod runtime;
pub mod time;
pub mod types;

pub use connections::{get_num_connections, NumConnections};
