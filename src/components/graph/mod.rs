pub mod canvas;
pub mod color;
pub mod frame;
pub mod nearest;
pub mod region;
mod types;

pub use types::{GraphNode, Snapshot};
