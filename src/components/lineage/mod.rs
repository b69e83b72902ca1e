mod component;
mod render;
mod state;
mod tree;

pub use component::LineageView;
pub use state::TimestampSelection;
