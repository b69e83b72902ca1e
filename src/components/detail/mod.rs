mod component;
mod render;
mod state;

pub use component::DetailView;
pub use state::SelectionStatus;
