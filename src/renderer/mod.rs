pub mod components;
pub mod context;
pub mod renderer;
pub mod tree;

pub use components::*;
pub use context::*;
pub use renderer::*;
pub use tree::*;
