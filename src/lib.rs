//! conf2nix renders an evaluated Kconfig-style configuration tree as a Nix
//! attribute set consumable by the nixpkgs kernel config system.
//!
//! The heavy lifting is done elsewhere: an external evaluator resolves the
//! configuration description into the menu/symbol dump this crate consumes.
//! Here the dump is parsed ([`parser`]), symbol values are stabilized and
//! visibility queried ([`eval`]), and the tree is walked depth-first into
//! the final document ([`renderer`]).

pub mod eval;
pub mod options;
pub mod parser;
pub mod renderer;


pub use eval::Evaluator;
pub use options::{NoValueMode, RenderOptions};
pub use renderer::{NixRenderer, RenderedConfig};
