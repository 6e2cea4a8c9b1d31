//! Domain layer: graph structures and traversal algorithms.

pub mod graph;
pub mod path;
pub mod preview;
pub mod validator;
