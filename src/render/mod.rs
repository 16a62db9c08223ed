pub mod graph;
pub mod mermaid;

pub use graph::*;
pub use mermaid::*;
