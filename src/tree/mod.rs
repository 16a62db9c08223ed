pub mod builder;
pub mod node;

pub use builder::*;
pub use node::*;
