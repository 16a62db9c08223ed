pub mod conversion;
pub mod element;
pub mod workflow;

pub use conversion::*;
pub use element::*;
pub use workflow::*;
