//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the keiro crate.
//! Import this module to get access to the core functionality without having
//! to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use keiro::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Decode a scanner result and render its complete path diagram.
//! let stream_json = std::fs::read_to_string("path/to/stream.json")?;
//! let stream = WorkflowStream::from_json(&stream_json)?;
//!
//! let tree = ControlFlowTree::from_stream(&stream)?;
//! let paths = PathEnumerator::new(EnumerationLimits::default()).enumerate(&tree)?;
//!
//! let diagram = MermaidRenderer::new(RenderOptions::default()).render(&paths);
//! println!("{}", diagram);
//! # Ok(())
//! # }
//! ```

// Scanner-facing data model
pub use crate::stream::{
    ElementKind, FlowElement, IntoStream, OutcomePair, Owner, SignalHandler, WorkflowStream,
};

// Control-flow tree
pub use crate::tree::{ControlFlowNode, ControlFlowTree, TreeBuilder};

// Path enumeration
pub use crate::paths::{EnumerationLimits, ExecutionPath, OutcomeChoice, PathEnumerator};

// Rendering
pub use crate::render::{MermaidRenderer, RenderGraph, RenderOptions};

// Cross-workflow signal resolution
pub use crate::signals::{
    CycleWarning, Resolution, SignalConnection, SignalResolver, UnresolvedSignal,
};

// Error types
pub use crate::error::{MalformedScopeError, PathExplosionError, StreamDecodeError};

// Hash map flavor used throughout the crate
pub use ahash::AHashMap;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
