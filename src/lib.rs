//! # Keiro - Workflow Control-Flow Analysis Engine
//!
//! **Keiro** statically analyzes long-running workflow definitions and produces
//! exhaustive visual documentation of every possible execution path, without
//! ever executing the workflow. The produced diagram has 1:1 structural
//! correspondence with the branching logic in source: every reachable
//! combination of branch outcomes appears as exactly one path, and no path
//! contains elements that cannot legally co-occur given branch nesting.
//!
//! ## Core Workflow
//!
//! The engine is scanner-agnostic. It operates on a canonical internal model
//! of a "workflow stream": the flat, detection-ordered list of control-flow
//! elements a source scanner found, plus an explicit ownership map recording
//! which branch outcome each element lexically belongs to. The primary
//! workflow is:
//!
//! 1.  **Scan Your Source**: Walk your parsed workflow source and emit a
//!     [`stream::WorkflowStream`], either directly, through the
//!     [`stream::IntoStream`] trait, or as JSON via
//!     [`stream::WorkflowStream::from_json`].
//! 2.  **Build the Tree**: [`tree::ControlFlowTree`] turns the flat stream
//!     into a correctly scoped tree where every branch point has exactly two
//!     outcome subtrees that reconverge to one continuation. Nesting comes
//!     exclusively from the ownership map, never from source position.
//! 3.  **Enumerate Paths**: [`paths::PathEnumerator`] walks the tree and
//!     yields the complete, exact set of execution paths (`2^B` for `B`
//!     branch points) behind a pre-flight explosion guard.
//! 4.  **Render**: [`render::MermaidRenderer`] folds the path set into a
//!     deduplicated node/edge graph and serializes it as Mermaid flowchart
//!     text.
//!
//! The secondary [`signals::SignalResolver`] matches outbound signals in one
//! workflow against declared handlers in others and reports the resulting
//! inter-workflow graph, with bounded depth and cycle detection.
//!
//! ## Quick Start
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // One scanner result: a guard condition owning one step per outcome.
//!     let elements = vec![
//!         FlowElement {
//!             id: "check".to_string(),
//!             kind: ElementKind::Branch,
//!             name: "inventoryAvailable".to_string(),
//!             detection_order: 0,
//!             outcomes: Some(OutcomePair::condition()),
//!             signal: None,
//!         },
//!         FlowElement {
//!             id: "ship".to_string(),
//!             kind: ElementKind::Step,
//!             name: "shipOrder".to_string(),
//!             detection_order: 1,
//!             outcomes: None,
//!             signal: None,
//!         },
//!         FlowElement {
//!             id: "refund".to_string(),
//!             kind: ElementKind::Step,
//!             name: "refundOrder".to_string(),
//!             detection_order: 2,
//!             outcomes: None,
//!             signal: None,
//!         },
//!     ];
//!     let mut ownership = AHashMap::new();
//!     ownership.insert("ship".to_string(), Owner::new("check", "yes"));
//!     ownership.insert("refund".to_string(), Owner::new("check", "no"));
//!
//!     // Build the scoped tree and enumerate every execution path.
//!     let tree = ControlFlowTree::build(&elements, &ownership)?;
//!     let enumerator = PathEnumerator::new(EnumerationLimits::default());
//!     let paths = enumerator.enumerate(&tree)?;
//!     assert_eq!(paths.len(), 2); // one branch point, 2^1 paths
//!
//!     // Serialize the deduplicated flowchart.
//!     let diagram = MermaidRenderer::default().render(&paths);
//!     println!("{}", diagram);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod paths;
pub mod prelude;
pub mod render;
pub mod signals;
pub mod stream;
pub mod tree;
