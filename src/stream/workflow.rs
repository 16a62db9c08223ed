use super::element::FlowElement;
use crate::error::{MalformedScopeError, StreamDecodeError};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Records which branch outcome an element lexically belongs to.
///
/// This relation is supplied by the scanner and never inferred from
/// detection order; position-derived nesting is exactly the defect the
/// explicit map exists to prevent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub branch_id: String,
    pub outcome: String,
}

impl Owner {
    pub fn new(branch_id: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            branch_id: branch_id.into(),
            outcome: outcome.into(),
        }
    }
}

/// An inbound signal handler declared by a workflow.
///
/// Handlers are carried on the stream rather than as elements: they are
/// entry points into a workflow, not positions inside its control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalHandler {
    /// The declared signal name the handler listens for.
    pub signal: String,
    /// Display name of the handler in source.
    pub handler_name: String,
}

/// One scanner result: the flat, detection-ordered element stream of a
/// single workflow, the ownership map that scopes it, and the workflow's
/// declared signal handlers.
///
/// Read-only to the analysis core. An empty element list is a valid result
/// ("no branching present") and is not a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowStream {
    /// The workflow's name, unique across one analysis.
    pub workflow: String,
    pub elements: Vec<FlowElement>,
    /// Element id -> owning branch outcome. Elements absent from the map
    /// live at the top level of the workflow.
    #[serde(default)]
    pub ownership: AHashMap<String, Owner>,
    #[serde(default)]
    pub handlers: Vec<SignalHandler>,
}

impl WorkflowStream {
    /// Decodes a stream from the scanner JSON interchange format.
    pub fn from_json(json: &str) -> Result<Self, StreamDecodeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the stream-level invariants the tree builder relies on:
    /// unique element ids, and outcome labels present on every branch point.
    pub fn validate(&self) -> Result<(), MalformedScopeError> {
        let mut seen: AHashSet<&str> = AHashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if !seen.insert(element.id.as_str()) {
                return Err(MalformedScopeError::DuplicateElementId {
                    element_id: element.id.clone(),
                });
            }
            if element.is_branch_point() && element.outcomes.is_none() {
                return Err(MalformedScopeError::MissingOutcomes {
                    element_id: element.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// All outbound signal elements of this workflow, in detection order.
    pub fn signal_sends(&self) -> impl Iterator<Item = &FlowElement> {
        self.elements
            .iter()
            .filter(|e| e.kind == super::element::ElementKind::SignalSend)
    }

    /// All declared handlers listening for `signal`.
    pub fn handlers_for(&self, signal: &str) -> impl Iterator<Item = &SignalHandler> {
        self.handlers.iter().filter(move |h| h.signal == signal)
    }
}
