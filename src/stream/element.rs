use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of control-flow element kinds a scanner can emit.
///
/// Every consumer matches exhaustively on this enum, so adding a kind is a
/// compile-time visible change across the whole crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// A sequential activity with no effect on path topology.
    Step,
    /// A two-outcome conditional.
    Branch,
    /// A two-outcome wait-condition (signal arrived vs. timer fired).
    Wait,
    /// A call to another independently-analyzable workflow. Non-branching
    /// for tree purposes, but rendered with its own shape.
    SubInvocation,
    /// An outbound signal to another workflow. Non-branching; the
    /// cross-workflow resolver matches it against declared handlers.
    SignalSend,
}

impl ElementKind {
    /// Whether this kind forks execution into two outcome arms.
    pub fn is_branch_point(self) -> bool {
        matches!(self, ElementKind::Branch | ElementKind::Wait)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Step => "Step",
            ElementKind::Branch => "Branch",
            ElementKind::Wait => "Wait",
            ElementKind::SubInvocation => "SubInvocation",
            ElementKind::SignalSend => "SignalSend",
        };
        write!(f, "{}", name)
    }
}

/// The ordered pair of outcome labels declared by a branch point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomePair {
    pub positive: String,
    pub negative: String,
}

impl OutcomePair {
    pub fn new(positive: impl Into<String>, negative: impl Into<String>) -> Self {
        Self {
            positive: positive.into(),
            negative: negative.into(),
        }
    }

    /// Default labels for a conditional branch.
    pub fn condition() -> Self {
        Self::new("yes", "no")
    }

    /// Default labels for a wait-condition.
    pub fn wait() -> Self {
        Self::new("Signaled", "Timeout")
    }

    /// Whether `label` is one of the two declared outcomes.
    pub fn declares(&self, label: &str) -> bool {
        self.positive == label || self.negative == label
    }
}

/// A single control-flow element as detected by the scanner.
///
/// Created once by the scanner and immutable thereafter. `detection_order`
/// is strictly increasing within a stream and is used for tie-breaking
/// between siblings only; nesting always comes from the ownership map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowElement {
    /// Unique within one workflow; assigned by the scanner.
    pub id: String,
    pub kind: ElementKind,
    /// Display name, taken verbatim from source.
    pub name: String,
    pub detection_order: u32,
    /// Present exactly when `kind` is a branch point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<OutcomePair>,
    /// The declared signal name of a `SignalSend` element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
}

impl FlowElement {
    /// Whether this element forks execution into two outcome arms.
    pub fn is_branch_point(&self) -> bool {
        self.kind.is_branch_point()
    }
}
