use crate::error::MalformedScopeError;
use crate::stream::{FlowElement, OutcomePair, Owner, WorkflowStream};
use ahash::AHashMap;

/// One node in a scoped control-flow tree.
///
/// A `Fork` carries exactly two outcome arms. Reconvergence is structural:
/// both arms rejoin at the next sibling of the fork in the owning chain,
/// never as duplicated data inside the arms.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlowNode {
    /// A non-forking element: Step, SubInvocation or SignalSend.
    Linear(FlowElement),
    /// A branch point (Branch or Wait) with its two outcome subtrees, in
    /// declared label order.
    Fork {
        element: FlowElement,
        outcomes: OutcomePair,
        positive: Vec<ControlFlowNode>,
        negative: Vec<ControlFlowNode>,
    },
}

impl ControlFlowNode {
    /// The element wrapped by this node.
    pub fn element(&self) -> &FlowElement {
        match self {
            ControlFlowNode::Linear(element) => element,
            ControlFlowNode::Fork { element, .. } => element,
        }
    }
}

/// A fully scoped control-flow tree for one workflow.
///
/// Owned by the builder that produced it, read-only to the enumerator, and
/// dropped at the end of the analysis call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlFlowTree {
    /// The top-level chain of the workflow, in detection order.
    pub nodes: Vec<ControlFlowNode>,
}

impl ControlFlowTree {
    /// Builds the tree for a complete scanner stream.
    ///
    /// Validates the stream first, so a malformed stream never yields a
    /// partially scoped tree.
    pub fn from_stream(stream: &WorkflowStream) -> Result<Self, MalformedScopeError> {
        stream.validate()?;
        Self::build(&stream.elements, &stream.ownership)
    }

    /// Builds the tree from a flat element list plus its ownership map.
    pub fn build(
        elements: &[FlowElement],
        ownership: &AHashMap<String, Owner>,
    ) -> Result<Self, MalformedScopeError> {
        super::builder::TreeBuilder::new(elements, ownership).build()
    }

    /// Total number of branch points anywhere in the tree.
    ///
    /// Because every branch point reconverges, the exact path count of the
    /// tree is `2^branch_point_count()`, independent of nesting depth.
    pub fn branch_point_count(&self) -> usize {
        count_branch_points(&self.nodes)
    }
}

fn count_branch_points(nodes: &[ControlFlowNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            ControlFlowNode::Linear(_) => 0,
            ControlFlowNode::Fork {
                positive, negative, ..
            } => 1 + count_branch_points(positive) + count_branch_points(negative),
        })
        .sum()
}
