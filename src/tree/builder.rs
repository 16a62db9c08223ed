use super::node::{ControlFlowNode, ControlFlowTree};
use crate::error::MalformedScopeError;
use crate::stream::{FlowElement, Owner};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// Assembles a scoped control-flow tree from a flat, detection-ordered
/// element list plus the scanner's ownership map.
///
/// Nesting comes exclusively from the ownership map; detection order is only
/// used to sort siblings within one scope. The builder validates the whole
/// relation up front and either returns a complete tree or fails with the
/// offending element id. It never drops elements silently.
pub struct TreeBuilder<'a> {
    elements: &'a [FlowElement],
    ownership: &'a AHashMap<String, Owner>,
    by_id: AHashMap<&'a str, &'a FlowElement>,
    /// Owner branch id -> elements it owns, in stream order.
    children: AHashMap<&'a str, Vec<&'a FlowElement>>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(elements: &'a [FlowElement], ownership: &'a AHashMap<String, Owner>) -> Self {
        let by_id = elements.iter().map(|e| (e.id.as_str(), e)).collect();
        let children = elements
            .iter()
            .filter_map(|e| {
                ownership
                    .get(&e.id)
                    .map(|owner| (owner.branch_id.as_str(), e))
            })
            .into_group_map()
            .into_iter()
            .collect();
        Self {
            elements,
            ownership,
            by_id,
            children,
        }
    }

    pub fn build(&self) -> Result<ControlFlowTree, MalformedScopeError> {
        self.check_elements()?;
        self.check_owners()?;
        self.check_cycles()?;

        let roots: Vec<&FlowElement> = self
            .elements
            .iter()
            .filter(|e| !self.ownership.contains_key(&e.id))
            .sorted_by_key(|e| e.detection_order)
            .collect();

        Ok(ControlFlowTree {
            nodes: self.assemble_chain(roots)?,
        })
    }

    /// Element-local invariants: unique ids, outcome labels on branch points.
    fn check_elements(&self) -> Result<(), MalformedScopeError> {
        let mut seen: AHashSet<&str> = AHashSet::with_capacity(self.elements.len());
        for element in self.elements {
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

    /// Every owner must exist, be a branch point, and declare the claimed
    /// outcome label. Iterates in stream order so the first offending
    /// element is reported deterministically.
    fn check_owners(&self) -> Result<(), MalformedScopeError> {
        for element in self.elements {
            let Some(owner) = self.ownership.get(&element.id) else {
                continue;
            };
            let Some(branch) = self.by_id.get(owner.branch_id.as_str()) else {
                return Err(MalformedScopeError::UnknownOwner {
                    element_id: element.id.clone(),
                    owner_id: owner.branch_id.clone(),
                });
            };
            let Some(outcomes) = &branch.outcomes else {
                return Err(MalformedScopeError::NonBranchOwner {
                    element_id: element.id.clone(),
                    owner_id: owner.branch_id.clone(),
                });
            };
            if !branch.is_branch_point() {
                return Err(MalformedScopeError::NonBranchOwner {
                    element_id: element.id.clone(),
                    owner_id: owner.branch_id.clone(),
                });
            }
            if !outcomes.declares(&owner.outcome) {
                return Err(MalformedScopeError::UndeclaredOutcome {
                    element_id: element.id.clone(),
                    owner_id: owner.branch_id.clone(),
                    outcome: owner.outcome.clone(),
                    positive: outcomes.positive.clone(),
                    negative: outcomes.negative.clone(),
                });
            }
        }
        Ok(())
    }

    /// The ownership relation must form a forest: walking up the owner
    /// chain from any element must terminate.
    fn check_cycles(&self) -> Result<(), MalformedScopeError> {
        let mut cleared: AHashSet<&str> = AHashSet::new();
        for element in self.elements {
            let mut path: AHashSet<&str> = AHashSet::new();
            let mut current = element.id.as_str();
            while let Some(owner) = self.ownership.get(current) {
                if cleared.contains(current) {
                    break;
                }
                if !path.insert(current) {
                    return Err(MalformedScopeError::OwnershipCycle {
                        element_id: element.id.clone(),
                    });
                }
                current = owner.branch_id.as_str();
            }
            cleared.extend(path);
        }
        Ok(())
    }

    fn assemble_chain(
        &self,
        scope: Vec<&FlowElement>,
    ) -> Result<Vec<ControlFlowNode>, MalformedScopeError> {
        scope
            .into_iter()
            .map(|element| self.assemble_node(element))
            .collect()
    }

    fn assemble_node(&self, element: &FlowElement) -> Result<ControlFlowNode, MalformedScopeError> {
        if !element.is_branch_point() {
            return Ok(ControlFlowNode::Linear(element.clone()));
        }

        let outcomes =
            element
                .outcomes
                .clone()
                .ok_or_else(|| MalformedScopeError::MissingOutcomes {
                    element_id: element.id.clone(),
                })?;

        let owned: Vec<&FlowElement> = self
            .children
            .get(element.id.as_str())
            .into_iter()
            .flatten()
            .copied()
            .sorted_by_key(|e| e.detection_order)
            .collect();

        let mut positive: Vec<&FlowElement> = Vec::new();
        let mut negative: Vec<&FlowElement> = Vec::new();
        for child in owned {
            match self.ownership.get(&child.id) {
                Some(owner) if owner.outcome == outcomes.positive => positive.push(child),
                Some(_) => negative.push(child),
                // `children` is keyed off the ownership map, so every owned
                // child has an entry.
                None => {}
            }
        }

        Ok(ControlFlowNode::Fork {
            element: element.clone(),
            outcomes,
            positive: self.assemble_chain(positive)?,
            negative: self.assemble_chain(negative)?,
        })
    }
}
