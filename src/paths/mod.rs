use crate::error::PathExplosionError;
use crate::stream::{FlowElement, OutcomePair};
use crate::tree::{ControlFlowNode, ControlFlowTree};
use ahash::AHashMap;

/// Safety bounds applied before any path expansion work happens.
///
/// Both bounds are required and are checked in order: branch points first,
/// then total paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationLimits {
    pub max_branch_points: usize,
    pub max_paths: u64,
}

impl Default for EnumerationLimits {
    fn default() -> Self {
        Self {
            max_branch_points: 10,
            max_paths: 1024,
        }
    }
}

/// The outcome recorded for one branch point of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeChoice {
    pub branch_id: String,
    pub outcome: String,
}

/// One complete execution path through a workflow: the elements traversed in
/// order, plus the outcome combination that produced them.
///
/// The choice vector assigns an outcome to every branch point of the tree,
/// in pre-order, so a path is uniquely identified by its choices even when a
/// branch point sits inside an arm the path did not take. The implicit
/// Start/End markers are added by the renderer, not stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionPath {
    pub steps: Vec<FlowElement>,
    pub choices: Vec<OutcomeChoice>,
}

impl ExecutionPath {
    /// Whether the path traverses the element with the given id.
    pub fn contains(&self, element_id: &str) -> bool {
        self.steps.iter().any(|step| step.id == element_id)
    }

    /// The outcome this path recorded for the given branch point.
    pub fn choice_for(&self, branch_id: &str) -> Option<&str> {
        self.choices
            .iter()
            .find(|choice| choice.branch_id == branch_id)
            .map(|choice| choice.outcome.as_str())
    }
}

/// Enumerates the complete, exact set of execution paths from a scoped tree.
///
/// Because every branch point reconverges to one continuation, a tree with B
/// branch points has exactly `2^B` paths regardless of nesting depth, so the
/// explosion guard is an O(B) pre-flight check and never an estimate.
/// Combinations are emitted in a fixed order (positive outcome before
/// negative at every choice, branch points in pre-order), so identical input
/// always yields an identically ordered path list.
#[derive(Debug, Clone, Default)]
pub struct PathEnumerator {
    limits: EnumerationLimits,
}

impl PathEnumerator {
    pub fn new(limits: EnumerationLimits) -> Self {
        Self { limits }
    }

    /// Yields every execution path of the tree, or fails before any
    /// expansion if a bound would be exceeded. No partial path set is ever
    /// returned on failure.
    pub fn enumerate(
        &self,
        tree: &ControlFlowTree,
    ) -> Result<Vec<ExecutionPath>, PathExplosionError> {
        let branch_point_count = tree.branch_point_count();
        let computed_path_count = computed_path_count(branch_point_count);

        // Counts of 64 and beyond cannot be represented in the combination
        // index, so they are rejected regardless of the configured limit.
        if branch_point_count > self.limits.max_branch_points
            || branch_point_count >= u64::BITS as usize
        {
            return Err(PathExplosionError::TooManyBranchPoints {
                branch_point_count,
                computed_path_count,
                limit: self.limits.max_branch_points,
            });
        }
        if computed_path_count > self.limits.max_paths {
            return Err(PathExplosionError::TooManyPaths {
                branch_point_count,
                computed_path_count,
                limit: self.limits.max_paths,
            });
        }

        let mut forks = Vec::with_capacity(branch_point_count);
        collect_forks(&tree.nodes, &mut forks);

        let mut paths = Vec::with_capacity(computed_path_count as usize);
        for index in 0..computed_path_count {
            paths.push(expand_combination(tree, &forks, index));
        }
        Ok(paths)
    }
}

/// Exact path count for a reconverging tree: every branch point doubles the
/// total. Saturates at `u64::MAX`; any practical limit rejects long before.
pub fn computed_path_count(branch_points: usize) -> u64 {
    if branch_points >= u64::BITS as usize {
        u64::MAX
    } else {
        1u64 << branch_points
    }
}

/// Collects every branch point of the tree in pre-order: a fork, then the
/// forks of its positive arm, then those of its negative arm, then its
/// following siblings.
fn collect_forks<'t>(
    nodes: &'t [ControlFlowNode],
    forks: &mut Vec<(&'t FlowElement, &'t OutcomePair)>,
) {
    for node in nodes {
        if let ControlFlowNode::Fork {
            element,
            outcomes,
            positive,
            negative,
        } = node
        {
            forks.push((element, outcomes));
            collect_forks(positive, forks);
            collect_forks(negative, forks);
        }
    }
}

/// Materializes the path for one outcome combination.
///
/// Bit `k` of `index` (counting from the most significant used bit) selects
/// the outcome of the `k`-th pre-order fork; a zero bit is the positive
/// outcome, so ascending indices walk combinations depth-first with the
/// positive outcome expanded before the negative one.
fn expand_combination(
    tree: &ControlFlowTree,
    forks: &[(&FlowElement, &OutcomePair)],
    index: u64,
) -> ExecutionPath {
    let mut take_positive: AHashMap<&str, bool> = AHashMap::with_capacity(forks.len());
    let mut choices = Vec::with_capacity(forks.len());

    for (position, (element, outcomes)) in forks.iter().enumerate() {
        let bit = forks.len() - 1 - position;
        let positive = index & (1u64 << bit) == 0;
        take_positive.insert(element.id.as_str(), positive);
        choices.push(OutcomeChoice {
            branch_id: element.id.clone(),
            outcome: if positive {
                outcomes.positive.clone()
            } else {
                outcomes.negative.clone()
            },
        });
    }

    let mut steps = Vec::new();
    collect_steps(&tree.nodes, &take_positive, &mut steps);
    ExecutionPath { steps, choices }
}

fn collect_steps(
    nodes: &[ControlFlowNode],
    take_positive: &AHashMap<&str, bool>,
    steps: &mut Vec<FlowElement>,
) {
    for node in nodes {
        match node {
            ControlFlowNode::Linear(element) => steps.push(element.clone()),
            ControlFlowNode::Fork {
                element,
                positive,
                negative,
                ..
            } => {
                steps.push(element.clone());
                // Every fork has an entry: the map is built from the same
                // pre-order walk that collected the forks.
                let arm = if take_positive.get(element.id.as_str()).copied().unwrap_or(true) {
                    positive
                } else {
                    negative
                };
                collect_steps(arm, take_positive, steps);
            }
        }
    }
}
