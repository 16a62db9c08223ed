use super::mermaid::RenderOptions;
use crate::paths::ExecutionPath;
use crate::stream::ElementKind;
use ahash::AHashSet;

/// Synthetic node id for the implicit Start marker.
pub const START_ID: &str = "__start__";
/// Synthetic node id for the implicit End marker.
pub const END_ID: &str = "__end__";

/// The drawing shape of a render node, fixed per element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Synthetic Start/End circle.
    Terminal,
    Step,
    Branch,
    Wait,
    SubInvocation,
    SignalSend,
}

impl NodeShape {
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Step => NodeShape::Step,
            ElementKind::Branch => NodeShape::Branch,
            ElementKind::Wait => NodeShape::Wait,
            ElementKind::SubInvocation => NodeShape::SubInvocation,
            ElementKind::SignalSend => NodeShape::SignalSend,
        }
    }
}

/// A deduplicated node in the render graph, keyed by element id.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
}

/// How an edge is drawn: solid for in-workflow transitions, dashed for
/// cross-workflow signal edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    Solid,
    Dashed,
}

/// A deduplicated edge, keyed by (source, dest, label).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEdge {
    pub source: String,
    pub dest: String,
    /// The chosen outcome for edges leaving a branch point, the signal name
    /// for dashed edges, empty otherwise.
    pub label: Option<String>,
    pub style: EdgeStyle,
}

/// The merged node/edge graph of a path set.
///
/// Nodes and edges are kept in first-seen order so that serialization is
/// stable across runs on identical input.
#[derive(Debug, Clone, Default)]
pub struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
    node_ids: AHashSet<String>,
    edge_keys: AHashSet<(String, String, Option<String>)>,
}

impl RenderGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a complete path set into one deduplicated graph: one node per
    /// element id encountered (plus synthetic Start/End), one edge per
    /// adjacent pair per label.
    pub fn from_paths(paths: &[ExecutionPath], options: &RenderOptions) -> Self {
        let mut graph = Self::new();

        for path in paths {
            graph.add_node(RenderNode {
                id: START_ID.to_string(),
                label: options.start_label.clone(),
                shape: NodeShape::Terminal,
            });

            let mut prev_id = START_ID.to_string();
            // The outcome chosen at the previous step, labeling the edge
            // that leaves a branch point.
            let mut pending_label: Option<String> = None;

            for step in &path.steps {
                graph.add_node(RenderNode {
                    id: step.id.clone(),
                    label: options.display_name(&step.name),
                    shape: NodeShape::for_kind(step.kind),
                });
                graph.add_edge(RenderEdge {
                    source: prev_id.clone(),
                    dest: step.id.clone(),
                    label: pending_label.take(),
                    style: EdgeStyle::Solid,
                });

                prev_id = step.id.clone();
                if step.is_branch_point() {
                    pending_label = path.choice_for(&step.id).map(str::to_string);
                }
            }

            graph.add_node(RenderNode {
                id: END_ID.to_string(),
                label: options.end_label.clone(),
                shape: NodeShape::Terminal,
            });
            graph.add_edge(RenderEdge {
                source: prev_id,
                dest: END_ID.to_string(),
                label: pending_label.take(),
                style: EdgeStyle::Solid,
            });
        }

        graph
    }

    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RenderEdge] {
        &self.edges
    }

    /// Adds a node unless one with the same id was already seen; the first
    /// occurrence wins.
    pub fn add_node(&mut self, node: RenderNode) {
        if self.node_ids.insert(node.id.clone()) {
            self.nodes.push(node);
        }
    }

    /// Adds an edge unless the same (source, dest, label) triple was already
    /// seen.
    pub fn add_edge(&mut self, edge: RenderEdge) {
        let key = (edge.source.clone(), edge.dest.clone(), edge.label.clone());
        if self.edge_keys.insert(key) {
            self.edges.push(edge);
        }
    }

    /// Adds a dashed cross-workflow signal edge labeled with the signal name.
    pub fn add_signal_edge(
        &mut self,
        source: impl Into<String>,
        dest: impl Into<String>,
        signal: impl Into<String>,
    ) {
        self.add_edge(RenderEdge {
            source: source.into(),
            dest: dest.into(),
            label: Some(signal.into()),
            style: EdgeStyle::Dashed,
        });
    }
}
