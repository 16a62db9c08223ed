use super::graph::{EdgeStyle, NodeShape, RenderGraph, RenderNode};
use crate::paths::ExecutionPath;
use crate::signals::Resolution;
use ahash::AHashMap;
use itertools::Itertools;
use std::fmt::Write;

/// Display-only options for the serializer. They affect labels only, never
/// topology or ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub start_label: String,
    pub end_label: String,
    /// Split identifier-style element names ("validateOrder",
    /// "check_inventory") into words for display.
    pub humanize_names: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            start_label: "Start".to_string(),
            end_label: "End".to_string(),
            humanize_names: false,
        }
    }
}

impl RenderOptions {
    pub(crate) fn display_name(&self, name: &str) -> String {
        if self.humanize_names {
            humanize(name)
        } else {
            name.to_string()
        }
    }
}

/// Serializes path sets and signal resolutions into Mermaid flowchart text.
///
/// A pure function of its input: rendering an identical path set twice
/// yields byte-identical output.
#[derive(Debug, Clone, Default)]
pub struct MermaidRenderer {
    options: RenderOptions,
}

impl MermaidRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renders the complete path set of one workflow as a Mermaid flowchart.
    pub fn render(&self, paths: &[ExecutionPath]) -> String {
        self.render_graph(&RenderGraph::from_paths(paths, &self.options))
    }

    /// Serializes an already-built render graph.
    pub fn render_graph(&self, graph: &RenderGraph) -> String {
        let mut out = String::new();
        writeln!(&mut out, "flowchart TD").unwrap();

        // Short, stable identifiers assigned in first-seen order.
        let ids: AHashMap<&str, String> = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.as_str(), format!("n{}", index)))
            .collect();

        for node in graph.nodes() {
            let Some(id) = ids.get(node.id.as_str()) else {
                continue;
            };
            let (open, close) = shape_delimiters(node.shape);
            writeln!(
                &mut out,
                "    {}{}\"{}\"{}",
                id,
                open,
                escape_label(&node.label),
                close
            )
            .unwrap();
        }

        for edge in graph.edges() {
            let (Some(source), Some(dest)) =
                (ids.get(edge.source.as_str()), ids.get(edge.dest.as_str()))
            else {
                continue;
            };
            let arrow = match edge.style {
                EdgeStyle::Solid => "-->",
                EdgeStyle::Dashed => "-.->",
            };
            let label = edge
                .label
                .as_ref()
                .filter(|l| !l.is_empty())
                .map(|l| format!("|{}|", escape_label(l)))
                .unwrap_or_default();
            writeln!(&mut out, "    {} {}{} {}", source, arrow, label, dest).unwrap();
        }

        out
    }

    /// Renders the inter-workflow overview of a signal resolution: one node
    /// per workflow, dashed edges labeled with the signal name. Unresolved
    /// sends are emitted as trailing Mermaid comments so the diagram itself
    /// stays a pure picture of what connected.
    pub fn render_signal_graph(&self, resolution: &Resolution) -> String {
        let mut graph = RenderGraph::new();

        for connection in &resolution.connections {
            graph.add_node(workflow_node(&connection.from_workflow, &self.options));
            graph.add_node(workflow_node(&connection.to_workflow, &self.options));
            graph.add_signal_edge(
                connection.from_workflow.clone(),
                connection.to_workflow.clone(),
                connection.signal.clone(),
            );
        }
        for unresolved in &resolution.unresolved {
            graph.add_node(workflow_node(&unresolved.workflow, &self.options));
        }

        let mut out = self.render_graph(&graph);
        for unresolved in &resolution.unresolved {
            writeln!(
                &mut out,
                "    %% unresolved signal \"{}\" sent by {} ({})",
                unresolved.signal, unresolved.workflow, unresolved.sender_id
            )
            .unwrap();
        }
        out
    }
}

fn workflow_node(workflow: &str, options: &RenderOptions) -> RenderNode {
    RenderNode {
        id: workflow.to_string(),
        label: options.display_name(workflow),
        shape: NodeShape::SubInvocation,
    }
}

/// Fixed shape convention: Start/End circles, rectangle for Step, diamond
/// for Branch, hexagon for Wait, subroutine box for SubInvocation, flag for
/// SignalSend.
fn shape_delimiters(shape: NodeShape) -> (&'static str, &'static str) {
    match shape {
        NodeShape::Terminal => ("((", "))"),
        NodeShape::Step => ("[", "]"),
        NodeShape::Branch => ("{", "}"),
        NodeShape::Wait => ("{{", "}}"),
        NodeShape::SubInvocation => ("[[", "]]"),
        NodeShape::SignalSend => (">", "]"),
    }
}

/// Escapes characters Mermaid treats specially inside quoted labels.
fn escape_label(label: &str) -> String {
    label
        .replace('"', "#quot;")
        .replace('\n', " ")
        .replace('|', "/")
}

/// Splits an identifier-style name into capitalized words.
pub(crate) fn humanize(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.iter().map(|word| capitalize(word)).join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
