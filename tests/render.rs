//! Tests for graph folding and Mermaid serialization.
mod common;
use common::*;
use keiro::prelude::*;

fn render(stream: &WorkflowStream) -> String {
    let tree = ControlFlowTree::from_stream(stream).expect("Failed to build tree");
    let paths = PathEnumerator::new(EnumerationLimits::default())
        .enumerate(&tree)
        .expect("Failed to enumerate paths");
    MermaidRenderer::default().render(&paths)
}

#[test]
fn test_linear_chain_diagram() {
    let expected = "\
flowchart TD
    n0((\"Start\"))
    n1[\"Step1\"]
    n2[\"Step2\"]
    n3[\"Step3\"]
    n4((\"End\"))
    n0 --> n1
    n1 --> n2
    n2 --> n3
    n3 --> n4
";
    assert_eq!(render(&linear_stream()), expected);
}

#[test]
fn test_single_branch_diagram() {
    let expected = "\
flowchart TD
    n0((\"Start\"))
    n1{\"inventoryAvailable\"}
    n2[\"shipOrder\"]
    n3[\"notifyCustomer\"]
    n4((\"End\"))
    n5[\"refundOrder\"]
    n0 --> n1
    n1 -->|yes| n2
    n2 --> n3
    n3 --> n4
    n1 -->|no| n5
    n5 --> n3
";
    assert_eq!(render(&single_branch_stream()), expected);
}

#[test]
fn test_idempotent_rendering() {
    let tree =
        ControlFlowTree::from_stream(&nested_branch_stream()).expect("Failed to build tree");
    let paths = PathEnumerator::new(EnumerationLimits::default())
        .enumerate(&tree)
        .expect("Failed to enumerate paths");

    let renderer = MermaidRenderer::default();
    assert_eq!(renderer.render(&paths), renderer.render(&paths));
}

#[test]
fn test_nodes_and_edges_deduplicated() {
    // Four paths all traverse the trailing step, but it must appear exactly
    // once as a node and its outgoing edge exactly once.
    let diagram = render(&sibling_branches_stream());

    assert_eq!(diagram.matches("\"completeOrder\"").count(), 1);
    assert_eq!(diagram.matches("\"paymentOk\"").count(), 1);

    let edge_lines: Vec<&str> = diagram
        .lines()
        .filter(|line| line.contains("-->"))
        .collect();
    let unique: std::collections::HashSet<&str> = edge_lines.iter().copied().collect();
    assert_eq!(edge_lines.len(), unique.len(), "duplicate edge emitted");
}

#[test]
fn test_shape_conventions() {
    let elements = vec![
        step("a", "plainStep", 0),
        wait_point("w", "awaitPayment", 1),
        sub_invocation("c", "childWorkflow", 2),
        signal_send("g", "notifyShipping", 3, "ship"),
    ];
    let diagram = render(&stream("Shapes", elements, AHashMap::new()));

    assert!(diagram.contains("[\"plainStep\"]"));
    assert!(diagram.contains("{{\"awaitPayment\"}}"));
    assert!(diagram.contains("[[\"childWorkflow\"]]"));
    assert!(diagram.contains(">\"notifyShipping\"]"));
    assert!(diagram.contains("((\"Start\"))"));
    assert!(diagram.contains("((\"End\"))"));
    // Wait outcome labels use the wait pair, not the condition pair.
    assert!(diagram.contains("-->|Signaled|"));
    assert!(diagram.contains("-->|Timeout|"));
}

#[test]
fn test_custom_terminal_labels() {
    let tree = ControlFlowTree::from_stream(&linear_stream()).expect("Failed to build tree");
    let paths = PathEnumerator::new(EnumerationLimits::default())
        .enumerate(&tree)
        .expect("Failed to enumerate paths");

    let options = RenderOptions {
        start_label: "Begin".to_string(),
        end_label: "Done".to_string(),
        humanize_names: false,
    };
    let diagram = MermaidRenderer::new(options).render(&paths);

    assert!(diagram.contains("((\"Begin\"))"));
    assert!(diagram.contains("((\"Done\"))"));
    assert!(!diagram.contains("((\"Start\"))"));
}

#[test]
fn test_humanized_labels() {
    let tree =
        ControlFlowTree::from_stream(&single_branch_stream()).expect("Failed to build tree");
    let paths = PathEnumerator::new(EnumerationLimits::default())
        .enumerate(&tree)
        .expect("Failed to enumerate paths");

    let options = RenderOptions {
        humanize_names: true,
        ..RenderOptions::default()
    };
    let diagram = MermaidRenderer::new(options).render(&paths);

    assert!(diagram.contains("{\"Inventory Available\"}"));
    assert!(diagram.contains("[\"Ship Order\"]"));
    // Labels only: topology is unchanged.
    assert_eq!(diagram.matches("-->").count(), 6);
}

#[test]
fn test_label_escaping() {
    let elements = vec![step("q", "say \"hello\"|world", 0)];
    let diagram = render(&stream("Escapes", elements, AHashMap::new()));

    assert!(diagram.contains("say #quot;hello#quot;/world"));
    assert!(!diagram.contains("say \"hello\""));
}

#[test]
fn test_signal_graph_rendering() {
    let resolution = Resolution {
        connections: vec![SignalConnection {
            from_workflow: "OrderWorkflow".to_string(),
            to_workflow: "ShippingWorkflow".to_string(),
            signal: "ship".to_string(),
            sender_id: "g1".to_string(),
            handler_name: "onShipRequested".to_string(),
        }],
        unresolved: vec![UnresolvedSignal {
            workflow: "OrderWorkflow".to_string(),
            sender_id: "g2".to_string(),
            signal: "archive".to_string(),
        }],
        cycles: vec![],
    };

    let diagram = MermaidRenderer::default().render_signal_graph(&resolution);

    assert!(diagram.starts_with("flowchart TD"));
    assert!(diagram.contains("[[\"OrderWorkflow\"]]"));
    assert!(diagram.contains("[[\"ShippingWorkflow\"]]"));
    assert!(diagram.contains("-.->|ship|"));
    assert!(diagram.contains("%% unresolved signal \"archive\" sent by OrderWorkflow (g2)"));
}
