//! Common test utilities for building workflow streams.
use keiro::prelude::*;

#[allow(dead_code)]
pub fn step(id: &str, name: &str, order: u32) -> FlowElement {
    FlowElement {
        id: id.to_string(),
        kind: ElementKind::Step,
        name: name.to_string(),
        detection_order: order,
        outcomes: None,
        signal: None,
    }
}

#[allow(dead_code)]
pub fn branch(id: &str, name: &str, order: u32) -> FlowElement {
    FlowElement {
        id: id.to_string(),
        kind: ElementKind::Branch,
        name: name.to_string(),
        detection_order: order,
        outcomes: Some(OutcomePair::condition()),
        signal: None,
    }
}

#[allow(dead_code)]
pub fn wait_point(id: &str, name: &str, order: u32) -> FlowElement {
    FlowElement {
        id: id.to_string(),
        kind: ElementKind::Wait,
        name: name.to_string(),
        detection_order: order,
        outcomes: Some(OutcomePair::wait()),
        signal: None,
    }
}

#[allow(dead_code)]
pub fn sub_invocation(id: &str, name: &str, order: u32) -> FlowElement {
    FlowElement {
        id: id.to_string(),
        kind: ElementKind::SubInvocation,
        name: name.to_string(),
        detection_order: order,
        outcomes: None,
        signal: None,
    }
}

#[allow(dead_code)]
pub fn signal_send(id: &str, name: &str, order: u32, signal: &str) -> FlowElement {
    FlowElement {
        id: id.to_string(),
        kind: ElementKind::SignalSend,
        name: name.to_string(),
        detection_order: order,
        outcomes: None,
        signal: Some(signal.to_string()),
    }
}

/// Builds an ownership map from (element id, owner branch id, outcome) rows.
#[allow(dead_code)]
pub fn ownership(entries: &[(&str, &str, &str)]) -> AHashMap<String, Owner> {
    entries
        .iter()
        .map(|(element_id, branch_id, outcome)| {
            (element_id.to_string(), Owner::new(*branch_id, *outcome))
        })
        .collect()
}

#[allow(dead_code)]
pub fn stream(
    workflow: &str,
    elements: Vec<FlowElement>,
    ownership: AHashMap<String, Owner>,
) -> WorkflowStream {
    WorkflowStream {
        workflow: workflow.to_string(),
        elements,
        ownership,
        handlers: Vec::new(),
    }
}

/// A linear chain of three steps, no branching.
#[allow(dead_code)]
pub fn linear_stream() -> WorkflowStream {
    stream(
        "LinearWorkflow",
        vec![
            step("s1", "Step1", 0),
            step("s2", "Step2", 1),
            step("s3", "Step3", 2),
        ],
        AHashMap::new(),
    )
}

/// One branch point owning one step per outcome, then a reconvergence step.
///
/// Logic: `inventoryAvailable ? shipOrder : refundOrder; notifyCustomer`
#[allow(dead_code)]
pub fn single_branch_stream() -> WorkflowStream {
    stream(
        "OrderWorkflow",
        vec![
            branch("check", "inventoryAvailable", 0),
            step("ship", "shipOrder", 1),
            step("refund", "refundOrder", 2),
            step("notify", "notifyCustomer", 3),
        ],
        ownership(&[("ship", "check", "yes"), ("refund", "check", "no")]),
    )
}

/// Two independent branch points at the same nesting level.
#[allow(dead_code)]
pub fn sibling_branches_stream() -> WorkflowStream {
    stream(
        "PaymentWorkflow",
        vec![
            branch("first", "paymentOk", 0),
            step("retry", "retryPayment", 1),
            branch("second", "rushOrder", 2),
            step("expedite", "expediteShipping", 3),
            step("complete", "completeOrder", 4),
        ],
        ownership(&[("retry", "first", "no"), ("expedite", "second", "yes")]),
    )
}

/// An inner branch point nested inside the outer one's "yes" outcome.
#[allow(dead_code)]
pub fn nested_branch_stream() -> WorkflowStream {
    stream(
        "CreditWorkflow",
        vec![
            branch("outer", "customerKnown", 0),
            branch("inner", "hasCredit", 1),
            step("deep", "applyCredit", 2),
            step("fallback", "requestPrepayment", 3),
            step("finish", "placeOrder", 4),
        ],
        ownership(&[
            ("inner", "outer", "yes"),
            ("deep", "inner", "yes"),
            ("fallback", "outer", "no"),
        ]),
    )
}

/// `branch_points` independent branch points with empty arms.
#[allow(dead_code)]
pub fn wide_stream(branch_points: usize) -> WorkflowStream {
    let elements = (0..branch_points)
        .map(|i| branch(&format!("b{}", i), &format!("decision{}", i), i as u32))
        .collect();
    stream("WideWorkflow", elements, AHashMap::new())
}
