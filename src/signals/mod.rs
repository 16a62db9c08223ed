use crate::stream::WorkflowStream;
use ahash::AHashSet;

/// A resolved signal edge: one workflow's send matched one declared handler
/// in another (or the same) workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalConnection {
    pub from_workflow: String,
    pub to_workflow: String,
    pub signal: String,
    /// Id of the sending element in the source workflow.
    pub sender_id: String,
    /// Display name of the matched handler.
    pub handler_name: String,
}

/// A SignalSend with no matching handler in any supplied stream. Reported,
/// never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedSignal {
    pub workflow: String,
    pub sender_id: String,
    pub signal: String,
}

/// A workflow reached again along the signal chain currently being walked.
/// The connection edge is still recorded, but the target is not re-traversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleWarning {
    pub from_workflow: String,
    pub to_workflow: String,
    pub signal: String,
}

/// The outcome of a cross-workflow resolution. Always a complete report of
/// what could be connected: one unresolved signal in a large system must not
/// block rendering the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub connections: Vec<SignalConnection>,
    pub unresolved: Vec<UnresolvedSignal>,
    pub cycles: Vec<CycleWarning>,
}

/// Walks signal sends across workflow streams, matching them against
/// declared handlers by signal name.
///
/// All matches for a send are reported; the resolver never picks one
/// arbitrarily. `max_depth` bounds the chain length in hops from the entry
/// workflow, and together with the visited set guarantees termination on
/// cyclic signal graphs.
#[derive(Debug, Clone)]
pub struct SignalResolver {
    max_depth: usize,
}

impl Default for SignalResolver {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

impl SignalResolver {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Resolves every signal chain reachable from `entry`.
    ///
    /// Streams are matched in the order supplied, so repeated calls with
    /// identical input produce identically ordered reports.
    pub fn resolve(&self, entry: &WorkflowStream, streams: &[WorkflowStream]) -> Resolution {
        let mut resolution = Resolution::default();
        let mut visited: AHashSet<String> = AHashSet::new();
        let mut chain: Vec<String> = Vec::new();

        visited.insert(entry.workflow.clone());
        chain.push(entry.workflow.clone());
        self.visit(entry, 0, streams, &mut visited, &mut chain, &mut resolution);

        resolution
    }

    fn visit(
        &self,
        stream: &WorkflowStream,
        depth: usize,
        streams: &[WorkflowStream],
        visited: &mut AHashSet<String>,
        chain: &mut Vec<String>,
        resolution: &mut Resolution,
    ) {
        if depth >= self.max_depth {
            return;
        }

        for send in stream.signal_sends() {
            // A SignalSend without a declared name matches nothing and is
            // reported unresolved, never dropped.
            let signal = send.signal.clone().unwrap_or_default();
            let mut matched = false;

            for target in streams {
                for handler in target.handlers_for(&signal) {
                    matched = true;
                    resolution.connections.push(SignalConnection {
                        from_workflow: stream.workflow.clone(),
                        to_workflow: target.workflow.clone(),
                        signal: signal.clone(),
                        sender_id: send.id.clone(),
                        handler_name: handler.handler_name.clone(),
                    });

                    if chain.contains(&target.workflow) {
                        resolution.cycles.push(CycleWarning {
                            from_workflow: stream.workflow.clone(),
                            to_workflow: target.workflow.clone(),
                            signal: signal.clone(),
                        });
                    } else if visited.insert(target.workflow.clone()) {
                        chain.push(target.workflow.clone());
                        self.visit(target, depth + 1, streams, visited, chain, resolution);
                        chain.pop();
                    }
                }
            }

            if !matched {
                resolution.unresolved.push(UnresolvedSignal {
                    workflow: stream.workflow.clone(),
                    sender_id: send.id.clone(),
                    signal,
                });
            }
        }
    }
}
