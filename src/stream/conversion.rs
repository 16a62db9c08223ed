use super::workflow::WorkflowStream;
use crate::error::StreamConversionError;

/// A trait for custom scanner outputs that can be converted into a Keiro
/// `WorkflowStream`.
///
/// This is the primary extension point for making Keiro scanner-agnostic. A
/// scanner walks parsed source in whatever representation suits its language
/// and then implements this trait to hand the analyzer a canonical stream.
///
/// # Example
///
/// ```rust,no_run
/// use keiro::prelude::*;
/// use keiro::error::StreamConversionError;
///
/// // 1. Define your custom structs for your scanner's output format.
/// struct MyScannerElement { id: String, kind: String, line: u32 }
/// struct MyScannerOutput { workflow: String, elements: Vec<MyScannerElement> }
///
/// // 2. Implement `IntoStream` for your top-level struct.
/// impl IntoStream for MyScannerOutput {
///     fn into_stream(self) -> std::result::Result<WorkflowStream, StreamConversionError> {
///         let mut elements = Vec::new();
///         for (order, raw) in self.elements.into_iter().enumerate() {
///             // Your logic to map scanner kinds onto `ElementKind` and to
///             // fill in outcome labels for branch points.
///             elements.push(FlowElement {
///                 id: raw.id,
///                 kind: ElementKind::Step,
///                 name: format!("line {}", raw.line),
///                 detection_order: order as u32,
///                 outcomes: None,
///                 signal: None,
///             });
///         }
///
///         Ok(WorkflowStream {
///             workflow: self.workflow,
///             elements,
///             ownership: Default::default(), // map your scope relation here
///             handlers: Vec::new(),
///         })
///     }
/// }
/// ```
pub trait IntoStream {
    /// Consumes the object and converts it into a Keiro-compatible stream.
    fn into_stream(self) -> Result<WorkflowStream, StreamConversionError>;
}
