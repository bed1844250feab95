//! Error types for definition validation.
//!
//! Semantic findings are data ([`DefinitionError`], [`DefinitionErrors`]);
//! only boundary problems such as a document without a definitions section
//! are returned as Rust errors ([`ContextError`]).

mod definition_error;

pub use definition_error::{DefinitionError, DefinitionErrors};

/// Errors raised while building a [`ValidationContext`](crate::ValidationContext)
/// from a raw document.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContextError {
    /// The document has neither `definitions` nor `components.schemas`.
    #[error("document has no definitions section")]
    MissingDefinitions,

    /// The definitions section is present but is not a JSON object.
    #[error("definitions section must be an object, got {0}")]
    DefinitionsNotObject(&'static str),
}
