//! Validation context for reference resolution.
//!
//! This module provides the [`ValidationContext`] type that carries the
//! definitions of one document together with the chain of definitions
//! currently being resolved. The chain lets traversal detect reference cycles
//! and enforce a maximum depth instead of recursing without bound.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::ContextError;
use crate::schema::{classify, Definition};

/// Default maximum length of a reference chain.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Read-only view of a document's definitions plus the current resolution chain.
///
/// The definitions are shared behind an `Arc`, so cloning a context or
/// descending into a reference is cheap and contexts can be sent to worker
/// threads. Descending never mutates the context; [`enter`](Self::enter)
/// returns a new one.
///
/// # Example
///
/// ```rust
/// use defcheck::ValidationContext;
/// use serde_json::json;
///
/// let context = ValidationContext::from_document(&json!({
///     "swagger": "2.0",
///     "definitions": {
///         "Pet": { "properties": { "name": { "type": "string" } } },
///         "Cat": { "allOf": [{ "$ref": "#/definitions/Pet" }] }
///     }
/// }))
/// .unwrap();
///
/// assert_eq!(context.names().collect::<Vec<_>>(), vec!["Pet", "Cat"]);
/// assert!(context.get("Cat").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ValidationContext {
    definitions: Arc<IndexMap<String, Definition>>,
    chain: Vec<String>,
    max_depth: usize,
}

impl ValidationContext {
    /// Creates a context over already classified definitions.
    pub fn new(definitions: IndexMap<String, Definition>) -> Self {
        Self {
            definitions: Arc::new(definitions),
            chain: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Classifies every raw definition, keeping document order.
    pub fn from_definitions(raw: &Map<String, Value>) -> Self {
        let definitions = raw
            .iter()
            .map(|(name, node)| (name.clone(), classify(name, node)))
            .collect();
        Self::new(definitions)
    }

    /// Builds a context from a whole decoded document.
    ///
    /// Reads the Swagger 2 `definitions` section, falling back to the
    /// OpenAPI 3 `components.schemas` section.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::MissingDefinitions` if neither section exists
    /// and `ContextError::DefinitionsNotObject` if it is not an object.
    pub fn from_document(document: &Value) -> Result<Self, ContextError> {
        let section = document
            .get("definitions")
            .or_else(|| document.pointer("/components/schemas"))
            .ok_or(ContextError::MissingDefinitions)?;

        let raw = section
            .as_object()
            .ok_or_else(|| ContextError::DefinitionsNotObject(value_type_name(section)))?;

        Ok(Self::from_definitions(raw))
    }

    /// Sets the maximum length of a reference chain.
    ///
    /// The default is 100. Chains longer than this are reported as
    /// `max_depth_exceeded` rather than followed.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns the definition called `name`.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    /// Returns the definition names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Returns the definitions in document order.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.definitions.iter().map(|(name, definition)| (name.as_str(), definition))
    }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if the document declares no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Returns the names currently being resolved, outermost first.
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Returns the current depth of reference traversal.
    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    /// Returns the maximum allowed depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns a context with `name` pushed onto the resolution chain.
    ///
    /// # Errors
    ///
    /// Fails with `ResolveError::Cycle` if `name` is already being resolved
    /// and with `ResolveError::MaxDepthExceeded` if the chain is full.
    pub fn enter(&self, name: &str) -> Result<Self, ResolveError> {
        if self.chain.iter().any(|entered| entered == name) {
            let mut cycle = self.chain.clone();
            cycle.push(name.to_string());
            return Err(ResolveError::Cycle(cycle));
        }

        if self.chain.len() >= self.max_depth {
            return Err(ResolveError::MaxDepthExceeded(self.max_depth));
        }

        let mut chain = self.chain.clone();
        chain.push(name.to_string());
        Ok(Self {
            definitions: Arc::clone(&self.definitions),
            chain,
            max_depth: self.max_depth,
        })
    }

    /// Resolves `name` and enters it.
    ///
    /// Returns the target definition together with the context to use while
    /// traversing it.
    ///
    /// # Errors
    ///
    /// Fails with `ResolveError::Unresolved` if no definition has that name,
    /// or with any error of [`enter`](Self::enter).
    pub fn resolve(&self, name: &str) -> Result<(&Definition, Self), ResolveError> {
        let definition = self
            .get(name)
            .ok_or_else(|| ResolveError::Unresolved(name.to_string()))?;
        let entered = self.enter(name)?;
        Ok((definition, entered))
    }
}

/// Reasons a reference could not be followed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No definition with this name exists.
    #[error("reference to '{0}' cannot be resolved")]
    Unresolved(String),

    /// Following the reference would revisit a definition on the chain.
    #[error("reference cycle detected: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    /// The chain reached the configured maximum depth.
    #[error("maximum reference depth {0} exceeded")]
    MaxDepthExceeded(usize),
}

impl ResolveError {
    /// Returns the finding code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::Unresolved(_) => "missing_reference",
            ResolveError::Cycle(_) => "reference_cycle",
            ResolveError::MaxDepthExceeded(_) => "max_depth_exceeded",
        }
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
