//! Node model for the definitions graph.
//!
//! Every named definition is a [`Definition`] and every property inside an
//! object is a [`PropertyNode`]. Both are closed enums, so validators handle
//! each shape with an exhaustive `match`. Nodes carry no behavior; raw JSON
//! is turned into nodes by [`classify`].
//!
//! # Example
//!
//! ```rust
//! use defcheck::{ArrayProperty, Definition, ObjectDefinition, PropertyNode, Schema};
//!
//! let pet = Schema::object()
//!     .property("name", PropertyNode::Primitive)
//!     .property("tags", ArrayProperty::new(PropertyNode::Primitive))
//!     .require("name");
//!
//! let cat: Definition = Schema::composed(ObjectDefinition::new())
//!     .extends("Pet")
//!     .into();
//!
//! assert_eq!(cat.kind(), "composed");
//! ```

mod array;
mod composed;
mod dispatch;
mod object;
mod ref_schema;

pub use array::{ArrayDefinition, ArrayProperty};
pub use composed::{ComposedDefinition, Member};
pub use dispatch::{classify, classify_property};
pub use object::{ObjectDefinition, ObjectProperty};
pub use ref_schema::{Reference, DEFINITIONS_PREFIX};

/// A named schema in the definitions section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    /// A plain object schema.
    Object(ObjectDefinition),
    /// An `allOf` composition.
    Composed(ComposedDefinition),
    /// A `$ref` to another definition.
    Reference(Reference),
    /// An array schema.
    Array(ArrayDefinition),
}

impl Definition {
    /// Returns a short name for the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Definition::Object(_) => "object",
            Definition::Composed(_) => "composed",
            Definition::Reference(_) => "reference",
            Definition::Array(_) => "array",
        }
    }
}

impl Default for Definition {
    fn default() -> Self {
        Definition::Object(ObjectDefinition::default())
    }
}

impl From<ObjectDefinition> for Definition {
    fn from(object: ObjectDefinition) -> Self {
        Definition::Object(object)
    }
}

impl From<ComposedDefinition> for Definition {
    fn from(composed: ComposedDefinition) -> Self {
        Definition::Composed(composed)
    }
}

impl From<Reference> for Definition {
    fn from(reference: Reference) -> Self {
        Definition::Reference(reference)
    }
}

impl From<ArrayDefinition> for Definition {
    fn from(array: ArrayDefinition) -> Self {
        Definition::Array(array)
    }
}

/// A property declared inside an object.
///
/// Property-level `$ref`s are leaves: they are never followed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PropertyNode {
    /// An inline object with its own properties and required list.
    Object(ObjectProperty),
    /// An inline array.
    Array(ArrayProperty),
    /// Anything without children.
    #[default]
    Primitive,
}

/// Entry point for building definition nodes by hand.
///
/// Documents are normally classified with [`classify`]; `Schema` is the
/// builder-style alternative used for programmatic graphs and tests.
pub struct Schema;

impl Schema {
    /// Creates an empty object definition.
    pub fn object() -> ObjectDefinition {
        ObjectDefinition::new()
    }

    /// Creates a composed definition around `own`.
    pub fn composed(own: ObjectDefinition) -> ComposedDefinition {
        ComposedDefinition::new(own)
    }

    /// Creates a reference to `target`.
    pub fn reference(target: impl Into<String>) -> Reference {
        Reference::new(target)
    }

    /// Creates an array definition with the given items.
    pub fn array(items: impl Into<PropertyNode>) -> ArrayDefinition {
        ArrayDefinition::new(items)
    }
}
