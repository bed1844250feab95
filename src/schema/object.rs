//! Object nodes: object definitions and inline object properties.
//!
//! Both keep their declared properties in an [`IndexMap`] so traversal and
//! diagnostics follow declaration order.

use indexmap::IndexMap;

use super::PropertyNode;

/// A plain object definition with properties, a required list and an
/// optional discriminator.
///
/// The required list is kept exactly as declared. It may contain duplicates
/// or names that are not declared, which is what validation looks for.
///
/// # Example
///
/// ```rust
/// use defcheck::{ObjectDefinition, PropertyNode};
///
/// let pet = ObjectDefinition::new()
///     .property("petType", PropertyNode::Primitive)
///     .property("name", PropertyNode::Primitive)
///     .require("petType")
///     .with_discriminator("petType");
///
/// assert!(pet.declares("name"));
/// assert_eq!(pet.discriminator(), Some("petType"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectDefinition {
    properties: IndexMap<String, PropertyNode>,
    required: Vec<String>,
    discriminator: Option<String>,
}

impl ObjectDefinition {
    /// Creates an object definition with nothing declared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a property. Redeclaring a name replaces the earlier node.
    pub fn property(mut self, name: impl Into<String>, node: impl Into<PropertyNode>) -> Self {
        self.properties.insert(name.into(), node.into());
        self
    }

    /// Appends a name to the required list.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Sets the discriminator property name.
    pub fn with_discriminator(mut self, name: impl Into<String>) -> Self {
        self.discriminator = Some(name.into());
        self
    }

    /// Returns the declared properties in declaration order.
    pub fn properties(&self) -> &IndexMap<String, PropertyNode> {
        &self.properties
    }

    /// Returns the declared property names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Returns true if `name` is declared directly on this object.
    pub fn declares(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Returns the required list as declared.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Returns the discriminator, if one was set.
    pub fn discriminator(&self) -> Option<&str> {
        self.discriminator.as_deref()
    }

    /// Returns true if nothing at all is declared.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.required.is_empty() && self.discriminator.is_none()
    }

    pub(crate) fn merge(&mut self, other: ObjectDefinition) {
        self.properties.extend(other.properties);
        self.required.extend(other.required);
        if self.discriminator.is_none() {
            self.discriminator = other.discriminator;
        }
    }
}

/// An inline object declared as the value of a property.
///
/// Unlike [`ObjectDefinition`] it carries no discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectProperty {
    properties: IndexMap<String, PropertyNode>,
    required: Vec<String>,
}

impl ObjectProperty {
    /// Creates an inline object with nothing declared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a nested property.
    pub fn property(mut self, name: impl Into<String>, node: impl Into<PropertyNode>) -> Self {
        self.properties.insert(name.into(), node.into());
        self
    }

    /// Appends a name to the required list.
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Returns the nested properties in declaration order.
    pub fn properties(&self) -> &IndexMap<String, PropertyNode> {
        &self.properties
    }

    /// Returns the required list as declared.
    pub fn required(&self) -> &[String] {
        &self.required
    }
}

impl From<ObjectProperty> for PropertyNode {
    fn from(object: ObjectProperty) -> Self {
        PropertyNode::Object(object)
    }
}
