//! Array nodes.

use super::PropertyNode;

/// An array definition. `items` is absent when the document omits it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayDefinition {
    items: Option<PropertyNode>,
}

impl ArrayDefinition {
    /// Creates an array definition with the given element schema.
    pub fn new(items: impl Into<PropertyNode>) -> Self {
        Self {
            items: Some(items.into()),
        }
    }

    /// Creates an array definition that declares no `items`.
    pub fn without_items() -> Self {
        Self { items: None }
    }

    /// Returns the element schema, if declared.
    pub fn items(&self) -> Option<&PropertyNode> {
        self.items.as_ref()
    }
}

/// An inline array declared as the value of a property.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayProperty {
    items: Option<Box<PropertyNode>>,
}

impl ArrayProperty {
    /// Creates an array property with the given element schema.
    pub fn new(items: impl Into<PropertyNode>) -> Self {
        Self {
            items: Some(Box::new(items.into())),
        }
    }

    /// Creates an array property that declares no `items`.
    pub fn without_items() -> Self {
        Self { items: None }
    }

    /// Returns the element schema, if declared.
    pub fn items(&self) -> Option<&PropertyNode> {
        self.items.as_deref()
    }
}

impl From<ArrayProperty> for PropertyNode {
    fn from(array: ArrayProperty) -> Self {
        PropertyNode::Array(array)
    }
}
