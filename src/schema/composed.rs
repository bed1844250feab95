//! Composed (`allOf`) definitions.

use super::{Definition, ObjectDefinition, Reference};

/// A definition built from `allOf`.
///
/// `own` holds what the composed definition declares itself; `ancestors`
/// are the remaining `allOf` members in document order. Ancestors are
/// normally [`Reference`]s but may be inline object, array or composed nodes.
///
/// The position of the inline member that became `own` is kept, so
/// [`members`](Self::members) replays the `allOf` list in document order.
/// Built by hand, `own` comes first unless [`own_at`](Self::own_at) moves it.
///
/// # Example
///
/// ```rust
/// use defcheck::{ComposedDefinition, Member, ObjectDefinition, PropertyNode};
///
/// let cat = ComposedDefinition::new(
///     ObjectDefinition::new().property("huntingSkill", PropertyNode::Primitive),
/// )
/// .extends("Pet")
/// .own_at(1);
///
/// assert_eq!(cat.ancestors().len(), 1);
/// assert!(matches!(cat.members().next(), Some(Member::Ancestor(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposedDefinition {
    own: ObjectDefinition,
    own_index: usize,
    ancestors: Vec<Definition>,
}

/// One `allOf` member of a [`ComposedDefinition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member<'a> {
    /// The composed definition's own declarations.
    Own(&'a ObjectDefinition),
    /// An ancestor.
    Ancestor(&'a Definition),
}

impl ComposedDefinition {
    /// Creates a composed definition with its own declarations and no ancestors.
    pub fn new(own: ObjectDefinition) -> Self {
        Self {
            own,
            own_index: 0,
            ancestors: Vec::new(),
        }
    }

    /// Appends a reference ancestor.
    pub fn extends(self, target: impl Into<String>) -> Self {
        self.ancestor(Reference::new(target))
    }

    /// Appends an ancestor of any kind.
    pub fn ancestor(mut self, ancestor: impl Into<Definition>) -> Self {
        self.ancestors.push(ancestor.into());
        self
    }

    /// Places the own declarations after the first `index` ancestors.
    pub fn own_at(mut self, index: usize) -> Self {
        self.own_index = index;
        self
    }

    /// Returns the directly declared part of this definition.
    pub fn own(&self) -> &ObjectDefinition {
        &self.own
    }

    /// Returns the ancestors in document order.
    pub fn ancestors(&self) -> &[Definition] {
        &self.ancestors
    }

    /// Returns every member, own declarations included, in document order.
    pub fn members(&self) -> impl Iterator<Item = Member<'_>> {
        let split = self.own_index.min(self.ancestors.len());
        let (before, after) = self.ancestors.split_at(split);
        before
            .iter()
            .map(Member::Ancestor)
            .chain(std::iter::once(Member::Own(&self.own)))
            .chain(after.iter().map(Member::Ancestor))
    }
}
