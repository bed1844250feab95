//! Location paths for pointing at a place inside the definitions section.
//!
//! This module provides [`Location`], an immutable path of human-readable
//! segments such as `Pet.properties.tags.items`. Validators extend it as they
//! descend, so every finding captures the location it was recorded at.

use std::fmt::{self, Display};

/// Segment used when descending into a property of an object.
pub const PROPERTIES: &str = "properties";

/// Segment used when descending into the element schema of an array.
pub const ITEMS: &str = "items";

/// Label given to `allOf` members that are not references.
pub const CHILD: &str = "child";

/// A path to a node in the definitions graph.
///
/// `Location` is copy-on-descend: every `push` returns a new value and leaves
/// the receiver untouched, so sibling branches never observe each other.
///
/// # Example
///
/// ```rust
/// use defcheck::Location;
///
/// let location = Location::from_segment("Pet")
///     .push_property("tags")
///     .push_items();
///
/// assert_eq!(location.to_string(), "Pet.properties.tags.items");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    segments: Vec<String>,
}

impl Location {
    /// Creates an empty location.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a location from a single segment, usually a definition name.
    pub fn from_segment(segment: impl Into<String>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Returns a new location with a segment appended.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns a new location pointing at the named property
    /// (`<self>.properties.<name>`).
    pub fn push_property(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PROPERTIES.to_string());
        segments.push(name.into());
        Self { segments }
    }

    /// Returns a new location pointing at the items of an array.
    pub fn push_items(&self) -> Self {
        self.push(ITEMS)
    }

    /// Returns true if this location has no segments.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns an iterator over the segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns true if `prefix` is this location or one of its ancestors.
    pub fn starts_with(&self, prefix: &Location) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Returns the parent location, or None at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None at the root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for Location {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_location_has_no_segments() {
        let location = Location::root();
        assert!(location.is_root());
        assert_eq!(location.depth(), 0);
        assert_eq!(location.to_string(), "");
    }

    #[test]
    fn test_single_segment() {
        let location = Location::from_segment("Pet");
        assert_eq!(location.to_string(), "Pet");
        assert_eq!(location.depth(), 1);
    }

    #[test]
    fn test_push_property_adds_two_segments() {
        let location = Location::from_segment("Pet").push_property("name");
        assert_eq!(location.depth(), 3);
        assert_eq!(location.to_string(), "Pet.properties.name");
    }

    #[test]
    fn test_nested_array_items() {
        let location = Location::from_segment("Order")
            .push_property("lines")
            .push_items()
            .push_property("sku");
        assert_eq!(location.to_string(), "Order.properties.lines.items.properties.sku");
    }

    #[test]
    fn test_location_immutability() {
        let base = Location::from_segment("Pet");
        let left = base.push_property("a");
        let right = base.push(CHILD);

        assert_eq!(base.to_string(), "Pet");
        assert_eq!(left.to_string(), "Pet.properties.a");
        assert_eq!(right.to_string(), "Pet.child");
    }

    #[test]
    fn test_parent_and_last() {
        let location = Location::from_segment("Pet").push_property("tags");
        assert_eq!(location.last(), Some("tags"));

        let parent = location.parent().unwrap();
        assert_eq!(parent.to_string(), "Pet.properties");

        let root = parent.parent().unwrap().parent().unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
        assert_eq!(root.last(), None);
    }

    #[test]
    fn test_starts_with() {
        let pet = Location::from_segment("Pet");
        let nested = pet.push_property("owner");
        let other = Location::from_segment("Petting");

        assert!(nested.starts_with(&pet));
        assert!(pet.starts_with(&pet));
        assert!(!other.starts_with(&pet));
        assert!(nested.starts_with(&Location::root()));
    }

    #[test]
    fn test_collect_from_segments() {
        let location: Location = ["Cat", "Animal"].into_iter().collect();
        let segments: Vec<_> = location.segments().collect();
        assert_eq!(segments, vec!["Cat", "Animal"]);
    }
}
