//! Named references between definitions.
//!
//! A [`Reference`] only names its target. Resolution is a lookup in the
//! [`ValidationContext`](crate::ValidationContext) at validation time.

/// Prefix of local references into the Swagger 2 definitions section.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// A pointer to a named definition.
///
/// # Example
///
/// ```rust
/// use defcheck::Reference;
///
/// let reference = Reference::from_ref("#/definitions/Pet");
/// assert_eq!(reference.target(), "Pet");
///
/// let bare = Reference::new("Pet");
/// assert_eq!(reference, bare);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    target: String,
}

impl Reference {
    /// Creates a reference to the definition called `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Creates a reference from a `$ref` string.
    ///
    /// The simple name is whatever follows the last `/`, so both
    /// `#/definitions/Pet` and `#/components/schemas/Pet` point at `Pet`.
    /// A string without `/` is taken as the name itself.
    pub fn from_ref(ref_path: &str) -> Self {
        let target = match ref_path.strip_prefix(DEFINITIONS_PREFIX) {
            Some(name) => name,
            None => ref_path.rsplit('/').next().unwrap_or(ref_path),
        };
        Self::new(target)
    }

    /// Returns the name of the referenced definition.
    pub fn target(&self) -> &str {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_ref_forms() {
        assert_eq!(Reference::from_ref("#/definitions/Pet").target(), "Pet");
        assert_eq!(Reference::from_ref("#/components/schemas/Cat").target(), "Cat");
        assert_eq!(Reference::from_ref("Dog").target(), "Dog");
    }
}
