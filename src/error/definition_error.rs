//! Definition finding types.
//!
//! This module provides [`DefinitionError`] for a single semantic finding and
//! [`DefinitionErrors`] for a non-empty set of findings.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::Location;

/// A single semantic finding in the definitions section.
///
/// `DefinitionError` records:
/// - **location**: where in the definitions graph the problem was found
/// - **message**: human-readable description
/// - **code**: machine-readable code for programmatic handling
///
/// # Example
///
/// ```rust
/// use defcheck::{DefinitionError, Location};
///
/// let error = DefinitionError::new(
///     Location::from_segment("Pet"),
///     "'items' must be defined for an array",
/// )
/// .with_code("missing_items");
///
/// assert_eq!(error.code, "missing_items");
/// assert_eq!(error.to_string(), "Pet: 'items' must be defined for an array");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionError {
    /// Where the finding applies.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable code (e.g. `inheritance_collision`).
    pub code: String,
}

impl DefinitionError {
    /// Creates a new finding at `location`.
    ///
    /// The code defaults to "definition_error". Use `with_code` to set
    /// a more specific code.
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            code: "definition_error".to_string(),
        }
    }

    /// Sets the code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

impl Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.location, self.message)
        }
    }
}

impl std::error::Error for DefinitionError {}

// Findings are merged across rayon workers.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<DefinitionError>();
    assert_sync::<DefinitionError>();
};

/// A non-empty collection of findings.
///
/// `DefinitionErrors` wraps a `NonEmptyVec<DefinitionError>` so it can be the
/// failure side of a `Validation<(), DefinitionErrors>`. It implements
/// `Semigroup`, which is how results from independent rules are merged:
///
/// ```rust
/// use defcheck::{DefinitionError, DefinitionErrors, Location};
/// use stillwater::prelude::*;
///
/// let a = DefinitionErrors::single(DefinitionError::new(Location::from_segment("A"), "first"));
/// let b = DefinitionErrors::single(DefinitionError::new(Location::from_segment("B"), "second"));
///
/// let combined = a.combine(b);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.first().message, "first");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionErrors(NonEmptyVec<DefinitionError>);

impl DefinitionErrors {
    /// Creates a collection holding one finding.
    pub fn single(error: DefinitionError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a `Vec`, or `None` if it is empty.
    pub fn from_vec(errors: Vec<DefinitionError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let head = errors.next()?;
        Some(errors.fold(Self::single(head), |acc, e| acc.combine(Self::single(e))))
    }

    /// Returns the number of findings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `false`: the collection always holds at least one finding.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the findings.
    pub fn iter(&self) -> impl Iterator<Item = &DefinitionError> {
        self.0.iter()
    }

    /// Returns the findings recorded exactly at `location`.
    pub fn at_location(&self, location: &Location) -> Vec<&DefinitionError> {
        self.0.iter().filter(|e| &e.location == location).collect()
    }

    /// Returns the findings with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&DefinitionError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first finding.
    pub fn first(&self) -> &DefinitionError {
        self.0.head()
    }

    /// Converts into a `Vec<DefinitionError>`.
    pub fn into_vec(self) -> Vec<DefinitionError> {
        self.0.into_vec()
    }
}

impl Semigroup for DefinitionErrors {
    fn combine(self, other: Self) -> Self {
        DefinitionErrors(self.0.combine(other.0))
    }
}

impl Display for DefinitionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Definitions validation found {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for DefinitionErrors {}

impl IntoIterator for DefinitionErrors {
    type Item = DefinitionError;
    type IntoIter = std::vec::IntoIter<DefinitionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
