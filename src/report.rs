//! The ordered list of findings produced by a validation run.

use std::fmt::{self, Display};

use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::{DefinitionError, DefinitionErrors};
use crate::path::Location;

/// Every finding of one run, in definition order, then rule order, then
/// the order each rule recorded them.
///
/// Unlike [`DefinitionErrors`], a report may be empty.
///
/// # Example
///
/// ```rust
/// use defcheck::validate_document;
/// use serde_json::json;
///
/// let report = validate_document(&json!({
///     "definitions": {
///         "Tags": { "type": "array" }
///     }
/// }))
/// .unwrap();
///
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.to_json()[0]["location"], json!(["Tags"]));
/// assert_eq!(report.to_json()[0]["code"], "missing_items");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    errors: Vec<DefinitionError>,
}

impl Report {
    /// Creates a report from already ordered findings.
    pub fn new(errors: Vec<DefinitionError>) -> Self {
        Self { errors }
    }

    /// Returns the number of findings.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns an iterator over the findings.
    pub fn iter(&self) -> impl Iterator<Item = &DefinitionError> {
        self.errors.iter()
    }

    /// Returns the findings recorded exactly at `location`.
    pub fn at_location(&self, location: &Location) -> Vec<&DefinitionError> {
        self.errors.iter().filter(|e| &e.location == location).collect()
    }

    /// Returns the findings recorded at `location` or anywhere below it.
    pub fn under(&self, location: &Location) -> Vec<&DefinitionError> {
        self.errors
            .iter()
            .filter(|e| e.location.starts_with(location))
            .collect()
    }

    /// Returns the findings with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&DefinitionError> {
        self.errors.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the findings as a slice.
    pub fn errors(&self) -> &[DefinitionError] {
        &self.errors
    }

    /// Consumes the report and returns its findings.
    pub fn into_errors(self) -> Vec<DefinitionError> {
        self.errors
    }

    /// Converts into a `Validation`: success when empty, failure otherwise.
    pub fn into_validation(self) -> Validation<(), DefinitionErrors> {
        match DefinitionErrors::from_vec(self.errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }

    /// Renders the report as a JSON array of
    /// `{ "location": [...], "message": ..., "code": ... }` objects.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.errors
                .iter()
                .map(|error| {
                    json!({
                        "location": error.location.segments().collect::<Vec<_>>(),
                        "message": error.message,
                        "code": error.code,
                    })
                })
                .collect(),
        )
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return writeln!(f, "No definition errors found");
        }
        writeln!(f, "Definitions validation found {} error(s):", self.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl IntoIterator for Report {
    type Item = DefinitionError;
    type IntoIter = std::vec::IntoIter<DefinitionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a DefinitionError;
    type IntoIter = std::slice::Iter<'a, DefinitionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl FromIterator<DefinitionError> for Report {
    fn from_iter<I: IntoIterator<Item = DefinitionError>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
