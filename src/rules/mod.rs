//! Semantic rules over the definitions graph.
//!
//! Each rule is a [`DefinitionRule`]: it walks one top-level definition and
//! appends findings to a caller-supplied accumulator. Rules never stop at the
//! first problem and never share mutable state, so several of them can feed
//! one report.

mod inheritance;
mod required;

pub use inheritance::InheritanceRule;
pub use required::RequiredRule;

use stillwater::Validation;
use tracing::warn;

use crate::error::{DefinitionError, DefinitionErrors};
use crate::path::Location;
use crate::schema::Definition;
use crate::validation::{ResolveError, ValidationContext};

/// A property is declared both by a composed definition and by an ancestor.
pub const INHERITANCE_COLLISION: &str = "inheritance_collision";
/// A name appears more than once in a required list.
pub const DUPLICATE_REQUIRED: &str = "duplicate_required";
/// A required name is not declared at the same level.
pub const REQUIRED_NOT_DEFINED: &str = "required_not_defined";
/// The discriminator is not a declared property.
pub const DISCRIMINATOR_NOT_DEFINED: &str = "discriminator_not_defined";
/// The discriminator is not in the required list.
pub const DISCRIMINATOR_NOT_REQUIRED: &str = "discriminator_not_required";
/// An array declares no `items`.
pub const MISSING_ITEMS: &str = "missing_items";

/// A semantic rule applied to one top-level definition at a time.
///
/// `ctx` has already entered the definition being checked, and `location`
/// points at it. Implementations append every finding to `errors`.
///
/// # Example
///
/// ```rust
/// use defcheck::{DefinitionError, DefinitionRule, Definition, Location, ValidationContext};
///
/// struct NoArrays;
///
/// impl DefinitionRule for NoArrays {
///     fn name(&self) -> &'static str {
///         "no-arrays"
///     }
///
///     fn check(
///         &self,
///         definition: &Definition,
///         _ctx: &ValidationContext,
///         location: &Location,
///         errors: &mut Vec<DefinitionError>,
///     ) {
///         if let Definition::Array(_) = definition {
///             errors.push(DefinitionError::new(location.clone(), "arrays are not allowed"));
///         }
///     }
/// }
/// ```
pub trait DefinitionRule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Checks `definition` and appends findings to `errors`.
    fn check(
        &self,
        definition: &Definition,
        ctx: &ValidationContext,
        location: &Location,
        errors: &mut Vec<DefinitionError>,
    );

    /// Checks `definition` and returns the findings as a `Validation`.
    fn validate(
        &self,
        definition: &Definition,
        ctx: &ValidationContext,
        location: &Location,
    ) -> Validation<(), DefinitionErrors> {
        let mut errors = Vec::new();
        self.check(definition, ctx, location, &mut errors);
        match DefinitionErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }
}

/// Turns a failed reference resolution into a finding at `location`.
pub(crate) fn resolve_failure(location: &Location, err: &ResolveError) -> DefinitionError {
    warn!(location = %location, code = err.code(), "{}", err);
    DefinitionError::new(location.clone(), err.to_string()).with_code(err.code())
}

/// Renders names as `[a, b]`.
pub(crate) fn name_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let names: Vec<_> = names.into_iter().collect();
    format!("[{}]", names.join(", "))
}
