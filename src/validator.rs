//! Driver that runs every rule over every top-level definition.

use rayon::prelude::*;
use tracing::debug;

use crate::error::DefinitionError;
use crate::path::Location;
use crate::report::Report;
use crate::rules::{resolve_failure, DefinitionRule, InheritanceRule, RequiredRule};
use crate::schema::Definition;
use crate::validation::{ResolveError, ValidationContext};

/// Runs a set of rules over the definitions of a [`ValidationContext`].
///
/// Definitions are independent of each other, so they can be checked on the
/// rayon thread pool with [`parallel`](Self::parallel). Each definition gets
/// a private accumulator and the results are concatenated in document order,
/// so parallel and sequential runs produce identical reports.
///
/// # Example
///
/// ```rust
/// use defcheck::{DefinitionsValidator, ValidationContext};
/// use serde_json::json;
///
/// let ctx = ValidationContext::from_document(&json!({
///     "definitions": {
///         "Pet": {
///             "discriminator": "petType",
///             "properties": { "name": { "type": "string" } },
///             "required": ["name"]
///         }
///     }
/// }))
/// .unwrap();
///
/// let report = DefinitionsValidator::new().parallel(true).validate(&ctx);
/// assert_eq!(report.len(), 2);
/// ```
pub struct DefinitionsValidator {
    rules: Vec<Box<dyn DefinitionRule>>,
    parallel: bool,
}

impl DefinitionsValidator {
    /// Creates a validator with the inheritance and required rules, in that order.
    pub fn new() -> Self {
        Self::empty().with_rule(InheritanceRule).with_rule(RequiredRule)
    }

    /// Creates a validator with no rules.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            parallel: false,
        }
    }

    /// Appends a rule. Rules run in the order they were added.
    pub fn with_rule<R>(mut self, rule: R) -> Self
    where
        R: DefinitionRule + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Enables or disables checking definitions in parallel.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Returns the names of the configured rules in run order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Validates every definition in `ctx`.
    pub fn validate(&self, ctx: &ValidationContext) -> Report {
        let definitions: Vec<(&str, &Definition)> = ctx.definitions().collect();
        debug!(
            definitions = definitions.len(),
            rules = self.rules.len(),
            parallel = self.parallel,
            "validating definitions"
        );

        let per_definition: Vec<Vec<DefinitionError>> = if self.parallel {
            definitions
                .par_iter()
                .map(|(name, definition)| self.validate_one(name, definition, ctx))
                .collect()
        } else {
            definitions
                .iter()
                .map(|(name, definition)| self.validate_one(name, definition, ctx))
                .collect()
        };

        let report: Report = per_definition.into_iter().flatten().collect();
        debug!(findings = report.len(), "definitions validated");
        report
    }

    /// Validates the single definition called `name`.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Unresolved` if `ctx` has no such definition.
    pub fn validate_definition(
        &self,
        ctx: &ValidationContext,
        name: &str,
    ) -> Result<Report, ResolveError> {
        let definition = ctx
            .get(name)
            .ok_or_else(|| ResolveError::Unresolved(name.to_string()))?;
        Ok(Report::new(self.validate_one(name, definition, ctx)))
    }

    fn validate_one(
        &self,
        name: &str,
        definition: &Definition,
        ctx: &ValidationContext,
    ) -> Vec<DefinitionError> {
        let location = Location::from_segment(name);
        let entered = match ctx.enter(name) {
            Ok(entered) => entered,
            Err(err) => return vec![resolve_failure(&location, &err)],
        };

        let mut errors = Vec::new();
        for rule in &self.rules {
            let before = errors.len();
            rule.check(definition, &entered, &location, &mut errors);
            debug!(
                definition = name,
                kind = definition.kind(),
                rule = rule.name(),
                findings = errors.len() - before,
                "rule finished"
            );
        }
        errors
    }
}

impl Default for DefinitionsValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use indexmap::IndexMap;

    #[test]
    fn test_default_rules() {
        assert_eq!(DefinitionsValidator::new().rule_names(), vec!["inheritance", "required"]);
        assert!(DefinitionsValidator::empty().rule_names().is_empty());
    }

    #[test]
    fn test_empty_validator_reports_nothing() {
        let mut definitions = IndexMap::new();
        definitions.insert("Broken".to_string(), Schema::object().require("x").into());
        let ctx = ValidationContext::new(definitions);

        assert!(DefinitionsValidator::empty().validate(&ctx).is_empty());
        assert_eq!(DefinitionsValidator::new().validate(&ctx).len(), 1);
    }

    #[test]
    fn test_validate_definition_unknown_name() {
        let ctx = ValidationContext::new(IndexMap::new());
        let err = DefinitionsValidator::new()
            .validate_definition(&ctx, "Missing")
            .unwrap_err();
        assert_eq!(err, ResolveError::Unresolved("Missing".to_string()));
    }

    #[test]
    fn test_zero_max_depth_is_reported_per_definition() {
        let mut definitions = IndexMap::new();
        definitions.insert("A".to_string(), Schema::object().into());
        let ctx = ValidationContext::new(definitions).with_max_depth(0);

        let report = DefinitionsValidator::new().validate(&ctx);
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors()[0].code, "max_depth_exceeded");
    }
}
