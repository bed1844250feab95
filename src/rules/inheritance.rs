//! Detection of properties redeclared along an `allOf` inheritance chain.

use tracing::debug;

use crate::collector::collect_ancestor_properties;
use crate::error::DefinitionError;
use crate::path::Location;
use crate::schema::{ComposedDefinition, Definition};
use crate::validation::ValidationContext;

use super::{name_list, resolve_failure, DefinitionRule, INHERITANCE_COLLISION};

/// Reports composed definitions that redeclare a property one of their
/// ancestors already declares.
///
/// Only top-level composed definitions are inspected. At most one collision
/// finding is recorded per definition, listing the colliding names in the
/// order the definition declares them. Ancestors that cannot be resolved are
/// reported and left out; the others are still compared.
///
/// # Example
///
/// ```rust
/// use defcheck::{DefinitionRule, InheritanceRule, Location, ValidationContext};
/// use serde_json::json;
///
/// let ctx = ValidationContext::from_document(&json!({
///     "definitions": {
///         "Pet": { "properties": { "name": {} } },
///         "Cat": { "allOf": [{ "$ref": "#/definitions/Pet" }, { "properties": { "name": {} } }] }
///     }
/// }))
/// .unwrap();
///
/// let result = InheritanceRule.validate(
///     ctx.get("Cat").unwrap(),
///     &ctx.enter("Cat").unwrap(),
///     &Location::from_segment("Cat"),
/// );
/// assert!(result.is_failure());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritanceRule;

impl InheritanceRule {
    fn check_composed(
        composed: &ComposedDefinition,
        ctx: &ValidationContext,
        location: &Location,
        errors: &mut Vec<DefinitionError>,
    ) {
        let inherited = collect_ancestor_properties(composed, ctx);
        for err in &inherited.failures {
            errors.push(resolve_failure(location, err));
        }

        let collisions: Vec<&str> = composed
            .own()
            .property_names()
            .filter(|name| inherited.properties.contains(*name))
            .collect();

        if collisions.is_empty() {
            return;
        }

        debug!(location = %location, count = collisions.len(), "inherited properties redeclared");
        errors.push(
            DefinitionError::new(
                location.clone(),
                format!(
                    "following properties are already defined in ancestors: {}",
                    name_list(collisions)
                ),
            )
            .with_code(INHERITANCE_COLLISION),
        );
    }
}

impl DefinitionRule for InheritanceRule {
    fn name(&self) -> &'static str {
        "inheritance"
    }

    fn check(
        &self,
        definition: &Definition,
        ctx: &ValidationContext,
        location: &Location,
        errors: &mut Vec<DefinitionError>,
    ) {
        if let Definition::Composed(composed) = definition {
            Self::check_composed(composed, ctx, location, errors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ObjectDefinition, PropertyNode, Schema};
    use indexmap::IndexMap;

    fn object(names: &[&str]) -> ObjectDefinition {
        names
            .iter()
            .fold(Schema::object(), |object, name| object.property(*name, PropertyNode::Primitive))
    }

    fn run(definitions: Vec<(&str, Definition)>, name: &str) -> Vec<DefinitionError> {
        let definitions: IndexMap<_, _> = definitions
            .into_iter()
            .map(|(name, definition)| (name.to_string(), definition))
            .collect();
        let ctx = ValidationContext::new(definitions);
        let mut errors = Vec::new();
        InheritanceRule.check(
            ctx.get(name).unwrap(),
            &ctx.enter(name).unwrap(),
            &Location::from_segment(name),
            &mut errors,
        );
        errors
    }

    #[test]
    fn test_collision_lists_names_in_child_order() {
        let errors = run(
            vec![
                ("Parent", object(&["b", "a", "x"]).into()),
                ("Child", Schema::composed(object(&["a", "c", "b"])).extends("Parent").into()),
            ],
            "Child",
        );

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, INHERITANCE_COLLISION);
        assert_eq!(errors[0].location, Location::from_segment("Child"));
        assert_eq!(
            errors[0].message,
            "following properties are already defined in ancestors: [a, b]"
        );
    }

    #[test]
    fn test_no_collision_no_error() {
        let errors = run(
            vec![
                ("Parent", object(&["a"]).into()),
                ("Child", Schema::composed(object(&["b"])).extends("Parent").into()),
            ],
            "Child",
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_non_composed_definitions_are_ignored() {
        let errors = run(vec![("Plain", object(&["a", "b"]).into())], "Plain");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unresolved_ancestor_is_reported() {
        let errors = run(
            vec![("Child", Schema::composed(object(&["a"])).extends("Ghost").into())],
            "Child",
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "missing_reference");
    }

    #[test]
    fn test_collision_found_past_unresolved_ancestor() {
        let errors = run(
            vec![
                ("Parent", object(&["id"]).into()),
                (
                    "Child",
                    Schema::composed(object(&["id"]))
                        .extends("Ghost")
                        .extends("Parent")
                        .into(),
                ),
            ],
            "Child",
        );

        let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["missing_reference", INHERITANCE_COLLISION]);
        assert_eq!(
            errors[1].message,
            "following properties are already defined in ancestors: [id]"
        );
    }
}
