//! Required-list and discriminator consistency.

use indexmap::{IndexMap, IndexSet};

use crate::error::DefinitionError;
use crate::path::{Location, CHILD};
use crate::schema::{Definition, Member, ObjectDefinition, PropertyNode, Reference};
use crate::validation::ValidationContext;

use super::{
    name_list, resolve_failure, DefinitionRule, DISCRIMINATOR_NOT_DEFINED,
    DISCRIMINATOR_NOT_REQUIRED, DUPLICATE_REQUIRED, MISSING_ITEMS, REQUIRED_NOT_DEFINED,
};

/// Checks required lists and discriminators at every level of a definition.
///
/// At each object level, independently of the others:
/// - a name listed twice in `required` is reported once,
/// - required names that are not declared at that same level are reported,
/// - on definitions (not inline properties), a non-empty discriminator must
///   be declared and must be required.
///
/// Arrays without `items` are reported and not descended. Composed
/// definitions are checked member by member in `allOf` order, each in
/// isolation, labelled by its reference name or `child`. References are
/// followed through the context.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredRule;

impl RequiredRule {
    fn check_definition(
        definition: &Definition,
        ctx: &ValidationContext,
        location: &Location,
        errors: &mut Vec<DefinitionError>,
    ) {
        match definition {
            Definition::Object(object) => Self::check_object(object, location, errors),
            Definition::Composed(composed) => {
                for member in composed.members() {
                    match member {
                        Member::Own(own) => Self::check_object(own, &location.push(CHILD), errors),
                        Member::Ancestor(Definition::Reference(reference)) => {
                            Self::follow(reference, ctx, location, errors)
                        }
                        Member::Ancestor(other) => {
                            Self::check_definition(other, ctx, &location.push(CHILD), errors)
                        }
                    }
                }
            }
            Definition::Reference(reference) => Self::follow(reference, ctx, location, errors),
            Definition::Array(array) => match array.items() {
                Some(items) => Self::check_property(items, &location.push_items(), errors),
                None => errors.push(missing_items(location)),
            },
        }
    }

    /// Resolves `reference` and checks its target under `<location>.<target>`.
    fn follow(
        reference: &Reference,
        ctx: &ValidationContext,
        location: &Location,
        errors: &mut Vec<DefinitionError>,
    ) {
        let location = location.push(reference.target());
        match ctx.resolve(reference.target()) {
            Ok((target, entered)) => Self::check_definition(target, &entered, &location, errors),
            Err(err) => errors.push(resolve_failure(&location, &err)),
        }
    }

    fn check_object(
        object: &ObjectDefinition,
        location: &Location,
        errors: &mut Vec<DefinitionError>,
    ) {
        if let Some(discriminator) = object.discriminator().filter(|d| !d.is_empty()) {
            if !object.declares(discriminator) {
                errors.push(
                    DefinitionError::new(
                        location.clone(),
                        format!(
                            "discriminator \"{}\" is not a property defined at this schema",
                            discriminator
                        ),
                    )
                    .with_code(DISCRIMINATOR_NOT_DEFINED),
                );
            }
            if !object.required().iter().any(|name| name == discriminator) {
                errors.push(
                    DefinitionError::new(
                        location.clone(),
                        format!(
                            "discriminator property \"{}\" is not marked as required",
                            discriminator
                        ),
                    )
                    .with_code(DISCRIMINATOR_NOT_REQUIRED),
                );
            }
        }

        check_required(object.properties(), object.required(), location, errors);

        for (name, property) in object.properties() {
            Self::check_property(property, &location.push_property(name), errors);
        }
    }

    fn check_property(
        property: &PropertyNode,
        location: &Location,
        errors: &mut Vec<DefinitionError>,
    ) {
        match property {
            PropertyNode::Object(object) => {
                check_required(object.properties(), object.required(), location, errors);
                for (name, nested) in object.properties() {
                    Self::check_property(nested, &location.push_property(name), errors);
                }
            }
            PropertyNode::Array(array) => match array.items() {
                Some(items) => Self::check_property(items, &location.push_items(), errors),
                None => errors.push(missing_items(location)),
            },
            PropertyNode::Primitive => {}
        }
    }
}

impl DefinitionRule for RequiredRule {
    fn name(&self) -> &'static str {
        "required"
    }

    fn check(
        &self,
        definition: &Definition,
        ctx: &ValidationContext,
        location: &Location,
        errors: &mut Vec<DefinitionError>,
    ) {
        Self::check_definition(definition, ctx, location, errors);
    }
}

fn check_required(
    declared: &IndexMap<String, PropertyNode>,
    required: &[String],
    location: &Location,
    errors: &mut Vec<DefinitionError>,
) {
    let mut seen = IndexSet::new();
    let mut duplicated = IndexSet::new();
    for name in required {
        if !seen.insert(name.as_str()) {
            duplicated.insert(name.as_str());
        }
    }

    if !duplicated.is_empty() {
        errors.push(
            DefinitionError::new(
                location.clone(),
                format!(
                    "required property is defined multiple times: {}",
                    name_list(duplicated)
                ),
            )
            .with_code(DUPLICATE_REQUIRED),
        );
    }

    let undeclared: Vec<&str> = seen
        .into_iter()
        .filter(|name| !declared.contains_key(*name))
        .collect();

    if !undeclared.is_empty() {
        errors.push(
            DefinitionError::new(
                location.clone(),
                format!(
                    "required properties are not defined as object properties: {}",
                    name_list(undeclared)
                ),
            )
            .with_code(REQUIRED_NOT_DEFINED),
        );
    }
}

fn missing_items(location: &Location) -> DefinitionError {
    DefinitionError::new(location.clone(), "'items' must be defined for an array")
        .with_code(MISSING_ITEMS)
}
