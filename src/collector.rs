//! Collection of the property names a composed definition inherits.

use indexmap::IndexSet;

use crate::schema::{ComposedDefinition, Definition};
use crate::validation::{ResolveError, ValidationContext};

/// Property names a composed definition inherits, together with the
/// references that could not be followed while collecting them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inherited {
    /// Inherited names in first-seen depth-first order.
    pub properties: IndexSet<String>,
    /// One entry per ancestor branch that was skipped.
    pub failures: Vec<ResolveError>,
}

/// Returns every property name contributed by the ancestors of `root`,
/// transitively, in first-seen depth-first order.
///
/// The root's own declarations are excluded; composed ancestors further up
/// the chain contribute both their own declarations and their ancestors'.
/// References are resolved through `ctx`, so the caller should pass a
/// context that has already entered the root's name; a chain that leads back
/// to it is then reported as a cycle.
///
/// A reference that cannot be followed is recorded in
/// [`Inherited::failures`] and only that branch is skipped; the remaining
/// ancestors still contribute. The result depends only on `root` and `ctx`.
///
/// # Example
///
/// ```rust
/// use defcheck::{collect_ancestor_properties, Definition, ValidationContext};
/// use serde_json::json;
///
/// let ctx = ValidationContext::from_document(&json!({
///     "definitions": {
///         "Base": { "properties": { "id": {} } },
///         "Named": { "allOf": [{ "$ref": "#/definitions/Base" }, { "properties": { "name": {} } }] },
///         "Pet": { "allOf": [{ "$ref": "#/definitions/Named" }, { "properties": { "tag": {} } }] }
///     }
/// }))
/// .unwrap();
///
/// let Some(Definition::Composed(pet)) = ctx.get("Pet") else { unreachable!() };
/// let inherited = collect_ancestor_properties(pet, &ctx.enter("Pet").unwrap());
/// assert!(inherited.failures.is_empty());
/// assert_eq!(inherited.properties.into_iter().collect::<Vec<_>>(), vec!["name", "id"]);
/// ```
pub fn collect_ancestor_properties(root: &ComposedDefinition, ctx: &ValidationContext) -> Inherited {
    let mut inherited = Inherited::default();
    for ancestor in root.ancestors() {
        collect_from(ancestor, ctx, &mut inherited);
    }
    inherited
}

fn collect_from(definition: &Definition, ctx: &ValidationContext, inherited: &mut Inherited) {
    match definition {
        Definition::Object(object) => {
            inherited
                .properties
                .extend(object.property_names().map(str::to_string));
        }
        Definition::Reference(reference) => match ctx.resolve(reference.target()) {
            Ok((target, entered)) => collect_from(target, &entered, inherited),
            Err(err) => inherited.failures.push(err),
        },
        Definition::Composed(composed) => {
            inherited
                .properties
                .extend(composed.own().property_names().map(str::to_string));
            for ancestor in composed.ancestors() {
                collect_from(ancestor, ctx, inherited);
            }
        }
        Definition::Array(_) => {}
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

    fn context(definitions: Vec<(&str, Definition)>) -> ValidationContext {
        let definitions: IndexMap<_, _> = definitions
            .into_iter()
            .map(|(name, definition)| (name.to_string(), definition))
            .collect();
        ValidationContext::new(definitions)
    }

    #[test]
    fn test_root_own_properties_are_excluded() {
        let root = Schema::composed(object(&["own"])).extends("Parent");
        let ctx = context(vec![("Parent", object(&["inherited"]).into())]);

        let collected = collect_ancestor_properties(&root, &ctx).properties;
        assert!(collected.contains("inherited"));
        assert!(!collected.contains("own"));
    }

    #[test]
    fn test_transitive_three_levels() {
        let ctx = context(vec![
            ("GrandParent", object(&["id"]).into()),
            ("Parent", Schema::composed(object(&["name"])).extends("GrandParent").into()),
        ]);
        let child = Schema::composed(object(&["id"])).extends("Parent");

        let collected = collect_ancestor_properties(&child, &ctx).properties;
        assert_eq!(collected.into_iter().collect::<Vec<_>>(), vec!["name", "id"]);
    }

    #[test]
    fn test_inline_ancestors_contribute() {
        let child = Schema::composed(ObjectDefinition::new())
            .ancestor(object(&["inline"]))
            .ancestor(Schema::composed(object(&["nested"])).ancestor(object(&["deep"])))
            .ancestor(Schema::array(PropertyNode::Primitive));

        let collected = collect_ancestor_properties(&child, &context(vec![])).properties;
        assert_eq!(
            collected.into_iter().collect::<Vec<_>>(),
            vec!["inline", "nested", "deep"]
        );
    }

    #[test]
    fn test_no_ancestor_properties_is_empty_not_an_error() {
        let ctx = context(vec![("Empty", ObjectDefinition::new().into())]);
        let child = Schema::composed(object(&["a"])).extends("Empty");

        let inherited = collect_ancestor_properties(&child, &ctx);
        assert!(inherited.properties.is_empty());
        assert!(inherited.failures.is_empty());
        assert_eq!(inherited, collect_ancestor_properties(&child, &ctx));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let ctx = context(vec![
            ("Base", object(&["id"]).into()),
            ("Left", Schema::composed(object(&["l"])).extends("Base").into()),
            ("Right", Schema::composed(object(&["r"])).extends("Base").into()),
        ]);
        let child = Schema::composed(ObjectDefinition::new())
            .extends("Left")
            .extends("Right");

        let inherited = collect_ancestor_properties(&child, &ctx);
        assert!(inherited.failures.is_empty());
        assert_eq!(inherited.properties.into_iter().collect::<Vec<_>>(), vec!["l", "id", "r"]);
    }

    #[test]
    fn test_cycle_back_to_root_is_recorded() {
        let ctx = context(vec![
            ("A", Schema::composed(object(&["a"])).extends("B").into()),
            ("B", Schema::composed(object(&["b"])).extends("A").into()),
        ]);
        let Some(Definition::Composed(a)) = ctx.get("A") else {
            panic!("expected composed");
        };

        let inherited = collect_ancestor_properties(a, &ctx.enter("A").unwrap());
        assert_eq!(
            inherited.failures,
            vec![ResolveError::Cycle(vec!["A".into(), "B".into(), "A".into()])]
        );
        assert_eq!(inherited.properties.into_iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_unresolved_ancestor_skips_only_that_branch() {
        let ctx = context(vec![("Parent", object(&["id"]).into())]);
        let child = Schema::composed(object(&["a"]))
            .extends("Nowhere")
            .extends("Parent")
            .extends("Lost");

        let inherited = collect_ancestor_properties(&child, &ctx);
        assert_eq!(
            inherited.failures,
            vec![
                ResolveError::Unresolved("Nowhere".to_string()),
                ResolveError::Unresolved("Lost".to_string()),
            ]
        );
        assert_eq!(inherited.properties.into_iter().collect::<Vec<_>>(), vec!["id"]);
    }
}
