//! Classification of raw JSON schema nodes into the node model.
//!
//! The input has already passed structural validation upstream, so
//! classification is total: any shape that is not recognised falls back to
//! an empty object or a primitive property.

use serde_json::Value;
use tracing::trace;

use super::{
    ArrayDefinition, ArrayProperty, ComposedDefinition, Definition, ObjectDefinition,
    ObjectProperty, PropertyNode, Reference,
};

/// Classifies the raw definition called `name`.
///
/// Classification depends only on `raw`, so classifying the same node twice
/// always yields the same variant.
///
/// # Example
///
/// ```rust
/// use defcheck::{classify, Definition};
/// use serde_json::json;
///
/// let cat = classify("Cat", &json!({
///     "allOf": [
///         { "$ref": "#/definitions/Pet" },
///         { "properties": { "huntingSkill": { "type": "string" } } }
///     ]
/// }));
///
/// match cat {
///     Definition::Composed(composed) => {
///         assert!(composed.own().declares("huntingSkill"));
///         assert_eq!(composed.ancestors().len(), 1);
///     }
///     other => panic!("unexpected {}", other.kind()),
/// }
/// ```
pub fn classify(name: &str, raw: &Value) -> Definition {
    let definition = classify_definition(raw);
    trace!(definition = name, kind = definition.kind(), "classified definition");
    definition
}

/// Classifies a raw property node.
pub fn classify_property(raw: &Value) -> PropertyNode {
    if raw.get("$ref").is_some() {
        return PropertyNode::Primitive;
    }

    if has_type(raw, "array") {
        let array = match raw.get("items") {
            Some(items) => ArrayProperty::new(classify_property(items)),
            None => ArrayProperty::without_items(),
        };
        return array.into();
    }

    if has_type(raw, "object") || raw.get("properties").is_some() {
        let mut object = ObjectProperty::new();
        for (name, node) in properties_of(raw) {
            object = object.property(name, node);
        }
        for name in required_of(raw) {
            object = object.require(name);
        }
        return object.into();
    }

    PropertyNode::Primitive
}

fn classify_definition(raw: &Value) -> Definition {
    if let Some(ref_path) = raw.get("$ref").and_then(Value::as_str) {
        return Reference::from_ref(ref_path).into();
    }

    if let Some(members) = raw.get("allOf").and_then(Value::as_array) {
        return classify_composed(raw, members).into();
    }

    if has_type(raw, "array") || (raw.get("items").is_some() && raw.get("properties").is_none())
    {
        let array = match raw.get("items") {
            Some(items) => ArrayDefinition::new(classify_property(items)),
            None => ArrayDefinition::without_items(),
        };
        return array.into();
    }

    classify_object(raw).into()
}

/// The first inline plain-object member of `allOf` is folded into the
/// composed definition's own declarations, keeping its position; every other
/// member is an ancestor. Without an inline member, own declarations go first.
fn classify_composed(raw: &Value, members: &[Value]) -> ComposedDefinition {
    let mut own = classify_object(raw);
    let mut ancestors = Vec::with_capacity(members.len());
    let mut own_index = None;

    for member in members {
        match classify_definition(member) {
            Definition::Object(object) if own_index.is_none() => {
                own.merge(object);
                own_index = Some(ancestors.len());
            }
            ancestor => ancestors.push(ancestor),
        }
    }

    ancestors
        .into_iter()
        .fold(ComposedDefinition::new(own), |composed, ancestor| {
            composed.ancestor(ancestor)
        })
        .own_at(own_index.unwrap_or(0))
}

fn classify_object(raw: &Value) -> ObjectDefinition {
    let mut object = ObjectDefinition::new();
    for (name, node) in properties_of(raw) {
        object = object.property(name, node);
    }
    for name in required_of(raw) {
        object = object.require(name);
    }
    if let Some(discriminator) = discriminator_of(raw) {
        object = object.with_discriminator(discriminator);
    }
    object
}

fn properties_of(raw: &Value) -> impl Iterator<Item = (&str, PropertyNode)> {
    raw.get("properties")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|properties| properties.iter())
        .map(|(name, node)| (name.as_str(), classify_property(node)))
}

fn required_of(raw: &Value) -> impl Iterator<Item = &str> {
    raw.get("required")
        .and_then(Value::as_array)
        .into_iter()
        .flat_map(|names| names.iter())
        .filter_map(Value::as_str)
}

/// Swagger 2 uses a plain string; OpenAPI 3 uses `{ "propertyName": ... }`.
fn discriminator_of(raw: &Value) -> Option<&str> {
    match raw.get("discriminator")? {
        Value::String(name) => Some(name.as_str()),
        Value::Object(object) => object.get("propertyName").and_then(Value::as_str),
        _ => None,
    }
}

/// `type` may be a single name or, in newer documents, a list of names.
fn has_type(raw: &Value, name: &str) -> bool {
    match raw.get("type") {
        Some(Value::String(ty)) => ty == name,
        Some(Value::Array(types)) => types.iter().any(|ty| ty.as_str() == Some(name)),
        _ => false,
    }
}
