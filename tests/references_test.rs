//! Tests for reference resolution: cycles, unresolved targets and depth limits.

use defcheck::{validate_document, DefinitionsValidator, Report, ValidationContext};
use serde_json::{json, Value};

fn document(definitions: Value) -> Value {
    json!({ "swagger": "2.0", "definitions": definitions })
}

fn validate(definitions: Value) -> Report {
    validate_document(&document(definitions)).unwrap()
}

#[test]
fn test_self_reference_is_a_cycle() {
    let report = validate(json!({
        "Node": {
            "allOf": [
                { "$ref": "#/definitions/Node" },
                { "properties": { "value": {} } }
            ]
        }
    }));

    let cycles = report.with_code("reference_cycle");
    assert_eq!(cycles.len(), 2);
    assert_eq!(cycles[0].location.to_string(), "Node");
    assert_eq!(cycles[0].message, "reference cycle detected: Node -> Node");
    assert_eq!(cycles[1].location.to_string(), "Node.Node");
}

#[test]
fn test_mutual_cycle_terminates() {
    let report = validate(json!({
        "A": { "allOf": [{ "$ref": "#/definitions/B" }, { "properties": { "a": {} } }] },
        "B": { "allOf": [{ "$ref": "#/definitions/A" }, { "properties": { "b": {} } }] }
    }));

    assert_eq!(report.len(), 4);
    assert_eq!(report.with_code("reference_cycle").len(), 4);
    assert!(report
        .iter()
        .any(|e| e.message == "reference cycle detected: A -> B -> A"));
    assert!(report
        .iter()
        .any(|e| e.location.to_string() == "A.B.A"));
}

#[test]
fn test_diamond_inheritance_is_not_a_cycle() {
    let report = validate(json!({
        "Base": { "properties": { "id": {} } },
        "Left": { "allOf": [{ "$ref": "#/definitions/Base" }, { "properties": { "l": {} } }] },
        "Right": { "allOf": [{ "$ref": "#/definitions/Base" }, { "properties": { "r": {} } }] },
        "Both": {
            "allOf": [
                { "$ref": "#/definitions/Left" },
                { "$ref": "#/definitions/Right" },
                { "properties": { "both": {} } }
            ]
        }
    }));

    assert!(report.is_empty(), "{}", report);
}

#[test]
fn test_unresolved_reference_reported_and_skipped() {
    let report = validate(json!({
        "Cat": {
            "allOf": [
                { "$ref": "#/definitions/Ghost" },
                { "required": ["name"], "properties": {} }
            ]
        }
    }));

    let missing = report.with_code("missing_reference");
    assert_eq!(missing.len(), 2);
    assert_eq!(missing[0].location.to_string(), "Cat");
    assert_eq!(missing[1].location.to_string(), "Cat.Ghost");
    assert_eq!(missing[1].message, "reference to 'Ghost' cannot be resolved");

    // The rest of the definition is still checked.
    assert_eq!(report.with_code("required_not_defined").len(), 1);
}

#[test]
fn test_collisions_still_found_next_to_unresolved_ancestor() {
    let report = validate(json!({
        "Parent": { "properties": { "id": {} } },
        "Child": {
            "allOf": [
                { "$ref": "#/definitions/Ghost" },
                { "$ref": "#/definitions/Parent" },
                { "properties": { "id": {} } }
            ]
        }
    }));

    let collisions = report.with_code("inheritance_collision");
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].location.to_string(), "Child");
    assert_eq!(
        collisions[0].message,
        "following properties are already defined in ancestors: [id]"
    );

    let missing: Vec<String> = report
        .with_code("missing_reference")
        .iter()
        .map(|e| e.location.to_string())
        .collect();
    assert_eq!(missing, vec!["Child", "Child.Ghost"]);
}

#[test]
fn test_depth_limit_enforcement() {
    let ctx = ValidationContext::from_document(&document(json!({
        "D0": { "allOf": [{ "$ref": "#/definitions/D1" }] },
        "D1": { "allOf": [{ "$ref": "#/definitions/D2" }] },
        "D2": { "allOf": [{ "$ref": "#/definitions/D3" }] },
        "D3": { "allOf": [{ "$ref": "#/definitions/D4" }] },
        "D4": { "properties": { "x": {} } }
    })))
    .unwrap();

    let shallow = DefinitionsValidator::new().validate(&ctx.clone().with_max_depth(3));
    assert!(!shallow.with_code("max_depth_exceeded").is_empty());
    assert!(shallow.with_code("reference_cycle").is_empty());
    assert!(shallow
        .with_code("max_depth_exceeded")
        .iter()
        .all(|e| e.message == "maximum reference depth 3 exceeded"));

    let deep = DefinitionsValidator::new().validate(&ctx);
    assert!(deep.is_empty(), "{}", deep);
}
