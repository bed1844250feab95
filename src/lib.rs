//! # Defcheck
//!
//! Semantic validation for the definitions section of OpenAPI/Swagger
//! documents. It runs after structural validation and looks for defects that
//! only appear when definitions are read as an inheritance graph, reporting
//! ALL of them instead of stopping at the first.
//!
//! ## Overview
//!
//! Raw definitions are classified into a closed node model ([`Definition`],
//! [`PropertyNode`]) and placed in a read-only [`ValidationContext`]. A
//! [`DefinitionsValidator`] then runs each [`DefinitionRule`] over each
//! definition and merges the findings into a [`Report`]:
//!
//! - [`InheritanceRule`]: a composed (`allOf`) definition redeclares a
//!   property that one of its ancestors already declares.
//! - [`RequiredRule`]: duplicated required names, required names that are not
//!   declared, discriminators that are not declared or not required, and
//!   arrays without `items`.
//!
//! Reference cycles and unresolved references are reported as findings too.
//!
//! ## Example
//!
//! ```rust
//! use defcheck::validate_document;
//! use serde_json::json;
//!
//! let report = validate_document(&json!({
//!     "swagger": "2.0",
//!     "definitions": {
//!         "Pet": {
//!             "discriminator": "petType",
//!             "required": ["petType"],
//!             "properties": {
//!                 "name": { "type": "string" },
//!                 "petType": { "type": "string" }
//!             }
//!         },
//!         "Cat": {
//!             "allOf": [
//!                 { "$ref": "#/definitions/Pet" },
//!                 { "properties": { "name": { "type": "string" } } }
//!             ]
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! assert_eq!(report.len(), 1);
//! assert_eq!(
//!     report.errors()[0].to_string(),
//!     "Cat: following properties are already defined in ancestors: [name]"
//! );
//! ```

pub mod collector;
pub mod error;
pub mod path;
pub mod report;
pub mod rules;
pub mod schema;
pub mod validation;
pub mod validator;

use serde_json::Value;

pub use collector::{collect_ancestor_properties, Inherited};
pub use error::{ContextError, DefinitionError, DefinitionErrors};
pub use path::Location;
pub use report::Report;
pub use rules::{DefinitionRule, InheritanceRule, RequiredRule};
pub use schema::{
    classify, classify_property, ArrayDefinition, ArrayProperty, ComposedDefinition, Definition,
    Member, ObjectDefinition, ObjectProperty, PropertyNode, Reference, Schema,
};
pub use validation::{ResolveError, ValidationContext};
pub use validator::DefinitionsValidator;

/// Type alias for rule results.
pub type ValidationResult = stillwater::Validation<(), DefinitionErrors>;

/// Validates the definitions of a decoded document with the default rules.
///
/// # Errors
///
/// Returns a [`ContextError`] if the document has no usable definitions
/// section.
pub fn validate_document(document: &Value) -> Result<Report, ContextError> {
    let ctx = ValidationContext::from_document(document)?;
    Ok(DefinitionsValidator::new().validate(&ctx))
}
