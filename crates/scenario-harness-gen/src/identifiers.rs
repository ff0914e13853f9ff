// crates/scenario-harness-gen/src/identifiers.rs
// ============================================================================
// Module: Go Identifier Checks
// Description: Guards values spliced into generated Go source.
// Purpose: Reject names that would produce malformed or ambiguous Go code.
// Dependencies: scenario-harness-model, serde_json
// ============================================================================

//! ## Overview
//! Package, service, and method names become Go identifiers in the harness.
//! Request and response types are instantiated as `<Type>{}` inside the
//! harness package, so they must be bare identifiers that do not collide with
//! the imports, constants, and locals the harness declares. Method names must
//! be unique because each one is both a `switch` case and a method on the
//! runner type.
//!
//! Identifiers are restricted to ASCII, which covers every name protobuf
//! allows and keeps the check independent of Unicode category tables.

use std::collections::BTreeSet;

use scenario_harness_model::ValidatedService;

use crate::GenerationError;

// ============================================================================
// CONSTANTS: Reserved names
// ============================================================================

/// Go reserved words; none can name a package, type, or method.
const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Names the harness declares or imports; a type with one of these names
/// would be shadowed or redeclared.
const HARNESS_NAMES: [&str; 32] = [
    // Imported packages.
    "codes",
    "context",
    "ioutil",
    "json",
    "reflect",
    "status",
    "testing",
    // Package-level declarations.
    "NewTestClient",
    "actionJSONKey",
    "errorExpectationJSONKey",
    "expectedErrorCodeJSONKey",
    "expectedResponseJSONKey",
    "requestJSONKey",
    // Parameters and locals of the per-method procedures.
    "actualErrCode",
    "ctx",
    "decodeErr",
    "err",
    "errCodeF",
    "errExpectation",
    "expectedErrCode",
    "expectedRes",
    "handler",
    "req",
    "reqErr",
    "reqJSON",
    "res",
    "resErr",
    "resJSON",
    "runner",
    "t",
    "testCase",
    "testHandler",
];

// ============================================================================
// SECTION: Predicates
// ============================================================================

/// Returns true when `value` is a usable Go identifier.
pub fn is_go_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return false;
    }
    value != "_"
        && chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
        && !GO_KEYWORDS.contains(&value)
}

/// Returns true when a type named `value` would clash with a harness name.
pub fn is_harness_name(value: &str) -> bool {
    HARNESS_NAMES.contains(&value)
}

/// Renders a Go interpreted string literal.
///
/// JSON string escaping is a subset of Go's; falls back to naive quoting.
pub fn go_string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value.replace('"', "\\\"")))
}

/// Checks that every name in the description can be spliced into Go source.
pub fn check_renderable(service: &ValidatedService) -> Result<(), GenerationError> {
    require_identifier("package identifier", service.package_identifier())?;
    require_identifier("service name", service.service_name())?;
    let mut seen = BTreeSet::new();
    for method in service.methods() {
        require_identifier("method name", &method.name)?;
        require_type_name("request type", &method.request_type_name)?;
        require_type_name("response type", &method.response_type_name)?;
        if !seen.insert(method.name.as_str()) {
            return Err(GenerationError::DuplicateMethod {
                name: method.name.clone(),
            });
        }
    }
    Ok(())
}

/// Rejects a field value that is not a Go identifier.
fn require_identifier(field: &'static str, value: &str) -> Result<(), GenerationError> {
    if is_go_identifier(value) {
        Ok(())
    } else {
        Err(GenerationError::InvalidIdentifier {
            field,
            value: value.to_string(),
        })
    }
}

/// Rejects a type name that is not an identifier or collides with the harness.
fn require_type_name(field: &'static str, value: &str) -> Result<(), GenerationError> {
    require_identifier(field, value)?;
    if is_harness_name(value) {
        return Err(GenerationError::ReservedName {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
