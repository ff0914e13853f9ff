// crates/scenario-harness-model/src/types.rs
// ============================================================================
// Module: Service Description Types
// Description: Data model for services rendered into scenario test harnesses.
// Purpose: Provide the canonical input shape for the harness generator.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Serializable description of a gRPC service: the package the harness is
//! emitted under, the service name, and its methods in declaration order.
//! Field names on disk are short (`package`, `service`, `request_type`,
//! `response_type`); unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Service Types
// ============================================================================

/// Service whose remote-call methods are rendered into a test harness.
///
/// # Invariants
/// - None enforced at construction; see [`crate::validate`].
/// - `methods` order is the order of the generated dispatch branches and
///   per-method procedures.
///
/// # Examples
/// ```
/// use scenario_harness_model::MethodDescription;
/// use scenario_harness_model::ServiceDescription;
///
/// let description = ServiceDescription::new(
///     "pb",
///     "TestService",
///     vec![MethodDescription::new("Hello", "HReq", "HRes")],
/// );
/// assert_eq!(description.method_names().collect::<Vec<_>>(), ["Hello"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceDescription {
    /// Package the generated harness is declared in.
    #[serde(rename = "package")]
    pub package_identifier: String,
    /// Name of the remote service under test.
    #[serde(rename = "service")]
    pub service_name: String,
    /// Remote-call methods in declaration order.
    pub methods: Vec<MethodDescription>,
}

impl ServiceDescription {
    /// Builds a service description from its parts.
    #[must_use]
    pub fn new(
        package_identifier: impl Into<String>,
        service_name: impl Into<String>,
        methods: Vec<MethodDescription>,
    ) -> Self {
        Self {
            package_identifier: package_identifier.into(),
            service_name: service_name.into(),
            methods,
        }
    }

    /// Returns method names in declaration order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|method| method.name.as_str())
    }
}

/// One remote-call method of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDescription {
    /// Method identifier; dispatch key and part of generated identifiers.
    pub name: String,
    /// Request payload type name.
    #[serde(rename = "request_type")]
    pub request_type_name: String,
    /// Response payload type name.
    #[serde(rename = "response_type")]
    pub response_type_name: String,
}

impl MethodDescription {
    /// Builds a method description from its parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        request_type_name: impl Into<String>,
        response_type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            request_type_name: request_type_name.into(),
            response_type_name: response_type_name.into(),
        }
    }
}
