// crates/scenario-harness-model/src/validation.rs
// ============================================================================
// Module: Service Description Validation
// Description: Structural checks applied before harness rendering.
// Purpose: Reject descriptions with empty fields or an empty method list.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Six independent predicates guard the renderer: the package identifier and
//! service name are non-empty, at least one method is declared, and every
//! method has a non-empty name, request type, and response type.
//! [`ValidatedService`] is the only input the renderer accepts, so a failed
//! check always prevents rendering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::types::MethodDescription;
use crate::types::ServiceDescription;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Structural violation found in a [`ServiceDescription`].
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
/// - `index` is the zero-based position of the method in declaration order.
///
/// # Examples
/// ```
/// use scenario_harness_model::ValidationError;
///
/// let err = ValidationError::EmptyMethodName { index: 1 };
/// assert_eq!(err.to_string(), "method #1 has an empty name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Package identifier is empty.
    #[error("package identifier is empty")]
    EmptyPackage,
    /// Service name is empty.
    #[error("service name is empty")]
    EmptyServiceName,
    /// No methods are declared.
    #[error("service declares no methods")]
    NoMethods,
    /// A method name is empty.
    #[error("method #{index} has an empty name")]
    EmptyMethodName {
        /// Method position in declaration order.
        index: usize,
    },
    /// A method request type name is empty.
    #[error("method #{index} ({method}) has an empty request type")]
    EmptyRequestType {
        /// Method position in declaration order.
        index: usize,
        /// Method name, possibly empty.
        method: String,
    },
    /// A method response type name is empty.
    #[error("method #{index} ({method}) has an empty response type")]
    EmptyResponseType {
        /// Method position in declaration order.
        index: usize,
        /// Method name, possibly empty.
        method: String,
    },
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a service description.
///
/// # Errors
/// Returns the first [`ValidationError`] in invariant order: package, service
/// name, method list, method names, request types, response types.
pub fn validate(description: &ServiceDescription) -> Result<(), ValidationError> {
    description.violations().into_iter().next().map_or(Ok(()), Err)
}

impl ServiceDescription {
    /// Returns every violated invariant, in invariant order.
    ///
    /// An empty result means the description is valid.
    #[must_use]
    pub fn violations(&self) -> Vec<ValidationError> {
        let mut found = Vec::new();
        if self.package_identifier.is_empty() {
            found.push(ValidationError::EmptyPackage);
        }
        if self.service_name.is_empty() {
            found.push(ValidationError::EmptyServiceName);
        }
        if self.methods.is_empty() {
            found.push(ValidationError::NoMethods);
        }
        found.extend(
            self.indexed_methods()
                .filter(|(_, method)| method.name.is_empty())
                .map(|(index, _)| ValidationError::EmptyMethodName {
                    index,
                }),
        );
        found.extend(
            self.indexed_methods()
                .filter(|(_, method)| method.request_type_name.is_empty())
                .map(|(index, method)| ValidationError::EmptyRequestType {
                    index,
                    method: method.name.clone(),
                }),
        );
        found.extend(
            self.indexed_methods()
                .filter(|(_, method)| method.response_type_name.is_empty())
                .map(|(index, method)| ValidationError::EmptyResponseType {
                    index,
                    method: method.name.clone(),
                }),
        );
        found
    }

    /// Validates this description.
    ///
    /// # Errors
    /// See [`validate`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self)
    }

    /// Iterates methods together with their declaration index.
    fn indexed_methods(&self) -> impl Iterator<Item = (usize, &MethodDescription)> {
        self.methods.iter().enumerate()
    }
}

// ============================================================================
// SECTION: Validated Wrapper
// ============================================================================

/// Service description that passed [`validate`].
///
/// # Invariants
/// - All six structural checks held when the value was built; the wrapped
///   description cannot be mutated afterwards.
///
/// # Examples
/// ```
/// use scenario_harness_model::ServiceDescription;
/// use scenario_harness_model::ValidatedService;
///
/// let description = ServiceDescription::new("pb", "TestService", Vec::new());
/// assert!(ValidatedService::try_from(description).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedService {
    /// Description that passed validation.
    description: ServiceDescription,
}

impl ValidatedService {
    /// Returns the validated description.
    #[must_use]
    pub const fn description(&self) -> &ServiceDescription {
        &self.description
    }

    /// Returns the package identifier.
    #[must_use]
    pub fn package_identifier(&self) -> &str {
        &self.description.package_identifier
    }

    /// Returns the service name.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.description.service_name
    }

    /// Returns the methods in declaration order; never empty.
    #[must_use]
    pub fn methods(&self) -> &[MethodDescription] {
        &self.description.methods
    }

    /// Unwraps the validated description.
    #[must_use]
    pub fn into_inner(self) -> ServiceDescription {
        self.description
    }
}

impl TryFrom<ServiceDescription> for ValidatedService {
    type Error = ValidationError;

    fn try_from(description: ServiceDescription) -> Result<Self, Self::Error> {
        validate(&description)?;
        Ok(Self {
            description,
        })
    }
}
