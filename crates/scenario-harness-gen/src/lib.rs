// crates/scenario-harness-gen/src/lib.rs
// ============================================================================
// Module: Scenario Harness Generator Library
// Description: Deterministic generator for scenario-driven gRPC test harnesses.
// Purpose: Render Go test harness sources from validated service descriptions.
// Dependencies: scenario-harness-model, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate renders the Go source of a scenario-driven test harness for a
//! gRPC service. The harness reads an ordered list of scenario records from a
//! JSON file, dispatches each record to the method named by its `action`, and
//! either checks the returned status code or compares the response with the
//! expected one.
//!
//! ### Design Notes
//! - Output is deterministic: one dispatch branch and one test procedure per
//!   method, both in declaration order, and no timestamps or unordered
//!   iteration.
//! - Rendering only accepts a [`ValidatedService`]; invalid descriptions never
//!   reach the template.
//! - Values that cannot be spliced into Go source (non-identifiers, keywords,
//!   type names the harness already uses, duplicate method names) are
//!   rejected instead of producing malformed text.
//!
//! ## Index
//! - Public API: [`HarnessGenerator`], [`generate`], [`GenerationError`], [`GENERATOR_NAME`]
//! - Output files: [`output`]
//! - Rendering: Go preamble, runner, dispatch block, per-method procedures (private)

use std::fmt;
use std::path::Path;

pub use scenario_harness_model as model;
use scenario_harness_model::DescriptionFormat;
use scenario_harness_model::LoadError;
use scenario_harness_model::ServiceDescription;
use scenario_harness_model::ValidatedService;
use scenario_harness_model::ValidationError;
use thiserror::Error;

mod identifiers;
pub mod output;
mod render;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Generator name written into the generated-code marker line.
pub const GENERATOR_NAME: &str = "scenario-harness-gen";

/// Errors raised while rendering a harness.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
/// - No partial output accompanies an error.
///
/// # Examples
/// ```
/// use scenario_harness_gen::GenerationError;
///
/// let err = GenerationError::DuplicateMethod {
///     name: "Hello".to_string(),
/// };
/// assert_eq!(err.to_string(), "method Hello is declared more than once");
/// ```
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Description failed structural validation.
    #[error("invalid service description: {0}")]
    Validation(#[from] ValidationError),
    /// Description file could not be loaded.
    #[error("cannot load service description: {0}")]
    Load(#[from] LoadError),
    /// A value cannot be rendered as a Go identifier.
    #[error("{field} `{value}` is not a valid Go identifier")]
    InvalidIdentifier {
        /// Which field carried the value.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// A type name collides with a name the harness declares or imports.
    #[error("{field} `{value}` collides with a name declared by the harness")]
    ReservedName {
        /// Which field carried the value.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// Two methods share a name.
    #[error("method {name} is declared more than once")]
    DuplicateMethod {
        /// Repeated method name.
        name: String,
    },
    /// Writing into the output buffer failed.
    #[error("template rendering failed")]
    Format(#[from] fmt::Error),
}

/// Harness generator bound to one validated service description.
///
/// # Invariants
/// - The wrapped description passed validation.
/// - Rendering is deterministic for a fixed description.
///
/// # Examples
/// ```
/// use scenario_harness_gen::HarnessGenerator;
/// use scenario_harness_gen::model::MethodDescription;
/// use scenario_harness_gen::model::ServiceDescription;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let description = ServiceDescription::new(
///     "pb",
///     "TestService",
///     vec![MethodDescription::new("Hello", "HReq", "HRes")],
/// );
/// let generator = HarnessGenerator::new(description)?;
/// let harness = generator.generate()?;
/// assert!(harness.contains("type TestServiceTestRunner struct"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HarnessGenerator {
    /// Validated description rendered by this generator.
    service: ValidatedService,
}

impl HarnessGenerator {
    /// Validates a description and binds a generator to it.
    ///
    /// # Errors
    /// Returns [`GenerationError::Validation`] when a structural check fails.
    pub fn new(description: ServiceDescription) -> Result<Self, GenerationError> {
        let service = ValidatedService::try_from(description)?;
        Ok(Self::from_validated(service))
    }

    /// Binds a generator to an already validated description.
    #[must_use]
    pub const fn from_validated(service: ValidatedService) -> Self {
        Self {
            service,
        }
    }

    /// Loads and validates a description file.
    ///
    /// When `format` is `None` it is inferred from the file extension.
    ///
    /// # Errors
    /// Returns [`GenerationError::Load`] when the file cannot be read or parsed
    /// and [`GenerationError::Validation`] when a structural check fails.
    pub fn load(
        path: impl AsRef<Path>,
        format: Option<DescriptionFormat>,
    ) -> Result<Self, GenerationError> {
        let description = scenario_harness_model::load_description(path, format)?;
        Self::new(description)
    }

    /// Returns the validated description.
    #[must_use]
    pub const fn service(&self) -> &ValidatedService {
        &self.service
    }

    /// Renders the Go test harness source.
    ///
    /// # Errors
    /// Returns [`GenerationError`] when a name cannot be spliced into Go
    /// source or the output buffer rejects a write.
    pub fn generate(&self) -> Result<String, GenerationError> {
        let rendered = render::render_harness(&self.service)?;
        tracing::debug!(
            package = self.service.package_identifier(),
            service = self.service.service_name(),
            methods = self.service.methods().len(),
            bytes = rendered.len(),
            "rendered scenario harness"
        );
        Ok(rendered)
    }
}

/// Validates a description and renders its Go test harness.
///
/// # Errors
/// Returns [`GenerationError::Validation`] for structurally invalid input and
/// the other [`GenerationError`] variants for unrenderable names.
pub fn generate(description: &ServiceDescription) -> Result<String, GenerationError> {
    HarnessGenerator::new(description.clone())?.generate()
}
