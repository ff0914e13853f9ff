// crates/scenario-harness-model/src/lib.rs
// ============================================================================
// Module: Scenario Harness Model Library
// Description: Input model for the scenario-driven gRPC test harness generator.
// Purpose: Describe services and methods, load descriptions, and validate them.
// Dependencies: serde, serde_json, toml, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate defines the service description consumed by
//! `scenario-harness-gen`: a package identifier, a service name, and an
//! ordered list of remote-call methods with their request and response type
//! names. Descriptions are validated before rendering; a
//! [`ValidatedService`] can only be obtained from a description that passed
//! every check.
//!
//! ### Design Notes
//! - Method order is significant and preserved from input to output.
//! - Validation predicates are independent; [`validate`] reports the first
//!   violation and [`ServiceDescription::violations`] reports all of them.
//!
//! ### Security Posture
//! Description files are treated as untrusted input. The loader enforces a
//! hard size limit and rejects unknown keys.
//!
//! ## Index
//! - Types: [`ServiceDescription`], [`MethodDescription`], [`ValidatedService`]
//! - Validation: [`validate`], [`ValidationError`]
//! - Loading: [`load_description`], [`parse_description`], [`DescriptionFormat`], [`LoadError`]

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::DescriptionFormat;
pub use loader::LoadError;
pub use loader::MAX_DESCRIPTION_BYTES;
pub use loader::load_description;
pub use loader::parse_description;
pub use types::MethodDescription;
pub use types::ServiceDescription;
pub use validation::ValidatedService;
pub use validation::ValidationError;
pub use validation::validate;
