// crates/profile-gate-core/src/lib.rs
// ============================================================================
// Module: Profile Gate Core Library
// Description: Role-based field access and validation engine.
// Purpose: Resolve visibility, editability, sections, and validation per role.
// Dependencies: regex, serde, thiserror
// ============================================================================

//! ## Overview
//! `profile-gate-core` answers, for a role and a field or section, whether the
//! field is visible, editable, or read-only, which validation rules apply, and
//! which sections and capabilities the role has. Every query is pure and
//! synchronous over an immutable [`ConfigRegistry`].
//!
//! The engine is advisory for UI purposes. It does not authorize requests or
//! replace server-side validation.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod access;
pub mod error;
pub mod evaluator;
pub mod identifiers;
pub mod model;
pub mod permissions;
pub mod registry;
pub mod role;
pub mod rules;
pub mod sections;
pub mod shared;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use access::ProfileAccess;
pub use error::RegistryError;
pub use identifiers::FieldName;
pub use identifiers::SectionKey;
pub use model::FieldDefinition;
pub use model::FieldMetadata;
pub use model::FieldType;
pub use model::PermissionSet;
pub use model::RoleConfig;
pub use model::SectionMeta;
pub use permissions::PermissionResolver;
pub use registry::ConfigRegistry;
pub use registry::MismatchKind;
pub use registry::SectionRoleMismatch;
pub use role::Capability;
pub use role::DEFAULT_ROLE;
pub use role::Role;
pub use rules::FailureReason;
pub use rules::FieldPattern;
pub use rules::FieldValue;
pub use rules::FileDescriptor;
pub use rules::RuleError;
pub use rules::RuleFailure;
pub use rules::RuleKind;
pub use rules::SubmissionContext;
pub use rules::SubmissionReport;
pub use rules::ValidationOutcome;
pub use rules::ValidationRule;
pub use sections::SectionResolver;
pub use shared::SharedRegistry;
pub use validation::ValidationResolver;
