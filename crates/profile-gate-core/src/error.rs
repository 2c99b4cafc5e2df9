// crates/profile-gate-core/src/error.rs
// ============================================================================
// Module: Registry Errors
// Description: Configuration invariant violations found at registry build.
// Purpose: Make malformed role tables fatal before any query is answered.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Registry errors are configuration errors: they are raised once, while the
//! role table is assembled, and never by a query. Runtime lookups of unknown
//! roles, fields, or sections resolve to safe defaults instead.

use thiserror::Error;

use crate::identifiers::FieldName;
use crate::identifiers::SectionKey;
use crate::role::Role;

/// Invariant violation in a role table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The fallback role has no configuration.
    #[error("default role {0} is not configured")]
    MissingDefaultRole(Role),
    /// Two configurations were supplied for one role.
    #[error("role {0} is configured more than once")]
    DuplicateRole(Role),
    /// Two catalog entries share a section key.
    #[error("section {0} is declared more than once")]
    DuplicateSection(SectionKey),
    /// A role lists a section that is not in the catalog.
    #[error("roles.{role}.sections: unknown section {section}")]
    UnknownSection {
        /// Role declaring the section.
        role: Role,
        /// Missing section key.
        section: SectionKey,
    },
    /// A role lists the same section twice.
    #[error("roles.{role}.sections: section {section} is listed more than once")]
    RepeatedSection {
        /// Role declaring the section.
        role: Role,
        /// Repeated section key.
        section: SectionKey,
    },
    /// A role declares the same field twice.
    #[error("roles.{role}.fields: field {field} is declared more than once")]
    DuplicateField {
        /// Role declaring the field.
        role: Role,
        /// Repeated field name.
        field: FieldName,
    },
    /// A field belongs to a section that is not in the catalog.
    #[error("roles.{role}.fields.{field}: unknown section {section}")]
    FieldSectionUnknown {
        /// Role declaring the field.
        role: Role,
        /// Field name.
        field: FieldName,
        /// Missing section key.
        section: SectionKey,
    },
    /// A permission list names a field the role does not declare.
    #[error("roles.{role}.permissions.{list}: undeclared field {field}")]
    UndeclaredPermissionField {
        /// Role owning the permission set.
        role: Role,
        /// Permission list name.
        list: &'static str,
        /// Undeclared field name.
        field: FieldName,
    },
    /// A read-only field is missing from the view list.
    #[error("roles.{role}.permissions.read_only: field {field} is not in can_view")]
    ReadOnlyNotViewable {
        /// Role owning the permission set.
        role: Role,
        /// Offending field name.
        field: FieldName,
    },
    /// An editable field is missing from the view list.
    #[error("roles.{role}.permissions.can_edit: field {field} is not in can_view")]
    EditableNotViewable {
        /// Role owning the permission set.
        role: Role,
        /// Offending field name.
        field: FieldName,
    },
    /// A confirm rule points at a field the role does not declare.
    #[error("roles.{role}.fields.{field}: confirm target {target} is not declared")]
    ConfirmTargetUnknown {
        /// Role declaring the field.
        role: Role,
        /// Field carrying the rule.
        field: FieldName,
        /// Missing confirmation target.
        target: FieldName,
    },
    /// Metadata does not fit the field type.
    #[error("roles.{role}.fields.{field}: {reason}")]
    InvalidMetadata {
        /// Role declaring the field.
        role: Role,
        /// Offending field name.
        field: FieldName,
        /// Description of the mismatch.
        reason: String,
    },
}
