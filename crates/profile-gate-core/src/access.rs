// crates/profile-gate-core/src/access.rs
// ============================================================================
// Module: Profile Access Facade
// Description: Public query surface used by forms and tab navigation.
// Purpose: Give every call site one consistent entry point over the resolvers.
// Dependencies: crate::registry, crate::permissions, crate::sections, crate::validation
// ============================================================================

//! ## Overview
//! [`ProfileAccess`] borrows an injected [`ConfigRegistry`] and forwards to
//! the permission, section, and validation resolvers. It holds no state of
//! its own, so it is cheap to build per request and safe to share.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::model::FieldDefinition;
use crate::model::RoleConfig;
use crate::model::SectionMeta;
use crate::permissions::PermissionResolver;
use crate::registry::ConfigRegistry;
use crate::rules::FieldValue;
use crate::rules::SubmissionContext;
use crate::rules::SubmissionReport;
use crate::rules::ValidationOutcome;
use crate::rules::ValidationRule;
use crate::sections::SectionResolver;
use crate::validation::ValidationResolver;

// ============================================================================
// SECTION: Facade
// ============================================================================

/// Role-scoped profile queries over a registry.
#[derive(Debug, Clone, Copy)]
pub struct ProfileAccess<'a> {
    /// Role table answering the queries.
    registry: &'a ConfigRegistry,
}

impl<'a> ProfileAccess<'a> {
    /// Creates a facade over a registry.
    #[must_use]
    pub const fn new(registry: &'a ConfigRegistry) -> Self {
        Self {
            registry,
        }
    }

    /// Returns the registry behind this facade.
    #[must_use]
    pub const fn registry(&self) -> &'a ConfigRegistry {
        self.registry
    }

    /// Returns the full configuration answering queries for a role.
    #[must_use]
    pub fn profile_config(&self, role: &str) -> &'a RoleConfig {
        self.registry.resolve(role)
    }

    /// Returns a field definition as seen by a role.
    #[must_use]
    pub fn field_config(&self, role: &str, field: &str) -> Option<&'a FieldDefinition> {
        self.registry.field_config(role, field)
    }

    /// Returns true when the role may edit the field.
    #[must_use]
    pub fn is_field_editable(&self, role: &str, field: &str) -> bool {
        self.permissions().is_editable(role, field)
    }

    /// Returns true when the role may see the field.
    #[must_use]
    pub fn is_field_visible(&self, role: &str, field: &str) -> bool {
        self.permissions().is_visible(role, field)
    }

    /// Returns true when the field is locked for the role.
    #[must_use]
    pub fn is_field_read_only(&self, role: &str, field: &str) -> bool {
        self.permissions().is_read_only(role, field)
    }

    /// Returns the visible fields of a section in declaration order.
    #[must_use]
    pub fn section_fields(&self, role: &str, section: &str) -> Vec<&'a FieldDefinition> {
        self.sections().fields_in_section(role, section)
    }

    /// Returns the merged validation rules of a field.
    #[must_use]
    pub fn field_validation(&self, role: &str, field: &str) -> Vec<&'a ValidationRule> {
        self.validation().rules_for(role, field)
    }

    /// Returns the capability flag for a raw name; unknown names are denied.
    #[must_use]
    pub fn can_perform_action(&self, role: &str, capability: &str) -> bool {
        self.permissions().has_capability_named(role, capability)
    }

    /// Returns the sections available to a role.
    #[must_use]
    pub fn available_sections(&self, role: &str) -> Vec<&'a SectionMeta> {
        self.sections().available_sections(role)
    }

    /// Returns catalog metadata for a section.
    #[must_use]
    pub fn section_config(&self, section: &str) -> Option<&'a SectionMeta> {
        self.registry.section_config(section)
    }

    /// Returns true when the section lists the role.
    #[must_use]
    pub fn is_section_available_for_role(&self, section: &str, role: &str) -> bool {
        self.sections().is_section_available(section, role)
    }

    /// Validates a single field value.
    #[must_use]
    pub fn validate_field(&self, role: &str, field: &str, value: &FieldValue) -> ValidationOutcome {
        self.validation().validate(role, field, value)
    }

    /// Validates a field value against the rest of its submission.
    #[must_use]
    pub fn validate_field_in(
        &self,
        role: &str,
        field: &str,
        value: &FieldValue,
        context: &SubmissionContext,
    ) -> ValidationOutcome {
        self.validation().validate_in(role, field, value, context)
    }

    /// Validates a whole submission.
    #[must_use]
    pub fn validate_submission(&self, role: &str, context: &SubmissionContext) -> SubmissionReport {
        self.validation().validate_submission(role, context)
    }

    /// Returns the permission resolver.
    #[must_use]
    pub const fn permissions(&self) -> PermissionResolver<'a> {
        PermissionResolver::new(self.registry)
    }

    /// Returns the section resolver.
    #[must_use]
    pub const fn sections(&self) -> SectionResolver<'a> {
        SectionResolver::new(self.registry)
    }

    /// Returns the validation resolver.
    #[must_use]
    pub const fn validation(&self) -> ValidationResolver<'a> {
        ValidationResolver::new(self.registry)
    }
}
