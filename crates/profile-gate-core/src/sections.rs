// crates/profile-gate-core/src/sections.rs
// ============================================================================
// Module: Section Resolver
// Description: Section availability and per-section field listings.
// Purpose: Decide which tabs a role sees and which fields each tab shows.
// Dependencies: crate::registry, crate::permissions
// ============================================================================

//! ## Overview
//! Section availability is declared twice: by the role's section list and by
//! each section's role list. A section is available only when both agree.
//! Field listings keep the role's declaration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::model::FieldDefinition;
use crate::model::SectionMeta;
use crate::permissions::PermissionResolver;
use crate::registry::ConfigRegistry;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Section queries against a registry.
#[derive(Debug, Clone, Copy)]
pub struct SectionResolver<'a> {
    /// Role table answering the queries.
    registry: &'a ConfigRegistry,
}

impl<'a> SectionResolver<'a> {
    /// Creates a resolver over a registry.
    #[must_use]
    pub const fn new(registry: &'a ConfigRegistry) -> Self {
        Self {
            registry,
        }
    }

    /// Returns the sections available to a role in the role's declared order.
    #[must_use]
    pub fn available_sections(&self, role: &str) -> Vec<&'a SectionMeta> {
        let config = self.registry.resolve(role);
        config
            .sections
            .iter()
            .filter_map(|key| self.registry.section_config(key.as_str()))
            .filter(|section| section.allows(config.role))
            .collect()
    }

    /// Returns true when the section lists the role.
    #[must_use]
    pub fn is_section_available(&self, section: &str, role: &str) -> bool {
        let role = self.registry.effective_role(role);
        self.registry.section_config(section).is_some_and(|meta| meta.allows(role))
    }

    /// Returns the visible fields of a section in declaration order.
    #[must_use]
    pub fn fields_in_section(&self, role: &str, section: &str) -> Vec<&'a FieldDefinition> {
        let permissions = PermissionResolver::new(self.registry);
        self.registry
            .resolve(role)
            .fields
            .iter()
            .filter(|field| field.section.as_str() == section)
            .filter(|field| permissions.is_visible(role, field.name.as_str()))
            .collect()
    }
}
