// crates/profile-gate-core/src/permissions.rs
// ============================================================================
// Module: Permission Resolver
// Description: Visibility, editability, read-only, and capability queries.
// Purpose: Answer per-field access questions with fail-closed semantics.
// Dependencies: crate::registry
// ============================================================================

//! ## Overview
//! All queries are total. Unknown roles resolve through the registry fallback;
//! unknown fields and capabilities answer `false`. A field listed in both
//! `read_only` and `can_edit` is read-only: a data entry error must never
//! grant edit access.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::registry::ConfigRegistry;
use crate::role::Capability;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Field access queries against a registry.
#[derive(Debug, Clone, Copy)]
pub struct PermissionResolver<'a> {
    /// Role table answering the queries.
    registry: &'a ConfigRegistry,
}

impl<'a> PermissionResolver<'a> {
    /// Creates a resolver over a registry.
    #[must_use]
    pub const fn new(registry: &'a ConfigRegistry) -> Self {
        Self {
            registry,
        }
    }

    /// Returns true when the role may see the field.
    #[must_use]
    pub fn is_visible(&self, role: &str, field: &str) -> bool {
        self.registry.resolve(role).permissions.can_view.contains(field)
    }

    /// Returns true when the role may edit the field.
    #[must_use]
    pub fn is_editable(&self, role: &str, field: &str) -> bool {
        let permissions = &self.registry.resolve(role).permissions;
        permissions.can_edit.contains(field) && !permissions.read_only.contains(field)
    }

    /// Returns true when the field is shown to the role but locked.
    #[must_use]
    pub fn is_read_only(&self, role: &str, field: &str) -> bool {
        self.registry.resolve(role).permissions.read_only.contains(field)
    }

    /// Returns the role's capability flag; undeclared flags are denied.
    #[must_use]
    pub fn has_capability(&self, role: &str, capability: Capability) -> bool {
        self.registry
            .resolve(role)
            .permissions
            .capabilities
            .get(&capability)
            .copied()
            .unwrap_or(false)
    }

    /// Returns the capability flag for a raw name; unknown names are denied.
    #[must_use]
    pub fn has_capability_named(&self, role: &str, capability: &str) -> bool {
        Capability::parse(capability).is_some_and(|capability| self.has_capability(role, capability))
    }
}
