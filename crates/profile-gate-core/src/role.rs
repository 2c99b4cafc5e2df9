// crates/profile-gate-core/src/role.rs
// ============================================================================
// Module: Roles and Capabilities
// Description: Closed vocabularies for actor roles and capability flags.
// Purpose: Replace stringly-typed role and capability lookups with enums.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Roles are independent, unordered actor categories. Capabilities are named
//! boolean permissions that are not tied to a field. Both are closed sets;
//! callers holding raw strings go through [`Role::parse`] and
//! [`Capability::parse`], and unrecognized names fail closed at the resolver.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Actor role with its own independent configuration.
///
/// # Invariants
/// - Roles are not ordered by privilege; `Ord` exists only for map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Internal staff member.
    Staff,
    /// Marketplace service provider.
    ServiceProvider,
    /// Marketplace client.
    Client,
}

/// Role substituted when the requested role is unknown or unconfigured.
pub const DEFAULT_ROLE: Role = Role::Client;

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Self; 4] = [Self::Admin, Self::Staff, Self::ServiceProvider, Self::Client];

    /// Returns the canonical wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::ServiceProvider => "service_provider",
            Self::Client => "client",
        }
    }

    /// Parses a canonical role name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Capabilities
// ============================================================================

/// Named boolean permission granted per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Delete the profile.
    CanDelete,
    /// Change the login email address.
    CanChangeEmail,
    /// Upload a profile image.
    CanUploadImage,
    /// Deactivate the account.
    CanDeactivate,
    /// Manage platform-wide system settings.
    CanManageSystem,
    /// Change a user's role.
    CanChangeRole,
    /// Grant or revoke permissions.
    CanManagePermissions,
    /// Read the audit log.
    CanViewAuditLog,
    /// Export profile data.
    CanExportData,
    /// Verify service provider documents.
    CanVerifyProviders,
}

impl Capability {
    /// All capabilities in declaration order.
    pub const ALL: [Self; 10] = [
        Self::CanDelete,
        Self::CanChangeEmail,
        Self::CanUploadImage,
        Self::CanDeactivate,
        Self::CanManageSystem,
        Self::CanChangeRole,
        Self::CanManagePermissions,
        Self::CanViewAuditLog,
        Self::CanExportData,
        Self::CanVerifyProviders,
    ];

    /// Returns the canonical wire name of the capability.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CanDelete => "can_delete",
            Self::CanChangeEmail => "can_change_email",
            Self::CanUploadImage => "can_upload_image",
            Self::CanDeactivate => "can_deactivate",
            Self::CanManageSystem => "can_manage_system",
            Self::CanChangeRole => "can_change_role",
            Self::CanManagePermissions => "can_manage_permissions",
            Self::CanViewAuditLog => "can_view_audit_log",
            Self::CanExportData => "can_export_data",
            Self::CanVerifyProviders => "can_verify_providers",
        }
    }

    /// Parses a canonical capability name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|capability| capability.as_str() == name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
