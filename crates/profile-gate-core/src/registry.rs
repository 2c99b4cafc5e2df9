// crates/profile-gate-core/src/registry.rs
// ============================================================================
// Module: Config Registry
// Description: Immutable role table with default-role fallback.
// Purpose: Validate role configuration once and serve read-only lookups.
// Dependencies: crate::model, crate::error
// ============================================================================

//! ## Overview
//! [`ConfigRegistry`] is constructed once from static data and never mutated.
//! Construction enforces every hard invariant of the role table, so a registry
//! that exists is internally consistent. Lookups of unknown or unconfigured
//! roles resolve to [`DEFAULT_ROLE`]; lookups of unknown fields and sections
//! return `None`.
//!
//! The registry is passed to resolvers explicitly; there is no global table.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::RegistryError;
use crate::identifiers::FieldName;
use crate::identifiers::SectionKey;
use crate::model::FieldDefinition;
use crate::model::RoleConfig;
use crate::model::SectionMeta;
use crate::role::DEFAULT_ROLE;
use crate::role::Role;
use crate::rules::ValidationRule;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Validated, immutable role table.
///
/// # Invariants
/// - The default role is always configured.
/// - Every referenced section exists in the catalog.
/// - Permission lists only name declared fields; `read_only` and `can_edit`
///   are subsets of `can_view`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRegistry {
    /// Section catalog in declaration order.
    sections: Vec<SectionMeta>,
    /// Configuration of the default role.
    default: RoleConfig,
    /// Configurations of every other configured role.
    roles: BTreeMap<Role, RoleConfig>,
}

impl ConfigRegistry {
    /// Validates and assembles a role table.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when any invariant of the table is violated.
    pub fn new(sections: Vec<SectionMeta>, configs: Vec<RoleConfig>) -> Result<Self, RegistryError> {
        let mut catalog = BTreeSet::new();
        for section in &sections {
            if !catalog.insert(section.key.clone()) {
                return Err(RegistryError::DuplicateSection(section.key.clone()));
            }
        }

        let mut default = None;
        let mut roles = BTreeMap::new();
        for config in configs {
            validate_role(&config, &catalog)?;
            let role = config.role;
            if role == DEFAULT_ROLE {
                if default.replace(config).is_some() {
                    return Err(RegistryError::DuplicateRole(role));
                }
            } else if roles.insert(role, config).is_some() {
                return Err(RegistryError::DuplicateRole(role));
            }
        }
        let default = default.ok_or(RegistryError::MissingDefaultRole(DEFAULT_ROLE))?;

        Ok(Self {
            sections,
            default,
            roles,
        })
    }

    /// Returns the role whose configuration answers queries for `name`.
    ///
    /// Unknown names and known roles without a configuration resolve to
    /// [`DEFAULT_ROLE`].
    #[must_use]
    pub fn effective_role(&self, name: &str) -> Role {
        Role::parse(name).filter(|role| self.is_configured(*role)).unwrap_or(DEFAULT_ROLE)
    }

    /// Returns true when the role has its own configuration.
    #[must_use]
    pub fn is_configured(&self, role: Role) -> bool {
        role == DEFAULT_ROLE || self.roles.contains_key(&role)
    }

    /// Returns the configuration of a role, falling back to the default role.
    #[must_use]
    pub fn role_config(&self, role: Role) -> &RoleConfig {
        self.roles.get(&role).unwrap_or(&self.default)
    }

    /// Returns the configuration answering queries for a role name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> &RoleConfig {
        self.role_config(self.effective_role(name))
    }

    /// Returns a field definition as seen by a role.
    #[must_use]
    pub fn field_config(&self, role: &str, field: &str) -> Option<&FieldDefinition> {
        self.resolve(role).field(field)
    }

    /// Returns catalog metadata for a section.
    #[must_use]
    pub fn section_config(&self, key: &str) -> Option<&SectionMeta> {
        self.sections.iter().find(|section| section.key.as_str() == key)
    }

    /// Returns the section catalog in declaration order.
    #[must_use]
    pub fn sections(&self) -> &[SectionMeta] {
        &self.sections
    }

    /// Iterates configured roles in declaration order.
    pub fn configured_roles(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.is_configured(*role))
    }

    /// Reports disagreements between role section lists and section role lists.
    ///
    /// Only configured roles are checked. The caller decides whether these are
    /// fatal; resolution always uses the intersection of both declarations.
    #[must_use]
    pub fn section_role_mismatches(&self) -> Vec<SectionRoleMismatch> {
        let mut mismatches = Vec::new();
        for role in self.configured_roles() {
            let config = self.role_config(role);
            for section in &self.sections {
                let listed_by_role = config.sections.contains(&section.key);
                let allows_role = section.allows(role);
                let kind = match (listed_by_role, allows_role) {
                    (true, false) => MismatchKind::SectionExcludesRole,
                    (false, true) => MismatchKind::RoleOmitsSection,
                    _ => continue,
                };
                mismatches.push(SectionRoleMismatch {
                    role,
                    section: section.key.clone(),
                    kind,
                });
            }
        }
        mismatches
    }
}

/// Disagreement between a role's section list and a section's role list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRoleMismatch {
    /// Role involved.
    pub role: Role,
    /// Section involved.
    pub section: SectionKey,
    /// Which side omits the other.
    pub kind: MismatchKind,
}

/// Direction of a section/role disagreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// The role lists the section but the section does not list the role.
    SectionExcludesRole,
    /// The section lists the role but the role does not list the section.
    RoleOmitsSection,
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Checks one role configuration against the section catalog.
fn validate_role(config: &RoleConfig, catalog: &BTreeSet<SectionKey>) -> Result<(), RegistryError> {
    let role = config.role;
    let mut listed = BTreeSet::new();
    for section in &config.sections {
        if !catalog.contains(section) {
            return Err(RegistryError::UnknownSection {
                role,
                section: section.clone(),
            });
        }
        if !listed.insert(section) {
            return Err(RegistryError::RepeatedSection {
                role,
                section: section.clone(),
            });
        }
    }

    let mut declared: BTreeSet<&FieldName> = BTreeSet::new();
    for field in &config.fields {
        if !declared.insert(&field.name) {
            return Err(RegistryError::DuplicateField {
                role,
                field: field.name.clone(),
            });
        }
        if !catalog.contains(&field.section) {
            return Err(RegistryError::FieldSectionUnknown {
                role,
                field: field.name.clone(),
                section: field.section.clone(),
            });
        }
        validate_metadata(role, field)?;
    }
    for field in &config.fields {
        for rule in &field.validation {
            if let ValidationRule::Confirm(target) = rule
                && !declared.contains(target)
            {
                return Err(RegistryError::ConfirmTargetUnknown {
                    role,
                    field: field.name.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    let permissions = &config.permissions;
    for (list, names) in [
        ("can_edit", &permissions.can_edit),
        ("can_view", &permissions.can_view),
        ("read_only", &permissions.read_only),
    ] {
        if let Some(field) = names.iter().find(|name| !declared.contains(name)) {
            return Err(RegistryError::UndeclaredPermissionField {
                role,
                list,
                field: field.clone(),
            });
        }
    }
    if let Some(field) = permissions.read_only.difference(&permissions.can_view).next() {
        return Err(RegistryError::ReadOnlyNotViewable {
            role,
            field: field.clone(),
        });
    }
    if let Some(field) = permissions.can_edit.difference(&permissions.can_view).next() {
        return Err(RegistryError::EditableNotViewable {
            role,
            field: field.clone(),
        });
    }
    Ok(())
}

/// Checks field metadata, tagging failures with the owning role.
fn validate_metadata(role: Role, field: &FieldDefinition) -> Result<(), RegistryError> {
    field.validate_metadata().map_err(|reason| RegistryError::InvalidMetadata {
        role,
        field: field.name.clone(),
        reason: reason.to_string(),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
