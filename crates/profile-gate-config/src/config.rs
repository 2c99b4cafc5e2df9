// crates/profile-gate-config/src/config.rs
// ============================================================================
// Module: Profile Gate Configuration
// Description: Configuration loading and validation for the role table.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: profile-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Any malformed section, field, rule, or role aborts the load; nothing is
//! silently dropped. A loaded configuration is turned into an immutable
//! [`ConfigRegistry`] by [`ProfileGateConfig::build_registry`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use profile_gate_core::ConfigRegistry;
use profile_gate_core::MismatchKind;
use profile_gate_core::SectionRoleMismatch;
use profile_gate_core::ValidationRule;
use serde::Deserialize;
use thiserror::Error;

use crate::audit::AuditSink;
use crate::audit::ConfigLoadedEvent;
use crate::audit::SectionRoleMismatchEvent;
use crate::catalog::FieldDecl;
use crate::catalog::RoleDecl;
use crate::catalog::SectionDecl;
use crate::catalog::parse_role;
use crate::catalog::validate_name;
use crate::ordered::OrderedTable;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "profile-gate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "PROFILE_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of catalog sections.
pub(crate) const MAX_SECTIONS: usize = 64;
/// Maximum number of catalog fields.
pub(crate) const MAX_FIELDS: usize = 512;
/// Maximum number of fields picked by one role.
pub(crate) const MAX_FIELDS_PER_ROLE: usize = 512;
/// Maximum number of rules declared on one field.
pub(crate) const MAX_RULES_PER_FIELD: usize = 32;
/// Maximum length of a pattern rule in bytes.
pub(crate) const MAX_PATTERN_LENGTH: usize = 1024;
/// Maximum length of a section or field name.
pub(crate) const MAX_NAME_LENGTH: usize = 64;
/// Maximum length of a label.
pub(crate) const MAX_LABEL_LENGTH: usize = 256;
/// Maximum number of select options.
pub(crate) const MAX_OPTIONS: usize = 256;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Root configuration of the role table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileGateConfig {
    /// Load-time validation settings.
    #[serde(default)]
    pub validation: ValidationSettings,
    /// Section catalog in declaration order.
    #[serde(default)]
    pub sections: OrderedTable<SectionDecl>,
    /// Field catalog in declaration order.
    #[serde(default)]
    pub fields: OrderedTable<FieldDecl>,
    /// Role configurations keyed by role name.
    #[serde(default)]
    pub roles: OrderedTable<RoleDecl>,
    /// Config file the values were read from (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Load-time validation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationSettings {
    /// Treat section/role disagreements as errors instead of warnings.
    #[serde(default = "default_strict_section_roles")]
    pub strict_section_roles: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            strict_section_roles: default_strict_section_roles(),
        }
    }
}

/// Default for [`ValidationSettings::strict_section_roles`].
pub(crate) const fn default_strict_section_roles() -> bool {
    true
}

impl ProfileGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml(content)?;
        config.source = Some(resolved);
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compile().map(|_| ())
    }

    /// Builds the immutable role table and reports the load to `sink`.
    ///
    /// With `strict_section_roles = false`, each section/role disagreement is
    /// recorded as a mismatch event instead of failing the build.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn build_registry(&self, sink: &dyn AuditSink) -> Result<ConfigRegistry, ConfigError> {
        let registry = self.compile()?;
        if !self.validation.strict_section_roles {
            for mismatch in registry.section_role_mismatches() {
                sink.record_mismatch(&SectionRoleMismatchEvent::new(&mismatch));
            }
        }
        sink.record_loaded(&ConfigLoadedEvent::new(
            self.source.as_ref().map(|path| path.display().to_string()),
            registry.configured_roles().collect(),
            self.sections.len(),
            self.fields.len(),
            self.validation.strict_section_roles,
        ));
        Ok(registry)
    }

    /// Converts every declaration and assembles the registry.
    fn compile(&self) -> Result<ConfigRegistry, ConfigError> {
        if self.sections.len() > MAX_SECTIONS {
            return Err(ConfigError::Invalid(format!("sections: exceeds {MAX_SECTIONS} entries")));
        }
        if self.fields.len() > MAX_FIELDS {
            return Err(ConfigError::Invalid(format!("fields: exceeds {MAX_FIELDS} entries")));
        }

        let sections = self
            .sections
            .iter()
            .map(|(key, decl)| decl.resolve(key))
            .collect::<Result<Vec<_>, _>>()?;
        for (name, decl) in self.fields.iter() {
            let path = format!("fields.{name}");
            validate_name(&path, name)?;
            if self.sections.get(decl.section.as_str()).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "{path}.section: unknown section {}",
                    decl.section
                )));
            }
            let definition = decl.resolve(name, &path, None)?;
            definition
                .validate_metadata()
                .map_err(|reason| ConfigError::Invalid(format!("{path}: {reason}")))?;
            for rule in &definition.validation {
                if let ValidationRule::Confirm(target) = rule
                    && self.fields.get(target.as_str()).is_none()
                {
                    return Err(ConfigError::Invalid(format!(
                        "{path}.validation.confirm: unknown field {target}"
                    )));
                }
            }
        }

        let mut configs = Vec::with_capacity(self.roles.len());
        for (name, decl) in self.roles.iter() {
            let role = parse_role("roles", name)?;
            configs.push(decl.resolve(role, &self.fields)?);
        }
        let registry = ConfigRegistry::new(sections, configs)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;

        if self.validation.strict_section_roles
            && let Some(mismatch) = registry.section_role_mismatches().first()
        {
            return Err(ConfigError::Invalid(mismatch_message(mismatch)));
        }
        Ok(registry)
    }
}

/// Loads configuration and builds the registry in one step.
///
/// # Errors
///
/// Returns [`ConfigError`] when loading, validation, or assembly fails.
pub fn load_registry(
    path: Option<&Path>,
    sink: &dyn AuditSink,
) -> Result<ConfigRegistry, ConfigError> {
    ProfileGateConfig::load(path)?.build_registry(sink)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from an explicit path or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Describes a section/role disagreement with its config path.
fn mismatch_message(mismatch: &SectionRoleMismatch) -> String {
    let role = mismatch.role;
    let section = &mismatch.section;
    match mismatch.kind {
        MismatchKind::SectionExcludesRole => {
            format!("roles.{role}.sections: section {section} does not list role {role}")
        }
        MismatchKind::RoleOmitsSection => {
            format!("sections.{section}.roles: role {role} does not list section {section}")
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
