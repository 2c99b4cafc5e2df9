// crates/profile-gate-config/src/catalog.rs
// ============================================================================
// Module: Catalog Declarations
// Description: TOML declarations for sections, fields, rules, and roles.
// Purpose: Turn untrusted declarative data into validated core types.
// Dependencies: profile-gate-core, serde
// ============================================================================

//! ## Overview
//! Fields are declared once in a shared catalog and picked per role. A role
//! may override the label, the required flag, the rules, or any metadata of a
//! picked field; the result is an independent [`FieldDefinition`] owned by
//! that role. Every conversion error names its dotted config path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use profile_gate_core::Capability;
use profile_gate_core::FieldDefinition;
use profile_gate_core::FieldMetadata;
use profile_gate_core::FieldName;
use profile_gate_core::FieldType;
use profile_gate_core::PermissionSet;
use profile_gate_core::Role;
use profile_gate_core::RoleConfig;
use profile_gate_core::SectionKey;
use profile_gate_core::SectionMeta;
use profile_gate_core::ValidationRule;
use serde::Deserialize;

use crate::config::ConfigError;
use crate::config::MAX_FIELDS_PER_ROLE;
use crate::config::MAX_LABEL_LENGTH;
use crate::config::MAX_NAME_LENGTH;
use crate::config::MAX_OPTIONS;
use crate::config::MAX_PATTERN_LENGTH;
use crate::config::MAX_RULES_PER_FIELD;
use crate::ordered::OrderedTable;

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Declared UI section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionDecl {
    /// Human-readable label.
    pub label: String,
    /// Icon reference.
    pub icon: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Role names allowed to see the section.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl SectionDecl {
    /// Converts the declaration into catalog metadata.
    pub(crate) fn resolve(&self, key: &str) -> Result<SectionMeta, ConfigError> {
        let path = format!("sections.{key}");
        validate_name(&path, key)?;
        validate_label(&format!("{path}.label"), &self.label)?;
        let mut roles = Vec::with_capacity(self.roles.len());
        for name in &self.roles {
            let role = parse_role(&format!("{path}.roles"), name)?;
            if roles.contains(&role) {
                return Err(ConfigError::Invalid(format!(
                    "{path}.roles: role {role} is listed more than once"
                )));
            }
            roles.push(role);
        }
        Ok(SectionMeta {
            key: SectionKey::new(key),
            label: self.label.clone(),
            icon: self.icon.clone(),
            description: self.description.clone(),
            roles,
        })
    }
}

// ============================================================================
// SECTION: Fields
// ============================================================================

/// Argument of a declared validation rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleArg {
    /// Boolean switch (`required`, `email`).
    Flag(bool),
    /// Integer bound.
    Integer(i64),
    /// Fractional bound.
    Float(f64),
    /// Text argument (`pattern`, `confirm`).
    Text(String),
    /// Extension list (`file_type`).
    List(Vec<String>),
}

impl RuleArg {
    /// Returns the TOML type name of the argument.
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Flag(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
            Self::List(_) => "array",
        }
    }
}

/// Catalog entry for one field.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    /// Semantic type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Human-readable label.
    pub label: String,
    /// Whether the field must be filled.
    #[serde(default)]
    pub required: bool,
    /// Owning section.
    pub section: SectionKey,
    /// Rules in evaluation order.
    #[serde(default)]
    pub validation: OrderedTable<RuleArg>,
    /// File extensions offered by the picker.
    #[serde(default)]
    pub accept: Vec<String>,
    /// Maximum number of files.
    #[serde(default)]
    pub max_files: Option<usize>,
    /// Whether several files may be selected.
    #[serde(default)]
    pub multiple: bool,
    /// Numeric step.
    #[serde(default)]
    pub step: Option<f64>,
    /// Textarea row count.
    #[serde(default)]
    pub rows: Option<u32>,
    /// Select choices.
    #[serde(default)]
    pub options: Vec<String>,
    /// Placeholder text.
    #[serde(default)]
    pub placeholder: Option<String>,
}

/// Per-role replacement of catalog attributes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldOverride {
    /// Replacement label.
    #[serde(default)]
    pub label: Option<String>,
    /// Replacement required flag.
    #[serde(default)]
    pub required: Option<bool>,
    /// Replacement rule table.
    #[serde(default)]
    pub validation: Option<OrderedTable<RuleArg>>,
    /// Replacement accepted extensions.
    #[serde(default)]
    pub accept: Option<Vec<String>>,
    /// Replacement file limit.
    #[serde(default)]
    pub max_files: Option<usize>,
    /// Replacement multi-select flag.
    #[serde(default)]
    pub multiple: Option<bool>,
    /// Replacement numeric step.
    #[serde(default)]
    pub step: Option<f64>,
    /// Replacement row count.
    #[serde(default)]
    pub rows: Option<u32>,
    /// Replacement select choices.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Replacement placeholder.
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FieldDecl {
    /// Builds the role-owned definition of this field.
    pub(crate) fn resolve(
        &self,
        name: &str,
        path: &str,
        overrides: Option<&FieldOverride>,
    ) -> Result<FieldDefinition, ConfigError> {
        let empty = FieldOverride::default();
        let patch = overrides.unwrap_or(&empty);
        let label = patch.label.as_ref().unwrap_or(&self.label);
        validate_label(&format!("{path}.label"), label)?;
        let table = patch.validation.as_ref().unwrap_or(&self.validation);
        let options = patch.options.as_ref().unwrap_or(&self.options);
        if options.len() > MAX_OPTIONS {
            return Err(ConfigError::Invalid(format!(
                "{path}.options: exceeds {MAX_OPTIONS} entries"
            )));
        }
        let required = patch.required.unwrap_or(self.required);
        let mut validation = compile_rules(&format!("{path}.validation"), table)?;
        if !required && validation.contains(&ValidationRule::Required) {
            if patch.required.is_none() || patch.validation.is_some() {
                return Err(ConfigError::Invalid(format!(
                    "{path}.required: field is optional but validation.required is set"
                )));
            }
            // An optional override drops the inherited required rule.
            validation.retain(|rule| *rule != ValidationRule::Required);
        }
        Ok(FieldDefinition {
            name: FieldName::new(name),
            field_type: self.field_type,
            label: label.clone(),
            required,
            section: self.section.clone(),
            validation,
            metadata: FieldMetadata {
                accept: patch.accept.as_ref().unwrap_or(&self.accept).clone(),
                max_files: patch.max_files.or(self.max_files),
                multiple: patch.multiple.unwrap_or(self.multiple),
                step: patch.step.or(self.step),
                rows: patch.rows.or(self.rows),
                options: options.clone(),
                placeholder: patch.placeholder.clone().or_else(|| self.placeholder.clone()),
            },
        })
    }
}

/// Compiles a rule table into core rules, preserving declaration order.
pub(crate) fn compile_rules(
    path: &str,
    table: &OrderedTable<RuleArg>,
) -> Result<Vec<ValidationRule>, ConfigError> {
    if table.len() > MAX_RULES_PER_FIELD {
        return Err(ConfigError::Invalid(format!(
            "{path}: exceeds {MAX_RULES_PER_FIELD} rules"
        )));
    }
    let mut rules = Vec::with_capacity(table.len());
    for (name, arg) in table.iter() {
        let rule_path = format!("{path}.{name}");
        let rule = match name {
            "required" => flag(&rule_path, arg)?.then_some(ValidationRule::Required),
            "email" => flag(&rule_path, arg)?.then_some(ValidationRule::Email),
            "min_length" => Some(ValidationRule::MinLength(length(&rule_path, arg)?)),
            "max_length" => Some(ValidationRule::MaxLength(length(&rule_path, arg)?)),
            "pattern" => {
                let source = text(&rule_path, arg)?;
                if source.len() > MAX_PATTERN_LENGTH {
                    return Err(ConfigError::Invalid(format!(
                        "{rule_path}: exceeds {MAX_PATTERN_LENGTH} bytes"
                    )));
                }
                let rule = ValidationRule::pattern(source)
                    .map_err(|err| ConfigError::Invalid(format!("{rule_path}: {err}")))?;
                Some(rule)
            }
            "file_size" => Some(ValidationRule::FileSize(kilobytes(&rule_path, arg)?)),
            "file_type" => {
                let RuleArg::List(extensions) = arg else {
                    return Err(mismatched(&rule_path, "array of strings", arg));
                };
                let rule = ValidationRule::file_type(extensions)
                    .map_err(|err| ConfigError::Invalid(format!("{rule_path}: {err}")))?;
                Some(rule)
            }
            "min" => Some(ValidationRule::Min(number(&rule_path, arg)?)),
            "max" => Some(ValidationRule::Max(number(&rule_path, arg)?)),
            "confirm" => {
                let target = text(&rule_path, arg)?;
                validate_name(&rule_path, target)?;
                Some(ValidationRule::Confirm(FieldName::new(target)))
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "{path}: unknown validation rule {other}"
                )));
            }
        };
        rules.extend(rule);
    }
    check_bounds(path, &rules)?;
    Ok(rules)
}

/// Rejects lower bounds that exceed their upper bounds.
fn check_bounds(path: &str, rules: &[ValidationRule]) -> Result<(), ConfigError> {
    let mut min_length = None;
    let mut max_length = None;
    let mut min = None;
    let mut max = None;
    for rule in rules {
        match rule {
            ValidationRule::MinLength(n) => min_length = Some(*n),
            ValidationRule::MaxLength(n) => max_length = Some(*n),
            ValidationRule::Min(n) => min = Some(*n),
            ValidationRule::Max(n) => max = Some(*n),
            _ => {}
        }
    }
    if let (Some(low), Some(high)) = (min_length, max_length)
        && low > high
    {
        return Err(ConfigError::Invalid(format!("{path}: min_length exceeds max_length")));
    }
    if let (Some(low), Some(high)) = (min, max)
        && low > high
    {
        return Err(ConfigError::Invalid(format!("{path}: min exceeds max")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Declared configuration of one role.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleDecl {
    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<SectionKey>,
    /// Catalog fields picked for the role, in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldName>,
    /// Per-field overrides keyed by field name.
    #[serde(default)]
    pub overrides: OrderedTable<FieldOverride>,
    /// Permission lists and capability flags.
    #[serde(default)]
    pub permissions: PermissionsDecl,
}

/// Declared permission lists; remaining keys are capability flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionsDecl {
    /// Fields the role may edit.
    #[serde(default)]
    pub can_edit: Vec<FieldName>,
    /// Fields the role may see.
    #[serde(default)]
    pub can_view: Vec<FieldName>,
    /// Fields shown but locked.
    #[serde(default)]
    pub read_only: Vec<FieldName>,
    /// Capability flags by name.
    #[serde(flatten)]
    pub capabilities: BTreeMap<String, bool>,
}

impl PermissionsDecl {
    /// Converts the declaration into a permission set.
    fn resolve(&self, path: &str) -> Result<PermissionSet, ConfigError> {
        let mut permissions = PermissionSet::from_lists(
            self.can_edit.iter().cloned(),
            self.can_view.iter().cloned(),
            self.read_only.iter().cloned(),
        );
        for (name, granted) in &self.capabilities {
            let capability = Capability::parse(name).ok_or_else(|| {
                ConfigError::Invalid(format!("{path}: unknown capability {name}"))
            })?;
            permissions.capabilities.insert(capability, *granted);
        }
        Ok(permissions)
    }
}

impl RoleDecl {
    /// Builds the role-owned configuration from the shared field catalog.
    pub(crate) fn resolve(
        &self,
        role: Role,
        catalog: &OrderedTable<FieldDecl>,
    ) -> Result<RoleConfig, ConfigError> {
        let path = format!("roles.{role}");
        if self.fields.len() > MAX_FIELDS_PER_ROLE {
            return Err(ConfigError::Invalid(format!(
                "{path}.fields: exceeds {MAX_FIELDS_PER_ROLE} entries"
            )));
        }
        let picked: BTreeSet<&str> = self.fields.iter().map(FieldName::as_str).collect();
        for (name, _) in self.overrides.iter() {
            if !picked.contains(name) {
                return Err(ConfigError::Invalid(format!(
                    "{path}.overrides.{name}: field is not listed in {path}.fields"
                )));
            }
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        for name in &self.fields {
            let decl = catalog.get(name.as_str()).ok_or_else(|| {
                ConfigError::Invalid(format!("{path}.fields: unknown field {name}"))
            })?;
            let overrides = self.overrides.get(name.as_str());
            let field_path = if overrides.is_some() {
                format!("{path}.overrides.{name}")
            } else {
                format!("fields.{name}")
            };
            fields.push(decl.resolve(name.as_str(), &field_path, overrides)?);
        }

        Ok(RoleConfig {
            role,
            sections: self.sections.clone(),
            permissions: self.permissions.resolve(&format!("{path}.permissions"))?,
            fields,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a role name.
pub(crate) fn parse_role(path: &str, name: &str) -> Result<Role, ConfigError> {
    Role::parse(name).ok_or_else(|| ConfigError::Invalid(format!("{path}: unknown role {name}")))
}

/// Validates a section or field identifier.
pub(crate) fn validate_name(path: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Invalid(format!("{path}: name must be non-empty")));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "{path}: name exceeds {MAX_NAME_LENGTH} bytes"
        )));
    }
    let valid = name.starts_with(|ch: char| ch.is_ascii_lowercase())
        && name.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_');
    if !valid {
        return Err(ConfigError::Invalid(format!(
            "{path}: name {name} must be lowercase snake_case"
        )));
    }
    Ok(())
}

/// Validates a display label.
fn validate_label(path: &str, label: &str) -> Result<(), ConfigError> {
    if label.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{path} must be non-empty")));
    }
    if label.len() > MAX_LABEL_LENGTH {
        return Err(ConfigError::Invalid(format!("{path} exceeds {MAX_LABEL_LENGTH} bytes")));
    }
    Ok(())
}

/// Builds an argument type error.
fn mismatched(path: &str, expected: &str, arg: &RuleArg) -> ConfigError {
    ConfigError::Invalid(format!("{path}: expected {expected}, found {}", arg.type_name()))
}

/// Reads a boolean switch.
fn flag(path: &str, arg: &RuleArg) -> Result<bool, ConfigError> {
    match arg {
        RuleArg::Flag(value) => Ok(*value),
        other => Err(mismatched(path, "boolean", other)),
    }
}

/// Reads a string argument.
fn text<'a>(path: &str, arg: &'a RuleArg) -> Result<&'a str, ConfigError> {
    match arg {
        RuleArg::Text(value) => Ok(value),
        other => Err(mismatched(path, "string", other)),
    }
}

/// Reads a non-negative length.
fn length(path: &str, arg: &RuleArg) -> Result<usize, ConfigError> {
    match arg {
        RuleArg::Integer(value) => usize::try_from(*value)
            .map_err(|_| ConfigError::Invalid(format!("{path}: must be non-negative"))),
        other => Err(mismatched(path, "integer", other)),
    }
}

/// Reads a positive kilobyte limit.
fn kilobytes(path: &str, arg: &RuleArg) -> Result<u64, ConfigError> {
    match arg {
        RuleArg::Integer(value) if *value > 0 => u64::try_from(*value)
            .map_err(|_| ConfigError::Invalid(format!("{path}: must be positive"))),
        RuleArg::Integer(_) => Err(ConfigError::Invalid(format!("{path}: must be positive"))),
        other => Err(mismatched(path, "integer", other)),
    }
}

/// Reads a finite numeric bound.
#[allow(clippy::cast_precision_loss, reason = "Config bounds are far below 2^53.")]
fn number(path: &str, arg: &RuleArg) -> Result<f64, ConfigError> {
    let value = match arg {
        RuleArg::Integer(value) => *value as f64,
        RuleArg::Float(value) => *value,
        other => return Err(mismatched(path, "number", other)),
    };
    if !value.is_finite() {
        return Err(ConfigError::Invalid(format!("{path}: must be finite")));
    }
    Ok(value)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
