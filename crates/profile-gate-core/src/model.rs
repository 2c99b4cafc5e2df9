// crates/profile-gate-core/src/model.rs
// ============================================================================
// Module: Profile Configuration Model
// Description: Sections, field definitions, permission sets, and role configs.
// Purpose: Hold the immutable, role-scoped view of the profile form.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`RoleConfig`] exclusively owns its section list, permission set, and
//! field definitions. Two roles that declare the same field hold independent
//! copies, so nothing reachable from one role can change another.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::FieldName;
use crate::identifiers::SectionKey;
use crate::role::Capability;
use crate::role::Role;
use crate::rules::ValidationRule;

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Static metadata for a UI section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMeta {
    /// Section key.
    pub key: SectionKey,
    /// Human-readable label.
    pub label: String,
    /// Icon reference understood by the UI.
    pub icon: String,
    /// Short description.
    pub description: String,
    /// Roles allowed to see the section, in declaration order.
    pub roles: Vec<Role>,
}

impl SectionMeta {
    /// Returns true when the section lists the role.
    #[must_use]
    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

// ============================================================================
// SECTION: Fields
// ============================================================================

/// Semantic input type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Calendar date.
    Date,
    /// Multi-line text.
    Textarea,
    /// Choice from fixed options.
    Select,
    /// Document upload.
    File,
    /// Image upload.
    Image,
    /// Checkbox or toggle.
    Boolean,
    /// Numeric input.
    Number,
    /// Secret input.
    Password,
    /// Web address.
    Url,
}

impl FieldType {
    /// Every field type in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Text,
        Self::Email,
        Self::Phone,
        Self::Date,
        Self::Textarea,
        Self::Select,
        Self::File,
        Self::Image,
        Self::Boolean,
        Self::Number,
        Self::Password,
        Self::Url,
    ];

    /// Returns the canonical wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Date => "date",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::File => "file",
            Self::Image => "image",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Password => "password",
            Self::Url => "url",
        }
    }

    /// Returns true for upload fields.
    #[must_use]
    pub const fn is_upload(self) -> bool {
        matches!(self, Self::File | Self::Image)
    }
}

/// Type-specific presentation and limit attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FieldMetadata {
    /// File extensions offered by the picker.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accept: Vec<String>,
    /// Maximum number of files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_files: Option<usize>,
    /// Whether several files may be selected.
    pub multiple: bool,
    /// Numeric step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Textarea row count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Select choices in display order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Role-scoped definition of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    /// Field name.
    pub name: FieldName,
    /// Semantic type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Human-readable label.
    pub label: String,
    /// Whether the field must be filled.
    pub required: bool,
    /// Owning section.
    pub section: SectionKey,
    /// Declared rules in evaluation order.
    pub validation: Vec<ValidationRule>,
    /// Type-specific metadata.
    #[serde(flatten)]
    pub metadata: FieldMetadata,
}

impl FieldDefinition {
    /// Creates a definition with no rules and empty metadata.
    #[must_use]
    pub fn new(
        name: impl Into<FieldName>,
        field_type: FieldType,
        label: impl Into<String>,
        section: impl Into<SectionKey>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: label.into(),
            required: false,
            section: section.into(),
            validation: Vec::new(),
            metadata: FieldMetadata::default(),
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Appends a validation rule.
    #[must_use]
    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }

    /// Replaces the metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: FieldMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Checks that type-specific metadata fits the field type.
    ///
    /// # Errors
    ///
    /// Returns the reason when metadata is set on a type that does not use it,
    /// or when a value is out of range.
    pub fn validate_metadata(&self) -> Result<(), &'static str> {
        let metadata = &self.metadata;
        let field_type = self.field_type;
        if !field_type.is_upload() {
            if metadata.max_files.is_some() || metadata.multiple || !metadata.accept.is_empty() {
                return Err("accept, max_files and multiple require a file or image field");
            }
        } else if metadata.max_files == Some(0) {
            return Err("max_files must be at least 1");
        }
        if metadata.rows.is_some() && field_type != FieldType::Textarea {
            return Err("rows requires a textarea field");
        }
        if let Some(step) = metadata.step {
            if field_type != FieldType::Number {
                return Err("step requires a number field");
            }
            if !(step.is_finite() && step > 0.0) {
                return Err("step must be a positive number");
            }
        }
        if field_type == FieldType::Select {
            if metadata.options.is_empty() {
                return Err("select fields require at least one option");
            }
        } else if !metadata.options.is_empty() {
            return Err("options require a select field");
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Permissions
// ============================================================================

/// Field lists and capability flags granted to a role.
///
/// # Invariants
/// - `read_only` and `can_edit` are subsets of `can_view` (enforced by the
///   registry). The two may overlap; read-only wins at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PermissionSet {
    /// Fields the role may edit.
    pub can_edit: BTreeSet<FieldName>,
    /// Fields the role may see.
    pub can_view: BTreeSet<FieldName>,
    /// Fields shown but locked.
    pub read_only: BTreeSet<FieldName>,
    /// Capability flags; absent entries are denied.
    pub capabilities: BTreeMap<Capability, bool>,
}

impl PermissionSet {
    /// Builds a permission set from name lists.
    #[must_use]
    pub fn from_lists<E, V, R>(can_edit: E, can_view: V, read_only: R) -> Self
    where
        E: IntoIterator,
        E::Item: Into<FieldName>,
        V: IntoIterator,
        V::Item: Into<FieldName>,
        R: IntoIterator,
        R::Item: Into<FieldName>,
    {
        Self {
            can_edit: can_edit.into_iter().map(Into::into).collect(),
            can_view: can_view.into_iter().map(Into::into).collect(),
            read_only: read_only.into_iter().map(Into::into).collect(),
            capabilities: BTreeMap::new(),
        }
    }

    /// Sets a capability flag.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability, granted: bool) -> Self {
        self.capabilities.insert(capability, granted);
        self
    }
}

// ============================================================================
// SECTION: Role Configuration
// ============================================================================

/// Complete, immutable configuration of one role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleConfig {
    /// Role this configuration was declared for.
    pub role: Role,
    /// Sections declared for the role, in display order.
    pub sections: Vec<SectionKey>,
    /// Permission set.
    pub permissions: PermissionSet,
    /// Field definitions in declaration order.
    pub fields: Vec<FieldDefinition>,
}

impl RoleConfig {
    /// Creates an empty configuration for a role.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            sections: Vec::new(),
            permissions: PermissionSet::default(),
            fields: Vec::new(),
        }
    }

    /// Returns the definition of a field, if the role declares it.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name.as_str() == name)
    }

    /// Returns the declaration index of a field, if the role declares it.
    #[must_use]
    pub fn field_position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name.as_str() == name)
    }
}
