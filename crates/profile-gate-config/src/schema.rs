// crates/profile-gate-config/src/schema.rs
// ============================================================================
// Module: Config Schemas
// Description: JSON schema builders for profile-gate.toml.
// Purpose: Provide canonical validation schema for config artifacts.
// Dependencies: profile-gate-core, serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for the profile gate configuration.
//! The schema mirrors the loader's structural checks; cross-references such
//! as field names in permission lists are only checked by the loader.

use profile_gate_core::Capability;
use profile_gate_core::FieldType;
use profile_gate_core::Role;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::config::MAX_FIELDS;
use crate::config::MAX_LABEL_LENGTH;
use crate::config::MAX_NAME_LENGTH;
use crate::config::MAX_OPTIONS;
use crate::config::MAX_PATTERN_LENGTH;
use crate::config::MAX_RULES_PER_FIELD;
use crate::config::MAX_SECTIONS;
use crate::config::default_strict_section_roles;

/// Pattern accepted for section and field names.
const NAME_PATTERN: &str = "^[a-z][a-z0-9_]*$";

/// Returns the JSON schema for `profile-gate.toml`.
#[must_use]
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "profile-gate://schemas/config.schema.json",
        "title": "Profile Gate Configuration",
        "description": "Role-scoped field access and validation table.",
        "type": "object",
        "properties": {
            "validation": validation_settings_schema(),
            "sections": {
                "type": "object",
                "maxProperties": MAX_SECTIONS,
                "propertyNames": name_schema(),
                "additionalProperties": section_schema(),
                "default": {}
            },
            "fields": {
                "type": "object",
                "maxProperties": MAX_FIELDS,
                "propertyNames": name_schema(),
                "additionalProperties": field_schema(),
                "default": {}
            },
            "roles": roles_schema()
        },
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Settings and Sections
// ============================================================================

/// Schema for the validation settings table.
fn validation_settings_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "strict_section_roles": {
                "type": "boolean",
                "default": default_strict_section_roles(),
                "description": "Fail the load when role and section declarations disagree."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for one section entry.
fn section_schema() -> Value {
    json!({
        "type": "object",
        "required": ["label", "icon"],
        "properties": {
            "label": label_schema(),
            "icon": { "type": "string" },
            "description": { "type": "string", "default": "" },
            "roles": {
                "type": "array",
                "items": role_name_schema(),
                "uniqueItems": true,
                "default": []
            }
        },
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Fields
// ============================================================================

/// Schema for one catalog field.
fn field_schema() -> Value {
    let mut properties = field_attribute_properties();
    properties.insert(
        "type".to_string(),
        json!({
            "type": "string",
            "enum": FieldType::ALL.iter().map(|ty| ty.as_str()).collect::<Vec<_>>()
        }),
    );
    properties.insert("section".to_string(), name_schema());
    json!({
        "type": "object",
        "required": ["type", "label", "section"],
        "properties": properties,
        "additionalProperties": false
    })
}

/// Schema for a per-role field override.
fn field_override_schema() -> Value {
    json!({
        "type": "object",
        "properties": field_attribute_properties(),
        "additionalProperties": false
    })
}

/// Attributes shared by catalog fields and overrides.
fn field_attribute_properties() -> Map<String, Value> {
    let properties = json!({
        "label": label_schema(),
        "required": { "type": "boolean", "default": false },
        "validation": rules_schema(),
        "accept": { "type": "array", "items": { "type": "string" } },
        "max_files": { "type": "integer", "minimum": 1 },
        "multiple": { "type": "boolean", "default": false },
        "step": { "type": "number", "exclusiveMinimum": 0 },
        "rows": { "type": "integer", "minimum": 0 },
        "options": {
            "type": "array",
            "items": { "type": "string" },
            "maxItems": MAX_OPTIONS
        },
        "placeholder": { "type": "string" }
    });
    match properties {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Schema for an inline validation rule table.
fn rules_schema() -> Value {
    json!({
        "type": "object",
        "maxProperties": MAX_RULES_PER_FIELD,
        "properties": {
            "required": { "type": "boolean" },
            "email": { "type": "boolean" },
            "min_length": { "type": "integer", "minimum": 0 },
            "max_length": { "type": "integer", "minimum": 0 },
            "pattern": { "type": "string", "maxLength": MAX_PATTERN_LENGTH },
            "file_size": {
                "type": "integer",
                "minimum": 1,
                "description": "Maximum file size in kilobytes."
            },
            "file_type": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1
            },
            "min": { "type": "number" },
            "max": { "type": "number" },
            "confirm": name_schema()
        },
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Schema for the role table.
fn roles_schema() -> Value {
    let mut properties = Map::new();
    for role in Role::ALL {
        properties.insert(role.as_str().to_string(), role_schema());
    }
    json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": false,
        "default": {}
    })
}

/// Schema for one role configuration.
fn role_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "sections": {
                "type": "array",
                "items": name_schema(),
                "uniqueItems": true,
                "default": []
            },
            "fields": {
                "type": "array",
                "items": name_schema(),
                "uniqueItems": true,
                "default": []
            },
            "overrides": {
                "type": "object",
                "propertyNames": name_schema(),
                "additionalProperties": field_override_schema(),
                "default": {}
            },
            "permissions": permissions_schema()
        },
        "additionalProperties": false
    })
}

/// Schema for a role's permission table.
fn permissions_schema() -> Value {
    let list = json!({ "type": "array", "items": name_schema(), "default": [] });
    let mut properties = Map::new();
    properties.insert("can_edit".to_string(), list.clone());
    properties.insert("can_view".to_string(), list.clone());
    properties.insert("read_only".to_string(), list);
    for capability in Capability::ALL {
        properties.insert(
            capability.as_str().to_string(),
            json!({ "type": "boolean", "default": false }),
        );
    }
    json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Schema for a section or field name.
fn name_schema() -> Value {
    json!({
        "type": "string",
        "pattern": NAME_PATTERN,
        "maxLength": MAX_NAME_LENGTH
    })
}

/// Schema for a display label.
fn label_schema() -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "maxLength": MAX_LABEL_LENGTH
    })
}

/// Schema for a role name.
fn role_name_schema() -> Value {
    json!({
        "type": "string",
        "enum": Role::ALL.iter().map(|role| role.as_str()).collect::<Vec<_>>()
    })
}
