//! Role table validation tests for profile-gate-config.
// crates/profile-gate-config/tests/config_validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Validate fail-closed handling of malformed role tables.
// Purpose: Ensure configuration errors abort the load with a dotted path.
// =============================================================================

mod common;

use common::CollectingSink;
use common::DEFAULT_PERMISSIONS;
use common::assert_invalid;
use common::minimal_toml;
use profile_gate_config::ConfigError;
use profile_gate_config::ProfileGateConfig;
use profile_gate_core::FieldValue;
use profile_gate_core::MismatchKind;
use profile_gate_core::ProfileAccess;
use profile_gate_core::Role;
use profile_gate_core::ValidationRule;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Accepted Configurations
// ============================================================================

#[test]
fn minimal_config_builds_registry() -> TestResult {
    let config = ProfileGateConfig::from_toml(&minimal_toml(DEFAULT_PERMISSIONS, ""))
        .map_err(|err| err.to_string())?;
    let sink = CollectingSink::default();
    let registry = config.build_registry(&sink).map_err(|err| err.to_string())?;
    let access = ProfileAccess::new(&registry);
    if !access.is_field_editable("client", "name") {
        return Err("name should be editable".to_string());
    }
    if access.is_field_editable("client", "nickname") || !access.is_field_visible("client", "nickname")
    {
        return Err("nickname should be view-only".to_string());
    }
    let loaded = sink.loaded();
    if loaded.len() != 1 || loaded[0].roles != vec![Role::Client] || loaded[0].fields != 2 {
        return Err(format!("unexpected load events: {loaded:?}"));
    }
    Ok(())
}

#[test]
fn overrides_replace_catalog_attributes_for_one_role() -> TestResult {
    let extra = r#"[roles.client.overrides.nickname]
label = "Handle"
required = true
validation = { max_length = 12 }
"#;
    let config = ProfileGateConfig::from_toml(&minimal_toml(DEFAULT_PERMISSIONS, extra))
        .map_err(|err| err.to_string())?;
    let registry = config.build_registry(&CollectingSink::default()).map_err(|err| err.to_string())?;
    let field = registry
        .field_config("client", "nickname")
        .ok_or_else(|| "nickname should be declared".to_string())?;
    if field.label != "Handle" || !field.required {
        return Err(format!("override not applied: {field:?}"));
    }
    if field.validation != vec![ValidationRule::MaxLength(12)] {
        return Err(format!("unexpected rules: {:?}", field.validation));
    }
    Ok(())
}

#[test]
fn field_order_follows_role_field_list() -> TestResult {
    let toml = minimal_toml(DEFAULT_PERMISSIONS, "").replace(
        r#"fields = ["name", "nickname"]"#,
        r#"fields = ["nickname", "name"]"#,
    );
    let config = ProfileGateConfig::from_toml(&toml).map_err(|err| err.to_string())?;
    let registry = config.build_registry(&CollectingSink::default()).map_err(|err| err.to_string())?;
    let names: Vec<&str> = ProfileAccess::new(&registry)
        .section_fields("client", "personal")
        .into_iter()
        .map(|field| field.name.as_str())
        .collect();
    if names != vec!["nickname", "name"] {
        return Err(format!("unexpected order: {names:?}"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Rejected Configurations
// ============================================================================

#[test]
fn read_only_outside_can_view_is_rejected() -> TestResult {
    let permissions = r#"can_edit = ["name"]
can_view = ["name"]
read_only = ["nickname"]"#;
    assert_invalid(
        ProfileGateConfig::from_toml(&minimal_toml(permissions, "")),
        "roles.client.permissions.read_only: field nickname is not in can_view",
    )
}

#[test]
fn editable_outside_can_view_is_rejected() -> TestResult {
    let permissions = r#"can_edit = ["name", "nickname"]
can_view = ["name"]"#;
    assert_invalid(
        ProfileGateConfig::from_toml(&minimal_toml(permissions, "")),
        "roles.client.permissions.can_edit: field nickname is not in can_view",
    )
}

#[test]
fn permission_for_undeclared_field_is_rejected() -> TestResult {
    let permissions = r#"can_view = ["name", "ghost"]"#;
    assert_invalid(
        ProfileGateConfig::from_toml(&minimal_toml(permissions, "")),
        "roles.client.permissions.can_view: undeclared field ghost",
    )
}

#[test]
fn unknown_capability_is_rejected() -> TestResult {
    let permissions = format!("{DEFAULT_PERMISSIONS}\ncan_teleport = true");
    assert_invalid(
        ProfileGateConfig::from_toml(&minimal_toml(&permissions, "")),
        "roles.client.permissions: unknown capability can_teleport",
    )
}

#[test]
fn unknown_role_is_rejected() -> TestResult {
    let extra = "[roles.superuser]\nsections = []\n";
    assert_invalid(
        ProfileGateConfig::from_toml(&minimal_toml(DEFAULT_PERMISSIONS, extra)),
        "roles: unknown role superuser",
    )
}

#[test]
fn unknown_section_role_is_rejected() -> TestResult {
    let toml = minimal_toml(DEFAULT_PERMISSIONS, "")
        .replace(r#"roles = ["client"]"#, r#"roles = ["client", "guest"]"#);
    assert_invalid(ProfileGateConfig::from_toml(&toml), "sections.personal.roles: unknown role guest")
}

#[test]
fn missing_default_role_is_rejected() -> TestResult {
    let toml = minimal_toml(DEFAULT_PERMISSIONS, "")
        .replace("[roles.client", "[roles.staff")
        .replace(r#"roles = ["client"]"#, r#"roles = ["staff"]"#);
    assert_invalid(ProfileGateConfig::from_toml(&toml), "default role client is not configured")
}

#[test]
fn unknown_validation_rule_is_rejected() -> TestResult {
    let toml = minimal_toml(DEFAULT_PERMISSIONS, "")
        .replace("{ min_length = 2 }", "{ min_length = 2, shout = true }");
    assert_invalid(ProfileGateConfig::from_toml(&toml), "fields.name.validation: unknown validation rule shout")
}

#[test]
fn invalid_pattern_is_rejected() -> TestResult {
    let toml = minimal_toml(DEFAULT_PERMISSIONS, "")
        .replace("{ min_length = 2 }", "{ pattern = '[a-z' }");
    assert_invalid(ProfileGateConfig::from_toml(&toml), "fields.name.validation.pattern: invalid pattern")
}

#[test]
fn invalid_override_rule_names_override_path() -> TestResult {
    let extra = "[roles.client.overrides.name]\nvalidation = { max_length = \"long\" }\n";
    assert_invalid(
        ProfileGateConfig::from_toml(&minimal_toml(DEFAULT_PERMISSIONS, extra)),
        "roles.client.overrides.name.validation.max_length: expected integer, found string",
    )
}

#[test]
fn override_for_unpicked_field_is_rejected() -> TestResult {
    let extra = "[roles.client.overrides.email]\nrequired = true\n";
    assert_invalid(
        ProfileGateConfig::from_toml(&minimal_toml(DEFAULT_PERMISSIONS, extra)),
        "roles.client.overrides.email: field is not listed in roles.client.fields",
    )
}

#[test]
fn role_picking_unknown_field_is_rejected() -> TestResult {
    let toml = minimal_toml(DEFAULT_PERMISSIONS, "")
        .replace(r#"fields = ["name", "nickname"]"#, r#"fields = ["name", "nickname", "ghost"]"#);
    assert_invalid(ProfileGateConfig::from_toml(&toml), "roles.client.fields: unknown field ghost")
}

#[test]
fn field_in_unknown_section_is_rejected() -> TestResult {
    let toml = minimal_toml(DEFAULT_PERMISSIONS, "")
        .replace("label = \"Nickname\"\nsection = \"personal\"", "label = \"Nickname\"\nsection = \"hobbies\"");
    assert_invalid(ProfileGateConfig::from_toml(&toml), "fields.nickname.section: unknown section hobbies")
}

#[test]
fn confirm_target_outside_role_is_rejected() -> TestResult {
    let extra = r#"[fields.password]
type = "password"
label = "Password"
section = "personal"

[fields.password_again]
type = "password"
label = "Password Again"
section = "personal"
validation = { confirm = "password" }
"#;
    let toml = minimal_toml(DEFAULT_PERMISSIONS, extra).replace(
        r#"fields = ["name", "nickname"]"#,
        r#"fields = ["name", "nickname", "password_again"]"#,
    );
    assert_invalid(
        ProfileGateConfig::from_toml(&toml),
        "roles.client.fields.password_again: confirm target password is not declared",
    )
}

#[test]
fn metadata_on_wrong_type_is_rejected() -> TestResult {
    let toml = minimal_toml(DEFAULT_PERMISSIONS, "")
        .replace("label = \"Nickname\"", "label = \"Nickname\"\nmax_files = 2");
    assert_invalid(
        ProfileGateConfig::from_toml(&toml),
        "accept, max_files and multiple require a file or image field",
    )
}

#[test]
fn unpicked_catalog_field_metadata_is_checked() -> TestResult {
    let rows_on_select = r#"[fields.broken]
type = "select"
label = "Broken"
section = "personal"
rows = 4
"#;
    assert_invalid(
        ProfileGateConfig::from_toml(&minimal_toml(DEFAULT_PERMISSIONS, rows_on_select)),
        "fields.broken: rows requires a textarea field",
    )?;
    let select_without_options = r#"[fields.broken]
type = "select"
label = "Broken"
section = "personal"
"#;
    assert_invalid(
        ProfileGateConfig::from_toml(&minimal_toml(DEFAULT_PERMISSIONS, select_without_options)),
        "fields.broken: select fields require at least one option",
    )
}

#[test]
fn unpicked_confirm_target_must_be_a_catalog_field() -> TestResult {
    let extra = r#"[fields.again]
type = "password"
label = "Again"
section = "personal"
validation = { confirm = "nope" }
"#;
    assert_invalid(
        ProfileGateConfig::from_toml(&minimal_toml(DEFAULT_PERMISSIONS, extra)),
        "fields.again.validation.confirm: unknown field nope",
    )
}

/// Marks the catalog `name` field required by flag and by rule.
fn required_name(toml: &str) -> String {
    toml.replace("label = \"Name\"\n", "label = \"Name\"\nrequired = true\n")
        .replace("{ min_length = 2 }", "{ required = true, min_length = 2 }")
}

#[test]
fn optional_override_drops_inherited_required_rule() -> TestResult {
    let extra = "[roles.client.overrides.name]\nrequired = false\n";
    let config = ProfileGateConfig::from_toml(&required_name(&minimal_toml(DEFAULT_PERMISSIONS, extra)))
        .map_err(|err| err.to_string())?;
    let registry = config.build_registry(&CollectingSink::default()).map_err(|err| err.to_string())?;
    let field = registry
        .field_config("client", "name")
        .ok_or_else(|| "name should be declared".to_string())?;
    if field.required || field.validation != vec![ValidationRule::MinLength(2)] {
        return Err(format!("override left a contradictory field: {field:?}"));
    }
    let access = ProfileAccess::new(&registry);
    if access.field_validation("client", "name").contains(&&ValidationRule::Required) {
        return Err("optional name should carry no required rule".to_string());
    }
    if !access.validate_field("client", "name", &FieldValue::Absent).valid {
        return Err("absent optional name should pass".to_string());
    }
    Ok(())
}

#[test]
fn optional_field_with_required_rule_is_rejected() -> TestResult {
    let extra = "[roles.client.overrides.name]\nrequired = false\nvalidation = { required = true }\n";
    assert_invalid(
        ProfileGateConfig::from_toml(&required_name(&minimal_toml(DEFAULT_PERMISSIONS, extra))),
        "roles.client.overrides.name.required: field is optional but validation.required is set",
    )?;
    let catalog_only = minimal_toml(DEFAULT_PERMISSIONS, "")
        .replace("{ min_length = 2 }", "{ required = true, min_length = 2 }");
    assert_invalid(
        ProfileGateConfig::from_toml(&catalog_only),
        "fields.name.required: field is optional but validation.required is set",
    )
}

#[test]
fn unknown_field_attribute_is_a_parse_error() -> TestResult {
    let toml = minimal_toml(DEFAULT_PERMISSIONS, "")
        .replace("label = \"Nickname\"", "label = \"Nickname\"\nsectoin = \"personal\"");
    match ProfileGateConfig::from_toml(&toml) {
        Err(ConfigError::Parse(_)) => Ok(()),
        other => Err(format!("expected parse error, got {other:?}")),
    }
}

// ============================================================================
// SECTION: Section/Role Consistency
// ============================================================================

/// Client lists `contact`, but `contact` only admits staff.
const DRIFTED_SECTIONS: &str = r#"[sections.contact]
label = "Contact"
icon = "phone"
roles = ["staff"]
"#;

/// Rewrites the client section list to include the drifted section.
fn drifted(strict: bool) -> String {
    let extra = format!("[validation]\nstrict_section_roles = {strict}\n\n{DRIFTED_SECTIONS}");
    minimal_toml(DEFAULT_PERMISSIONS, &extra)
        .replace(r#"sections = ["personal"]"#, r#"sections = ["personal", "contact"]"#)
}

#[test]
fn strict_mode_rejects_section_role_drift() -> TestResult {
    assert_invalid(
        ProfileGateConfig::from_toml(&drifted(true)),
        "roles.client.sections: section contact does not list role client",
    )
}

#[test]
fn permissive_mode_records_drift_and_uses_intersection() -> TestResult {
    let config = ProfileGateConfig::from_toml(&drifted(false)).map_err(|err| err.to_string())?;
    let sink = CollectingSink::default();
    let registry = config.build_registry(&sink).map_err(|err| err.to_string())?;

    let mismatches = sink.mismatches();
    if mismatches.len() != 1 {
        return Err(format!("expected one mismatch event, got {mismatches:?}"));
    }
    let event = &mismatches[0];
    if event.event != "section_role_mismatch"
        || event.role != Role::Client
        || event.section.as_str() != "contact"
        || event.kind != MismatchKind::SectionExcludesRole
    {
        return Err(format!("unexpected mismatch event: {event:?}"));
    }

    let keys: Vec<&str> = ProfileAccess::new(&registry)
        .available_sections("client")
        .into_iter()
        .map(|section| section.key.as_str())
        .collect();
    if keys != vec!["personal"] {
        return Err(format!("drifted section should be hidden, got {keys:?}"));
    }
    Ok(())
}
