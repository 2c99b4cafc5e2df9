//! Resolver query tests for profile-gate-core.
// crates/profile-gate-core/tests/resolver_queries.rs
// =============================================================================
// Module: Resolver Query Tests
// Description: Permission, section, and validation queries over a fixture table.
// Purpose: Pin fail-closed answers for unknown roles, fields, and sections.
// =============================================================================

mod common;

use common::fixture_registry;
use profile_gate_core::Capability;
use profile_gate_core::FailureReason;
use profile_gate_core::FieldValue;
use profile_gate_core::FileDescriptor;
use profile_gate_core::PermissionResolver;
use profile_gate_core::Role;
use profile_gate_core::RuleKind;
use profile_gate_core::SectionResolver;
use profile_gate_core::SubmissionContext;
use profile_gate_core::ValidationResolver;
use profile_gate_core::ValidationRule;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Permissions
// ============================================================================

#[test]
fn read_only_overrides_can_edit() -> TestResult {
    let registry = fixture_registry()?;
    let permissions = PermissionResolver::new(&registry);
    if permissions.is_editable("service_provider", "role") {
        return Err("role is listed read-only and must not be editable".to_string());
    }
    if !permissions.is_visible("service_provider", "role")
        || !permissions.is_read_only("service_provider", "role")
    {
        return Err("role should stay visible and read-only".to_string());
    }
    Ok(())
}

#[test]
fn unconfigured_role_uses_default_permissions() -> TestResult {
    let registry = fixture_registry()?;
    let permissions = PermissionResolver::new(&registry);
    if registry.effective_role("staff") != Role::Client {
        return Err("staff has no config and should resolve to client".to_string());
    }
    if permissions.is_editable("staff", "notes") || !permissions.is_editable("staff", "first_name") {
        return Err("staff should answer with client permissions".to_string());
    }
    Ok(())
}

#[test]
fn capability_lookup_is_fail_closed() -> TestResult {
    let registry = fixture_registry()?;
    let permissions = PermissionResolver::new(&registry);
    if !permissions.has_capability("admin", Capability::CanChangeRole) {
        return Err("admin can change roles".to_string());
    }
    if permissions.has_capability("client", Capability::CanDelete) {
        return Err("explicit false flag must deny".to_string());
    }
    if permissions.has_capability("client", Capability::CanManageSystem) {
        return Err("absent flag must deny".to_string());
    }
    if permissions.has_capability_named("admin", "canManageSystem") {
        return Err("unrecognized spelling must deny".to_string());
    }
    if !permissions.has_capability_named("admin", "can_manage_system") {
        return Err("snake_case capability names resolve".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Sections
// ============================================================================

#[test]
fn sections_follow_role_order_and_section_roles() -> TestResult {
    let registry = fixture_registry()?;
    let sections = SectionResolver::new(&registry);
    let keys: Vec<&str> =
        sections.available_sections("admin").into_iter().map(|meta| meta.key.as_str()).collect();
    if keys != vec!["personal", "security", "system"] {
        return Err(format!("unexpected admin sections: {keys:?}"));
    }
    if sections.is_section_available("business", "admin") {
        return Err("business does not list admin".to_string());
    }
    if sections.is_section_available("atlantis", "admin") {
        return Err("unknown sections are never available".to_string());
    }
    Ok(())
}

#[test]
fn section_fields_filter_by_visibility() -> TestResult {
    let registry = fixture_registry()?;
    let sections = SectionResolver::new(&registry);
    let names: Vec<&str> = sections
        .fields_in_section("service_provider", "business")
        .into_iter()
        .map(|field| field.name.as_str())
        .collect();
    if names != vec!["business_name", "certifications"] {
        return Err(format!("unexpected business fields: {names:?}"));
    }
    if !sections.fields_in_section("client", "business").is_empty() {
        return Err("client declares no business fields".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn rules_are_merged_with_implicit_required() -> TestResult {
    let registry = fixture_registry()?;
    let validation = ValidationResolver::new(&registry);
    let rules: Vec<ValidationRule> =
        validation.rules_for("client", "first_name").into_iter().cloned().collect();
    let expected =
        vec![ValidationRule::Required, ValidationRule::MinLength(2), ValidationRule::MaxLength(50)];
    if rules != expected {
        return Err(format!("unexpected merged rules: {rules:?}"));
    }
    if !validation.rules_for("client", "bio").is_empty() {
        return Err("client does not declare bio".to_string());
    }
    Ok(())
}

#[test]
fn validation_collects_every_failure() -> TestResult {
    let registry = fixture_registry()?;
    let validation = ValidationResolver::new(&registry);
    let outcome = validation.validate("client", "first_name", &FieldValue::text("   "));
    // Whitespace counts toward length, so only Required fails.
    let kinds: Vec<RuleKind> = outcome.failures.iter().map(|failure| failure.rule).collect();
    if kinds != vec![RuleKind::Required] {
        return Err(format!("unexpected failures: {kinds:?}"));
    }

    let long = "y".repeat(51);
    let outcome = validation.validate("client", "email", &FieldValue::text(long));
    if !outcome.has_failure(RuleKind::Email) || outcome.valid {
        return Err("not an email".to_string());
    }
    Ok(())
}

#[test]
fn file_rules_report_per_file_failures() -> TestResult {
    let registry = fixture_registry()?;
    let validation = ValidationResolver::new(&registry);
    let files = vec![
        FileDescriptor::new("license.PDF", 10 * 1024),
        FileDescriptor::new("photo.png", 6 * 1024 * 1024),
        FileDescriptor::new("script.sh", 100),
    ];
    let outcome = validation.validate("service_provider", "certifications", &FieldValue::Files(files));
    let shape: Vec<(RuleKind, Option<usize>)> =
        outcome.failures.iter().map(|failure| (failure.rule, failure.file_index)).collect();
    if shape != vec![(RuleKind::FileType, Some(2)), (RuleKind::FileSize, Some(1))] {
        return Err(format!("unexpected file failures: {shape:?}"));
    }
    Ok(())
}

#[test]
fn wrong_value_kind_is_a_failure_not_a_panic() -> TestResult {
    let registry = fixture_registry()?;
    let validation = ValidationResolver::new(&registry);
    let outcome = validation.validate("client", "first_name", &FieldValue::Number(42.0));
    let reasons: Vec<&FailureReason> = outcome.failures.iter().map(|failure| &failure.reason).collect();
    if !reasons.iter().all(|reason| matches!(reason, FailureReason::TypeMismatch { .. })) || reasons.is_empty()
    {
        return Err(format!("expected type mismatches, got {reasons:?}"));
    }
    Ok(())
}

#[test]
fn confirm_compares_against_submission() -> TestResult {
    let registry = fixture_registry()?;
    let validation = ValidationResolver::new(&registry);
    let context: SubmissionContext = [
        ("password", FieldValue::text("correct horse")),
        ("password_confirm", FieldValue::text("correct horse")),
    ]
    .into_iter()
    .collect();
    let same = validation.validate_in("client", "password_confirm", context.get("password_confirm"), &context);
    if !same.valid {
        return Err(format!("matching confirmation should pass: {same:?}"));
    }
    let other = FieldValue::text("battery staple");
    let differs = validation.validate_in("client", "password_confirm", &other, &context);
    if !differs.has_failure(RuleKind::Confirm) {
        return Err("differing confirmation should fail".to_string());
    }
    Ok(())
}

#[test]
fn submission_requires_missing_required_fields() -> TestResult {
    let registry = fixture_registry()?;
    let validation = ValidationResolver::new(&registry);
    let context = SubmissionContext::new().with("notes", FieldValue::text("hello"));
    let report = validation.validate_submission("client", &context);
    let failed: Vec<&str> = report.failed_fields().map(|(name, _)| name.as_str()).collect();
    if failed != vec!["first_name", "notes"] {
        return Err(format!("unexpected failed fields: {failed:?}"));
    }
    let notes = report.outcome("notes").ok_or_else(|| "notes should be reported".to_string())?;
    if !notes.has_failure(RuleKind::Editable) {
        return Err("undeclared field should be not editable".to_string());
    }
    Ok(())
}
