// crates/profile-gate-core/src/validation.rs
// ============================================================================
// Module: Validation Resolver
// Description: Merged rule lookup and value validation per role and field.
// Purpose: Report every violation of a candidate value at once.
// Dependencies: crate::evaluator, crate::registry, crate::permissions
// ============================================================================

//! ## Overview
//! Rules run in declaration order and never short-circuit, so a form can show
//! all violations together. Unknown roles fall back to the default role;
//! unknown fields have no client-side constraints (the server stays
//! authoritative).

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::evaluator::evaluate_metadata;
use crate::evaluator::evaluate_rule;
use crate::model::FieldDefinition;
use crate::permissions::PermissionResolver;
use crate::registry::ConfigRegistry;
use crate::rules::FailureReason;
use crate::rules::FieldValue;
use crate::rules::RuleFailure;
use crate::rules::RuleKind;
use crate::rules::SubmissionContext;
use crate::rules::SubmissionReport;
use crate::rules::ValidationOutcome;
use crate::rules::ValidationRule;

/// Implicit rule added for fields flagged `required`.
const IMPLICIT_REQUIRED: &ValidationRule = &ValidationRule::Required;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Validation queries against a registry.
#[derive(Debug, Clone, Copy)]
pub struct ValidationResolver<'a> {
    /// Role table answering the queries.
    registry: &'a ConfigRegistry,
}

impl<'a> ValidationResolver<'a> {
    /// Creates a resolver over a registry.
    #[must_use]
    pub const fn new(registry: &'a ConfigRegistry) -> Self {
        Self {
            registry,
        }
    }

    /// Returns the merged rule set of a field in evaluation order.
    ///
    /// A `required` field without a declared [`ValidationRule::Required`] gets
    /// one prepended. Unknown fields have no rules.
    #[must_use]
    pub fn rules_for(&self, role: &str, field: &str) -> Vec<&'a ValidationRule> {
        self.registry.field_config(role, field).map_or_else(Vec::new, merged_rules)
    }

    /// Validates a value that does not depend on other fields.
    #[must_use]
    pub fn validate(&self, role: &str, field: &str, value: &FieldValue) -> ValidationOutcome {
        self.validate_in(role, field, value, &SubmissionContext::new())
    }

    /// Validates a value within a submission, resolving confirm targets from it.
    #[must_use]
    pub fn validate_in(
        &self,
        role: &str,
        field: &str,
        value: &FieldValue,
        context: &SubmissionContext,
    ) -> ValidationOutcome {
        let Some(definition) = self.registry.field_config(role, field) else {
            return ValidationOutcome::from_failures(Vec::new());
        };
        let mut failures = Vec::new();
        for rule in merged_rules(definition) {
            evaluate_rule(rule, value, context, &mut failures);
        }
        evaluate_metadata(&definition.metadata, value, &mut failures);
        ValidationOutcome::from_failures(failures)
    }

    /// Validates a whole submission for a role.
    ///
    /// Editable fields are checked when submitted or required. Submitted
    /// fields the role may not edit, including undeclared ones, fail with
    /// [`FailureReason::NotEditable`].
    #[must_use]
    pub fn validate_submission(&self, role: &str, context: &SubmissionContext) -> SubmissionReport {
        let config = self.registry.resolve(role);
        let permissions = PermissionResolver::new(self.registry);
        let mut report = SubmissionReport::default();
        for definition in &config.fields {
            let name = definition.name.as_str();
            let submitted = context.contains(name);
            let outcome = if permissions.is_editable(role, name) {
                if !submitted && !is_required(definition) {
                    continue;
                }
                self.validate_in(role, name, context.get(name), context)
            } else if submitted {
                not_editable()
            } else {
                continue;
            };
            report.fields.push((definition.name.clone(), outcome));
        }
        for (name, _) in context.iter() {
            if config.field(name.as_str()).is_none() {
                report.fields.push((name.clone(), not_editable()));
            }
        }
        report
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the declared rules, prefixed by an implicit required rule.
fn merged_rules(definition: &FieldDefinition) -> Vec<&ValidationRule> {
    let mut rules = Vec::with_capacity(definition.validation.len() + 1);
    if needs_implicit_required(definition) {
        rules.push(IMPLICIT_REQUIRED);
    }
    rules.extend(definition.validation.iter());
    rules
}

/// Returns true when the field is flagged required but declares no rule for it.
fn needs_implicit_required(definition: &FieldDefinition) -> bool {
    definition.required && !definition.validation.contains(&ValidationRule::Required)
}

/// Returns true when the field must be filled.
fn is_required(definition: &FieldDefinition) -> bool {
    definition.required || definition.validation.contains(&ValidationRule::Required)
}

/// Outcome for a field the role may not edit.
fn not_editable() -> ValidationOutcome {
    ValidationOutcome::from_failures(vec![RuleFailure::new(
        RuleKind::Editable,
        FailureReason::NotEditable,
    )])
}
