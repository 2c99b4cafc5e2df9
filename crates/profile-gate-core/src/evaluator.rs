// crates/profile-gate-core/src/evaluator.rs
// ============================================================================
// Module: Validation Rule Evaluator
// Description: Pure evaluation of one rule against one candidate value.
// Purpose: Turn declarative rules into structured, non-throwing failures.
// Dependencies: crate::rules
// ============================================================================

//! ## Overview
//! Every function here is total: a value that breaks a rule produces a
//! [`RuleFailure`], never an error or panic. Rules other than
//! [`ValidationRule::Required`] pass on an empty value so optional fields can
//! be left blank; `Required` alone reports emptiness.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::identifiers::FieldName;
use crate::model::FieldMetadata;
use crate::rules::FailureReason;
use crate::rules::FieldPattern;
use crate::rules::FieldValue;
use crate::rules::FileDescriptor;
use crate::rules::RuleFailure;
use crate::rules::RuleKind;
use crate::rules::SubmissionContext;
use crate::rules::ValidationRule;

// ============================================================================
// SECTION: Rule Evaluation
// ============================================================================

/// Evaluates one rule and appends any failures.
///
/// File rules report one failure per offending file.
pub fn evaluate_rule(
    rule: &ValidationRule,
    value: &FieldValue,
    context: &SubmissionContext,
    failures: &mut Vec<RuleFailure>,
) {
    match rule {
        ValidationRule::Required => {
            if value.is_missing() {
                failures.push(RuleFailure::new(RuleKind::Required, FailureReason::Missing));
            }
            return;
        }
        ValidationRule::Confirm(other) => {
            check_confirm(other, value, context, failures);
            return;
        }
        _ if value.is_empty() => return,
        _ => {}
    }
    let kind = rule.kind();
    match rule {
        ValidationRule::Email => match text_of(kind, value, failures) {
            Some(text) if !is_email(text) => {
                failures.push(RuleFailure::new(kind, FailureReason::InvalidEmail));
            }
            _ => {}
        },
        ValidationRule::MinLength(min) => {
            if let Some(text) = text_of(kind, value, failures) {
                let actual = text.chars().count();
                if actual < *min {
                    failures.push(RuleFailure::new(kind, FailureReason::TooShort {
                        min: *min,
                        actual,
                    }));
                }
            }
        }
        ValidationRule::MaxLength(max) => {
            if let Some(text) = text_of(kind, value, failures) {
                let actual = text.chars().count();
                if actual > *max {
                    failures.push(RuleFailure::new(kind, FailureReason::TooLong {
                        max: *max,
                        actual,
                    }));
                }
            }
        }
        ValidationRule::Pattern(pattern) => check_pattern(pattern, value, failures),
        ValidationRule::FileSize(max_kb) => {
            if let Some(files) = files_of(kind, value, failures) {
                check_file_sizes(*max_kb, files, failures);
            }
        }
        ValidationRule::FileType(allowed) => {
            if let Some(files) = files_of(kind, value, failures) {
                check_file_types(allowed, files, failures);
            }
        }
        ValidationRule::Min(min) => {
            if let Some(actual) = number_of(kind, value, failures)
                && actual < *min
            {
                failures.push(RuleFailure::new(kind, FailureReason::BelowMinimum {
                    min: *min,
                    actual,
                }));
            }
        }
        ValidationRule::Max(max) => {
            if let Some(actual) = number_of(kind, value, failures)
                && actual > *max
            {
                failures.push(RuleFailure::new(kind, FailureReason::AboveMaximum {
                    max: *max,
                    actual,
                }));
            }
        }
        ValidationRule::Required | ValidationRule::Confirm(_) => {}
    }
}

/// Applies limits carried by field metadata: file count and select options.
pub fn evaluate_metadata(
    metadata: &FieldMetadata,
    value: &FieldValue,
    failures: &mut Vec<RuleFailure>,
) {
    if let (Some(max), FieldValue::Files(files)) = (metadata.max_files, value)
        && files.len() > max
    {
        for index in max .. files.len() {
            failures.push(RuleFailure::for_file(RuleKind::MaxFiles, index, FailureReason::TooManyFiles {
                max,
                actual: files.len(),
            }));
        }
    }
    if !metadata.options.is_empty()
        && let FieldValue::Text(text) = value
        && !text.is_empty()
        && !metadata.options.iter().any(|option| option == text)
    {
        failures.push(RuleFailure::new(RuleKind::Options, FailureReason::NotAnOption));
    }
}

// ============================================================================
// SECTION: Rule Helpers
// ============================================================================

/// Checks a value against its confirmation field.
fn check_confirm(
    other: &FieldName,
    value: &FieldValue,
    context: &SubmissionContext,
    failures: &mut Vec<RuleFailure>,
) {
    let expected = context.get(other.as_str());
    let matches = (value.is_empty() && expected.is_empty()) || value == expected;
    if !matches {
        failures.push(RuleFailure::new(RuleKind::Confirm, FailureReason::ConfirmMismatch {
            other: other.clone(),
        }));
    }
}

/// Checks a text value against a full-match pattern.
fn check_pattern(pattern: &FieldPattern, value: &FieldValue, failures: &mut Vec<RuleFailure>) {
    if let Some(text) = text_of(RuleKind::Pattern, value, failures)
        && !pattern.is_full_match(text)
    {
        failures.push(RuleFailure::new(RuleKind::Pattern, FailureReason::PatternMismatch {
            pattern: pattern.as_str().to_string(),
        }));
    }
}

/// Flags each file whose size in kilobytes exceeds the limit.
fn check_file_sizes(max_kb: u64, files: &[FileDescriptor], failures: &mut Vec<RuleFailure>) {
    let max_bytes = max_kb.saturating_mul(1024);
    for (index, file) in files.iter().enumerate() {
        if file.size_bytes > max_bytes {
            failures.push(RuleFailure::for_file(RuleKind::FileSize, index, FailureReason::FileTooLarge {
                max_kb,
                size_bytes: file.size_bytes,
            }));
        }
    }
}

/// Flags each file whose extension is outside the allowed set.
fn check_file_types(
    allowed: &BTreeSet<String>,
    files: &[FileDescriptor],
    failures: &mut Vec<RuleFailure>,
) {
    for (index, file) in files.iter().enumerate() {
        let extension = file.extension();
        if !extension.as_ref().is_some_and(|ext| allowed.contains(ext)) {
            failures.push(RuleFailure::for_file(
                RuleKind::FileType,
                index,
                FailureReason::FileTypeNotAllowed {
                    extension,
                    allowed: allowed.clone(),
                },
            ));
        }
    }
}

/// Returns the text of a value or records a type mismatch.
fn text_of<'a>(
    kind: RuleKind,
    value: &'a FieldValue,
    failures: &mut Vec<RuleFailure>,
) -> Option<&'a str> {
    if let FieldValue::Text(text) = value {
        return Some(text);
    }
    failures.push(RuleFailure::new(kind, FailureReason::TypeMismatch {
        expected: "text",
    }));
    None
}

/// Returns the files of a value or records a type mismatch.
fn files_of<'a>(
    kind: RuleKind,
    value: &'a FieldValue,
    failures: &mut Vec<RuleFailure>,
) -> Option<&'a [FileDescriptor]> {
    if let FieldValue::Files(files) = value {
        return Some(files);
    }
    failures.push(RuleFailure::new(kind, FailureReason::TypeMismatch {
        expected: "file",
    }));
    None
}

/// Returns the numeric reading of a value or records why there is none.
fn number_of(kind: RuleKind, value: &FieldValue, failures: &mut Vec<RuleFailure>) -> Option<f64> {
    let parsed = match value {
        FieldValue::Number(number) => Some(*number),
        FieldValue::Text(text) => text.trim().parse::<f64>().ok(),
        FieldValue::Absent | FieldValue::Bool(_) | FieldValue::Files(_) => None,
    };
    match parsed {
        Some(number) if number.is_finite() => Some(number),
        _ => {
            failures.push(RuleFailure::new(kind, FailureReason::NotANumber));
            None
        }
    }
}

/// Returns true for a single `local@domain.tld` address.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
