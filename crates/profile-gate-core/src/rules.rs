// crates/profile-gate-core/src/rules.rs
// ============================================================================
// Module: Validation Rules
// Description: Declarative field constraints, candidate values, and failures.
// Purpose: Define the pure data exchanged between configuration and evaluation.
// Dependencies: regex, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`ValidationRule`] is pure data owned by the field that declares it. Rules
//! that need compilation (patterns) or normalization (file extensions) are
//! built through fallible constructors so malformed rules surface when the
//! registry is assembled rather than when a value is checked.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;

use crate::identifiers::FieldName;

// ============================================================================
// SECTION: Rule Definitions
// ============================================================================

/// Declarative constraint attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum ValidationRule {
    /// Value must be present.
    Required,
    /// Value must be a single email address.
    Email,
    /// Raw text must have at least this many characters.
    MinLength(usize),
    /// Raw text must have at most this many characters.
    MaxLength(usize),
    /// Text must fully match the pattern.
    Pattern(FieldPattern),
    /// Each file must be at most this many kilobytes.
    FileSize(u64),
    /// Each file extension must be in the allowed set.
    FileType(BTreeSet<String>),
    /// Numeric value must be at least this.
    Min(f64),
    /// Numeric value must be at most this.
    Max(f64),
    /// Value must equal the named field in the same submission.
    Confirm(FieldName),
}

impl ValidationRule {
    /// Builds a pattern rule, compiling the expression for full-match use.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] when the expression does not compile.
    pub fn pattern(source: &str) -> Result<Self, RuleError> {
        FieldPattern::new(source).map(Self::Pattern)
    }

    /// Builds a file type rule from extensions, normalizing case and dots.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptyExtensions`] when no usable extension remains.
    pub fn file_type<I, S>(extensions: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed: BTreeSet<String> = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        if allowed.is_empty() {
            return Err(RuleError::EmptyExtensions);
        }
        Ok(Self::FileType(allowed))
    }

    /// Returns the kind tag for this rule.
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::Email => RuleKind::Email,
            Self::MinLength(_) => RuleKind::MinLength,
            Self::MaxLength(_) => RuleKind::MaxLength,
            Self::Pattern(_) => RuleKind::Pattern,
            Self::FileSize(_) => RuleKind::FileSize,
            Self::FileType(_) => RuleKind::FileType,
            Self::Min(_) => RuleKind::Min,
            Self::Max(_) => RuleKind::Max,
            Self::Confirm(_) => RuleKind::Confirm,
        }
    }
}

/// Compiled, anchored regular expression with its original source.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    /// Expression as written in configuration.
    source: String,
    /// Expression wrapped to require a full match.
    compiled: Regex,
}

impl FieldPattern {
    /// Compiles a pattern that must match the entire value.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] when the expression does not compile.
    pub fn new(source: &str) -> Result<Self, RuleError> {
        let compiled = Regex::new(&format!("^(?:{source})$")).map_err(|err| {
            RuleError::InvalidPattern {
                pattern: source.to_string(),
                reason: err.to_string(),
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            compiled,
        })
    }

    /// Returns the expression as written in configuration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true when the whole value matches.
    #[must_use]
    pub fn is_full_match(&self, value: &str) -> bool {
        self.compiled.is_match(value)
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Serialize for FieldPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Kind tag identifying which check produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// [`ValidationRule::Required`].
    Required,
    /// [`ValidationRule::Email`].
    Email,
    /// [`ValidationRule::MinLength`].
    MinLength,
    /// [`ValidationRule::MaxLength`].
    MaxLength,
    /// [`ValidationRule::Pattern`].
    Pattern,
    /// [`ValidationRule::FileSize`].
    FileSize,
    /// [`ValidationRule::FileType`].
    FileType,
    /// [`ValidationRule::Min`].
    Min,
    /// [`ValidationRule::Max`].
    Max,
    /// [`ValidationRule::Confirm`].
    Confirm,
    /// File count limit from field metadata.
    MaxFiles,
    /// Select options from field metadata.
    Options,
    /// Field edit permission (submission checks only).
    Editable,
}

/// Malformed rule detected while building configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// Offending expression.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
    /// File type rule lists no usable extension.
    #[error("file_type requires at least one extension")]
    EmptyExtensions,
}

/// Lowercases an extension and strips leading dots.
pub(crate) fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

// ============================================================================
// SECTION: Candidate Values
// ============================================================================

/// Uploaded file as described by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    /// Client-side file name including extension.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl FileDescriptor {
    /// Creates a file descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Returns the lowercased extension after the last dot, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// Candidate value submitted for a field.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// No value supplied.
    #[default]
    Absent,
    /// Raw text input.
    Text(String),
    /// Explicit boolean choice.
    Bool(bool),
    /// Numeric input.
    Number(f64),
    /// Uploaded files.
    Files(Vec<FileDescriptor>),
}

impl FieldValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns true when nothing was entered: absent, `""`, or no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(text) => text.is_empty(),
            Self::Files(files) => files.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Returns true when the value does not satisfy a required constraint.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            other => other.is_empty(),
        }
    }
}

/// Field values of a single form submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionContext {
    /// Submitted values keyed by field name, in submission order.
    values: Vec<(FieldName, FieldValue)>,
}

impl SubmissionContext {
    /// Creates an empty submission.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
        }
    }

    /// Sets a field value, replacing an earlier value for the same field.
    #[must_use]
    pub fn with(mut self, field: impl Into<FieldName>, value: FieldValue) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field value, replacing an earlier value for the same field.
    pub fn insert(&mut self, field: impl Into<FieldName>, value: FieldValue) {
        let field = field.into();
        if let Some(slot) = self.values.iter_mut().find(|(name, _)| *name == field) {
            slot.1 = value;
        } else {
            self.values.push((field, value));
        }
    }

    /// Returns the submitted value for a field, or [`FieldValue::Absent`].
    #[must_use]
    pub fn get(&self, field: &str) -> &FieldValue {
        const ABSENT: &FieldValue = &FieldValue::Absent;
        self.values.iter().find(|(name, _)| name.as_str() == field).map_or(ABSENT, |(_, v)| v)
    }

    /// Returns true when the submission carries the field.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.values.iter().any(|(name, _)| name.as_str() == field)
    }

    /// Iterates submitted fields in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name, value))
    }
}

impl<K: Into<FieldName>> FromIterator<(K, FieldValue)> for SubmissionContext {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        let mut context = Self::new();
        for (field, value) in iter {
            context.insert(field, value);
        }
        context
    }
}

// ============================================================================
// SECTION: Failures
// ============================================================================

/// Why a value failed a check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    /// Required value is empty or absent.
    Missing,
    /// Text is not an email address.
    InvalidEmail,
    /// Text is shorter than allowed.
    TooShort {
        /// Minimum character count.
        min: usize,
        /// Observed character count.
        actual: usize,
    },
    /// Text is longer than allowed.
    TooLong {
        /// Maximum character count.
        max: usize,
        /// Observed character count.
        actual: usize,
    },
    /// Text does not fully match the pattern.
    PatternMismatch {
        /// Expression as written in configuration.
        pattern: String,
    },
    /// File exceeds the size limit.
    FileTooLarge {
        /// Limit in kilobytes.
        max_kb: u64,
        /// Observed size in bytes.
        size_bytes: u64,
    },
    /// File extension is not allowed.
    FileTypeNotAllowed {
        /// Observed extension, if the name has one.
        extension: Option<String>,
        /// Allowed extensions.
        allowed: BTreeSet<String>,
    },
    /// Number is below the minimum.
    BelowMinimum {
        /// Inclusive lower bound.
        min: f64,
        /// Observed value.
        actual: f64,
    },
    /// Number is above the maximum.
    AboveMaximum {
        /// Inclusive upper bound.
        max: f64,
        /// Observed value.
        actual: f64,
    },
    /// Value does not parse as a finite number.
    NotANumber,
    /// Value differs from its confirmation field.
    ConfirmMismatch {
        /// Field the value must equal.
        other: FieldName,
    },
    /// More files than the field accepts.
    TooManyFiles {
        /// Maximum file count.
        max: usize,
        /// Observed file count.
        actual: usize,
    },
    /// Value is not one of the declared select options.
    NotAnOption,
    /// Role may not edit this field.
    NotEditable,
    /// Rule cannot apply to this kind of value.
    TypeMismatch {
        /// Value kind the rule expects.
        expected: &'static str,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("value is required"),
            Self::InvalidEmail => f.write_str("value is not a valid email address"),
            Self::TooShort {
                min,
                actual,
            } => write!(f, "must be at least {min} characters (got {actual})"),
            Self::TooLong {
                max,
                actual,
            } => write!(f, "must be at most {max} characters (got {actual})"),
            Self::PatternMismatch {
                pattern,
            } => write!(f, "does not match pattern {pattern}"),
            Self::FileTooLarge {
                max_kb,
                size_bytes,
            } => write!(f, "file exceeds {max_kb} KB ({size_bytes} bytes)"),
            Self::FileTypeNotAllowed {
                extension,
                allowed,
            } => {
                let allowed = allowed.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
                match extension {
                    Some(ext) => write!(f, "file type .{ext} is not allowed (allowed: {allowed})"),
                    None => write!(f, "file has no extension (allowed: {allowed})"),
                }
            }
            Self::BelowMinimum {
                min,
                actual,
            } => write!(f, "must be at least {min} (got {actual})"),
            Self::AboveMaximum {
                max,
                actual,
            } => write!(f, "must be at most {max} (got {actual})"),
            Self::NotANumber => f.write_str("value is not a number"),
            Self::ConfirmMismatch {
                other,
            } => write!(f, "does not match {other}"),
            Self::TooManyFiles {
                max,
                actual,
            } => write!(f, "at most {max} files allowed (got {actual})"),
            Self::NotAnOption => f.write_str("value is not one of the available options"),
            Self::NotEditable => f.write_str("field is not editable for this role"),
            Self::TypeMismatch {
                expected,
            } => write!(f, "expected a {expected} value"),
        }
    }
}

/// One failed check for one field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleFailure {
    /// Check that failed.
    pub rule: RuleKind,
    /// Index of the offending file for per-file checks.
    pub file_index: Option<usize>,
    /// Failure detail.
    pub reason: FailureReason,
}

impl RuleFailure {
    /// Creates a failure that concerns the whole value.
    #[must_use]
    pub const fn new(rule: RuleKind, reason: FailureReason) -> Self {
        Self {
            rule,
            file_index: None,
            reason,
        }
    }

    /// Creates a failure that concerns one file of a file list.
    #[must_use]
    pub const fn for_file(rule: RuleKind, index: usize, reason: FailureReason) -> Self {
        Self {
            rule,
            file_index: Some(index),
            reason,
        }
    }
}

impl fmt::Display for RuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.file_index {
            Some(index) => write!(f, "file {}: {}", index + 1, self.reason),
            None => self.reason.fmt(f),
        }
    }
}

/// Result of validating one field value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationOutcome {
    /// True when no check failed.
    pub valid: bool,
    /// Failures in rule declaration order.
    pub failures: Vec<RuleFailure>,
}

impl ValidationOutcome {
    /// Builds an outcome from collected failures.
    #[must_use]
    pub fn from_failures(failures: Vec<RuleFailure>) -> Self {
        Self {
            valid: failures.is_empty(),
            failures,
        }
    }

    /// Returns true when a failure of the given kind was recorded.
    #[must_use]
    pub fn has_failure(&self, rule: RuleKind) -> bool {
        self.failures.iter().any(|failure| failure.rule == rule)
    }
}

/// Validation results for every checked field of a submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SubmissionReport {
    /// Per-field outcomes in role declaration order, then submission order.
    pub fields: Vec<(FieldName, ValidationOutcome)>,
}

impl SubmissionReport {
    /// Returns true when every checked field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|(_, outcome)| outcome.valid)
    }

    /// Returns the outcome for a field, if it was checked.
    #[must_use]
    pub fn outcome(&self, field: &str) -> Option<&ValidationOutcome> {
        self.fields.iter().find(|(name, _)| name.as_str() == field).map(|(_, outcome)| outcome)
    }

    /// Iterates fields with at least one failure.
    pub fn failed_fields(&self) -> impl Iterator<Item = (&FieldName, &ValidationOutcome)> {
        self.fields.iter().filter(|(_, outcome)| !outcome.valid).map(|(name, outcome)| (name, outcome))
    }
}
