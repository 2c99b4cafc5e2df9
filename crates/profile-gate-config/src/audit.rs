// crates/profile-gate-config/src/audit.rs
// ============================================================================
// Module: Config Audit Logging
// Description: Structured audit events for configuration loading.
// Purpose: Emit JSON-line load events without hard logging dependencies.
// Dependencies: profile-gate-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events describe what a configuration load produced: which roles and
//! how many sections and fields were accepted, and which section/role
//! disagreements were tolerated. Sinks are pluggable so a host application
//! can route events to its own logging pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use profile_gate_core::MismatchKind;
use profile_gate_core::Role;
use profile_gate_core::SectionKey;
use profile_gate_core::SectionRoleMismatch;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Emitted once per successfully built registry.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigLoadedEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Config file path when loaded from disk.
    pub source: Option<String>,
    /// Configured roles.
    pub roles: Vec<Role>,
    /// Number of catalog sections.
    pub sections: usize,
    /// Number of catalog fields.
    pub fields: usize,
    /// Whether section/role disagreements were fatal.
    pub strict_section_roles: bool,
}

impl ConfigLoadedEvent {
    /// Builds a load event stamped with the current time.
    #[must_use]
    pub fn new(
        source: Option<String>,
        roles: Vec<Role>,
        sections: usize,
        fields: usize,
        strict_section_roles: bool,
    ) -> Self {
        Self {
            event: "config_loaded",
            timestamp_ms: now_ms(),
            source,
            roles,
            sections,
            fields,
            strict_section_roles,
        }
    }
}

/// Emitted per tolerated section/role disagreement.
#[derive(Debug, Clone, Serialize)]
pub struct SectionRoleMismatchEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Role involved.
    pub role: Role,
    /// Section involved.
    pub section: SectionKey,
    /// Which declaration omits the other.
    pub kind: MismatchKind,
}

impl SectionRoleMismatchEvent {
    /// Builds a mismatch event stamped with the current time.
    #[must_use]
    pub fn new(mismatch: &SectionRoleMismatch) -> Self {
        Self {
            event: "section_role_mismatch",
            timestamp_ms: now_ms(),
            role: mismatch.role,
            section: mismatch.section.clone(),
            kind: mismatch.kind,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for configuration events.
pub trait AuditSink: Send + Sync {
    /// Record a successful load.
    fn record_loaded(&self, event: &ConfigLoadedEvent);

    /// Record a tolerated section/role disagreement.
    fn record_mismatch(&self, _event: &SectionRoleMismatchEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_loaded(&self, event: &ConfigLoadedEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_mismatch(&self, event: &SectionRoleMismatchEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_loaded(&self, event: &ConfigLoadedEvent) {
        self.append(event);
    }

    fn record_mismatch(&self, event: &SectionRoleMismatchEvent) {
        self.append(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_loaded(&self, _event: &ConfigLoadedEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|duration| duration.as_millis()).unwrap_or(0)
}
