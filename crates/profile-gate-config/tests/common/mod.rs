// crates/profile-gate-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for profile-gate-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::Mutex;

use profile_gate_config::AuditSink;
use profile_gate_config::ConfigError;
use profile_gate_config::ConfigLoadedEvent;
use profile_gate_config::ProfileGateConfig;
use profile_gate_config::SectionRoleMismatchEvent;
use profile_gate_config::default_registry;
use profile_gate_core::ConfigRegistry;

/// Permission table used by [`minimal_toml`] callers that only vary extras.
pub const DEFAULT_PERMISSIONS: &str = r#"can_edit = ["name"]
can_view = ["name", "nickname"]"#;

/// Returns a one-role config with the given client permissions and trailing tables.
pub fn minimal_toml(permissions: &str, extra: &str) -> String {
    format!(
        r#"[sections.personal]
label = "Personal"
icon = "user"
roles = ["client"]

[fields.name]
type = "text"
label = "Name"
section = "personal"
validation = {{ min_length = 2 }}

[fields.nickname]
type = "text"
label = "Nickname"
section = "personal"

[roles.client]
sections = ["personal"]
fields = ["name", "nickname"]

[roles.client.permissions]
{permissions}

{extra}
"#
    )
}

/// Asserts that parsing fails with a message containing `needle`.
pub fn assert_invalid(result: Result<ProfileGateConfig, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

/// Builds the marketplace registry.
pub fn marketplace() -> Result<ConfigRegistry, String> {
    default_registry().map_err(|err| err.to_string())
}

/// Audit sink that keeps every event in memory.
#[derive(Default)]
pub struct CollectingSink {
    /// Recorded load events.
    loaded: Mutex<Vec<ConfigLoadedEvent>>,
    /// Recorded mismatch events.
    mismatches: Mutex<Vec<SectionRoleMismatchEvent>>,
}

impl CollectingSink {
    /// Returns the recorded load events.
    pub fn loaded(&self) -> Vec<ConfigLoadedEvent> {
        self.loaded.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns the recorded mismatch events.
    pub fn mismatches(&self) -> Vec<SectionRoleMismatchEvent> {
        self.mismatches.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl AuditSink for CollectingSink {
    fn record_loaded(&self, event: &ConfigLoadedEvent) {
        if let Ok(mut events) = self.loaded.lock() {
            events.push(event.clone());
        }
    }

    fn record_mismatch(&self, event: &SectionRoleMismatchEvent) {
        if let Ok(mut events) = self.mismatches.lock() {
            events.push(event.clone());
        }
    }
}
