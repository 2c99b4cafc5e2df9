// crates/profile-gate-config/src/lib.rs
// ============================================================================
// Module: Profile Gate Config Library
// Description: Declarative role table loading, validation, and artifacts.
// Purpose: Single source of truth for profile-gate.toml semantics.
// Dependencies: profile-gate-core, serde, serde_json, toml
// ============================================================================

//! ## Overview
//! `profile-gate-config` turns a declarative TOML role table into a validated
//! [`profile_gate_core::ConfigRegistry`]. Loading is strict and fail-closed:
//! malformed rules, unknown roles or capabilities, and inconsistent
//! permission lists abort startup. It also ships the built-in marketplace
//! configuration and the JSON schema of the artifact.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod catalog;
pub mod config;
pub mod examples;
pub mod ordered;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::ConfigLoadedEvent;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::SectionRoleMismatchEvent;
pub use audit::StderrAuditSink;
pub use config::ConfigError;
pub use config::ProfileGateConfig;
pub use config::ValidationSettings;
pub use config::load_registry;
pub use examples::default_registry;
pub use examples::marketplace_config_toml;
pub use schema::config_schema;
