// crates/profile-gate-core/src/shared.rs
// ============================================================================
// Module: Shared Registry Handle
// Description: Atomically swappable handle to the current role table.
// Purpose: Support whole-table configuration reload without torn reads.
// Dependencies: std::sync
// ============================================================================

//! ## Overview
//! Readers take an `Arc` snapshot and query it without holding a lock. A
//! reload swaps the whole table in one step; readers holding an older
//! snapshot keep a complete, consistent table until they drop it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::registry::ConfigRegistry;

// ============================================================================
// SECTION: Shared Handle
// ============================================================================

/// Process-wide handle to the active [`ConfigRegistry`].
#[derive(Debug)]
pub struct SharedRegistry {
    /// Currently active table.
    current: RwLock<Arc<ConfigRegistry>>,
}

impl SharedRegistry {
    /// Creates a handle around an initial table.
    #[must_use]
    pub fn new(registry: ConfigRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// Returns the active table.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ConfigRegistry> {
        // The guarded value is a whole Arc; a poisoned lock cannot hold a torn table.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the active table and returns the previous one.
    pub fn replace(&self, registry: ConfigRegistry) -> Arc<ConfigRegistry> {
        let next = Arc::new(registry);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}
