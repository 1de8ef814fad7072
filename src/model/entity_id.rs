// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Unique identifiers for points and paths.
//!
//! Each `EntityId` is a monotonically increasing `u64` generated from a global
//! atomic counter. IDs are used as keys in `Selection` sets and for matching
//! click targets to outline elements during hit testing. They are never reused
//! within a process, so deleted points leave no dangling references.

use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for an entity (point or path)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

static ENTITY_COUNTER: AtomicU64 = AtomicU64::new(1);

impl EntityId {
    /// Create a new unique entity ID
    pub fn next() -> Self {
        Self(ENTITY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = EntityId::next();
        let b = EntityId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn ids_are_monotonic() {
        let a = EntityId::next();
        let b = EntityId::next();
        assert!(b > a);
    }
}
