// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Cross-tab event relay.
//!
//! Two channels decouple the glyph grid from the workspace:
//!
//! * [`Relay`] — a single-slot, single-consumer channel for "open this
//!   glyph in the editor" requests. The workspace installs itself as the
//!   sole consumer when it mounts and clears the slot at teardown; an emit
//!   with no consumer is silently dropped (there is nothing to display the
//!   result in, so queueing would be meaningless).
//! * [`SaveRelay`] — a narrow broadcast channel for "glyph N of file F was
//!   saved" events, delivered to every subscribed grid so the matching
//!   cell's thumbnail updates without a full data reload.
//!
//! Handles are cheap clones of a shared slot; the interior mutex exists so
//! handles stay `Send` for hosts with threaded event sources and is never
//! contended in the single-threaded model.

use crate::path::EditablePath;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Request to open (or focus) an editor tab for a glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub file: PathBuf,
    pub glyph_id: u32,
}

/// Notification that a glyph was saved with a new outline
#[derive(Debug, Clone)]
pub struct GlyphSaved {
    pub file: PathBuf,
    pub glyph_id: u32,
    pub outline: Vec<EditablePath>,
}

/// Acquire a mutex, recovering from poison.
///
/// A panicking handler must not take the relay down with it; recover the
/// inner data and keep delivering.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("relay mutex was poisoned, recovering");
        poisoned.into_inner()
    })
}

// ============================================================================
// SINGLE-SLOT RELAY
// ============================================================================

type Handler<T> = Box<dyn FnMut(T) + Send>;

/// A single-slot, single-consumer event relay.
///
/// `set_handler` installs the current consumer (replacing any previous
/// one), `clear_handler` empties the slot, and `emit` invokes the installed
/// handler or silently drops the payload.
pub struct Relay<T> {
    slot: Arc<Mutex<Option<Handler<T>>>>,
}

impl<T> Clone for Relay<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Relay<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Relay<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Install the consumer, replacing any previous one
    pub fn set_handler(&self, handler: impl FnMut(T) + Send + 'static) {
        *lock(&self.slot) = Some(Box::new(handler));
    }

    /// Remove the consumer; subsequent emits are dropped
    pub fn clear_handler(&self) {
        *lock(&self.slot) = None;
    }

    pub fn has_handler(&self) -> bool {
        lock(&self.slot).is_some()
    }

    /// Deliver `payload` to the installed handler, or drop it silently
    pub fn emit(&self, payload: T) {
        if let Some(handler) = lock(&self.slot).as_mut() {
            handler(payload);
        } else {
            tracing::debug!("relay emit with no consumer installed, dropping");
        }
    }
}

// ============================================================================
// SAVE BROADCAST
// ============================================================================

/// Token returned by [`SaveRelay::subscribe`]; pass back to `unsubscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

type SaveHandler = Box<dyn FnMut(&GlyphSaved) + Send>;

struct SaveSubscribers {
    next_id: u64,
    handlers: Vec<(u64, SaveHandler)>,
}

/// Broadcast channel for glyph-saved events
pub struct SaveRelay {
    inner: Arc<Mutex<SaveSubscribers>>,
}

impl Clone for SaveRelay {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for SaveRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveRelay {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SaveSubscribers {
                next_id: 1,
                handlers: Vec::new(),
            })),
        }
    }

    /// Add a subscriber; it receives every subsequent broadcast until
    /// unsubscribed
    pub fn subscribe(&self, handler: impl FnMut(&GlyphSaved) + Send + 'static) -> Subscription {
        let mut subs = lock(&self.inner);
        let id = subs.next_id;
        subs.next_id += 1;
        subs.handlers.push((id, Box::new(handler)));
        Subscription(id)
    }

    /// Remove a subscriber. Unknown tokens are a no-op.
    pub fn unsubscribe(&self, subscription: Subscription) {
        lock(&self.inner)
            .handlers
            .retain(|(id, _)| *id != subscription.0);
    }

    /// Deliver `event` to every subscriber
    pub fn broadcast(&self, event: &GlyphSaved) {
        for (_, handler) in lock(&self.inner).handlers.iter_mut() {
            handler(event);
        }
    }
}
