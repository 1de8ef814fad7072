// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Tracing subscriber setup.
//!
//! The engine itself only emits `tracing` events; hosts that already
//! install their own subscriber should not call this. `init` is a no-op if
//! a global subscriber is already set.

/// Install a fmt subscriber (controlled via the RUST_LOG env var) with a
/// default directive for this crate.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("glyphscope=info".parse().unwrap()),
        )
        .try_init();
}
