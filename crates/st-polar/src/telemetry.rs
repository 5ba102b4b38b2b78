// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use std::sync::OnceLock;

use polar_config::tracing::{self as config_tracing, InitError};
use tracing::warn;

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Installs the shared subscriber at most once per process.
///
/// Returns whether this crate's subscriber is the active one. A subscriber
/// installed earlier by the host application is left in place.
pub fn init_tracing() -> bool {
    *INSTALLED.get_or_init(|| match config_tracing::init_tracing() {
        Ok(()) => true,
        Err(InitError::AlreadyInitialised) => true,
        Err(InitError::Install(_)) => false,
        Err(err) => {
            warn!("failed to initialise tracing subscriber: {err}");
            false
        }
    })
}
