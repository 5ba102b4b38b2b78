// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Process-wide settings for the polarization kernel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Emit covariance and eigen-decomposition dumps for every window.
    pub verbose: bool,
    /// Run batch windows one after another on the calling thread.
    pub sequential: bool,
    /// Optional worker count forwarded to the rayon global pool.
    pub threads: Option<usize>,
}

impl RuntimeConfig {
    /// Builds a configuration snapshot from environment variables.
    fn from_env() -> Self {
        let verbose = flag_from_env("POLAR_VERBOSE").unwrap_or(false);
        let sequential = flag_from_env("POLAR_SEQUENTIAL").unwrap_or(false);
        let threads = std::env::var("POLAR_THREADS")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0);

        Self {
            verbose,
            sequential,
            threads,
        }
    }
}

fn flag_from_env(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|v| {
        !matches!(
            v.trim(),
            "" | "0" | "false" | "False" | "FALSE" | "off" | "OFF" | "no"
        )
    })
}

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Returns the lazily initialised runtime configuration.
pub fn config() -> &'static RuntimeConfig {
    CONFIG.get_or_init(|| {
        let cfg = RuntimeConfig::from_env();
        apply_process_hints(&cfg);
        cfg
    })
}

/// Installs `cfg` unless a configuration was already read. Intended for tests
/// and embedding applications that configure the kernel programmatically.
pub fn configure(cfg: RuntimeConfig) -> &'static RuntimeConfig {
    CONFIG.get_or_init(|| {
        apply_process_hints(&cfg);
        cfg
    })
}

fn apply_process_hints(cfg: &RuntimeConfig) {
    // Only effective before rayon builds its global pool.
    if let Some(threads) = cfg.threads {
        std::env::set_var("RAYON_NUM_THREADS", threads.to_string());
    } else if cfg.sequential {
        std::env::set_var("RAYON_NUM_THREADS", "1");
    }
}

/// Whether verbose diagnostics are enabled by default.
pub fn verbose() -> bool {
    config().verbose
}

/// Whether batch windows must be evaluated sequentially in index order.
pub fn lock_window_order() -> bool {
    config().sequential
}
