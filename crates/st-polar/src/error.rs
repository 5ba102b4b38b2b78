// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use thiserror::Error;

use crate::window::Channel;

/// Usage and numerical failures surfaced by the polarization kernel.
///
/// Degenerate (zero-energy) windows are not errors; they are reported through
/// [`crate::Polarization::Degenerate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolarError {
    #[error("analysis window must contain at least one sample")]
    EmptyWindow,
    #[error("window [{start}, {start}+{count}) exceeds {channel} channel of length {len}")]
    WindowOutOfBounds {
        channel: Channel,
        start: usize,
        count: usize,
        len: usize,
    },
    #[error("channel lengths differ (x={x}, y={y}, z={z})")]
    ChannelLengthMismatch { x: usize, y: usize, z: usize },
    #[error("sliding window needs non-zero length and step (length={length}, step={step})")]
    InvalidPlan { length: usize, step: usize },
    #[error("reference azimuth is not finite: {0}")]
    NonFiniteAzimuth(f64),
    #[error("covariance matrix contains a non-finite entry")]
    NonFiniteMatrix,
    #[error("jacobi sweep did not converge after {sweeps} sweeps (off-diagonal mass {off_diagonal:e})")]
    EigenNotConverged { sweeps: usize, off_diagonal: f64 },
    #[error("eigenvalues exceed the f64 range (largest matrix entry {scale:e})")]
    EigenvalueOverflow { scale: f64 },
}

pub type PolarResult<T> = Result<T, PolarError>;
