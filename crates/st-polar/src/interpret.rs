// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::eigen::SymmetricEigen3;
use crate::{ENERGY_FLOOR, ROUND_OFF_RATIO};

/// Dominant particle motion of a window carrying coherent energy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarizationResult {
    /// Bearing of the principal axis in degrees east of north, in `[0, 360)`.
    pub azimuth: f64,
    /// Inclination from horizontal in degrees, positive upward.
    pub dip: f64,
    /// `1 − λmid/λmax`; 1 for rectilinear motion.
    pub degree_of_linearity: f64,
    /// `1 − λmin/λmid`, undefined when the middle eigenvalue vanishes.
    pub degree_of_planarity: Option<f64>,
    pub mean_vector_amplitude: Option<f64>,
    /// Eigenvalues largest first, as returned by the solver.
    pub eigenvalues: [f64; 3],
    /// Upward-normalised principal axis in `(x, y, z)` order.
    pub principal_axis: [f64; 3],
    /// Set when a negative eigenvalue exceeded the round-off threshold.
    pub suspect_covariance: bool,
}

/// Outcome of interpreting one window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Polarization {
    Valid(PolarizationResult),
    /// The window carries no measurable energy.
    Degenerate { mean_vector_amplitude: Option<f64> },
}

impl Polarization {
    pub fn is_valid(&self) -> bool {
        matches!(self, Polarization::Valid(_))
    }

    pub fn valid(&self) -> Option<&PolarizationResult> {
        match self {
            Polarization::Valid(result) => Some(result),
            Polarization::Degenerate { .. } => None,
        }
    }

    pub fn mean_vector_amplitude(&self) -> Option<f64> {
        match self {
            Polarization::Valid(result) => result.mean_vector_amplitude,
            Polarization::Degenerate {
                mean_vector_amplitude,
            } => *mean_vector_amplitude,
        }
    }
}

/// Converts an eigen-decomposition of a window covariance into a
/// [`Polarization`].
///
/// `reference_azimuth` (degrees) is added to the raw bearing before wrapping,
/// compensating horizontal sensors that are not north-aligned. A non-finite
/// reference propagates into the azimuth; [`crate::analyze`] rejects it first.
pub fn interpret(
    eigen: &SymmetricEigen3,
    reference_azimuth: f64,
    mean_vector_amplitude: Option<f64>,
) -> Polarization {
    let (l_min, l_mid, l_max) = (eigen.values[0], eigen.values[1], eigen.values[2]);
    // Negated comparison also routes NaN to the degenerate branch.
    if !(l_max >= ENERGY_FLOOR) {
        return Polarization::Degenerate {
            mean_vector_amplitude,
        };
    }

    let threshold = ROUND_OFF_RATIO * l_max;
    let suspect_covariance = [l_min, l_mid]
        .iter()
        .any(|&value| value < 0.0 && value.abs() > threshold);
    if suspect_covariance {
        warn!(
            target: "st_polar::interpret",
            l_min,
            l_mid,
            l_max,
            threshold,
            "negative eigenvalue beyond round-off; covariance is not positive semi-definite"
        );
    }
    let mid = zero_below(l_mid, threshold);
    let min = zero_below(l_min, threshold);

    let axis = upward(eigen.eigenvector(2));
    let azimuth = azimuth_degrees(axis.x, axis.y, reference_azimuth);
    let dip = dip_degrees(&axis);

    let degree_of_linearity = 1.0 - mid / l_max;
    let degree_of_planarity = if mid > ENERGY_FLOOR {
        Some(1.0 - min / mid)
    } else {
        None
    };

    Polarization::Valid(PolarizationResult {
        azimuth,
        dip,
        degree_of_linearity,
        degree_of_planarity,
        mean_vector_amplitude,
        eigenvalues: [l_max, l_mid, l_min],
        principal_axis: [axis.x, axis.y, axis.z],
        suspect_covariance,
    })
}

fn zero_below(value: f64, threshold: f64) -> f64 {
    if value.abs() < threshold {
        0.0
    } else {
        value
    }
}

/// Flips `axis` so its vertical component is non-negative.
fn upward(axis: Vector3<f64>) -> Vector3<f64> {
    if axis.z < 0.0 {
        -axis
    } else {
        axis
    }
}

/// `90° − atan2(ry, rx)` plus the reference offset, wrapped into `[0, 360)`.
pub fn azimuth_degrees(rx: f64, ry: f64, reference_azimuth: f64) -> f64 {
    wrap_degrees(90.0 - ry.atan2(rx).to_degrees() + reference_azimuth)
}

/// Inclination of `axis` above the horizontal plane; a purely vertical axis is
/// reported as 90°.
pub fn dip_degrees(axis: &Vector3<f64>) -> f64 {
    let horizontal = axis.x.hypot(axis.y);
    if horizontal > ENERGY_FLOOR {
        axis.z.atan2(horizontal).to_degrees()
    } else {
        90.0
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative angles up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
