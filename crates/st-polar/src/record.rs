// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Flat, sentinel-encoded result record for consumers that expect every field
//! to be populated.

use serde::{Deserialize, Serialize};

use crate::interpret::Polarization;

pub const UNDEFINED_AZIMUTH: f64 = -1.0;
pub const UNDEFINED_DIP: f64 = -999.0;
pub const UNDEFINED_RATIO: f64 = -1.0;
pub const UNDEFINED_AMPLITUDE: f64 = -1.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarizationRecord {
    pub azimuth: f64,
    pub dip: f64,
    pub degree_of_linearity: f64,
    pub degree_of_planarity: f64,
    pub mean_vect_amp: f64,
}

impl PolarizationRecord {
    /// Record of a window without coherent motion.
    pub const DEGENERATE: Self = Self {
        azimuth: UNDEFINED_AZIMUTH,
        dip: UNDEFINED_DIP,
        degree_of_linearity: UNDEFINED_RATIO,
        degree_of_planarity: UNDEFINED_RATIO,
        mean_vect_amp: UNDEFINED_AMPLITUDE,
    };

    /// True when the direction fields hold the degenerate sentinels.
    pub fn is_degenerate(&self) -> bool {
        self.azimuth == UNDEFINED_AZIMUTH && self.dip == UNDEFINED_DIP
    }
}

impl From<&Polarization> for PolarizationRecord {
    fn from(outcome: &Polarization) -> Self {
        let mean_vect_amp = outcome
            .mean_vector_amplitude()
            .unwrap_or(UNDEFINED_AMPLITUDE);
        match outcome {
            Polarization::Valid(result) => Self {
                azimuth: result.azimuth,
                dip: result.dip,
                degree_of_linearity: result.degree_of_linearity,
                degree_of_planarity: result.degree_of_planarity.unwrap_or(UNDEFINED_RATIO),
                mean_vect_amp,
            },
            Polarization::Degenerate { .. } => Self {
                mean_vect_amp,
                ..Self::DEGENERATE
            },
        }
    }
}

impl From<Polarization> for PolarizationRecord {
    fn from(outcome: Polarization) -> Self {
        Self::from(&outcome)
    }
}

impl Polarization {
    /// Sentinel-encoded view of this outcome.
    pub fn to_record(&self) -> PolarizationRecord {
        PolarizationRecord::from(self)
    }
}
