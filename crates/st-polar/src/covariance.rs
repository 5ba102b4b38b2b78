// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use nalgebra::Matrix3;

use crate::window::{SampleWindow, VerticalPolarity};
use crate::ENERGY_FLOOR;

/// Second-moment matrix of one window together with its mean vector amplitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Covariance {
    /// Sums of pairwise sample products in `(x, y, z)` axis order, with the
    /// vertical polarity already applied. Symmetric by construction.
    pub matrix: Matrix3<f64>,
    /// `sqrt(Σ|r|²) / n`, or `None` when the window carries no energy.
    pub mean_vector_amplitude: Option<f64>,
}

impl Covariance {
    pub fn trace(&self) -> f64 {
        self.matrix.trace()
    }
}

/// Accumulates the covariance of `window` after applying `polarity` to the
/// vertical channel.
pub fn build_covariance<T>(window: &SampleWindow<'_, T>, polarity: VerticalPolarity) -> Covariance
where
    T: Copy + Into<f64>,
{
    let sign = polarity.sign();
    let mut upper = [0.0_f64; 6];
    let mut sum_sq = 0.0_f64;

    for [u, v, w] in window.samples() {
        let w = w * sign;
        upper[0] += u * u;
        upper[1] += u * v;
        upper[2] += u * w;
        upper[3] += v * v;
        upper[4] += v * w;
        upper[5] += w * w;
        sum_sq += u * u + v * v + w * w;
    }

    let [xx, xy, xz, yy, yz, zz] = upper;
    #[rustfmt::skip]
    let matrix = Matrix3::new(
        xx, xy, xz,
        xy, yy, yz,
        xz, yz, zz,
    );

    let count = window.len();
    let mean_vector_amplitude = if count > 0 && sum_sq > ENERGY_FLOOR {
        Some(sum_sq.sqrt() / count as f64)
    } else {
        None
    };

    Covariance {
        matrix,
        mean_vector_amplitude,
    }
}
