// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::covariance::build_covariance;
use crate::eigen::eigen_symmetric_3x3;
use crate::error::{PolarError, PolarResult};
use crate::interpret::{interpret, Polarization};
use crate::record::PolarizationRecord;
use crate::window::{SampleWindow, ThreeComponent, VerticalPolarity};

/// Scalar inputs of a polarization analysis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    pub vertical_polarity: VerticalPolarity,
    /// Degrees added to the raw bearing, e.g. the horizontal sensor rotation.
    pub reference_azimuth: f64,
    /// Dump the covariance and eigen-decomposition at debug level.
    pub verbose: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            vertical_polarity: VerticalPolarity::AsRecorded,
            reference_azimuth: 0.0,
            verbose: false,
        }
    }
}

impl AnalysisParams {
    /// Defaults with `verbose` taken from the process runtime configuration.
    pub fn from_runtime() -> Self {
        Self {
            verbose: polar_config::runtime::verbose(),
            ..Self::default()
        }
    }

    pub fn with_polarity(mut self, polarity: VerticalPolarity) -> Self {
        self.vertical_polarity = polarity;
        self
    }

    pub fn with_reference_azimuth(mut self, degrees: f64) -> Self {
        self.reference_azimuth = degrees;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub(crate) fn validate(&self) -> PolarResult<()> {
        if self.reference_azimuth.is_finite() {
            Ok(())
        } else {
            Err(PolarError::NonFiniteAzimuth(self.reference_azimuth))
        }
    }
}

/// Analyses `[start, start + count)` of `traces`.
pub fn analyze<T>(
    traces: &ThreeComponent<'_, T>,
    start: usize,
    count: usize,
    params: &AnalysisParams,
) -> PolarResult<Polarization>
where
    T: Copy + Into<f64>,
{
    let window = traces.window(start, count)?;
    analyze_window(&window, params)
}

/// Runs covariance, eigen-decomposition and interpretation over a validated
/// window.
pub fn analyze_window<T>(
    window: &SampleWindow<'_, T>,
    params: &AnalysisParams,
) -> PolarResult<Polarization>
where
    T: Copy + Into<f64>,
{
    params.validate()?;

    let covariance = build_covariance(window, params.vertical_polarity);
    if params.verbose {
        debug!(
            target: "st_polar::analysis",
            start = window.start(),
            count = window.len(),
            polarity = ?params.vertical_polarity,
            mean_vector_amplitude = ?covariance.mean_vector_amplitude,
            "covariance matrix:{}",
            covariance.matrix
        );
    }

    let eigen = eigen_symmetric_3x3(&covariance.matrix)?;
    if params.verbose {
        debug!(
            target: "st_polar::analysis",
            eigenvalues = ?eigen.values.as_slice(),
            sweeps = eigen.sweeps,
            "eigenvectors (rows, ascending):{}",
            eigen.vectors
        );
    }

    let outcome = interpret(
        &eigen,
        params.reference_azimuth,
        covariance.mean_vector_amplitude,
    );
    if params.verbose {
        debug!(target: "st_polar::analysis", ?outcome, "polarization");
    }
    Ok(outcome)
}

/// Analysis entry point for callers that pass the header polarity flag and
/// consume the sentinel-encoded record.
pub fn analyze_to_record<T>(
    traces: &ThreeComponent<'_, T>,
    start: usize,
    count: usize,
    polarity_flag: i32,
    reference_azimuth: f64,
    verbose: bool,
) -> PolarResult<PolarizationRecord>
where
    T: Copy + Into<f64>,
{
    let params = AnalysisParams {
        vertical_polarity: VerticalPolarity::from_flag(polarity_flag),
        reference_azimuth,
        verbose,
    };
    analyze(traces, start, count, &params).map(|outcome| outcome.to_record())
}
