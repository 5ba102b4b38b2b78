// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Fixed-stride sliding-window analysis over whole traces.
//!
//! Windows are independent, so they are evaluated on the rayon pool and
//! reassembled by window index.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug_span;

use crate::analysis::{analyze, AnalysisParams};
use crate::error::{PolarError, PolarResult};
use crate::interpret::Polarization;
use crate::window::ThreeComponent;

/// Window length and stride, both in samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidingWindow {
    pub length: usize,
    pub step: usize,
}

impl SlidingWindow {
    pub fn new(length: usize, step: usize) -> PolarResult<Self> {
        let plan = Self { length, step };
        plan.validate()?;
        Ok(plan)
    }

    /// Non-overlapping windows of `length` samples.
    pub fn tiling(length: usize) -> PolarResult<Self> {
        Self::new(length, length)
    }

    fn validate(&self) -> PolarResult<()> {
        if self.length == 0 || self.step == 0 {
            return Err(PolarError::InvalidPlan {
                length: self.length,
                step: self.step,
            });
        }
        Ok(())
    }

    /// Number of complete windows that fit into `trace_len` samples.
    pub fn window_count(&self, trace_len: usize) -> usize {
        if self.length == 0 || self.step == 0 || trace_len < self.length {
            0
        } else {
            (trace_len - self.length) / self.step + 1
        }
    }

    /// First sample of each window, in order.
    pub fn starts(&self, trace_len: usize) -> impl Iterator<Item = usize> {
        let step = self.step;
        (0..self.window_count(trace_len)).map(move |index| index * step)
    }
}

/// How batch windows are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    #[default]
    Parallel,
    Sequential,
}

impl ExecutionMode {
    /// Mode requested by the process runtime configuration.
    pub fn from_runtime() -> Self {
        if polar_config::runtime::lock_window_order() {
            Self::Sequential
        } else {
            Self::Parallel
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowAnalysis {
    pub index: usize,
    pub start: usize,
    pub polarization: Polarization,
}

/// Analyses every window of `plan` using the runtime-configured execution mode.
pub fn analyze_sliding<T>(
    traces: &ThreeComponent<'_, T>,
    plan: &SlidingWindow,
    params: &AnalysisParams,
) -> PolarResult<Vec<WindowAnalysis>>
where
    T: Copy + Into<f64> + Sync,
{
    analyze_sliding_with(traces, plan, params, ExecutionMode::from_runtime())
}

/// Analyses every window of `plan`; results are ordered by window index
/// whatever `mode` is. The first failing window aborts the batch.
pub fn analyze_sliding_with<T>(
    traces: &ThreeComponent<'_, T>,
    plan: &SlidingWindow,
    params: &AnalysisParams,
    mode: ExecutionMode,
) -> PolarResult<Vec<WindowAnalysis>>
where
    T: Copy + Into<f64> + Sync,
{
    plan.validate()?;
    let trace_len = traces.common_len()?;
    let total = plan.window_count(trace_len);

    let span = debug_span!(
        "analyze_sliding",
        windows = total,
        length = plan.length,
        step = plan.step,
        mode = ?mode
    );
    let _enter = span.enter();

    let run = |index: usize| -> PolarResult<WindowAnalysis> {
        let start = index * plan.step;
        let polarization = analyze(traces, start, plan.length, params)?;
        Ok(WindowAnalysis {
            index,
            start,
            polarization,
        })
    };

    match mode {
        ExecutionMode::Sequential => (0..total).map(run).collect(),
        ExecutionMode::Parallel => (0..total).into_par_iter().map(run).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_count_covers_only_complete_windows() {
        let plan = SlidingWindow::new(4, 3).unwrap();
        assert_eq!(plan.window_count(3), 0);
        assert_eq!(plan.window_count(4), 1);
        assert_eq!(plan.window_count(10), 3);
        assert_eq!(plan.starts(10).collect::<Vec<_>>(), vec![0, 3, 6]);
    }

    #[test]
    fn zero_length_or_step_is_rejected() {
        assert_eq!(
            SlidingWindow::new(0, 1).unwrap_err(),
            PolarError::InvalidPlan { length: 0, step: 1 }
        );
        assert!(SlidingWindow::new(5, 0).is_err());
        assert_eq!(
            SlidingWindow::tiling(8).unwrap(),
            SlidingWindow { length: 8, step: 8 }
        );
    }

    #[test]
    fn hand_built_plans_are_validated_too() {
        let data = [1.0_f64; 8];
        let traces = ThreeComponent::new(&data, &data, &data);
        let plan = SlidingWindow { length: 2, step: 0 };
        assert!(matches!(
            analyze_sliding_with(
                &traces,
                &plan,
                &AnalysisParams::default(),
                ExecutionMode::Sequential
            ),
            Err(PolarError::InvalidPlan { .. })
        ));
    }
}
