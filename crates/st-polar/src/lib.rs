// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Three-component polarization analysis.
//!
//! A window of vertical and two horizontal ground-motion samples is reduced to
//! its 3×3 second-moment matrix, decomposed with a Jacobi eigensolver, and the
//! principal axis is reported as an azimuth/dip pair together with the degree
//! of linearity and planarity of the particle motion.
//!
//! ```
//! use st_polar::{analyze, AnalysisParams, ThreeComponent};
//!
//! let z = [0.0_f64; 4];
//! let x = [1.0, -2.0, 0.5, 1.5];
//! let y = [0.0_f64; 4];
//! let traces = ThreeComponent::new(&z, &x, &y);
//! let outcome = analyze(&traces, 0, 4, &AnalysisParams::default()).unwrap();
//! let result = outcome.valid().unwrap();
//! assert!((result.degree_of_linearity - 1.0).abs() < 1e-12);
//! ```

pub mod analysis;
pub mod batch;
pub mod covariance;
pub mod eigen;
mod error;
pub mod interpret;
pub mod record;
pub mod telemetry;
pub mod window;

pub use analysis::{analyze, analyze_to_record, analyze_window, AnalysisParams};
pub use batch::{analyze_sliding, analyze_sliding_with, ExecutionMode, SlidingWindow, WindowAnalysis};
pub use covariance::{build_covariance, Covariance};
pub use eigen::{eigen_symmetric_3x3, SymmetricEigen3};
pub use error::{PolarError, PolarResult};
pub use interpret::{interpret, Polarization, PolarizationResult};
pub use record::PolarizationRecord;
pub use window::{Channel, SampleWindow, ThreeComponent, VerticalPolarity};

/// Smallest energy treated as non-zero (`FLT_MIN`).
pub const ENERGY_FLOOR: f64 = f32::MIN_POSITIVE as f64;

/// Eigenvalues below this fraction of the largest one are round-off.
pub const ROUND_OFF_RATIO: f64 = 1e-10;
