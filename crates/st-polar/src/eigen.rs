// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Cyclic Jacobi eigensolver for 3×3 real symmetric matrices.
//!
//! Each sweep annihilates the three off-diagonal pairs in turn with a plane
//! rotation. Rotations are orthogonal, so the accumulated basis stays
//! orthonormal to round-off and the trace is preserved exactly up to the
//! rounding of the diagonal updates. The iteration stops once the
//! off-diagonal mass falls below `f64::EPSILON` relative to the Frobenius norm
//! of the input, which for 3×3 inputs takes a handful of sweeps. The input is
//! normalised by its largest entry first, so the convergence test holds for
//! any finite magnitude.

use nalgebra::{Matrix3, Vector3};

use crate::error::{PolarError, PolarResult};

/// Upper bound on Jacobi sweeps before the decomposition is reported as failed.
pub const MAX_SWEEPS: usize = 50;

/// Sweeps after which negligible off-diagonal entries are zeroed outright.
const SKIP_AFTER_SWEEP: usize = 3;

const PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

/// Eigen-decomposition of a symmetric 3×3 matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymmetricEigen3 {
    /// Eigenvalues in ascending order.
    pub values: Vector3<f64>,
    /// Row `k` is the unit eigenvector paired with `values[k]`.
    pub vectors: Matrix3<f64>,
    /// Jacobi sweeps spent reaching convergence.
    pub sweeps: usize,
}

impl SymmetricEigen3 {
    /// Unit eigenvector for the `k`-th smallest eigenvalue.
    pub fn eigenvector(&self, k: usize) -> Vector3<f64> {
        self.vectors.row(k).transpose()
    }

    /// `Vᵀ·diag(Λ)·V`, which reproduces the decomposed matrix.
    pub fn reconstruct(&self) -> Matrix3<f64> {
        self.vectors.transpose() * Matrix3::from_diagonal(&self.values) * self.vectors
    }
}

/// Decomposes `matrix` into ascending eigenvalues and row eigenvectors.
///
/// The input is symmetrised as `(A + Aᵀ) / 2` first. When eigenvalues coincide
/// any orthonormal basis of the shared eigenspace may be returned.
pub fn eigen_symmetric_3x3(matrix: &Matrix3<f64>) -> PolarResult<SymmetricEigen3> {
    if matrix.iter().any(|value| !value.is_finite()) {
        return Err(PolarError::NonFiniteMatrix);
    }

    let mut a = matrix * 0.5 + matrix.transpose() * 0.5;
    let mut basis = Matrix3::<f64>::identity();
    // Sweeps run on a copy scaled to unit max entry so the squared norms
    // below cannot overflow or underflow.
    let scale = a.amax();
    if scale == 0.0 {
        return Ok(sorted(&a, &basis, 0));
    }
    a /= scale;

    let tolerance = (f64::EPSILON * a.norm()).powi(2);
    let mut sweeps = 0;
    loop {
        let off = off_diagonal_mass(&a);
        if off <= tolerance {
            break;
        }
        if sweeps == MAX_SWEEPS {
            return Err(PolarError::EigenNotConverged {
                sweeps,
                off_diagonal: off.sqrt() * scale,
            });
        }
        for (p, q) in PAIRS {
            rotate(&mut a, &mut basis, p, q, sweeps);
        }
        sweeps += 1;
    }

    let mut eigen = sorted(&a, &basis, sweeps);
    eigen.values *= scale;
    if eigen.values.iter().any(|value| !value.is_finite()) {
        return Err(PolarError::EigenvalueOverflow { scale });
    }
    Ok(eigen)
}

fn off_diagonal_mass(a: &Matrix3<f64>) -> f64 {
    2.0 * (a[(0, 1)].powi(2) + a[(0, 2)].powi(2) + a[(1, 2)].powi(2))
}

/// Applies the plane rotation that zeroes `a[(p, q)]`, accumulating it into
/// the columns of `basis`.
fn rotate(a: &mut Matrix3<f64>, basis: &mut Matrix3<f64>, p: usize, q: usize, sweep: usize) {
    let apq = a[(p, q)];
    if apq == 0.0 {
        return;
    }
    let app = a[(p, p)];
    let aqq = a[(q, q)];
    let g = 100.0 * apq.abs();
    if sweep > SKIP_AFTER_SWEEP && app.abs() + g == app.abs() && aqq.abs() + g == aqq.abs() {
        a[(p, q)] = 0.0;
        a[(q, p)] = 0.0;
        return;
    }

    let h = aqq - app;
    let t = if h.abs() + g == h.abs() {
        // theta² would overflow; t ≈ 1 / (2 theta).
        apq / h
    } else {
        let theta = 0.5 * h / apq;
        let t = 1.0 / (theta.abs() + (1.0 + theta * theta).sqrt());
        if theta < 0.0 {
            -t
        } else {
            t
        }
    };
    let c = 1.0 / (1.0 + t * t).sqrt();
    let s = t * c;
    let tau = s / (1.0 + c);
    let delta = t * apq;

    a[(p, p)] = app - delta;
    a[(q, q)] = aqq + delta;
    a[(p, q)] = 0.0;
    a[(q, p)] = 0.0;

    let r = 3 - p - q;
    let arp = a[(r, p)];
    let arq = a[(r, q)];
    a[(r, p)] = arp - s * (arq + tau * arp);
    a[(p, r)] = a[(r, p)];
    a[(r, q)] = arq + s * (arp - tau * arq);
    a[(q, r)] = a[(r, q)];

    for k in 0..3 {
        let vkp = basis[(k, p)];
        let vkq = basis[(k, q)];
        basis[(k, p)] = vkp - s * (vkq + tau * vkp);
        basis[(k, q)] = vkq + s * (vkp - tau * vkq);
    }
}

/// Orders eigenpairs ascending; Jacobi leaves them in pivot order.
fn sorted(diagonal: &Matrix3<f64>, basis: &Matrix3<f64>, sweeps: usize) -> SymmetricEigen3 {
    let mut order = [0usize, 1, 2];
    order.sort_by(|&i, &j| diagonal[(i, i)].total_cmp(&diagonal[(j, j)]));

    let values = Vector3::new(
        diagonal[(order[0], order[0])],
        diagonal[(order[1], order[1])],
        diagonal[(order[2], order[2])],
    );
    let vectors = Matrix3::from_rows(&[
        basis.column(order[0]).transpose(),
        basis.column(order[1]).transpose(),
        basis.column(order[2]).transpose(),
    ]);

    SymmetricEigen3 {
        values,
        vectors,
        sweeps,
    }
}
