// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use approx::assert_abs_diff_eq;

use st_polar::{
    analyze, analyze_to_record, AnalysisParams, Polarization, PolarizationRecord,
    PolarizationResult, ThreeComponent, VerticalPolarity,
};

const SIGNAL: [f64; 9] = [0.3, -1.2, 2.5, 0.7, -0.4, 1.9, -2.2, 0.05, 1.1];

/// Rectilinear motion along the given bearing (degrees east of north) and
/// elevation, returned as `(z, x, y)`.
fn linear_motion(azimuth: f64, dip: f64, signal: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let (az, el) = (azimuth.to_radians(), dip.to_radians());
    let axis = [el.cos() * az.sin(), el.cos() * az.cos(), el.sin()];
    let x = signal.iter().map(|s| s * axis[0]).collect();
    let y = signal.iter().map(|s| s * axis[1]).collect();
    let z = signal.iter().map(|s| s * axis[2]).collect();
    (z, x, y)
}

fn run(z: &[f64], x: &[f64], y: &[f64], params: &AnalysisParams) -> PolarizationResult {
    let traces = ThreeComponent::new(z, x, y);
    let outcome = analyze(&traces, 0, z.len(), params).unwrap();
    *outcome.valid().expect("window carries energy")
}

fn angular_gap(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[test]
fn pure_vertical_motion_points_straight_up() {
    let zeros = vec![0.0; SIGNAL.len()];
    for polarity in [VerticalPolarity::AsRecorded, VerticalPolarity::Inverted] {
        let params = AnalysisParams::default().with_polarity(polarity);
        let result = run(&SIGNAL, &zeros, &zeros, &params);
        assert_eq!(result.dip, 90.0);
        assert_abs_diff_eq!(result.degree_of_linearity, 1.0, epsilon = 1e-12);
        assert_eq!(result.degree_of_planarity, None);

        let traces = ThreeComponent::new(&SIGNAL, &zeros, &zeros);
        let record = analyze_to_record(
            &traces,
            0,
            SIGNAL.len(),
            if polarity == VerticalPolarity::AsRecorded { 1 } else { -1 },
            0.0,
            false,
        )
        .unwrap();
        assert_eq!(record.degree_of_planarity, -1.0);
        assert_eq!(record.dip, 90.0);
    }
}

#[test]
fn horizontal_motion_along_thirty_degrees_from_x() {
    let x: Vec<f64> = SIGNAL.iter().map(|s| s * 30f64.to_radians().cos()).collect();
    let y: Vec<f64> = SIGNAL.iter().map(|s| s * 30f64.to_radians().sin()).collect();
    let z = vec![0.0; SIGNAL.len()];
    let result = run(&z, &x, &y, &AnalysisParams::default());

    // 90° − atan2(sin 30°, cos 30°) = 60°; a horizontal axis has no upward
    // side, so the opposite bearing is equally valid.
    let gap = angular_gap(result.azimuth, 60.0).min(angular_gap(result.azimuth, 240.0));
    assert!(gap < 1e-9, "azimuth {}", result.azimuth);
    assert_abs_diff_eq!(result.dip, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.degree_of_linearity, 1.0, epsilon = 1e-9);
    assert!((0.0..360.0).contains(&result.azimuth));
}

#[test]
fn oblique_motion_recovers_bearing_and_dip() {
    for (azimuth, dip) in [(10.0, 30.0), (135.0, 60.0), (250.0, 5.0), (355.0, 80.0)] {
        let (z, x, y) = linear_motion(azimuth, dip, &SIGNAL);
        let result = run(&z, &x, &y, &AnalysisParams::default());
        assert!(
            angular_gap(result.azimuth, azimuth) < 1e-8,
            "expected {azimuth}, got {}",
            result.azimuth
        );
        assert_abs_diff_eq!(result.dip, dip, epsilon = 1e-8);
        assert_abs_diff_eq!(result.degree_of_linearity, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn reference_azimuth_wraps_into_full_turn() {
    let (z, x, y) = linear_motion(10.0, 30.0, &SIGNAL);
    let params = AnalysisParams::default().with_reference_azimuth(-20.0);
    let result = run(&z, &x, &y, &params);
    assert!((0.0..360.0).contains(&result.azimuth));
    assert_abs_diff_eq!(result.azimuth, 350.0, epsilon = 1e-8);

    let (z, x, y) = linear_motion(350.0, 30.0, &SIGNAL);
    let params = AnalysisParams::default().with_reference_azimuth(30.0);
    let result = run(&z, &x, &y, &params);
    assert!((0.0..360.0).contains(&result.azimuth));
    assert_abs_diff_eq!(result.azimuth, 20.0, epsilon = 1e-8);

    let params = AnalysisParams::default().with_reference_azimuth(-725.0);
    let result = run(&z, &x, &y, &params);
    assert!((0.0..360.0).contains(&result.azimuth));
    assert!(angular_gap(result.azimuth, 345.0) < 1e-8);
}

#[test]
fn silent_window_yields_sentinel_record() {
    let zeros = [0.0_f64; 16];
    let traces = ThreeComponent::new(&zeros, &zeros, &zeros);
    let outcome = analyze(&traces, 4, 8, &AnalysisParams::default()).unwrap();
    assert_eq!(
        outcome,
        Polarization::Degenerate {
            mean_vector_amplitude: None
        }
    );

    let record = analyze_to_record(&traces, 4, 8, 1, 12.0, true).unwrap();
    assert_eq!(record, PolarizationRecord::DEGENERATE);
    assert_eq!(
        (
            record.azimuth,
            record.dip,
            record.degree_of_linearity,
            record.degree_of_planarity,
            record.mean_vect_amp
        ),
        (-1.0, -999.0, -1.0, -1.0, -1.0)
    );
}

#[test]
fn polarity_flip_mirrors_bearing_and_keeps_dip_upward() {
    let (mut z, mut x, mut y) = linear_motion(40.0, 25.0, &SIGNAL);
    // Off-axis energy so the motion is not perfectly rectilinear.
    for (i, ((zi, xi), yi)) in z.iter_mut().zip(x.iter_mut()).zip(y.iter_mut()).enumerate() {
        let wobble = ((i * 7 % 5) as f64 - 2.0) * 0.05;
        *xi += wobble;
        *yi -= 0.5 * wobble;
        *zi += 0.25 * wobble;
    }

    let up = run(&z, &x, &y, &AnalysisParams::default());
    let down = run(
        &z,
        &x,
        &y,
        &AnalysisParams::default().with_polarity(VerticalPolarity::Inverted),
    );

    assert!(up.dip >= 0.0 && down.dip >= 0.0);
    assert_abs_diff_eq!(up.dip, down.dip, epsilon = 1e-9);
    assert!(angular_gap(up.azimuth, down.azimuth + 180.0) < 1e-8);
    assert_abs_diff_eq!(up.degree_of_linearity, down.degree_of_linearity, epsilon = 1e-12);
    assert_abs_diff_eq!(
        up.degree_of_planarity.unwrap(),
        down.degree_of_planarity.unwrap(),
        epsilon = 1e-9
    );
    assert_eq!(up.mean_vector_amplitude, down.mean_vector_amplitude);
    assert!(up.degree_of_linearity < 1.0);
}

#[test]
fn circular_motion_is_planar_not_linear() {
    let n = 64;
    let x: Vec<f64> = (0..n)
        .map(|i| (i as f64 * std::f64::consts::TAU / n as f64).cos())
        .collect();
    let y: Vec<f64> = (0..n)
        .map(|i| (i as f64 * std::f64::consts::TAU / n as f64).sin())
        .collect();
    let z = vec![0.0; n];
    let result = run(&z, &x, &y, &AnalysisParams::default());

    assert_abs_diff_eq!(result.degree_of_linearity, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.degree_of_planarity.unwrap(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.eigenvalues[0], n as f64 / 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.mean_vector_amplitude.unwrap(), (n as f64).sqrt() / n as f64, epsilon = 1e-12);
}

#[test]
fn single_precision_samples_match_double_precision() {
    let (z, x, y) = linear_motion(120.0, 35.0, &SIGNAL);
    let z32: Vec<f32> = z.iter().map(|&v| v as f32).collect();
    let x32: Vec<f32> = x.iter().map(|&v| v as f32).collect();
    let y32: Vec<f32> = y.iter().map(|&v| v as f32).collect();

    let wide = run(&z, &x, &y, &AnalysisParams::default());
    let traces = ThreeComponent::new(&z32, &x32, &y32);
    let narrow = analyze(&traces, 0, z32.len(), &AnalysisParams::default()).unwrap();
    let narrow = narrow.valid().unwrap();

    assert!(angular_gap(wide.azimuth, narrow.azimuth) < 1e-4);
    assert_abs_diff_eq!(wide.dip, narrow.dip, epsilon = 1e-4);
}

#[test]
fn window_offset_matches_sliced_input() {
    let (z, x, y) = linear_motion(75.0, -10.0, &SIGNAL);
    let traces = ThreeComponent::new(&z, &x, &y);
    let params = AnalysisParams::default().with_reference_azimuth(5.0);
    let offset = analyze(&traces, 2, 5, &params).unwrap();
    let sliced = run(&z[2..7], &x[2..7], &y[2..7], &params);
    assert_eq!(offset.valid().unwrap(), &sliced);
}

#[test]
fn huge_amplitudes_keep_geometry() {
    for amplitude in [1e80, 1e150] {
        let z = [amplitude, 0.0, 0.0];
        let x = [amplitude, 0.0, 0.0];
        let y = [0.0; 3];
        let result = run(&z, &x, &y, &AnalysisParams::default());
        assert_abs_diff_eq!(result.dip, 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.azimuth, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.degree_of_linearity, 1.0, epsilon = 1e-12);
    }
}
