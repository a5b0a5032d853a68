//! Tests for shell surface radius queries.

use super::*;
use crate::params::{PatternFamily, SilhouetteFamily};
use approx::assert_relative_eq;

fn drum() -> ShellParams {
    ShellParams {
        pattern: PatternFamily::RibbedDrum,
        silhouette: SilhouetteFamily::Straight,
        height: 15.0,
        top_radius: 5.0,
        bottom_radius: 8.0,
        wall_thickness: 0.2,
        rib_count: 24,
        rib_depth: 0.4,
        angular_resolution: 64,
        ..ShellParams::default()
    }
}

#[test]
fn test_outer_is_silhouette_plus_displacement() {
    let surface = ShellSurface::new(&drum(), &KernelConfig::default());
    assert_relative_eq!(surface.outer_radius(0.0, 0.0), 8.4, epsilon = 1e-12);
    assert_relative_eq!(
        surface.outer_radius(std::f64::consts::PI / 24.0, 0.0),
        7.6,
        epsilon = 1e-12
    );
    assert_relative_eq!(surface.base_radius(15.0), 5.0, epsilon = 1e-12);
}

#[test]
fn test_inner_is_offset_by_wall() {
    let surface = ShellSurface::new(&drum(), &KernelConfig::default());
    let outer = surface.outer_radius(0.4, 3.0);
    assert_relative_eq!(surface.inner_radius(0.4, 3.0), outer - 0.2, epsilon = 1e-12);
    assert_eq!(surface.clamp_count(), 0);
}

#[test]
fn test_fused_radius_stays_inside_outer_wall() {
    let surface = ShellSurface::new(&drum(), &KernelConfig::default());
    let cfg = KernelConfig::default();
    for i in 0..64 {
        let angle = std::f64::consts::TAU * f64::from(i) / 64.0;
        let fused = surface.fused_radius(angle, 7.0);
        assert!(fused <= surface.outer_radius(angle, 7.0) - cfg.safety_margin + 1e-12);
        assert!(fused > surface.inner_radius(angle, 7.0));
    }
}

#[test]
fn test_degenerate_radius_is_clamped_and_counted() {
    let params = ShellParams {
        rib_depth: 20.0,
        ..drum()
    };
    let surface = ShellSurface::new(&params, &KernelConfig::default());
    let angle = std::f64::consts::PI / 24.0;
    assert_eq!(surface.outer_radius(angle, 0.0), 0.1);
    assert_eq!(surface.inner_radius(angle, 0.0), 0.05);
    assert!(surface.clamp_count() >= 2);
}

#[test]
fn test_point_is_on_circle() {
    let surface = ShellSurface::new(&drum(), &KernelConfig::default());
    let p = surface.point(std::f64::consts::FRAC_PI_2, 2.0, 3.0);
    assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(p.y, 3.0, epsilon = 1e-12);
    assert_eq!(p.z, 2.0);
}

#[test]
fn test_window_min_of_flat_field_is_exact() {
    let lowest = window_min(|_, _| 4.0, (0.0, 0.1), (0.0, 2.0), 10.0);
    assert_relative_eq!(lowest, 4.0, epsilon = 1e-12);
}

#[test]
fn test_window_min_covers_a_kink_between_samples() {
    // Sharp V whose tip falls between two angular samples
    let tip = 0.012_345;
    let field = |angle: f64, _z: f64| 5.0 + 40.0 * (angle - tip).abs();
    let lowest = window_min(field, (0.0, 0.1), (0.0, 1.0), 10.0);
    assert!(lowest <= 5.0, "window minimum {lowest} misses the kink");
    assert!(lowest > 4.0);
}

#[test]
fn test_min_fused_radius_bounds_every_corner() {
    let surface = ShellSurface::new(&drum(), &KernelConfig::default());
    let angles = (0.05, 0.2);
    let heights = (1.0, 4.0);
    let lowest = surface.min_fused_radius(angles, heights);
    for angle in [angles.0, angles.1] {
        for z in [heights.0, heights.1] {
            assert!(lowest <= surface.fused_radius(angle, z) + 1e-12);
        }
    }
    // The window spans a rib valley
    assert!(lowest < surface.fused_radius(angles.0, heights.0));
}
