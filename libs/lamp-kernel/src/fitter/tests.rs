//! Tests for fitter generation.

use super::*;
use crate::lattice::Connectivity;
use crate::params::{PatternFamily, ShellParams};
use crate::settings::KernelConfig;
use crate::test_support::face_samples;
use crate::topology::analyze;
use proptest::prelude::*;

fn spider_params() -> ShellParams {
    let mut params = ShellParams {
        height: 120.0,
        top_radius: 45.0,
        bottom_radius: 60.0,
        wall_thickness: 1.6,
        rib_count: 18,
        rib_depth: 2.5,
        ..ShellParams::default()
    };
    params.fitter.kind = FitterKind::Spider;
    params.fitter.mount_height_from_base = 30.0;
    params.fitter.spoke_count = 4;
    params
}

fn is_far(index: u32) -> bool {
    SPOKE_FAR_CORNERS.contains(&(index as usize % 4))
}

/// Largest distance any point of the spoke end face sits outside the wall.
fn end_face_protrusion(surface: &ShellSurface, spoke: &Mesh) -> f64 {
    face_samples(spoke, is_far, 8)
        .into_iter()
        .map(|p| p.x.hypot(p.y) - surface.outer_radius(p.y.atan2(p.x), p.z))
        .fold(f64::NEG_INFINITY, f64::max)
}

#[test]
fn test_no_fitter_is_empty() {
    let params = ShellParams::default();
    let surface = ShellSurface::new(&params, &KernelConfig::default());
    let mesh = build_fitter(&surface, &params.fitter, 64, None).unwrap();
    assert!(mesh.is_empty());
}

#[test]
fn test_spider_ring_and_spokes_are_closed() {
    let params = spider_params();
    let surface = ShellSurface::new(&params, &KernelConfig::default());
    let mesh = build_fitter(&surface, &params.fitter, 48, None).unwrap();

    let sections = spoke_columns(&params.fitter) + 1;
    assert_eq!(sections, 9);
    assert_eq!(mesh.vertex_count(), 2 * 48 * 2 + 4 * 4 * sections as usize);
    let report = analyze(&mesh);
    assert!(report.is_oriented_manifold());
    // Ring is genus 1, every spoke a sphere
    assert_eq!(report.euler_characteristic(), 2 * 4);
}

#[test]
fn test_spoke_ends_sit_inside_fused_band() {
    let params = spider_params();
    let cfg = KernelConfig::default();
    let surface = ShellSurface::new(&params, &cfg);
    let spoke = build_spoke(&surface, &params.fitter, 0.3, None);

    let far: Vec<_> = (0..spoke.vertex_count() as u32)
        .filter(|&i| is_far(i))
        .map(|i| spoke.vertex(i))
        .collect();
    assert_eq!(far.len(), 2 * 9);
    for p in far {
        let angle = p.y.atan2(p.x);
        let r = p.x.hypot(p.y);
        let (outer, inner) = surface.wall_radii(angle, p.z);
        assert!(r <= outer - cfg.safety_margin + 1e-9);
        assert!(r > inner, "spoke must reach into the wall");
    }

    // Start corners overlap the ring
    let start = spoke.vertices()[0];
    assert!(start.x.hypot(start.y) <= 0.5 * params.fitter.outer_diameter + 1e-9);
}

#[test]
fn test_end_face_stays_inside_fine_ribs() {
    // Rib period at the base is about 7 and 3 units; the spoke is 4 wide
    for rib_count in [62, 150] {
        let mut params = ShellParams {
            rib_count,
            rib_depth: 2.0,
            ..ShellParams::default()
        };
        params.fitter.kind = FitterKind::Spider;
        params.fitter.spoke_count = 4;

        let surface = ShellSurface::new(&params, &KernelConfig::default());
        for k in 0..params.fitter.spoke_count {
            let theta = TAU * f64::from(k) / f64::from(params.fitter.spoke_count);
            let spoke = build_spoke(&surface, &params.fitter, theta, None);
            let protrusion = end_face_protrusion(&surface, &spoke);
            assert!(
                protrusion <= 0.0,
                "{rib_count} ribs: end face {protrusion} outside the wall at {theta}"
            );
        }
    }
}

#[test]
fn test_ring_too_wide_for_shell() {
    let mut params = spider_params();
    params.fitter.inner_diameter = 100.0;
    params.fitter.outer_diameter = 110.0;
    params.fitter.spoke_width = 4.0;
    let surface = ShellSurface::new(&params, &KernelConfig::default());
    let err = build_fitter(&surface, &params.fitter, 48, None).unwrap_err();
    assert_eq!(err.parameter(), Some("fitter.outer_diameter"));
}

#[test]
fn test_top_rim_spokes_at_top_edge() {
    let mut params = spider_params();
    params.fitter.kind = FitterKind::TopRim;
    let surface = ShellSurface::new(&params, &KernelConfig::default());
    let mesh = build_fitter(&surface, &params.fitter, 48, None).unwrap();
    let (min, max) = mesh.bounding_box();
    assert!((max.z - params.height).abs() < 1e-9);
    assert!((min.z - (params.height - params.fitter.ring_height)).abs() < 1e-9);
}

#[test]
fn test_top_rim_spokes_land_on_frame_chords() {
    let mut params = ShellParams {
        pattern: PatternFamily::WireVertical,
        rib_count: 4,
        vertical_count: 3,
        ..ShellParams::default()
    };
    params.fitter.kind = FitterKind::TopRim;
    let surface = ShellSurface::new(&params, &KernelConfig::default());
    let frame = FrameRing::top(&surface, Connectivity::Vertical, 4, 3, params.strut_radius);

    for theta in [0.0, TAU / 3.0, 2.0 * TAU / 3.0, 1.0] {
        let spoke = build_spoke(&surface, &params.fitter, theta, Some(&frame));
        for i in (0..spoke.vertex_count() as u32).filter(|&i| is_far(i)) {
            let p = spoke.vertex(i);
            let r = p.x.hypot(p.y);
            let chord = frame.chord_radius(p.y.atan2(p.x));
            assert!(r <= chord + 1e-9, "spoke tip {r} beyond chord {chord}");
            assert!(r >= chord - params.strut_radius, "spoke tip {r} short of strut");
        }
        for p in face_samples(&spoke, is_far, 8) {
            let chord = frame.chord_radius(p.y.atan2(p.x));
            assert!(p.x.hypot(p.y) <= chord + params.strut_radius);
        }
    }

    let mesh = build_fitter(&surface, &params.fitter, 64, Some(&frame)).unwrap();
    assert!(analyze(&mesh).is_oriented_manifold());
}

#[test]
fn test_ring_wider_than_frame_is_rejected() {
    let mut params = ShellParams {
        pattern: PatternFamily::WireVertical,
        rib_count: 3,
        top_radius: 30.0,
        ..ShellParams::default()
    };
    params.fitter.kind = FitterKind::TopRim;
    let surface = ShellSurface::new(&params, &KernelConfig::default());
    // Triangle frame: chords come within 15 of the axis, the ring is 18
    let frame = FrameRing::top(&surface, Connectivity::Vertical, 3, 6, params.strut_radius);
    let err = build_fitter(&surface, &params.fitter, 64, Some(&frame)).unwrap_err();
    assert_eq!(err.parameter(), Some("fitter.outer_diameter"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_spoke_end_faces_never_pierce_outer_wall(
        family_index in 0u8..47,
        theta in 0.0f64..TAU,
        mount in 0.0f64..110.0,
        depth in 0.0f64..4.0,
        ribs in 1u32..160,
        seed in any::<u32>(),
    ) {
        let mut params = spider_params();
        params.pattern = PatternFamily::from_index(family_index).unwrap();
        params.rib_depth = depth;
        params.rib_count = ribs;
        params.seed = seed;
        params.fitter.mount_height_from_base = mount;

        let cfg = KernelConfig::default();
        let surface = ShellSurface::new(&params, &cfg);
        let spoke = build_spoke(&surface, &params.fitter, theta, None);
        for i in (0..spoke.vertex_count() as u32).filter(|&i| is_far(i)) {
            let p = spoke.vertex(i);
            let outer = surface.outer_radius(p.y.atan2(p.x), p.z);
            prop_assert!(p.x.hypot(p.y) <= outer - cfg.safety_margin + 1e-9);
        }
        prop_assert!(end_face_protrusion(&surface, &spoke) <= 0.0);
    }
}
