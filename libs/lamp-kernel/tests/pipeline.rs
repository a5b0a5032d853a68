//! End-to-end generation through the public entry points.

use approx::assert_abs_diff_eq;
use lamp_kernel::export::{to_stl_ascii, write_stl_binary};
use lamp_kernel::lithophane::HoleSpec;
use lamp_kernel::params::{PatternGroup, RimPlacement, RimSpec};
use lamp_kernel::topology::analyze;
use lamp_kernel::{
    generate_lithophane, generate_shell, FitterKind, FitterSpec, KernelError, LithophaneParams,
    LuminanceGrid, MeshBuffers, OutlineShape, PatternFamily, ShellParams, SilhouetteFamily,
};
use proptest::prelude::*;

fn ribbed_drum() -> ShellParams {
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
        height_resolution: 10,
        ..ShellParams::default()
    }
}

#[test]
fn ribbed_drum_oscillates_around_base_radius() {
    let mesh = generate_shell(&ribbed_drum()).unwrap();

    // Assembly keeps the revolution order: the outer bottom ring comes first
    let ring: Vec<f64> = mesh.vertices()[..64]
        .iter()
        .map(|p| p.x.hypot(p.y))
        .collect();
    let max = ring.iter().copied().fold(f64::MIN, f64::max);
    let min = ring.iter().copied().fold(f64::MAX, f64::min);
    assert_abs_diff_eq!(max, 8.4, epsilon = 1e-6);
    assert_abs_diff_eq!(min, 7.6, epsilon = 1e-6);
    assert!(mesh.vertices()[..64].iter().all(|p| p.z.abs() < 1e-12));
}

#[test]
fn every_solid_family_is_closed() {
    for index in 0..=u8::MAX {
        let Some(pattern) = PatternFamily::from_index(index) else {
            continue;
        };
        if pattern.group() == PatternGroup::Lattice {
            continue;
        }
        let params = ShellParams {
            pattern,
            angular_resolution: 36,
            height_resolution: 8,
            ..ShellParams::default()
        };
        let mesh = generate_shell(&params).unwrap();
        let report = analyze(&mesh);
        assert!(report.is_oriented_manifold(), "{}: {report:?}", pattern.name());
        assert_eq!(report.euler_characteristic(), 0, "{}", pattern.name());
    }
}

#[test]
fn every_lattice_family_builds() {
    for pattern in [
        PatternFamily::WireVertical,
        PatternFamily::WireTriangular,
        PatternFamily::WireHoneycomb,
        PatternFamily::WireDiamond,
        PatternFamily::WireStar,
        PatternFamily::WireWeave,
    ] {
        let params = ShellParams {
            pattern,
            rib_count: 12,
            vertical_count: 4,
            ..ShellParams::default()
        };
        let mesh = generate_shell(&params).unwrap();
        assert!(mesh.triangle_count() > 0, "{}", pattern.name());
        assert!(analyze(&mesh).is_watertight(), "{}", pattern.name());
    }
}

#[test]
fn lattice_rejects_wall_accessories() {
    let params = ShellParams {
        pattern: PatternFamily::WireHoneycomb,
        rim: RimSpec {
            placement: RimPlacement::Top,
            ..RimSpec::default()
        },
        ..ShellParams::default()
    };
    let err = generate_shell(&params).unwrap_err();
    assert!(matches!(err, KernelError::UnsupportedFamilyCombination { .. }));
}

#[test]
fn top_rim_fitter_serves_lattice_shells() {
    let params = ShellParams {
        pattern: PatternFamily::WireVertical,
        rib_count: 12,
        vertical_count: 3,
        fitter: FitterSpec {
            kind: FitterKind::TopRim,
            ..FitterSpec::default()
        },
        ..ShellParams::default()
    };
    let mesh = generate_shell(&params).unwrap();
    let (_, max) = mesh.bounding_box();
    assert!(max.z <= params.height + params.strut_radius + 1e-9);
}

#[test]
fn narrow_shell_rejects_wide_fitter() {
    let params = ShellParams {
        top_radius: 10.0,
        bottom_radius: 10.0,
        fitter: FitterSpec {
            kind: FitterKind::Spider,
            inner_diameter: 16.0,
            outer_diameter: 30.0,
            spoke_width: 3.0,
            ..FitterSpec::default()
        },
        ..ShellParams::default()
    };
    let err = generate_shell(&params).unwrap_err();
    assert_eq!(err.parameter(), Some("fitter.outer_diameter"));
}

#[test]
fn rect_lithophane_is_watertight() {
    let levels: Vec<u8> = (0..64u32).map(|i| (i * 4) as u8).collect();
    let image = LuminanceGrid::from_gray(8, 8, &levels).unwrap();
    let params = LithophaneParams {
        physical_width: 50.0,
        physical_height: 50.0,
        sampling_resolution: 30,
        ..LithophaneParams::default()
    };
    let mesh = generate_lithophane(&image, &params).unwrap();

    assert_eq!(mesh.vertex_count(), 2 * 30 * 30);
    let report = analyze(&mesh);
    assert!(report.is_watertight());
    assert_eq!(report.euler_characteristic(), 2);
}

#[test]
fn circle_lithophane_with_hole_has_inner_wall() {
    let image = LuminanceGrid::from_gray(2, 2, &[30, 90, 160, 220]).unwrap();
    let params = LithophaneParams {
        outline: OutlineShape::Circle,
        physical_width: 80.0,
        physical_height: 80.0,
        sampling_resolution: 80,
        hole: HoleSpec {
            enabled: true,
            ..HoleSpec::default()
        },
        ..LithophaneParams::default()
    };
    let mesh = generate_lithophane(&image, &params).unwrap();
    let report = analyze(&mesh);
    assert!(report.is_watertight(), "{report:?}");
    // The hole turns the panel into a solid ring
    assert_eq!(report.euler_characteristic(), 0);
}

#[test]
fn exports_match_mesh() {
    let params = ShellParams {
        angular_resolution: 24,
        height_resolution: 4,
        ..ShellParams::default()
    };
    let mesh = generate_shell(&params).unwrap();

    let buffers = MeshBuffers::from(&mesh);
    assert_eq!(buffers.vertex_count(), mesh.vertex_count());
    assert_eq!(buffers.triangle_count(), mesh.triangle_count());
    assert_eq!(
        buffers.normals.as_ref().map(Vec::len),
        Some(3 * mesh.vertex_count())
    );

    let mut bytes = Vec::new();
    write_stl_binary(&mesh, &mut bytes).unwrap();
    assert_eq!(bytes.len(), 84 + 50 * mesh.triangle_count());

    let text = to_stl_ascii(&mesh, "shade");
    assert_eq!(text.matches("endfacet").count(), mesh.triangle_count());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn generated_shells_are_manifold(
        silhouette in 0u8..30,
        pattern in 1u8..47,
        seed in any::<u32>(),
        depth in 0.0f64..4.0,
    ) {
        let Some(silhouette) = SilhouetteFamily::from_index(silhouette) else {
            return Ok(());
        };
        let Some(pattern) = PatternFamily::from_index(pattern) else {
            return Ok(());
        };
        prop_assume!(!pattern.is_lattice());
        let params = ShellParams {
            pattern,
            silhouette,
            seed,
            rib_depth: depth,
            angular_resolution: 24,
            height_resolution: 6,
            ..ShellParams::default()
        };
        let mesh = generate_shell(&params).unwrap();
        let report = analyze(&mesh);
        prop_assert!(report.is_oriented_manifold());
        prop_assert_eq!(report.euler_characteristic(), 0);
    }
}
