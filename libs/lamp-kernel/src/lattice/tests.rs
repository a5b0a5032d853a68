//! Tests for the lattice builder.

use super::*;
use crate::params::ShellParams;
use crate::settings::KernelConfig;
use crate::topology::analyze;
use approx::assert_abs_diff_eq;

fn lattice_surface(pattern: PatternFamily) -> ShellSurface {
    let params = ShellParams {
        pattern,
        height: 40.0,
        top_radius: 15.0,
        bottom_radius: 20.0,
        wall_thickness: 1.0,
        rib_count: 12,
        vertical_count: 4,
        ..ShellParams::default()
    };
    ShellSurface::new(&params, &KernelConfig::default())
}

const ALL: [Connectivity; 6] = [
    Connectivity::Vertical,
    Connectivity::Triangular,
    Connectivity::Honeycomb,
    Connectivity::Diamond,
    Connectivity::Star,
    Connectivity::Weave,
];

#[test]
fn test_anchor_grid_size_and_placement() {
    let surface = lattice_surface(PatternFamily::WireVertical);
    let grid = AnchorGrid::build(&surface, Connectivity::Vertical, 12, 4);
    assert_eq!(grid.len(), 13 * 5);

    let p = grid.point(GridIndex::new(3, 2));
    let angle = TAU * 3.0 / 12.0;
    assert_abs_diff_eq!(p.x.hypot(p.y), surface.outer_radius(angle, 20.0), epsilon = 1e-9);
    assert_abs_diff_eq!(p.z, 20.0);

    // Seam column repeats column 0
    let first = grid.point(GridIndex::new(0, 1));
    let seam = grid.point(GridIndex::new(12, 1));
    assert!((first - seam).length() < 1e-9);
}

#[test]
fn test_staggered_layers_are_offset() {
    let surface = lattice_surface(PatternFamily::WireHoneycomb);
    let grid = AnchorGrid::build(&surface, Connectivity::Honeycomb, 12, 4);
    let p = grid.point(GridIndex::new(0, 1));
    assert_abs_diff_eq!(p.y.atan2(p.x), TAU * 0.5 / 12.0, epsilon = 1e-9);
}

#[test]
fn test_every_family_has_frame_rings() {
    for connectivity in ALL {
        let edges = connectivity.edges(8, 3);
        for layer in [0, 3] {
            let ring = edges
                .iter()
                .filter(|(a, b)| a.layer == layer && b.layer == layer)
                .count();
            assert_eq!(ring, 8, "{connectivity:?} layer {layer}");
        }
    }
}

#[test]
fn test_edges_stay_inside_grid_and_are_unique() {
    for connectivity in ALL {
        let edges = connectivity.edges(10, 5);
        let mut seen = hashbrown::HashSet::new();
        for (a, b) in &edges {
            assert!(a.column <= 10 && b.column <= 10);
            assert!(a.layer <= 5 && b.layer <= 5);
            assert!(seen.insert((*a, *b)), "{connectivity:?} repeats {a:?}-{b:?}");
        }
    }
}

#[test]
fn test_diamond_and_star_counts() {
    let rings = 2 * 6;
    assert_eq!(Connectivity::Diamond.edges(6, 2).len(), rings + 2 * 6 * 2);
    // Star adds a post and a middle ring to the diamond
    assert_eq!(Connectivity::Star.edges(6, 2).len(), 3 * 6 + 3 * 6 * 2);
}

#[test]
fn test_pattern_mapping() {
    assert_eq!(
        Connectivity::from_pattern(PatternFamily::WireStar),
        Some(Connectivity::Star)
    );
    assert_eq!(Connectivity::from_pattern(PatternFamily::RibbedDrum), None);
}

#[test]
fn test_lattice_is_union_of_closed_struts() {
    let surface = lattice_surface(PatternFamily::WireTriangular);
    let mesh = build_lattice(&surface, Connectivity::Triangular, 12, 4, 0.8, 6);

    let struts = Connectivity::Triangular.edges(12, 4).len();
    let hubs = 12 * 5;
    let solids = struts + hubs;
    assert_eq!(mesh.vertex_count(), solids * (2 + 2 * 6));
    assert_eq!(mesh.triangle_count(), solids * 4 * 6);

    let report = analyze(&mesh);
    assert!(report.is_oriented_manifold());
    assert_eq!(report.euler_characteristic(), 2 * solids as i64);
}

#[test]
fn test_strut_normals_point_outward() {
    let mut strut = strut::generate_strut(DVec3::ZERO, DVec3::new(0.0, 0.0, 4.0), 1.0, 8).unwrap();
    strut.compute_normals();
    let normals = strut.normals().unwrap();
    for (p, n) in strut.vertices().iter().zip(normals).skip(2) {
        assert!(p.x * n.x + p.y * n.y > 0.0);
    }
    assert!(analyze(&strut).is_oriented_manifold());
}

#[test]
fn test_stacked_posts_survive_welding() {
    let surface = lattice_surface(PatternFamily::WireVertical);
    let mesh = build_lattice(&surface, Connectivity::Vertical, 12, 4, 0.8, 6);
    let mesh = crate::assembly::assemble(vec![mesh], &KernelConfig::default()).unwrap();

    let report = analyze(&mesh);
    assert!(report.is_watertight(), "{report:?}");
    assert_eq!(report.inconsistent_edges, 0);
}

#[test]
fn test_rotated_strut_turns_ring() {
    let end = DVec3::new(0.0, 0.0, 4.0);
    let plain = strut::generate_strut(DVec3::ZERO, end, 1.0, 4).unwrap();
    let turned = strut::generate_strut_rotated(DVec3::ZERO, end, 1.0, 4, PI / 4.0).unwrap();
    let chord = plain.vertex(2).distance(turned.vertex(2));
    assert_abs_diff_eq!(chord, 2.0 * (PI / 8.0).sin(), epsilon = 1e-12);
    assert_abs_diff_eq!(turned.vertex(2).z, 0.0);
}
