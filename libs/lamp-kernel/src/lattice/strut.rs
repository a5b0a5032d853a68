//! Capped prism struts between two points.

use crate::mesh::Mesh;
use glam::DVec3;
use std::f64::consts::TAU;

/// Generates a closed prism of `segments` sides from `start` to `end`.
///
/// Returns `None` when the strut has zero length.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use lamp_kernel::lattice::strut::generate_strut;
///
/// let strut = generate_strut(DVec3::ZERO, DVec3::new(0.0, 0.0, 10.0), 0.5, 8).unwrap();
/// assert_eq!(strut.vertex_count(), 2 + 2 * 8);
/// assert_eq!(strut.triangle_count(), 4 * 8);
/// assert!(generate_strut(DVec3::ONE, DVec3::ONE, 0.5, 8).is_none());
/// ```
pub fn generate_strut(start: DVec3, end: DVec3, radius: f64, segments: u32) -> Option<Mesh> {
    generate_strut_rotated(start, end, radius, segments, 0.0)
}

/// [`generate_strut`] with the side ring turned by `phase` radians around
/// the axis.
///
/// Collinear struts that meet end to start must use different phases,
/// otherwise their rings coincide and welding joins four faces on one edge.
pub fn generate_strut_rotated(
    start: DVec3,
    end: DVec3,
    radius: f64,
    segments: u32,
    phase: f64,
) -> Option<Mesh> {
    let axis = end - start;
    let length = axis.length();
    if length < f64::EPSILON {
        return None;
    }
    let axis = axis / length;
    let (u, v) = perpendicular_basis(axis);
    let segments = segments.max(3);

    let mut mesh = Mesh::with_capacity(2 + 2 * segments as usize, 4 * segments as usize);
    let start_center = mesh.add_vertex(start);
    let end_center = mesh.add_vertex(end);

    for i in 0..segments {
        let angle = phase + TAU * f64::from(i) / f64::from(segments);
        let offset = (u * angle.cos() + v * angle.sin()) * radius;
        mesh.add_vertex(start + offset);
        mesh.add_vertex(end + offset);
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        let s0 = 2 + 2 * i;
        let e0 = s0 + 1;
        let s1 = 2 + 2 * next;
        let e1 = s1 + 1;

        mesh.add_quad(s0, s1, e1, e0);
        mesh.add_triangle(start_center, s1, s0);
        mesh.add_triangle(end_center, e0, e1);
    }

    Some(mesh)
}

/// Two unit vectors completing a right-handed basis `(u, v, axis)`.
fn perpendicular_basis(axis: DVec3) -> (DVec3, DVec3) {
    let up = if axis.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
    let u = axis.cross(up).normalize();
    let v = axis.cross(u);
    (u, v)
}

/// Concatenates independent strut solids into one mesh.
pub fn combine_struts(struts: impl IntoIterator<Item = Mesh>) -> Mesh {
    let mut combined = Mesh::new();
    for strut in struts {
        combined.merge(&strut);
    }
    combined
}
