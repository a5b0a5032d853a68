//! Shared helpers for unit tests.

use crate::mesh::Mesh;
use glam::DVec3;

/// Points spread over every triangle whose three corners pass `keep`.
///
/// Each kept triangle contributes its barycentric grid of `steps`
/// subdivisions, corners and edges included.
pub(crate) fn face_samples(mesh: &Mesh, keep: impl Fn(u32) -> bool, steps: u32) -> Vec<DVec3> {
    let steps = steps.max(1);
    let mut points = Vec::new();
    for &[a, b, c] in mesh.triangles() {
        if !(keep(a) && keep(b) && keep(c)) {
            continue;
        }
        let (pa, pb, pc) = (mesh.vertex(a), mesh.vertex(b), mesh.vertex(c));
        for i in 0..=steps {
            for j in 0..=steps - i {
                let u = f64::from(i) / f64::from(steps);
                let v = f64::from(j) / f64::from(steps);
                points.push(pa * (1.0 - u - v) + pb * u + pc * v);
            }
        }
    }
    points
}
