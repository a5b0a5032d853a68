//! # Topology Analysis
//!
//! Edge-use statistics of a triangle mesh: boundary edges, non-manifold
//! edges, orientation consistency and the Euler characteristic.

use crate::mesh::Mesh;
use hashbrown::HashMap;

/// Edge adjacency summary of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopologyReport {
    /// Vertices referenced by at least one triangle.
    pub vertices: usize,
    /// Distinct undirected edges.
    pub edges: usize,
    /// Triangles.
    pub faces: usize,
    /// Edges used by exactly one triangle.
    pub boundary_edges: usize,
    /// Edges used by more than two triangles.
    pub non_manifold_edges: usize,
    /// Two-triangle edges traversed in the same direction by both.
    pub inconsistent_edges: usize,
}

impl TopologyReport {
    /// Every edge is shared by exactly two triangles.
    pub fn is_watertight(&self) -> bool {
        self.faces > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }

    /// Watertight and every shared edge is traversed in opposite directions.
    pub fn is_oriented_manifold(&self) -> bool {
        self.is_watertight() && self.inconsistent_edges == 0
    }

    /// `V - E + F`.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.faces as i64
    }
}

#[derive(Default)]
struct EdgeUse {
    forward: u32,
    backward: u32,
}

/// Builds the edge adjacency report of `mesh`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use lamp_kernel::{topology, Mesh};
///
/// let mut mesh = Mesh::new();
/// for p in [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z] {
///     mesh.add_vertex(p);
/// }
/// mesh.add_triangle(0, 2, 1);
/// mesh.add_triangle(0, 1, 3);
/// mesh.add_triangle(1, 2, 3);
/// mesh.add_triangle(2, 0, 3);
///
/// let report = topology::analyze(&mesh);
/// assert!(report.is_oriented_manifold());
/// assert_eq!(report.euler_characteristic(), 2);
/// ```
pub fn analyze(mesh: &Mesh) -> TopologyReport {
    let mut edges: HashMap<(u32, u32), EdgeUse> =
        HashMap::with_capacity(mesh.triangle_count() * 3 / 2);
    let mut referenced = vec![false; mesh.vertex_count()];

    for tri in mesh.triangles() {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            if let Some(seen) = referenced.get_mut(a as usize) {
                *seen = true;
            }
            let entry = edges.entry((a.min(b), a.max(b))).or_default();
            if a < b {
                entry.forward += 1;
            } else {
                entry.backward += 1;
            }
        }
    }

    let mut report = TopologyReport {
        vertices: referenced.iter().filter(|&&r| r).count(),
        edges: edges.len(),
        faces: mesh.triangle_count(),
        ..TopologyReport::default()
    };

    for usage in edges.values() {
        match usage.forward + usage.backward {
            1 => report.boundary_edges += 1,
            2 => {
                if usage.forward != 1 {
                    report.inconsistent_edges += 1;
                }
            }
            _ => report.non_manifold_edges += 1,
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn quad() -> Mesh {
        let mut mesh = Mesh::new();
        for p in [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y] {
            mesh.add_vertex(p);
        }
        mesh.add_quad(0, 1, 2, 3);
        mesh
    }

    #[test]
    fn test_open_quad_has_boundary() {
        let report = analyze(&quad());
        assert_eq!(report.faces, 2);
        assert_eq!(report.edges, 5);
        assert_eq!(report.boundary_edges, 4);
        assert!(!report.is_watertight());
        assert_eq!(report.euler_characteristic(), 1);
    }

    #[test]
    fn test_flipped_triangle_is_inconsistent() {
        let mut mesh = Mesh::new();
        for p in quad().vertices() {
            mesh.add_vertex(*p);
        }
        // Both triangles walk the diagonal 2 -> 0
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(2, 0, 3);
        let report = analyze(&mesh);
        assert_eq!(report.boundary_edges, 4);
        assert_eq!(report.non_manifold_edges, 0);
        assert_eq!(report.inconsistent_edges, 1);
    }

    #[test]
    fn test_empty_mesh_is_not_watertight() {
        let report = analyze(&Mesh::new());
        assert_eq!(report, TopologyReport::default());
        assert!(!report.is_watertight());
    }
}
