//! # Primitives
//!
//! Closed solids shared by the attachment builders.

use crate::mesh::Mesh;
use glam::DVec3;

/// Lofts a closed solid through quadrilateral cross-sections.
///
/// Sections run bottom to top; each lists its corners counter-clockwise
/// seen from `+z`. Returns an empty mesh for fewer than two sections.
pub fn loft(sections: &[[DVec3; 4]]) -> Mesh {
    if sections.len() < 2 {
        return Mesh::new();
    }

    let mut mesh = Mesh::with_capacity(4 * sections.len(), 8 * sections.len() + 4);
    for section in sections {
        for corner in section {
            mesh.add_vertex(*corner);
        }
    }

    let at = |row: usize, k: usize| (4 * row + k % 4) as u32;
    for row in 0..sections.len() - 1 {
        for k in 0..4 {
            mesh.add_quad(at(row, k), at(row, k + 1), at(row + 1, k + 1), at(row + 1, k));
        }
    }

    let top = sections.len() - 1;
    mesh.add_quad(at(0, 0), at(0, 3), at(0, 2), at(0, 1));
    mesh.add_quad(at(top, 0), at(top, 1), at(top, 2), at(top, 3));
    mesh
}
