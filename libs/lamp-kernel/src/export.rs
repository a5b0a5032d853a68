//! # Mesh Egress
//!
//! Flat buffers for renderers and STL triangle soup for slicers.

use crate::mesh::Mesh;
use glam::DVec3;
use serde::Serialize;
use std::io::{self, Write};

const STL_HEADER: &[u8] = b"lamp-kernel binary STL";
const STL_HEADER_SIZE: usize = 80;

/// Render-ready buffers: `xyz` triples, triangle indices and optional
/// per-vertex normals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeshBuffers {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub normals: Option<Vec<f32>>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl From<&Mesh> for MeshBuffers {
    fn from(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertices_f32(),
            indices: mesh.indices_u32(),
            normals: mesh.normals_f32(),
        }
    }
}

/// Unit facet normal, zero for degenerate triangles.
fn facet_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

fn facets(mesh: &Mesh) -> impl Iterator<Item = (DVec3, [DVec3; 3])> + '_ {
    mesh.triangles().iter().map(|&[i0, i1, i2]| {
        let (a, b, c) = (mesh.vertex(i0), mesh.vertex(i1), mesh.vertex(i2));
        (facet_normal(a, b, c), [a, b, c])
    })
}

/// Writes `mesh` as binary STL.
///
/// # Errors
///
/// Propagates writer failures.
pub fn write_stl_binary<W: Write>(mesh: &Mesh, mut writer: W) -> io::Result<()> {
    let mut header = [b' '; STL_HEADER_SIZE];
    header[..STL_HEADER.len()].copy_from_slice(STL_HEADER);
    writer.write_all(&header)?;

    let count = u32::try_from(mesh.triangle_count())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many triangles for STL"))?;
    writer.write_all(&count.to_le_bytes())?;

    for (normal, corners) in facets(mesh) {
        for p in std::iter::once(normal).chain(corners) {
            writer.write_all(&(p.x as f32).to_le_bytes())?;
            writer.write_all(&(p.y as f32).to_le_bytes())?;
            writer.write_all(&(p.z as f32).to_le_bytes())?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

/// Renders `mesh` as an ASCII STL solid called `name`.
pub fn to_stl_ascii(mesh: &Mesh, name: &str) -> String {
    let mut out = String::with_capacity(mesh.triangle_count() * 256);
    out.push_str(&format!("solid {name}\n"));
    for (n, corners) in facets(mesh) {
        out.push_str(&format!(
            "  facet normal {:.6e} {:.6e} {:.6e}\n",
            n.x, n.y, n.z
        ));
        out.push_str("    outer loop\n");
        for p in corners {
            out.push_str(&format!("      vertex {:.6e} {:.6e} {:.6e}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n  endfacet\n");
    }
    out.push_str(&format!("endsolid {name}\n"));
    out
}
