//! # Mesh Assembly
//!
//! Merges independently generated sub-meshes into one output mesh.
//!
//! ## Pipeline
//!
//! 1. Concatenate parts with index renumbering (empty parts contribute
//!    nothing)
//! 2. Check every index against the vertex buffer
//! 3. Weld vertices closer than `weld_epsilon`
//! 4. Drop triangles that collapsed and compact unused vertices
//! 5. Compute vertex normals


use crate::error::{KernelError, KernelResult};
use crate::mesh::Mesh;
use crate::settings::KernelConfig;
use config::constants::{MAX_TRIANGLES, MAX_VERTICES};
use glam::DVec3;
use hashbrown::HashMap;
use tracing::{debug, info};

/// Concatenates, welds and finalizes `parts`.
///
/// # Errors
///
/// `MeshAssembly` when a part references a vertex it does not own or the
/// merged mesh exceeds the buffer limits.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use lamp_kernel::assembly::assemble;
/// use lamp_kernel::settings::KernelConfig;
/// use lamp_kernel::Mesh;
///
/// let mut a = Mesh::new();
/// a.add_vertex(DVec3::ZERO);
/// a.add_vertex(DVec3::X);
/// a.add_vertex(DVec3::Y);
/// a.add_triangle(0, 1, 2);
///
/// let mut b = Mesh::new();
/// b.add_vertex(DVec3::X);
/// b.add_vertex(DVec3::new(1.0, 1.0, 0.0));
/// b.add_vertex(DVec3::Y);
/// b.add_triangle(0, 1, 2);
///
/// let mesh = assemble(vec![a, Mesh::new(), b], &KernelConfig::default()).unwrap();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert!(mesh.normals().is_some());
/// ```
pub fn assemble(parts: Vec<Mesh>, config: &KernelConfig) -> KernelResult<Mesh> {
    let part_count = parts.len();
    let mut mesh = Mesh::with_capacity(
        parts.iter().map(Mesh::vertex_count).sum(),
        parts.iter().map(Mesh::triangle_count).sum(),
    );

    for (index, part) in parts.iter().enumerate() {
        if let Err(err) = part.check_indices() {
            return Err(KernelError::assembly(format!("part {index}: {err}")));
        }
        mesh.merge(part);
    }

    if mesh.vertex_count() > MAX_VERTICES || mesh.triangle_count() > MAX_TRIANGLES {
        return Err(KernelError::assembly(format!(
            "{} vertices / {} triangles exceed the buffer limits",
            mesh.vertex_count(),
            mesh.triangle_count()
        )));
    }

    let welded = weld_vertices(&mut mesh, config.weld_epsilon);
    let removed = remove_unreferenced_vertices(&mut mesh);
    mesh.compute_normals();

    info!(
        parts = part_count,
        welded,
        removed,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Assembled mesh"
    );
    Ok(mesh)
}

/// Merges vertices within `epsilon` of each other.
///
/// Uses a spatial hash with `2 × epsilon` cells and searches the 3×3×3
/// neighbourhood. Every cluster collapses onto its smallest index;
/// triangles that lose a corner are removed. Returns the number of merged
/// vertices.
pub fn weld_vertices(mesh: &mut Mesh, epsilon: f64) -> usize {
    if mesh.is_empty() || epsilon.is_nan() || epsilon <= 0.0 {
        return 0;
    }

    let cell_size = epsilon * 2.0;
    let cell_of = |p: DVec3| {
        (
            (p.x / cell_size).floor() as i64,
            (p.y / cell_size).floor() as i64,
            (p.z / cell_size).floor() as i64,
        )
    };

    let vertices = mesh.vertices();
    let mut cells: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    for (index, p) in vertices.iter().enumerate() {
        cells.entry(cell_of(*p)).or_default().push(index as u32);
    }

    let mut remap: Vec<u32> = (0..vertices.len() as u32).collect();
    let mut merged = 0;

    for (index, p) in vertices.iter().enumerate() {
        let index = index as u32;
        if remap[index as usize] != index {
            continue;
        }
        let (cx, cy, cz) = cell_of(*p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &other in candidates {
                        if other <= index || remap[other as usize] != other {
                            continue;
                        }
                        if p.distance(vertices[other as usize]) < epsilon {
                            remap[other as usize] = index;
                            merged += 1;
                        }
                    }
                }
            }
        }
    }

    if merged == 0 {
        return 0;
    }

    // Resolve chains so every vertex points at its cluster root
    for i in 0..remap.len() {
        let mut target = remap[i];
        while remap[target as usize] != target {
            target = remap[target as usize];
        }
        remap[i] = target;
    }

    let (vertices, triangles) = std::mem::take(mesh).into_parts();
    let before = triangles.len();
    let triangles: Vec<[u32; 3]> = triangles
        .into_iter()
        .map(|[a, b, c]| [remap[a as usize], remap[b as usize], remap[c as usize]])
        .filter(|[a, b, c]| a != b && b != c && a != c)
        .collect();

    debug!(
        merged,
        epsilon,
        collapsed = before - triangles.len(),
        "Welded vertices"
    );
    *mesh = Mesh::from_parts(vertices, triangles);
    merged
}

/// Drops vertices no triangle references. Returns the number removed.
pub fn remove_unreferenced_vertices(mesh: &mut Mesh) -> usize {
    let mut remap = vec![u32::MAX; mesh.vertex_count()];
    for tri in mesh.triangles() {
        for &i in tri {
            remap[i as usize] = 0;
        }
    }

    let (vertices, triangles) = std::mem::take(mesh).into_parts();
    let original = vertices.len();
    let mut kept = Vec::with_capacity(original);
    for (old, p) in vertices.into_iter().enumerate() {
        if remap[old] != u32::MAX {
            remap[old] = kept.len() as u32;
            kept.push(p);
        }
    }

    let triangles = triangles
        .into_iter()
        .map(|[a, b, c]| [remap[a as usize], remap[b as usize], remap[c as usize]])
        .collect();

    let removed = original - kept.len();
    *mesh = Mesh::from_parts(kept, triangles);
    removed
}
