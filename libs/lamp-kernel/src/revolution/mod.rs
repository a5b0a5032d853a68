//! # Revolution Builder
//!
//! Lathes an outer and an inner wall profile around the `+z` axis and closes
//! them with annular caps, giving a closed double-wall solid.
//!
//! ## Layout
//!
//! For `N` angular samples and `H` height steps the band owns two grids of
//! `N × (H + 1)` vertices (outer first, then inner). The angular direction
//! wraps, so no seam column is duplicated.
//!
//! - `V = 2N(H + 1)`
//! - `F = 4N(H + 1)`
//! - Euler characteristic `0` (a genus-1 solid)

use crate::mesh::Mesh;
use crate::surface::{polar, ShellSurface};
use std::f64::consts::TAU;
use tracing::debug;

/// Builds the closed double-wall shell of `surface`.
///
/// # Example
///
/// ```rust
/// use lamp_kernel::params::ShellParams;
/// use lamp_kernel::revolution::build_shell;
/// use lamp_kernel::settings::KernelConfig;
/// use lamp_kernel::surface::ShellSurface;
///
/// let surface = ShellSurface::new(&ShellParams::default(), &KernelConfig::default());
/// let mesh = build_shell(&surface, 32, 10);
/// assert_eq!(mesh.vertex_count(), 2 * 32 * 11);
/// assert_eq!(mesh.triangle_count(), 4 * 32 * 11);
/// ```
pub fn build_shell(surface: &ShellSurface, angular: u32, height_steps: u32) -> Mesh {
    let mesh = revolve_band(angular, height_steps, 0.0, surface.height(), |angle, z| {
        surface.wall_radii(angle, z)
    });
    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Built revolution shell"
    );
    mesh
}

/// Lathes a closed band between `z_bottom` and `z_top`.
///
/// `radii(angle, z)` returns `(outer, inner)`; callers keep
/// `outer > inner > 0`.
pub fn revolve_band<F>(angular: u32, rows: u32, z_bottom: f64, z_top: f64, radii: F) -> Mesh
where
    F: Fn(f64, f64) -> (f64, f64),
{
    let n = angular.max(3);
    let h = rows.max(1);
    let ring = n as usize;
    let grid = ring * (h as usize + 1);

    let mut outer = Vec::with_capacity(grid);
    let mut inner = Vec::with_capacity(grid);
    for j in 0..=h {
        let z = z_bottom + (z_top - z_bottom) * f64::from(j) / f64::from(h);
        for i in 0..n {
            let angle = TAU * f64::from(i) / f64::from(n);
            let (r_out, r_in) = radii(angle, z);
            outer.push(polar(angle, z, r_out));
            inner.push(polar(angle, z, r_in));
        }
    }

    let mut mesh = Mesh::with_capacity(2 * grid, 4 * grid);
    for p in outer.into_iter().chain(inner) {
        mesh.add_vertex(p);
    }

    let o = |i: u32, j: u32| j * n + (i % n);
    let inn = |i: u32, j: u32| (h + 1) * n + j * n + (i % n);

    for j in 0..h {
        for i in 0..n {
            mesh.add_quad(o(i, j), o(i + 1, j), o(i + 1, j + 1), o(i, j + 1));
            mesh.add_quad(inn(i, j), inn(i, j + 1), inn(i + 1, j + 1), inn(i + 1, j));
        }
    }

    for i in 0..n {
        // Top faces +z, bottom faces -z
        mesh.add_quad(o(i, h), o(i + 1, h), inn(i + 1, h), inn(i, h));
        mesh.add_quad(o(i, 0), inn(i, 0), inn(i + 1, 0), o(i + 1, 0));
    }

    mesh
}
