//! # Accessories
//!
//! Internal ribs and reinforcing rims. Both are closed solids whose outer
//! faces take the fused radius, the same clamp the fitter spokes use.


use crate::mesh::Mesh;
use crate::params::RimSpec;
use crate::primitives::loft;
use crate::revolution::revolve_band;
use crate::surface::{polar, ShellSurface};
use glam::DVec3;
use std::f64::consts::TAU;
use tracing::debug;

/// Builds `count` vertical fins on the inner wall, `depth` deep.
///
/// Fins are `2 × wall_thickness` wide and span the full height in `rows`
/// steps. Both outer corners of a section take the smallest fused radius
/// under the fin face in the bands above and below it, so the face between
/// them never crosses a rib valley of the wall.
pub fn build_internal_ribs(surface: &ShellSurface, count: u32, depth: f64, rows: u32) -> Mesh {
    let mut mesh = Mesh::new();
    if count == 0 || depth <= 0.0 {
        return mesh;
    }

    let rows = rows.max(1);
    let half_width = surface.wall_thickness();
    let floor = surface.config().inner_floor;

    let heights: Vec<f64> = (0..=rows)
        .map(|j| surface.height() * f64::from(j) / f64::from(rows))
        .collect();

    for k in 0..count {
        let theta = TAU * f64::from(k) / f64::from(count);
        let (sin, cos) = theta.sin_cos();
        let radial = DVec3::new(cos, sin, 0.0);
        let side = DVec3::new(-sin, cos, 0.0);

        let nominal = surface.fused_radius(theta, 0.0);
        let span = (
            theta - half_width.atan2(nominal),
            theta + half_width.atan2(nominal),
        );
        let bands: Vec<f64> = heights
            .windows(2)
            .map(|pair| surface.min_fused_radius(span, (pair[0], pair[1])))
            .collect();

        let last = bands.len() - 1;
        let sections: Vec<[DVec3; 4]> = heights
            .iter()
            .enumerate()
            .map(|(j, &z)| {
                let reach = (surface.inner_radius(theta, z) - depth).max(floor);
                let fused = bands[j.saturating_sub(1)].min(bands[j.min(last)]);
                let near = |lateral: f64| radial * reach + side * lateral + DVec3::new(0.0, 0.0, z);
                [
                    near(-half_width),
                    polar(span.0, z, fused),
                    polar(span.1, z, fused),
                    near(half_width),
                ]
            })
            .collect();
        mesh.merge(&loft(&sections));
    }

    debug!(ribs = count, depth, "Built internal ribs");
    mesh
}

/// Builds the top and/or bottom rims of `rim`.
///
/// A rim is a band `thickness` deep inside the inner wall and `height`
/// tall, fused outward into the wall.
pub fn build_rims(surface: &ShellSurface, rim: &RimSpec, angular: u32, height_steps: u32) -> Mesh {
    let mut mesh = Mesh::new();
    let height = surface.height();
    let rows = ((rim.height / height) * f64::from(height_steps)).ceil().max(1.0) as u32;
    let floor = surface.config().inner_floor;

    let band = |z_bottom: f64, z_top: f64| {
        revolve_band(angular, rows, z_bottom, z_top, |angle, z| {
            let inner = (surface.inner_radius(angle, z) - rim.thickness).max(floor);
            (surface.fused_radius(angle, z), inner)
        })
    };

    if rim.placement.has_bottom() {
        mesh.merge(&band(0.0, rim.height.min(height)));
    }
    if rim.placement.has_top() {
        mesh.merge(&band((height - rim.height).max(0.0), height));
    }

    if !mesh.is_empty() {
        debug!(placement = ?rim.placement, rows, "Built rims");
    }
    mesh
}
