//! Boundary-aware heightfield mesher.

use super::{LithophaneParams, LuminanceGrid, OutlineShape};
use crate::error::KernelResult;
use crate::mesh::Mesh;
use glam::DVec3;
use std::f64::consts::TAU;
use tracing::info;

/// Per-sample state on the panel grid.
#[derive(Debug, Clone, Copy)]
struct Sample {
    position: (f64, f64),
    height: f64,
    valid: bool,
}

/// Builds a two-sided relief panel from `image`.
///
/// Every grid sample owns a front vertex at its relief height and a back
/// vertex at `z = 0`; invalid samples stay in the buffer but no triangle
/// references them. The result is closed along the outline and around the
/// hanging hole.
///
/// # Errors
///
/// `InvalidParameter` when `params` fails validation.
///
/// # Example
///
/// ```rust
/// use lamp_kernel::lithophane::{generate_lithophane, LithophaneParams, LuminanceGrid};
///
/// let image = LuminanceGrid::from_gray(2, 2, &[0, 255, 255, 0]).unwrap();
/// let params = LithophaneParams {
///     physical_width: 20.0,
///     physical_height: 20.0,
///     sampling_resolution: 8,
///     ..LithophaneParams::default()
/// };
/// let mesh = generate_lithophane(&image, &params).unwrap();
/// assert_eq!(mesh.vertex_count(), 2 * 8 * 8);
/// ```
pub fn generate_lithophane(image: &LuminanceGrid, params: &LithophaneParams) -> KernelResult<Mesh> {
    params.validate()?;

    let (gx, gy) = params.grid_size();
    let (gx, gy) = (gx as usize, gy as usize);
    let samples = sample_grid(image, params, gx, gy);

    let mut mesh = Mesh::with_capacity(2 * gx * gy, 4 * gx * gy);
    let projection = Projection::new(params);
    for sample in &samples {
        let (px, py) = sample.position;
        mesh.add_vertex(projection.apply(px, py, sample.height));
    }
    for sample in &samples {
        let (px, py) = sample.position;
        mesh.add_vertex(projection.apply(px, py, 0.0));
    }

    let front = |ix: usize, iy: usize| (iy * gx + ix) as u32;
    let back = |ix: usize, iy: usize| (gx * gy + iy * gx + ix) as u32;
    let cell_valid = |cx: isize, cy: isize| {
        if cx < 0 || cy < 0 || cx as usize + 1 >= gx || cy as usize + 1 >= gy {
            return false;
        }
        let (cx, cy) = (cx as usize, cy as usize);
        [(cx, cy), (cx + 1, cy), (cx + 1, cy + 1), (cx, cy + 1)]
            .iter()
            .all(|&(x, y)| samples[y * gx + x].valid)
    };

    let mut cells = 0usize;
    let mut walls = 0usize;
    for cy in 0..gy - 1 {
        for cx in 0..gx - 1 {
            let (sx, sy) = (cx as isize, cy as isize);
            if !cell_valid(sx, sy) {
                continue;
            }
            cells += 1;

            // Counter-clockwise seen from the front
            let corners = [(cx, cy), (cx + 1, cy), (cx + 1, cy + 1), (cx, cy + 1)];
            let [a, b, c, d] = corners;
            mesh.add_quad(front(a.0, a.1), front(b.0, b.1), front(c.0, c.1), front(d.0, d.1));
            mesh.add_quad(back(a.0, a.1), back(d.0, d.1), back(c.0, c.1), back(b.0, b.1));

            // Neighbour across each edge: below, right, above, left
            let neighbours = [(sx, sy - 1), (sx + 1, sy), (sx, sy + 1), (sx - 1, sy)];
            for (edge, &(nx, ny)) in neighbours.iter().enumerate() {
                if cell_valid(nx, ny) {
                    continue;
                }
                let u = corners[edge];
                let v = corners[(edge + 1) % 4];
                let (fu, fv) = (front(u.0, u.1), front(v.0, v.1));
                let (bu, bv) = (back(u.0, u.1), back(v.0, v.1));
                mesh.add_triangle(fv, fu, bu);
                mesh.add_triangle(fv, bu, bv);
                walls += 1;
            }
        }
    }

    mesh.compute_normals();
    info!(
        grid_x = gx,
        grid_y = gy,
        cells,
        walls,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Generated lithophane"
    );
    Ok(mesh)
}

/// Evaluates height and validity for every sample, row-major from the
/// bottom edge.
fn sample_grid(
    image: &LuminanceGrid,
    params: &LithophaneParams,
    gx: usize,
    gy: usize,
) -> Vec<Sample> {
    let (width, height) = (params.physical_width, params.physical_height);
    let plane = image.plane(params.smoothing_radius);
    let (iw, ih) = (f64::from(image.width() - 1), f64::from(image.height() - 1));
    let full = params.base_thickness + params.max_relief;

    let hole_center = (0.5 * width, height - params.hole.offset_from_top);
    let hole_radius = 0.5 * params.hole.diameter;

    let mut samples = Vec::with_capacity(gx * gy);
    for iy in 0..gy {
        let fy = iy as f64 / (gy - 1) as f64;
        for ix in 0..gx {
            let fx = ix as f64 / (gx - 1) as f64;
            let (px, py) = (fx * width, fy * height);

            let luminance = plane.sample(fx * iw, (1.0 - fy) * ih);
            let mut relief = params.relief(luminance);

            let edge = params.outline.edge_distance(px, py, width, height);
            let inside = edge >= 0.0;
            if params.border.enabled && inside && edge < params.border.width {
                relief = full;
            }

            let mut excluded = false;
            if params.hole.enabled {
                let distance = (px - hole_center.0).hypot(py - hole_center.1);
                if distance < hole_radius {
                    excluded = true;
                } else if distance <= hole_radius + params.hole.ring_width {
                    relief = full;
                }
            }

            samples.push(Sample {
                position: (px, py),
                height: relief,
                valid: inside && !excluded,
            });
        }
    }
    samples
}

/// Maps panel coordinates `(x, y, thickness)` to model space.
#[derive(Debug, Clone, Copy)]
enum Projection {
    Flat,
    /// Bend around the vertical axis with the panel center at angle zero.
    Arc { radius: f64, center: f64 },
}

impl Projection {
    fn new(params: &LithophaneParams) -> Self {
        if !params.outline.is_wrapped() {
            return Self::Flat;
        }
        let sweep = match params.outline {
            OutlineShape::Cylindrical => TAU,
            _ => params.curve_angle_degrees.to_radians(),
        };
        let width = params.physical_width;
        Self::Arc {
            radius: width / sweep,
            center: 0.5 * width,
        }
    }

    fn apply(self, px: f64, py: f64, thickness: f64) -> DVec3 {
        match self {
            Self::Flat => DVec3::new(px, py, thickness),
            Self::Arc { radius, center } => {
                let phi = (px - center) / radius;
                let r = radius + thickness;
                DVec3::new(r * phi.sin(), py, r * phi.cos() - radius)
            }
        }
    }
}
