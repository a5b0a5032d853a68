//! # Fitter Attachment
//!
//! Socket ring plus spokes fused into the shell wall.
//!
//! A spoke end is split into columns no wider than
//! [`FUSION_COLUMN_PITCH`]. Each column edge takes the smallest fused radius
//! found under the two end cells it borders, so the whole end face, not
//! only its corners, stays inside the wall across ribs narrower than the
//! spoke.
//!
//! ```text
//!   outer wall ─────────────┐
//!   outer - safety_margin ──┤ spoke end never passes either bound
//!   inner + wall·fusion ────┤
//!   inner wall ─────────────┘
//! ```
//!
//! On wireframe shells the spokes land on the chords of the top frame ring
//! ([`FrameRing`]) instead.

#[cfg(test)]
mod tests;

use crate::error::{KernelError, KernelResult};
use crate::lattice::FrameRing;
use crate::mesh::Mesh;
use crate::params::{FitterKind, FitterSpec};
use crate::primitives::loft;
use crate::revolution::revolve_band;
use crate::surface::{polar, window_min, ShellSurface};
use config::constants::FUSION_COLUMN_PITCH;
use glam::DVec3;
use std::f64::consts::TAU;
use tracing::debug;

/// Corners of each spoke cross-section that touch the wall.
pub const SPOKE_FAR_CORNERS: [usize; 2] = [2, 3];

/// Surface the spoke ends are seated on.
#[derive(Debug, Clone, Copy)]
struct Seat<'a> {
    surface: &'a ShellSurface,
    frame: Option<&'a FrameRing>,
}

impl Seat<'_> {
    fn radius(&self, angle: f64, z: f64) -> f64 {
        match self.frame {
            Some(frame) => frame.chord_radius(angle),
            None => self.surface.fused_radius(angle, z),
        }
    }

    fn lowest(&self, angles: (f64, f64), heights: (f64, f64)) -> f64 {
        match self.frame {
            Some(frame) => window_min(|a, _| frame.chord_radius(a), angles, heights, frame.radius),
            None => self.surface.min_fused_radius(angles, heights),
        }
    }
}

/// Number of columns a spoke end is split into.
pub fn spoke_columns(spec: &FitterSpec) -> u32 {
    let columns = (spec.spoke_width / FUSION_COLUMN_PITCH).ceil();
    if columns.is_finite() && columns >= 1.0 {
        columns as u32
    } else {
        1
    }
}

/// Builds the ring and spokes of `spec`. `FitterKind::None` is empty.
///
/// Pass the top `frame` of a wireframe shell to seat the spokes on its
/// struts.
///
/// # Errors
///
/// `InvalidParameter("fitter.outer_diameter")` when the ring does not fit
/// inside the fused wall (or frame) at its height.
pub fn build_fitter(
    surface: &ShellSurface,
    spec: &FitterSpec,
    angular: u32,
    frame: Option<&FrameRing>,
) -> KernelResult<Mesh> {
    if spec.kind == FitterKind::None {
        return Ok(Mesh::new());
    }
    let seat = Seat { surface, frame };

    let ring_inner = 0.5 * spec.inner_diameter;
    let ring_outer = 0.5 * spec.outer_diameter;
    let ring_bottom = spec.ring_base(surface.height());
    let ring_top = ring_bottom + spec.ring_height;
    let spoke_bottom = spec.spoke_base(surface.height());
    let spoke_top = spoke_bottom + spec.spoke_thickness;

    let narrowest = [ring_bottom, ring_top, spoke_bottom, spoke_top]
        .into_iter()
        .flat_map(|z| {
            (0..angular).map(move |i| seat.radius(TAU * f64::from(i) / f64::from(angular), z))
        })
        .fold(f64::INFINITY, f64::min);
    if narrowest <= ring_outer {
        return Err(KernelError::invalid(
            "fitter.outer_diameter",
            format!(
                "ring radius {ring_outer} does not fit inside the shell (fused radius {narrowest:.3})"
            ),
        ));
    }

    let mut mesh = revolve_band(angular, 1, ring_bottom, ring_top, |_, _| (ring_outer, ring_inner));
    for k in 0..spec.spoke_count {
        let theta = TAU * f64::from(k) / f64::from(spec.spoke_count);
        mesh.merge(&build_spoke(surface, spec, theta, frame));
    }

    debug!(
        kind = ?spec.kind,
        spokes = spec.spoke_count,
        ring_radius = ring_outer,
        on_frame = frame.is_some(),
        "Built fitter"
    );
    Ok(mesh)
}

/// Builds one spoke pointing along `theta`.
///
/// The spoke is lofted across its width through `spoke_columns + 1`
/// sections. Section corners [`SPOKE_FAR_CORNERS`] sit at or below the
/// fused radius (or frame chord) everywhere under the adjacent end cells.
pub fn build_spoke(
    surface: &ShellSurface,
    spec: &FitterSpec,
    theta: f64,
    frame: Option<&FrameRing>,
) -> Mesh {
    let seat = Seat { surface, frame };
    let columns = spoke_columns(spec);
    let half_width = 0.5 * spec.spoke_width;
    let ring_outer = 0.5 * spec.outer_diameter;
    let ring_mid = 0.25 * (spec.inner_diameter + spec.outer_diameter);
    let start = ring_mid.min((ring_outer * ring_outer - half_width * half_width).max(0.0).sqrt());

    let z0 = spec.spoke_base(surface.height());
    let z1 = z0 + spec.spoke_thickness;

    let (sin, cos) = theta.sin_cos();
    let radial = DVec3::new(cos, sin, 0.0);
    let side = DVec3::new(-sin, cos, 0.0);
    let near = |lateral: f64, z: f64| radial * start + side * lateral + DVec3::new(0.0, 0.0, z);

    let nominal = seat.radius(theta, z0).max(start);
    let laterals: Vec<f64> = (0..=columns)
        .map(|i| spec.spoke_width * f64::from(i) / f64::from(columns) - half_width)
        .collect();
    let angles: Vec<f64> = laterals
        .iter()
        .map(|lateral| theta + lateral.atan2(nominal))
        .collect();
    let cells: Vec<f64> = angles
        .windows(2)
        .map(|pair| seat.lowest((pair[0], pair[1]), (z0, z1)))
        .collect();

    let last = cells.len() - 1;
    let sections: Vec<[DVec3; 4]> = laterals
        .iter()
        .zip(&angles)
        .enumerate()
        .map(|(i, (&lateral, &angle))| {
            let reach = cells[i.saturating_sub(1)].min(cells[i.min(last)]);
            [
                near(lateral, z0),
                near(lateral, z1),
                polar(angle, z1, reach),
                polar(angle, z0, reach),
            ]
        })
        .collect();
    loft(&sections)
}
