//! # Shell Surface
//!
//! Evaluated outer and inner walls of a shell. Every builder that needs a
//! radius (shell grid, lattice anchors, fitter spokes, ribs, rims) asks the
//! same [`ShellSurface`], so attachments always agree with the wall they
//! fuse into.
//!
//! ## Floors
//!
//! - outer = `max(silhouette + displacement, radius_floor)`
//! - inner = `max(outer - wall_thickness, inner_floor)`
//!
//! Clamped samples are counted, not reported as errors.

use crate::displacement::DisplacementField;
use crate::params::ShellParams;
use crate::settings::KernelConfig;
use crate::silhouette::Silhouette;
use config::constants::{FUSION_SAMPLE_SPACING, MAX_FUSION_SAMPLES};
use glam::DVec3;
use std::cell::Cell;

/// Radius queries against one shell design.
///
/// # Example
///
/// ```rust
/// use lamp_kernel::params::{PatternFamily, ShellParams};
/// use lamp_kernel::settings::KernelConfig;
/// use lamp_kernel::surface::ShellSurface;
///
/// let params = ShellParams { pattern: PatternFamily::Smooth, ..ShellParams::default() };
/// let surface = ShellSurface::new(&params, &KernelConfig::default());
/// let outer = surface.outer_radius(0.0, 0.0);
/// assert!((outer - params.bottom_radius).abs() < 1e-9);
/// assert!(surface.inner_radius(0.0, 0.0) < outer);
/// ```
#[derive(Debug)]
pub struct ShellSurface {
    silhouette: Silhouette,
    field: DisplacementField,
    height: f64,
    wall: f64,
    config: KernelConfig,
    clamped: Cell<usize>,
}

impl ShellSurface {
    /// Binds a parameter record and configuration.
    pub fn new(params: &ShellParams, config: &KernelConfig) -> Self {
        Self {
            silhouette: Silhouette::from_params(params).with_floor(config.radius_floor),
            field: DisplacementField::new(params),
            height: params.height,
            wall: params.wall_thickness,
            config: *config,
            clamped: Cell::new(0),
        }
    }

    /// Shell height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Nominal wall thickness.
    #[inline]
    pub fn wall_thickness(&self) -> f64 {
        self.wall
    }

    /// Configuration the surface was built with.
    #[inline]
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// The displacement field.
    pub fn field(&self) -> &DisplacementField {
        &self.field
    }

    /// Silhouette radius at absolute height `z`, before displacement.
    pub fn base_radius(&self, z: f64) -> f64 {
        self.silhouette.sample(z / self.height)
    }

    /// Outer wall radius at `(angle, z)`.
    pub fn outer_radius(&self, angle: f64, z: f64) -> f64 {
        let raw = self.base_radius(z) + self.field.at(angle, z);
        self.floor(raw, self.config.radius_floor)
    }

    /// Inner wall radius at `(angle, z)`.
    pub fn inner_radius(&self, angle: f64, z: f64) -> f64 {
        self.wall_radii(angle, z).1
    }

    /// Outer and inner radius at `(angle, z)` from a single field sample.
    pub fn wall_radii(&self, angle: f64, z: f64) -> (f64, f64) {
        let outer = self.outer_radius(angle, z);
        (outer, self.floor(outer - self.wall, self.config.inner_floor))
    }

    /// Radius an attachment may reach at `(angle, z)`.
    ///
    /// Driven `wall × fusion_fraction` into the wall from the inside, but
    /// always at least `safety_margin` short of the outer surface.
    pub fn fused_radius(&self, angle: f64, z: f64) -> f64 {
        let (outer, inner) = self.wall_radii(angle, z);
        (outer - self.config.safety_margin).min(inner + self.wall * self.config.fusion_fraction)
    }

    /// Cartesian point at `(angle, z)` and radius `r`. The shell axis is `+z`.
    #[inline]
    pub fn point(&self, angle: f64, z: f64, r: f64) -> DVec3 {
        polar(angle, z, r)
    }

    /// Smallest fused radius over the window `angles × heights`.
    ///
    /// Any face whose vertices stay at or below this radius, and whose
    /// angles and heights stay inside the window, cannot reach the outer
    /// wall.
    pub fn min_fused_radius(&self, angles: (f64, f64), heights: (f64, f64)) -> f64 {
        let arc = self.base_radius(0.5 * (heights.0 + heights.1));
        window_min(|angle, z| self.fused_radius(angle, z), angles, heights, arc)
    }

    /// Number of samples clamped to a floor so far.
    pub fn clamp_count(&self) -> usize {
        self.clamped.get()
    }

    fn floor(&self, value: f64, floor: f64) -> f64 {
        if value < floor {
            self.clamped.set(self.clamped.get() + 1);
            floor
        } else {
            value
        }
    }
}

/// Smallest value of `radius` over an `(angle, z)` window.
///
/// Both axes are sampled every [`FUSION_SAMPLE_SPACING`] length units
/// (angles measured as arc length at radius `arc`), edges included, with at
/// most [`MAX_FUSION_SAMPLES`] samples per axis. The result is lowered by
/// half the largest step between neighbouring samples, which covers a dip
/// between two samples on a kinked or steep field.
pub fn window_min(
    radius: impl Fn(f64, f64) -> f64,
    angles: (f64, f64),
    heights: (f64, f64),
    arc: f64,
) -> f64 {
    let count = |extent: f64| {
        let steps = (extent.abs() / FUSION_SAMPLE_SPACING).ceil();
        if steps.is_finite() {
            (steps as u32).clamp(1, MAX_FUSION_SAMPLES - 1)
        } else {
            1
        }
    };
    let na = count((angles.1 - angles.0) * arc);
    let nz = count(heights.1 - heights.0);

    let mut lowest = f64::INFINITY;
    let mut step = 0.0f64;
    let mut previous_row: Vec<f64> = Vec::with_capacity(nz as usize + 1);
    let mut row: Vec<f64> = Vec::with_capacity(nz as usize + 1);
    for i in 0..=na {
        let angle = angles.0 + (angles.1 - angles.0) * f64::from(i) / f64::from(na);
        row.clear();
        for j in 0..=nz {
            let z = heights.0 + (heights.1 - heights.0) * f64::from(j) / f64::from(nz);
            let value = radius(angle, z);
            if let Some(below) = row.last() {
                step = step.max((value - below).abs());
            }
            if let Some(before) = previous_row.get(j as usize) {
                step = step.max((value - before).abs());
            }
            lowest = lowest.min(value);
            row.push(value);
        }
        std::mem::swap(&mut previous_row, &mut row);
    }
    lowest - 0.5 * step
}

/// Cartesian point on a circle of radius `r` around the `+z` axis.
#[inline]
pub(crate) fn polar(angle: f64, z: f64, r: f64) -> DVec3 {
    let (sin, cos) = angle.sin_cos();
    DVec3::new(r * cos, r * sin, z)
}

#[cfg(test)]
mod tests;
