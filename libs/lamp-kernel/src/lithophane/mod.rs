//! # Lithophane
//!
//! Two-sided relief panels whose thickness encodes image luminance: thin
//! where the image is bright, thick where it is dark.
//!
//! ## Stages
//!
//! 1. Luminance plane, optionally box blurred
//! 2. Per-sample relief height, outline mask, border band and hole mask
//! 3. Front and back vertex for every sample
//! 4. Front/back triangles for fully valid cells
//! 5. Side walls along every boundary edge of the valid cells
//! 6. Optional arc or cylinder projection of vertex positions

mod heightfield;
mod image;
mod shapes;


pub use heightfield::generate_lithophane;
pub use image::LuminanceGrid;
pub use shapes::OutlineShape;

use crate::error::{KernelError, KernelResult};
use crate::params::{non_negative, positive, within};
use config::constants::{
    DEFAULT_SAMPLING_RESOLUTION, MAX_SAMPLING_RESOLUTION, MIN_SAMPLING_RESOLUTION,
};
use serde::{Deserialize, Serialize};

/// Hanging hole near the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoleSpec {
    pub enabled: bool,
    pub diameter: f64,
    /// Distance from the top edge to the hole center.
    pub offset_from_top: f64,
    /// Width of the full-thickness ring around the hole.
    pub ring_width: f64,
}

impl Default for HoleSpec {
    fn default() -> Self {
        Self {
            enabled: false,
            diameter: 5.0,
            offset_from_top: 6.0,
            ring_width: 1.5,
        }
    }
}

/// Full-thickness frame along the outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSpec {
    pub enabled: bool,
    pub width: f64,
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 3.0,
        }
    }
}

/// Design parameters of a lithophane panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LithophaneParams {
    pub outline: OutlineShape,
    pub physical_width: f64,
    pub physical_height: f64,
    /// Thickness where the image is brightest.
    pub min_relief: f64,
    /// Thickness where the image is darkest.
    pub max_relief: f64,
    /// Flat layer under the relief.
    pub base_thickness: f64,
    /// Samples across the panel width.
    pub sampling_resolution: u32,
    pub invert: bool,
    /// Added to normalized luminance, in `[-1, 1]`.
    pub brightness: f64,
    /// Multiplies luminance around mid gray.
    pub contrast: f64,
    /// Box blur radius in image pixels.
    pub smoothing_radius: u32,
    pub hole: HoleSpec,
    pub border: BorderSpec,
    /// Arc spanned by a curved panel.
    pub curve_angle_degrees: f64,
}

impl Default for LithophaneParams {
    fn default() -> Self {
        Self {
            outline: OutlineShape::Rect,
            physical_width: 100.0,
            physical_height: 75.0,
            min_relief: 0.8,
            max_relief: 3.0,
            base_thickness: 0.0,
            sampling_resolution: DEFAULT_SAMPLING_RESOLUTION,
            invert: false,
            brightness: 0.0,
            contrast: 1.0,
            smoothing_radius: 0,
            hole: HoleSpec::default(),
            border: BorderSpec::default(),
            curve_angle_degrees: 120.0,
        }
    }
}

impl LithophaneParams {
    /// Checks every numeric field. Fails fast on the first offending one.
    pub fn validate(&self) -> KernelResult<()> {
        positive("physical_width", self.physical_width)?;
        positive("physical_height", self.physical_height)?;
        positive("min_relief", self.min_relief)?;
        if self.max_relief.is_nan() || self.max_relief <= self.min_relief {
            return Err(KernelError::invalid(
                "max_relief",
                format!(
                    "must exceed min_relief {} (got {})",
                    self.min_relief, self.max_relief
                ),
            ));
        }
        non_negative("base_thickness", self.base_thickness)?;
        within(
            "sampling_resolution",
            self.sampling_resolution,
            MIN_SAMPLING_RESOLUTION,
            MAX_SAMPLING_RESOLUTION,
        )?;
        if !(-1.0..=1.0).contains(&self.brightness) {
            return Err(KernelError::invalid(
                "brightness",
                format!("must be in [-1, 1] (got {})", self.brightness),
            ));
        }
        non_negative("contrast", self.contrast)?;

        if self.outline == OutlineShape::Curved
            && !(self.curve_angle_degrees > 0.0 && self.curve_angle_degrees <= 360.0)
        {
            return Err(KernelError::invalid(
                "curve_angle_degrees",
                format!("must be in (0, 360] (got {})", self.curve_angle_degrees),
            ));
        }

        if self.hole.enabled {
            positive("hole.diameter", self.hole.diameter)?;
            non_negative("hole.ring_width", self.hole.ring_width)?;
            let radius = 0.5 * self.hole.diameter;
            if self.hole.offset_from_top.is_nan()
                || self.hole.offset_from_top < radius
                || self.hole.offset_from_top + radius > self.physical_height
            {
                return Err(KernelError::invalid(
                    "hole.offset_from_top",
                    "hole must lie inside the panel",
                ));
            }
            if self.hole.diameter >= self.physical_width {
                return Err(KernelError::invalid(
                    "hole.diameter",
                    "must be narrower than the panel",
                ));
            }
        }

        if self.border.enabled {
            positive("border.width", self.border.width)?;
            if 2.0 * self.border.width >= self.physical_width.min(self.physical_height) {
                return Err(KernelError::invalid(
                    "border.width",
                    "must be less than half the shorter panel side",
                ));
            }
        }
        Ok(())
    }

    /// Sample grid size `(grid_x, grid_y)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lamp_kernel::lithophane::LithophaneParams;
    ///
    /// let params = LithophaneParams {
    ///     physical_width: 100.0,
    ///     physical_height: 50.0,
    ///     sampling_resolution: 40,
    ///     ..LithophaneParams::default()
    /// };
    /// assert_eq!(params.grid_size(), (40, 20));
    /// ```
    pub fn grid_size(&self) -> (u32, u32) {
        let gx = self.sampling_resolution.max(2);
        let gy = (f64::from(gx) * self.physical_height / self.physical_width).round();
        (gx, (gy as u32).max(2))
    }

    /// Relief height for a normalized luminance, after the remap.
    pub fn relief(&self, luminance: f64) -> f64 {
        let l = ((luminance - 0.5) * self.contrast + 0.5 + self.brightness).clamp(0.0, 1.0);
        let span = self.max_relief - self.min_relief;
        if self.invert {
            self.base_thickness + self.min_relief + l * span
        } else {
            self.base_thickness + self.max_relief - l * span
        }
    }
}
