//! # Silhouette Evaluator
//!
//! Maps a height fraction `t ∈ [0, 1]` to the base radius of the shell.
//!
//! ## Algorithm
//!
//! 1. Linearly interpolate between the bottom and top radius
//! 2. Multiply by a closed-form shape factor of the family
//! 3. Clamp to a small positive floor so rings never collapse

use crate::error::{KernelError, KernelResult};
use crate::params::{ShellParams, SilhouetteFamily};
use config::constants::RADIUS_FLOOR;
use std::f64::consts::PI;

/// Shape intensity used by the free [`radius_at`] function.
pub const DEFAULT_INTENSITY: f64 = 0.3;

/// A silhouette of revolution bound to concrete radii.
///
/// # Example
///
/// ```rust
/// use lamp_kernel::params::SilhouetteFamily;
/// use lamp_kernel::silhouette::Silhouette;
///
/// let bell = Silhouette::new(SilhouetteFamily::Bell, 5.0, 8.0, 0.5);
/// let bottom = bell.radius_at(0.0).unwrap();
/// assert!((bottom - 8.0 * 1.5).abs() < 1e-12);
/// assert!(bell.radius_at(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Silhouette {
    family: SilhouetteFamily,
    top_radius: f64,
    bottom_radius: f64,
    intensity: f64,
    floor: f64,
}

impl Silhouette {
    /// Creates a silhouette with the default radius floor.
    pub fn new(
        family: SilhouetteFamily,
        top_radius: f64,
        bottom_radius: f64,
        intensity: f64,
    ) -> Self {
        Self {
            family,
            top_radius,
            bottom_radius,
            intensity,
            floor: RADIUS_FLOOR,
        }
    }

    /// Creates the silhouette described by a parameter record.
    pub fn from_params(params: &ShellParams) -> Self {
        Self::new(
            params.silhouette,
            params.top_radius,
            params.bottom_radius,
            params.silhouette_intensity,
        )
    }

    /// Replaces the radius floor.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Returns the family of this silhouette.
    pub fn family(&self) -> SilhouetteFamily {
        self.family
    }

    /// Returns the radius floor.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Shape multiplier at height fraction `t`.
    pub fn factor(&self, t: f64) -> f64 {
        shape_factor(self.family, t, self.intensity)
    }

    /// Radius at height fraction `t`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when `t` is outside `[0, 1]` or NaN.
    pub fn radius_at(&self, t: f64) -> KernelResult<f64> {
        if !(0.0..=1.0).contains(&t) {
            return Err(KernelError::OutOfRange {
                parameter: "height_fraction",
                value: t,
            });
        }
        Ok(self.unclamped(t).max(self.floor))
    }

    /// Radius at `t` for builders that already stay inside the domain.
    ///
    /// `t` is clamped into `[0, 1]`; the result is floored.
    #[inline]
    pub(crate) fn sample(&self, t: f64) -> f64 {
        self.unclamped(t.clamp(0.0, 1.0)).max(self.floor)
    }

    /// Radius before the floor is applied.
    #[inline]
    pub(crate) fn unclamped(&self, t: f64) -> f64 {
        let base = self.bottom_radius + (self.top_radius - self.bottom_radius) * t;
        base * self.factor(t)
    }
}

/// Radius of a silhouette family at height fraction `t`, using
/// [`DEFAULT_INTENSITY`].
///
/// # Example
///
/// ```rust
/// use lamp_kernel::params::SilhouetteFamily;
/// use lamp_kernel::silhouette::radius_at;
///
/// let r = radius_at(0.5, SilhouetteFamily::Straight, 5.0, 8.0).unwrap();
/// assert!((r - 6.5).abs() < 1e-12);
/// ```
pub fn radius_at(
    height_fraction: f64,
    family: SilhouetteFamily,
    base_top: f64,
    base_bottom: f64,
) -> KernelResult<f64> {
    Silhouette::new(family, base_top, base_bottom, DEFAULT_INTENSITY).radius_at(height_fraction)
}

/// Closed-form shape multiplier of a family at height fraction `t`.
pub fn shape_factor(family: SilhouetteFamily, t: f64, k: f64) -> f64 {
    use SilhouetteFamily::*;

    let mid = 2.0 * t - 1.0;
    match family {
        Straight => 1.0,
        Hourglass => 1.0 - (PI * t).sin().powi(2) * k,
        Bell => 1.0 + (1.0 - t).powi(2) * k,
        Onion => 1.0 + 1.5 * k * (PI * t).sin() * (1.0 - t),
        Trumpet => 1.0 + 2.0 * k * t.powi(3),
        Stepped => {
            let step = (t * 4.0).floor().min(3.0) / 3.0;
            1.0 - 0.5 * k * step
        }
        Barrel => 1.0 + k * (PI * t).sin(),
        Vase => 1.0 + k * (1.5 * PI * t).sin(),
        Tulip => 1.0 + 2.0 * k * (PI * t).sin() * t,
        Cone => 1.0 + k * (1.0 - 2.0 * t),
        Dome => (1.0 - k * t * t).max(0.0).sqrt(),
        Teardrop => 1.0 + k * ((PI * t.sqrt()).sin() - t),
        Wave => 1.0 + 0.5 * k * (4.0 * PI * t).sin(),
        DoubleBulb => 1.0 + k * (2.0 * PI * t).sin().abs(),
        Lantern => 1.0 + k * (PI * t).sin().max(0.0).sqrt(),
        Pagoda => 1.0 + 0.5 * k * (3.0 * t).fract(),
        Skirt => 1.0 + 2.0 * k * (1.0 - t).powi(4),
        Egg => 1.0 + k * (PI * t).sin() * (1.2 - 0.8 * t),
        Diamond => 1.0 + k * (1.0 - mid.abs()),
        Spindle => 1.0 + k * (1.0 - mid.abs()).powi(2),
        Chalice => 1.0 + k * (2.0 * t * t - 0.5 * (PI * t).sin()),
        Urn => 1.0 + k * (0.8 * (1.2 * PI * t).sin() - 0.3 * t),
        Gourd => 1.0 + k * (0.6 * (PI * t).sin() + 0.4 * (3.0 * PI * t).sin()),
        Pinched => 1.0 - k * (-((t - 0.5) / 0.12).powi(2)).exp(),
        Flared => 1.0 + k * t * t,
        Tapered => 1.0 - k * t,
        Ripple => 1.0 + 0.3 * k * (8.0 * PI * t).sin(),
        Cinched => 1.0 - k * (-((t - 0.7) / 0.08).powi(2)).exp(),
        Pear => 1.0 + k * (1.8 * (PI * t).sin() * (1.0 - t) - 0.2 * t),
        Capsule => 1.0 - k * mid.abs().powi(6),
    }
}
