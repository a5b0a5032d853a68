//! # Configuration Constants
//!
//! Centralized constants for the lampshade and lithophane kernel. Every
//! floor, tolerance and resolution bound used by the builders lives here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison and weld tolerances
//! - **Clamping**: Radius floors and fitter fusion parameters
//! - **Resolution**: Angular, vertical and lithophane sampling bounds
//! - **Limits**: Maximum buffer sizes for safety bounds

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Distance under which two vertices are merged by the mesh assembler.
///
/// Sub-solids generated independently (shell, struts, spokes) can produce
/// vertices that coincide up to floating-point noise. Those are snapped to a
/// single vertex.
///
/// # Example
///
/// ```rust
/// use config::constants::{EPSILON, WELD_EPSILON};
/// assert!(WELD_EPSILON > EPSILON);
/// ```
pub const WELD_EPSILON: f64 = 1e-6;

// =============================================================================
// CLAMPING CONSTANTS
// =============================================================================

/// Smallest radius any silhouette or outer wall sample may take.
///
/// Zero-radius rings are the most common defect in lathed shells; they are
/// clamped to this floor instead of aborting the generation.
///
/// # Example
///
/// ```rust
/// use config::constants::RADIUS_FLOOR;
///
/// let evaluated: f64 = -2.0;
/// assert_eq!(evaluated.max(RADIUS_FLOOR), 0.1);
/// ```
pub const RADIUS_FLOOR: f64 = 0.1;

/// Smallest radius an inner wall sample may take.
///
/// Kept strictly below [`RADIUS_FLOOR`] so the inner wall never coincides
/// with a floor-clamped outer wall.
///
/// # Example
///
/// ```rust
/// use config::constants::{INNER_RADIUS_FLOOR, RADIUS_FLOOR};
/// assert!(INNER_RADIUS_FLOOR < RADIUS_FLOOR);
/// ```
pub const INNER_RADIUS_FLOOR: f64 = 0.05;

/// Clearance kept between a fused attachment and the outer shell surface.
///
/// # Example
///
/// ```rust
/// use config::constants::FITTER_SAFETY_MARGIN;
/// assert!(FITTER_SAFETY_MARGIN > 0.0);
/// ```
pub const FITTER_SAFETY_MARGIN: f64 = 0.05;

/// Fraction of the wall thickness an attachment is driven into the wall.
///
/// # Example
///
/// ```rust
/// use config::constants::FITTER_FUSION_FRACTION;
///
/// let wall = 2.0;
/// let fusion_depth = wall * FITTER_FUSION_FRACTION;
/// assert!(fusion_depth < wall);
/// ```
pub const FITTER_FUSION_FRACTION: f64 = 0.5;

/// Widest column of a fused end face, in length units.
///
/// Spoke ends are split into columns no wider than this so the face can
/// follow ribs narrower than the spoke.
///
/// # Example
///
/// ```rust
/// use config::constants::FUSION_COLUMN_PITCH;
///
/// let spoke_width: f64 = 4.0;
/// assert_eq!((spoke_width / FUSION_COLUMN_PITCH).ceil(), 8.0);
/// ```
pub const FUSION_COLUMN_PITCH: f64 = 0.5;

/// Spacing of the samples taken when a fused face is clamped to the
/// smallest fused radius under it.
pub const FUSION_SAMPLE_SPACING: f64 = 0.05;

/// Upper bound on fused-radius samples per axis of one clamp window.
pub const MAX_FUSION_SAMPLES: u32 = 64;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Minimum angular resolution (samples around the axis) of a shell.
pub const MIN_ANGULAR_RESOLUTION: u32 = 12;

/// Maximum angular resolution accepted by the kernel.
pub const MAX_ANGULAR_RESOLUTION: u32 = 1024;

/// Angular resolution used when a parameter record omits it.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_ANGULAR_RESOLUTION, MIN_ANGULAR_RESOLUTION};
/// assert!(DEFAULT_ANGULAR_RESOLUTION >= MIN_ANGULAR_RESOLUTION);
/// ```
pub const DEFAULT_ANGULAR_RESOLUTION: u32 = 128;

/// Minimum number of vertical steps of a shell.
pub const MIN_HEIGHT_RESOLUTION: u32 = 2;

/// Maximum number of vertical steps of a shell.
pub const MAX_HEIGHT_RESOLUTION: u32 = 1024;

/// Vertical steps used when a parameter record omits them.
pub const DEFAULT_HEIGHT_RESOLUTION: u32 = 100;

/// Number of sides of each lattice strut prism.
pub const STRUT_SEGMENTS: u32 = 8;

/// Minimum lithophane sampling resolution (samples across the panel width).
pub const MIN_SAMPLING_RESOLUTION: u32 = 2;

/// Maximum lithophane sampling resolution.
pub const MAX_SAMPLING_RESOLUTION: u32 = 2048;

/// Default lithophane sampling resolution.
pub const DEFAULT_SAMPLING_RESOLUTION: u32 = 200;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in a single generated mesh.
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum number of triangles in a single generated mesh.
pub const MAX_TRIANGLES: usize = 20_000_000;

// =============================================================================
// GLOBAL CONFIGURATION
// =============================================================================

/// Immutable snapshot of the clamping and welding settings shared by the
/// kernel crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.weld_epsilon > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Weld tolerance used by the mesh assembler.
    pub weld_epsilon: f64,
    /// Minimum outer radius after clamping.
    pub radius_floor: f64,
    /// Clearance between fused attachments and the outer wall.
    pub safety_margin: f64,
    /// Fraction of the wall thickness attachments are fused into.
    pub fusion_fraction: f64,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of every value.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-5, 0.2, 0.1, 0.4).expect("valid config");
    /// assert_eq!(cfg.radius_floor, 0.2);
    /// ```
    pub fn new(
        weld_epsilon: f64,
        radius_floor: f64,
        safety_margin: f64,
        fusion_fraction: f64,
    ) -> Result<Self, ConfigError> {
        if weld_epsilon.is_nan() || weld_epsilon <= 0.0 {
            return Err(ConfigError::InvalidTolerance(weld_epsilon));
        }
        if radius_floor.is_nan() || radius_floor <= INNER_RADIUS_FLOOR {
            return Err(ConfigError::InvalidFloor(radius_floor));
        }
        if safety_margin.is_nan() || safety_margin <= 0.0 {
            return Err(ConfigError::InvalidMargin(safety_margin));
        }
        if fusion_fraction.is_nan() || fusion_fraction <= 0.0 || fusion_fraction > 1.0 {
            return Err(ConfigError::InvalidFusion(fusion_fraction));
        }
        Ok(Self {
            weld_epsilon,
            radius_floor,
            safety_margin,
            fusion_fraction,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            weld_epsilon: WELD_EPSILON,
            radius_floor: RADIUS_FLOOR,
            safety_margin: FITTER_SAFETY_MARGIN,
            fusion_fraction: FITTER_FUSION_FRACTION,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the weld tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the radius floor does not exceed the inner wall floor.
    InvalidFloor(f64),
    /// Raised when the safety margin is not positive.
    InvalidMargin(f64),
    /// Raised when the fusion fraction is outside (0, 1].
    InvalidFusion(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "weld_epsilon must be positive: {value}")
            }
            ConfigError::InvalidFloor(value) => {
                write!(
                    f,
                    "radius_floor must exceed the inner floor {INNER_RADIUS_FLOOR}: {value}"
                )
            }
            ConfigError::InvalidMargin(value) => {
                write!(f, "safety_margin must be positive: {value}")
            }
            ConfigError::InvalidFusion(value) => {
                write!(f, "fusion_fraction must be in (0, 1]: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
