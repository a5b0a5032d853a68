//! Kernel-level configuration helpers building on the shared `config` crate.
//!
//! The module wraps the workspace configuration so geometry components can
//! stay decoupled from literal constants.

use config::constants::{ConfigError, GlobalConfig, INNER_RADIUS_FLOOR};

/// Geometry kernel configuration wrapper.
///
/// # Examples
/// ```
/// use lamp_kernel::settings::KernelConfig;
/// let cfg = KernelConfig::default();
/// assert!(cfg.weld_epsilon > 0.0);
/// assert!(cfg.inner_floor < cfg.radius_floor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// Vertices closer than this are merged by the assembler.
    pub weld_epsilon: f64,
    /// Minimum outer radius after clamping.
    pub radius_floor: f64,
    /// Minimum inner radius after clamping.
    pub inner_floor: f64,
    /// Clearance kept between fused attachments and the outer wall.
    pub safety_margin: f64,
    /// Fraction of the wall thickness attachments are driven into.
    pub fusion_fraction: f64,
}

impl KernelConfig {
    /// Creates a new configuration from explicit values.
    ///
    /// # Examples
    /// ```
    /// use lamp_kernel::settings::KernelConfig;
    /// let cfg = KernelConfig::new(1.0e-5, 0.2, 0.1, 0.25).unwrap();
    /// assert_eq!(cfg.safety_margin, 0.1);
    /// ```
    pub fn new(
        weld_epsilon: f64,
        radius_floor: f64,
        safety_margin: f64,
        fusion_fraction: f64,
    ) -> Result<Self, KernelConfigError> {
        GlobalConfig::new(weld_epsilon, radius_floor, safety_margin, fusion_fraction)
            .map(Self::from)
            .map_err(KernelConfigError)
    }
}

impl From<GlobalConfig> for KernelConfig {
    fn from(cfg: GlobalConfig) -> Self {
        Self {
            weld_epsilon: cfg.weld_epsilon,
            radius_floor: cfg.radius_floor,
            inner_floor: INNER_RADIUS_FLOOR,
            safety_margin: cfg.safety_margin,
            fusion_fraction: cfg.fusion_fraction,
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        GlobalConfig::default().into()
    }
}

/// Error wrapper for invalid kernel configuration.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct KernelConfigError(pub ConfigError);
