//! # Shell Parameters
//!
//! Immutable parameter records handed to the shell builders. Records derive
//! serde with field defaults so partially specified JSON from the UI lands
//! on documented values.

mod families;


pub use families::{PatternFamily, PatternGroup, SilhouetteFamily, UnknownFamily};

use crate::error::{KernelError, KernelResult};
use config::constants::{
    DEFAULT_ANGULAR_RESOLUTION, DEFAULT_HEIGHT_RESOLUTION, MAX_ANGULAR_RESOLUTION,
    MAX_HEIGHT_RESOLUTION, MIN_ANGULAR_RESOLUTION, MIN_HEIGHT_RESOLUTION,
};
use serde::{Deserialize, Serialize};

/// Largest number of spokes a fitter may carry.
pub const MAX_SPOKES: u32 = 32;

/// Fitter styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitterKind {
    /// No fitter.
    #[default]
    None,
    /// Ring at `mount_height_from_base`, spokes fused into a solid wall.
    Spider,
    /// Ring flush with the top edge, spokes ending at the top radius.
    TopRim,
}

impl FitterKind {
    /// Stable numeric index used by design codes.
    pub fn index(self) -> u8 {
        match self {
            FitterKind::None => 0,
            FitterKind::Spider => 1,
            FitterKind::TopRim => 2,
        }
    }

    /// Looks a kind up by its stable index.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(FitterKind::None),
            1 => Some(FitterKind::Spider),
            2 => Some(FitterKind::TopRim),
            _ => None,
        }
    }
}

/// Mounting geometry for a lamp socket adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitterSpec {
    pub kind: FitterKind,
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub ring_height: f64,
    pub mount_height_from_base: f64,
    pub spoke_thickness: f64,
    pub spoke_width: f64,
    pub spoke_count: u32,
}

impl Default for FitterSpec {
    fn default() -> Self {
        Self {
            kind: FitterKind::None,
            inner_diameter: 28.0,
            outer_diameter: 36.0,
            ring_height: 5.0,
            mount_height_from_base: 0.0,
            spoke_thickness: 3.0,
            spoke_width: 4.0,
            spoke_count: 3,
        }
    }
}

impl FitterSpec {
    /// Bottom of the ring for a shell of the given height.
    pub fn ring_base(&self, shell_height: f64) -> f64 {
        match self.kind {
            FitterKind::TopRim => shell_height - self.ring_height,
            _ => self.mount_height_from_base,
        }
    }

    /// Bottom of the spokes for a shell of the given height.
    pub fn spoke_base(&self, shell_height: f64) -> f64 {
        match self.kind {
            FitterKind::TopRim => shell_height - self.spoke_thickness,
            _ => self.mount_height_from_base,
        }
    }

    fn validate(&self, shell_height: f64) -> KernelResult<()> {
        if self.kind == FitterKind::None {
            return Ok(());
        }
        positive("fitter.inner_diameter", self.inner_diameter)?;
        positive("fitter.ring_height", self.ring_height)?;
        positive("fitter.spoke_thickness", self.spoke_thickness)?;
        positive("fitter.spoke_width", self.spoke_width)?;
        if self.outer_diameter.is_nan() || self.outer_diameter <= self.inner_diameter {
            return Err(KernelError::invalid(
                "fitter.outer_diameter",
                format!(
                    "must exceed inner diameter {} (got {})",
                    self.inner_diameter, self.outer_diameter
                ),
            ));
        }
        if self.spoke_count == 0 || self.spoke_count > MAX_SPOKES {
            return Err(KernelError::invalid(
                "fitter.spoke_count",
                format!("must be in 1..={MAX_SPOKES} (got {})", self.spoke_count),
            ));
        }
        if self.spoke_width >= self.outer_diameter {
            return Err(KernelError::invalid(
                "fitter.spoke_width",
                "must be narrower than the ring",
            ));
        }
        let tallest = self.ring_height.max(self.spoke_thickness);
        match self.kind {
            FitterKind::Spider => {
                if self.mount_height_from_base.is_nan()
                    || self.mount_height_from_base < 0.0
                    || self.mount_height_from_base + tallest > shell_height
                {
                    return Err(KernelError::invalid(
                        "fitter.mount_height_from_base",
                        format!(
                            "ring of height {tallest} must fit inside the shell height {shell_height}"
                        ),
                    ));
                }
            }
            FitterKind::TopRim => {
                if tallest > shell_height {
                    return Err(KernelError::invalid(
                        "fitter.ring_height",
                        format!("exceeds the shell height {shell_height}"),
                    ));
                }
            }
            FitterKind::None => {}
        }
        Ok(())
    }
}

/// Where reinforcing rims are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RimPlacement {
    #[default]
    None,
    Top,
    Bottom,
    Both,
}

impl RimPlacement {
    /// Stable numeric index used by design codes.
    pub fn index(self) -> u8 {
        match self {
            RimPlacement::None => 0,
            RimPlacement::Top => 1,
            RimPlacement::Bottom => 2,
            RimPlacement::Both => 3,
        }
    }

    /// Looks a placement up by its stable index.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(RimPlacement::None),
            1 => Some(RimPlacement::Top),
            2 => Some(RimPlacement::Bottom),
            3 => Some(RimPlacement::Both),
            _ => None,
        }
    }

    pub fn has_top(self) -> bool {
        matches!(self, RimPlacement::Top | RimPlacement::Both)
    }

    pub fn has_bottom(self) -> bool {
        matches!(self, RimPlacement::Bottom | RimPlacement::Both)
    }
}

/// Reinforcing band along the open edges of a shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RimSpec {
    pub placement: RimPlacement,
    pub height: f64,
    pub thickness: f64,
}

impl Default for RimSpec {
    fn default() -> Self {
        Self {
            placement: RimPlacement::None,
            height: 5.0,
            thickness: 2.0,
        }
    }
}

/// Design parameters of a lampshade shell.
///
/// # Example
///
/// ```rust
/// use lamp_kernel::params::{PatternFamily, ShellParams};
///
/// let params = ShellParams {
///     pattern: PatternFamily::Voronoi,
///     seed: 7,
///     ..ShellParams::default()
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellParams {
    pub pattern: PatternFamily,
    pub silhouette: SilhouetteFamily,
    pub height: f64,
    pub top_radius: f64,
    pub bottom_radius: f64,
    pub wall_thickness: f64,
    pub angular_resolution: u32,
    pub height_resolution: u32,
    pub seed: u32,
    /// Angular repetitions (ribs, lobes, cells) or lattice segments.
    pub rib_count: u32,
    /// Relief amplitude in length units.
    pub rib_depth: f64,
    /// Vertical repetitions or lattice layers.
    pub vertical_count: u32,
    pub twist_degrees: f64,
    /// Noise and tile scale multiplier.
    pub scale: f64,
    /// Strength of the silhouette shape factor.
    pub silhouette_intensity: f64,
    pub strut_radius: f64,
    pub internal_ribs: u32,
    pub internal_rib_depth: f64,
    pub rim: RimSpec,
    pub fitter: FitterSpec,
}

impl Default for ShellParams {
    fn default() -> Self {
        Self {
            pattern: PatternFamily::RibbedDrum,
            silhouette: SilhouetteFamily::Straight,
            height: 150.0,
            top_radius: 50.0,
            bottom_radius: 70.0,
            wall_thickness: 1.2,
            angular_resolution: DEFAULT_ANGULAR_RESOLUTION,
            height_resolution: DEFAULT_HEIGHT_RESOLUTION,
            seed: 1,
            rib_count: 24,
            rib_depth: 2.0,
            vertical_count: 6,
            twist_degrees: 0.0,
            scale: 1.0,
            silhouette_intensity: 0.3,
            strut_radius: 1.5,
            internal_ribs: 0,
            internal_rib_depth: 3.0,
            rim: RimSpec::default(),
            fitter: FitterSpec::default(),
        }
    }
}

impl ShellParams {
    /// Checks every numeric field and family combination.
    ///
    /// Fails fast on the first offending field.
    pub fn validate(&self) -> KernelResult<()> {
        positive("height", self.height)?;
        positive("top_radius", self.top_radius)?;
        positive("bottom_radius", self.bottom_radius)?;
        positive("wall_thickness", self.wall_thickness)?;

        let narrowest = self.top_radius.min(self.bottom_radius);
        if self.wall_thickness >= narrowest {
            return Err(KernelError::invalid(
                "wall_thickness",
                format!(
                    "must be less than the smaller radius {narrowest} (got {})",
                    self.wall_thickness
                ),
            ));
        }

        within(
            "angular_resolution",
            self.angular_resolution,
            MIN_ANGULAR_RESOLUTION,
            MAX_ANGULAR_RESOLUTION,
        )?;
        within(
            "height_resolution",
            self.height_resolution,
            MIN_HEIGHT_RESOLUTION,
            MAX_HEIGHT_RESOLUTION,
        )?;

        if self.rib_count == 0 {
            return Err(KernelError::invalid("rib_count", "must be at least 1"));
        }
        if self.vertical_count == 0 {
            return Err(KernelError::invalid("vertical_count", "must be at least 1"));
        }

        non_negative("rib_depth", self.rib_depth)?;
        non_negative("scale", self.scale)?;
        non_negative("silhouette_intensity", self.silhouette_intensity)?;
        non_negative("internal_rib_depth", self.internal_rib_depth)?;
        if !self.twist_degrees.is_finite() {
            return Err(KernelError::invalid("twist_degrees", "must be finite"));
        }

        if self.pattern.is_lattice() {
            self.validate_lattice()?;
        } else {
            if self.internal_ribs > 0 {
                positive("internal_rib_depth", self.internal_rib_depth)?;
            }
            if self.rim.placement != RimPlacement::None {
                positive("rim.height", self.rim.height)?;
                positive("rim.thickness", self.rim.thickness)?;
                if self.rim.height > self.height {
                    return Err(KernelError::invalid(
                        "rim.height",
                        format!("exceeds the shell height {}", self.height),
                    ));
                }
            }
        }

        self.fitter.validate(self.height)
    }

    fn validate_lattice(&self) -> KernelResult<()> {
        let pattern = self.pattern.name();
        positive("strut_radius", self.strut_radius)?;
        if self.rib_count < 3 {
            return Err(KernelError::invalid(
                "rib_count",
                "lattice patterns need at least 3 segments",
            ));
        }
        if self.fitter.kind == FitterKind::Spider {
            return Err(KernelError::unsupported(pattern, "fitter"));
        }
        if self.internal_ribs > 0 {
            return Err(KernelError::unsupported(pattern, "internal_ribs"));
        }
        if self.rim.placement != RimPlacement::None {
            return Err(KernelError::unsupported(pattern, "rim"));
        }
        Ok(())
    }
}

pub(crate) fn positive(parameter: &'static str, value: f64) -> KernelResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(KernelError::invalid(
            parameter,
            format!("must be positive (got {value})"),
        ))
    }
}

pub(crate) fn non_negative(parameter: &'static str, value: f64) -> KernelResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(KernelError::invalid(
            parameter,
            format!("must be non-negative (got {value})"),
        ))
    }
}

pub(crate) fn within(parameter: &'static str, value: u32, min: u32, max: u32) -> KernelResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(KernelError::invalid(
            parameter,
            format!("must be in {min}..={max} (got {value})"),
        ))
    }
}
