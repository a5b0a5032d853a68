//! # Lamp Kernel
//!
//! Procedural mesh generation for lampshades and lithophanes.
//! Turns a handful of numeric design parameters into a printable solid.
//!
//! ## Architecture
//!
//! ```text
//! ShellParams → Silhouette + DisplacementField → ShellSurface
//!             → revolution shell | strut lattice
//!             + internal ribs, rims, fitter
//!             → assemble (weld + normals) → Mesh
//!
//! LuminanceGrid + LithophaneParams → heightfield mesher → Mesh
//! ```
//!
//! ## Algorithms
//!
//! - **Silhouettes**: 30 closed-form radius profiles along the axis
//! - **Displacement**: 53 scalar relief families (periodic, distance-field,
//!   hash-noise, tiling, lattice)
//! - **Revolution**: double-wall lathe closed by annular caps
//! - **Lattice**: per-family anchor connectivity with capped prism struts
//! - **Fusion**: spokes, ribs and rims clamp to the fused radius so they
//!   bury into the wall without piercing the outer skin
//! - **Heightfield**: luminance relief with side walls along the mask
//!   boundary
//!
//! Every builder is a pure function of its inputs.
//!
//! ## Usage
//!
//! ```rust
//! use lamp_kernel::{generate_shell, ShellParams};
//!
//! let params = ShellParams {
//!     angular_resolution: 32,
//!     height_resolution: 8,
//!     ..ShellParams::default()
//! };
//! let mesh = generate_shell(&params).unwrap();
//! assert!(mesh.triangle_count() > 0);
//! ```

pub mod accessories;
pub mod assembly;
pub mod displacement;
pub mod error;
pub mod export;
pub mod fitter;
pub mod lattice;
pub mod lithophane;
pub mod mesh;
pub mod params;
pub mod primitives;
pub mod revolution;
pub mod settings;
pub mod silhouette;
pub mod surface;
pub mod topology;

#[cfg(test)]
mod test_support;

pub use error::{KernelError, KernelResult};
pub use export::MeshBuffers;
pub use lithophane::{generate_lithophane, LithophaneParams, LuminanceGrid, OutlineShape};
pub use mesh::Mesh;
pub use params::{FitterKind, FitterSpec, PatternFamily, ShellParams, SilhouetteFamily};
pub use settings::KernelConfig;

use accessories::{build_internal_ribs, build_rims};
use assembly::assemble;
use config::constants::STRUT_SEGMENTS;
use fitter::build_fitter;
use lattice::{build_lattice, Connectivity, FrameRing};
use revolution::build_shell;
use surface::ShellSurface;
use tracing::{info, warn};

/// Generates a lampshade with the default tolerances.
///
/// # Errors
///
/// See [`generate_shell_with`].
pub fn generate_shell(params: &ShellParams) -> KernelResult<Mesh> {
    generate_shell_with(params, &KernelConfig::default())
}

/// Generates a lampshade: validate, build the wall or lattice, add
/// accessories, then assemble.
///
/// # Errors
///
/// - `InvalidParameter` / `UnsupportedFamilyCombination` from validation
/// - `InvalidParameter("fitter.outer_diameter")` when the fitter ring does
///   not fit the shell
/// - `MeshAssembly` when the parts exceed the buffer limits
pub fn generate_shell_with(params: &ShellParams, config: &KernelConfig) -> KernelResult<Mesh> {
    params.validate()?;
    let surface = ShellSurface::new(params, config);

    let mut parts = Vec::with_capacity(4);
    let mut frame = None;
    match Connectivity::from_pattern(params.pattern) {
        Some(connectivity) => {
            parts.push(build_lattice(
                &surface,
                connectivity,
                params.rib_count,
                params.vertical_count,
                params.strut_radius,
                STRUT_SEGMENTS,
            ));
            frame = Some(FrameRing::top(
                &surface,
                connectivity,
                params.rib_count,
                params.vertical_count,
                params.strut_radius,
            ));
        }
        None => {
            parts.push(build_shell(
                &surface,
                params.angular_resolution,
                params.height_resolution,
            ));
            parts.push(build_internal_ribs(
                &surface,
                params.internal_ribs,
                params.internal_rib_depth,
                params.height_resolution,
            ));
            parts.push(build_rims(
                &surface,
                &params.rim,
                params.angular_resolution,
                params.height_resolution,
            ));
        }
    }
    parts.push(build_fitter(
        &surface,
        &params.fitter,
        params.angular_resolution,
        frame.as_ref(),
    )?);

    let clamped = surface.clamp_count();
    if clamped > 0 {
        warn!(samples = clamped, "Radii clamped to the floor");
    }

    let mesh = assemble(parts, config)?;
    info!(
        pattern = params.pattern.name(),
        silhouette = params.silhouette.name(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Generated shell"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{RimPlacement, RimSpec};
    use crate::topology::analyze;

    fn small(pattern: PatternFamily) -> ShellParams {
        ShellParams {
            pattern,
            angular_resolution: 48,
            height_resolution: 12,
            ..ShellParams::default()
        }
    }

    #[test]
    fn test_plain_shell_is_closed() {
        let mesh = generate_shell(&small(PatternFamily::RibbedDrum)).unwrap();
        let report = analyze(&mesh);
        assert!(report.is_oriented_manifold(), "{report:?}");
        assert_eq!(report.euler_characteristic(), 0);
        assert_eq!(mesh.vertex_count(), 2 * 48 * 13);
    }

    #[test]
    fn test_lattice_shell_has_struts() {
        let mesh = generate_shell(&small(PatternFamily::WireDiamond)).unwrap();
        assert!(mesh.triangle_count() > 0);
        assert!(analyze(&mesh).is_watertight());
    }

    #[test]
    fn test_accessories_join_the_shell() {
        let plain = generate_shell(&small(PatternFamily::Smooth)).unwrap();
        let params = ShellParams {
            internal_ribs: 6,
            rim: RimSpec {
                placement: RimPlacement::Both,
                ..RimSpec::default()
            },
            fitter: FitterSpec {
                kind: FitterKind::Spider,
                ..FitterSpec::default()
            },
            ..small(PatternFamily::Smooth)
        };
        let mesh = generate_shell(&params).unwrap();
        assert!(mesh.triangle_count() > plain.triangle_count());
        assert!(mesh.validate());
    }

    #[test]
    fn test_validation_runs_first() {
        let params = ShellParams {
            wall_thickness: 80.0,
            ..ShellParams::default()
        };
        let err = generate_shell(&params).unwrap_err();
        assert_eq!(err.parameter(), Some("wall_thickness"));
    }
}
