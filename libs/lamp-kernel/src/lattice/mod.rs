//! # Lattice Builder
//!
//! Wireframe shells made of independent strut solids.
//!
//! ## Algorithm
//!
//! 1. Sample an anchor grid of `(segments + 1) × (layers + 1)` points on the
//!    evaluated surface. The last column repeats the first at `2π`, so edges
//!    never wrap.
//! 2. Enumerate edges with the family's [`Connectivity`] rule. Every family
//!    carries the bottom and top frame rings.
//! 3. Emit one capped prism per edge plus a short radial hub per anchor.
//!
//! Struts share no vertices; overlapping solids are fused by the slicer.

pub mod strut;

#[cfg(test)]
mod tests;

use crate::mesh::Mesh;
use crate::params::PatternFamily;
use crate::surface::ShellSurface;
use glam::DVec3;
use std::f64::consts::{PI, TAU};
use strut::{combine_struts, generate_strut, generate_strut_rotated};
use tracing::debug;

/// Strut adjacency rules of the wireframe families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Vertical posts between the frame rings.
    Vertical,
    /// Posts, rings on every layer and one diagonal per cell.
    Triangular,
    /// Staggered zigzags with alternating ring segments.
    Honeycomb,
    /// Crossing diagonals.
    Diamond,
    /// Each anchor fans to its three neighbours on the next layer.
    Star,
    /// Staggered slanted strands with rings on even layers.
    Weave,
}

/// Position of an anchor in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridIndex {
    pub column: u32,
    pub layer: u32,
}

impl GridIndex {
    pub const fn new(column: u32, layer: u32) -> Self {
        Self { column, layer }
    }
}

impl Connectivity {
    /// Connectivity of a lattice pattern, `None` for solid patterns.
    pub fn from_pattern(pattern: PatternFamily) -> Option<Self> {
        match pattern {
            PatternFamily::WireVertical => Some(Self::Vertical),
            PatternFamily::WireTriangular => Some(Self::Triangular),
            PatternFamily::WireHoneycomb => Some(Self::Honeycomb),
            PatternFamily::WireDiamond => Some(Self::Diamond),
            PatternFamily::WireStar => Some(Self::Star),
            PatternFamily::WireWeave => Some(Self::Weave),
            _ => None,
        }
    }

    /// Odd layers sit half a segment around the axis.
    pub fn staggers(self) -> bool {
        matches!(self, Self::Honeycomb | Self::Weave)
    }

    /// Whether ring segment `column` on `layer` is present.
    fn ring_segment(self, column: u32, layer: u32, layers: u32) -> bool {
        if layer == 0 || layer == layers {
            return true;
        }
        match self {
            Self::Vertical | Self::Diamond => false,
            Self::Triangular | Self::Star => true,
            Self::Honeycomb => (column + layer) % 2 == 0,
            Self::Weave => layer % 2 == 0,
        }
    }

    /// Enumerates every strut as a pair of anchors. Each edge appears once.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lamp_kernel::lattice::Connectivity;
    ///
    /// // 8 posts per layer gap plus two frame rings of 8
    /// assert_eq!(Connectivity::Vertical.edges(8, 3).len(), 8 * 3 + 2 * 8);
    /// ```
    pub fn edges(self, segments: u32, layers: u32) -> Vec<(GridIndex, GridIndex)> {
        let g = GridIndex::new;
        let mut edges = Vec::new();

        for layer in 0..=layers {
            for c in 0..segments {
                if self.ring_segment(c, layer, layers) {
                    edges.push((g(c, layer), g(c + 1, layer)));
                }
            }
        }

        for l in 0..layers {
            for c in 0..segments {
                let (here, up) = (g(c, l), g(c, l + 1));
                match self {
                    Self::Vertical => edges.push((here, up)),
                    Self::Triangular => {
                        edges.push((here, up));
                        edges.push((here, g(c + 1, l + 1)));
                    }
                    Self::Honeycomb | Self::Weave => {
                        // Odd layers are shifted by +1/2
                        if l % 2 == 0 {
                            edges.push((here, up));
                            if self == Self::Honeycomb {
                                edges.push((g(c + 1, l), up));
                            }
                        } else {
                            edges.push((here, g(c + 1, l + 1)));
                            if self == Self::Honeycomb {
                                edges.push((here, up));
                            }
                        }
                    }
                    Self::Diamond => {
                        edges.push((here, g(c + 1, l + 1)));
                        edges.push((g(c + 1, l), up));
                    }
                    Self::Star => {
                        edges.push((here, up));
                        edges.push((here, g(c + 1, l + 1)));
                        edges.push((g(c + 1, l), up));
                    }
                }
            }
        }

        edges
    }
}

/// Anchor points on the shell surface.
#[derive(Debug, Clone)]
pub struct AnchorGrid {
    segments: u32,
    layers: u32,
    points: Vec<DVec3>,
}

impl AnchorGrid {
    /// Samples `(segments + 1) × (layers + 1)` anchors on the outer surface.
    pub fn build(
        surface: &ShellSurface,
        connectivity: Connectivity,
        segments: u32,
        layers: u32,
    ) -> Self {
        let segments = segments.max(1);
        let layers = layers.max(1);
        let mut points = Vec::with_capacity(((segments + 1) * (layers + 1)) as usize);

        for l in 0..=layers {
            let z = surface.height() * f64::from(l) / f64::from(layers);
            let shift = if connectivity.staggers() && l % 2 == 1 {
                0.5
            } else {
                0.0
            };
            for c in 0..=segments {
                let angle = TAU * (f64::from(c) + shift) / f64::from(segments);
                let r = surface.outer_radius(angle, z);
                points.push(surface.point(angle, z, r));
            }
        }

        Self {
            segments,
            layers,
            points,
        }
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn layers(&self) -> u32 {
        self.layers
    }

    /// Number of anchors, seam column included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Anchor at `index`.
    pub fn point(&self, index: GridIndex) -> DVec3 {
        self.points[(index.layer * (self.segments + 1) + index.column) as usize]
    }
}

/// Polygon traced by the struts of the top frame ring.
///
/// Spokes of a top-rim fitter on a wireframe shell land on the chords of
/// this polygon, not on the round silhouette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRing {
    /// Distance from the axis to each anchor.
    pub radius: f64,
    /// Number of chords.
    pub segments: u32,
    /// Angle of the first anchor.
    pub phase: f64,
    /// Radius of the strut tube around each chord.
    pub strut_radius: f64,
    /// Height of the ring.
    pub z: f64,
}

impl FrameRing {
    /// Top frame ring of the lattice `AnchorGrid::build` lays out.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lamp_kernel::lattice::{Connectivity, FrameRing};
    /// use lamp_kernel::params::{PatternFamily, ShellParams};
    /// use lamp_kernel::settings::KernelConfig;
    /// use lamp_kernel::surface::ShellSurface;
    ///
    /// let params = ShellParams { pattern: PatternFamily::WireVertical, ..ShellParams::default() };
    /// let surface = ShellSurface::new(&params, &KernelConfig::default());
    /// let ring = FrameRing::top(&surface, Connectivity::Vertical, 4, 3, 1.0);
    /// // Square frame: the chord midpoint sits at r·cos(45°)
    /// let mid = ring.chord_radius(std::f64::consts::FRAC_PI_4);
    /// assert!((mid - ring.radius * std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    /// ```
    pub fn top(
        surface: &ShellSurface,
        connectivity: Connectivity,
        segments: u32,
        layers: u32,
        strut_radius: f64,
    ) -> Self {
        let segments = segments.max(3);
        let layers = layers.max(1);
        let shift = if connectivity.staggers() && layers % 2 == 1 {
            0.5
        } else {
            0.0
        };
        let phase = TAU * shift / f64::from(segments);
        let z = surface.height();
        Self {
            radius: surface.outer_radius(phase, z),
            segments,
            phase,
            strut_radius,
            z,
        }
    }

    /// Distance from the axis to the chord under `angle`.
    pub fn chord_radius(&self, angle: f64) -> f64 {
        let step = TAU / f64::from(self.segments);
        let offset = (angle - self.phase).rem_euclid(step) - 0.5 * step;
        self.radius * (0.5 * step).cos() / offset.cos()
    }
}

/// Builds the strut mesh of a wireframe shell.
pub fn build_lattice(
    surface: &ShellSurface,
    connectivity: Connectivity,
    segments: u32,
    layers: u32,
    strut_radius: f64,
    strut_segments: u32,
) -> Mesh {
    let anchors = AnchorGrid::build(surface, connectivity, segments, layers);
    let edges = connectivity.edges(anchors.segments(), anchors.layers());

    // Posts stacked along a straight silhouette are collinear; alternate
    // their ring phase by layer so the joint rings stay apart
    let half_step = PI / f64::from(strut_segments.max(3));
    let struts = edges.iter().filter_map(|(a, b)| {
        let phase = if a.layer % 2 == 1 { half_step } else { 0.0 };
        generate_strut_rotated(
            anchors.point(*a),
            anchors.point(*b),
            strut_radius,
            strut_segments,
            phase,
        )
    });

    // The seam column repeats column 0, so it gets no hub of its own
    let hubs = (0..=anchors.layers()).flat_map(|l| {
        let anchors = &anchors;
        (0..anchors.segments()).filter_map(move |c| {
            let p = anchors.point(GridIndex::new(c, l));
            let radial = DVec3::new(p.x, p.y, 0.0).normalize_or_zero() * strut_radius;
            generate_strut(p - radial, p + radial, strut_radius, strut_segments)
        })
    });

    let mesh = combine_struts(struts.chain(hubs));
    debug!(
        struts = edges.len(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Built lattice"
    );
    mesh
}
