//! # Displacement Field
//!
//! Signed radial offset of the shell surface at `(angle, z)`.
//!
//! The field is built once per generation from [`ShellParams`]; every
//! per-family constant (seed points, automaton rows, frequencies) is
//! resolved in [`DisplacementField::new`], so [`DisplacementField::at`] is a
//! single allocation-free `match`.
//!
//! Offsets are in length units and are added to the silhouette radius.
//! Lattice families and [`PatternFamily::Smooth`] are flat.

pub mod hash;


use crate::params::{PatternFamily, ShellParams};
use glam::DVec2;
use hash::{fbm3, hash3, seed_points, smoothstep, triangle_wave, value_noise3};
use std::f64::consts::{PI, TAU};

/// Capacity of the seed point table for distance-field families.
pub const MAX_SEED_POINTS: usize = 48;

/// Fewest seed points a distance-field pattern uses.
const MIN_SEED_POINTS: usize = 4;

/// Widest elementary automaton row (one bit per column).
const MAX_AUTOMATON_WIDTH: u32 = 64;

/// Tallest precomputed automaton.
const MAX_AUTOMATON_ROWS: u32 = 1024;

/// Extra phase wound into spiral ribs from bottom to top.
const SPIRAL_TURN: f64 = PI / 2.0;

/// Greek key motif, one row per nibble.
const MEANDER: [u8; 4] = [0b1111, 0b0001, 0b1101, 0b1001];

/// Precomputed displacement field for one parameter record.
///
/// # Example
///
/// ```rust
/// use lamp_kernel::displacement::DisplacementField;
/// use lamp_kernel::params::ShellParams;
///
/// let params = ShellParams { rib_count: 24, rib_depth: 0.4, ..ShellParams::default() };
/// let field = DisplacementField::new(&params);
/// assert!((field.at(0.0, 0.0) - 0.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DisplacementField {
    pattern: PatternFamily,
    depth: f64,
    count: f64,
    rows: f64,
    twist: f64,
    scale: f64,
    seed: u32,
    height: f64,
    /// Circumference over height, so cell distances are roughly isotropic.
    aspect: f64,
    seeds: [DVec2; MAX_SEED_POINTS],
    active_seeds: usize,
    cell: f64,
    automaton: Vec<u64>,
    automaton_width: u32,
}

impl DisplacementField {
    /// Resolves every per-family constant for `params`.
    pub fn new(params: &ShellParams) -> Self {
        let height = if params.height > 0.0 { params.height } else { 1.0 };
        let mean_radius = 0.5 * (params.top_radius + params.bottom_radius).abs();
        let aspect = (TAU * mean_radius / height).max(1e-3);

        let mut seeds = [DVec2::ZERO; MAX_SEED_POINTS];
        seed_points(params.seed, &mut seeds);
        let active_seeds = (params.rib_count as usize).clamp(MIN_SEED_POINTS, MAX_SEED_POINTS);
        let cell = (aspect / active_seeds as f64).sqrt();

        let automaton_width = params.rib_count.clamp(1, MAX_AUTOMATON_WIDTH);
        let automaton = if params.pattern == PatternFamily::CellularAutomata {
            automaton_rows(
                params.seed,
                automaton_width,
                params.vertical_count.clamp(1, MAX_AUTOMATON_ROWS),
            )
        } else {
            Vec::new()
        };

        Self {
            pattern: params.pattern,
            depth: params.rib_depth,
            count: f64::from(params.rib_count.max(1)),
            rows: f64::from(params.vertical_count.max(1)),
            twist: params.twist_degrees.to_radians(),
            scale: params.scale,
            seed: params.seed,
            height,
            aspect,
            seeds,
            active_seeds,
            cell,
            automaton,
            automaton_width,
        }
    }

    /// Returns the pattern this field evaluates.
    pub fn pattern(&self) -> PatternFamily {
        self.pattern
    }

    /// Radial offset at `angle` (radians) and absolute height `z`.
    ///
    /// `z` is clamped to the shell; any angle is accepted and wrapped.
    pub fn at(&self, angle: f64, z: f64) -> f64 {
        use PatternFamily::*;

        let t = (z / self.height).clamp(0.0, 1.0);
        let a = (angle - t * self.twist).rem_euclid(TAU);
        let d = self.depth;
        let n = self.count;
        let v = self.rows;

        match self.pattern {
            Smooth | WireVertical | WireTriangular | WireHoneycomb | WireDiamond | WireStar
            | WireWeave => 0.0,

            // Periodic
            RibbedDrum => d * (n * a).cos(),
            SpiralRibs => d * (n * (a - SPIRAL_TURN * t)).cos(),
            Waves => d * (TAU * v * t).sin(),
            DiagonalWaves => d * (n * a + TAU * v * t).sin(),
            Knurling => {
                let u = n * a / TAU;
                d * (triangle_wave(u + v * t) + triangle_wave(u - v * t) - 1.0)
            }
            Chevron => d * (TAU * (v * t + 0.5 * triangle_wave(n * a / TAU))).sin(),
            Scallops => d * (2.0 * (0.5 * n * a).sin().abs() - 1.0),
            Fluted => d * (1.0 - 2.0 * (0.5 * n * a).sin().abs().sqrt()),
            Twisted => {
                let c = (n * a + TAU * t).cos();
                d * c.signum() * c.abs().sqrt()
            }
            Bamboo => d * (PI * v * t).cos().abs().powi(16),
            Herringbone => {
                let u = n * a / TAU;
                let dir = if (u.floor() as i64) % 2 == 0 { 1.0 } else { -1.0 };
                d * (TAU * (v * t + dir * (u - u.floor()))).sin()
            }
            Ripple => d * (TAU * v * t + 0.5 * (n * a).sin()).sin(),
            Petals => d * (n * a).cos().max(0.0).powi(3),
            Braided => {
                let w = TAU * v * t;
                d * ((n * a + w).cos() + (n * a - w).cos() + (2.0 * n * a).cos()) / 3.0
            }
            Pleated => d * (2.0 * triangle_wave(n * a / TAU) - 1.0),
            Zigzag => d * (2.0 * triangle_wave(n * a / TAU + 0.5 * triangle_wave(v * t)) - 1.0),
            Corrugated => d * (3.0 * (n * a).sin()).tanh() / 3.0f64.tanh(),
            Lotus => {
                let layer = (v * t).floor();
                let phase = if layer % 2.0 == 0.0 { 0.0 } else { PI };
                d * (n * a + phase).cos().max(0.0) * (v * t - layer)
            }
            Dimples => d * (n * a).cos() * (TAU * v * t).cos(),
            Helix => d * (2.0 * (0.5 * (n * a - TAU * v * t)).cos().abs() - 1.0),

            // Distance field
            Voronoi => {
                let (f1, _) = self.nearest(a, t);
                d * (1.0 - f1.min(1.0))
            }
            VoronoiEdges => {
                let (f1, f2) = self.nearest(a, t);
                d * (1.0 - ((f2 - f1) / 0.2).min(1.0))
            }
            CrackedEarth => {
                let (f1, f2) = self.nearest(a, t);
                -d * (1.0 - ((f2 - f1) / 0.08).min(1.0))
            }
            Bubbles => {
                let (f1, _) = self.nearest(a, t);
                d * (1.0 - (f1 / 0.6).powi(2)).max(0.0).sqrt()
            }
            Crystal => {
                let (f1, _) = self.nearest(a, t);
                d * ((1.0 - f1.min(1.0)) * 4.0).floor() / 4.0
            }
            Pebbles => {
                let (f1, f2) = self.nearest(a, t);
                d * smoothstep(0.0, 0.3, f2 - f1)
            }

            // Hash noise
            Organic => {
                let [x, y, z] = self.noise_point(a, t);
                d * (2.0 * fbm3(x, y, z, self.seed, 2) - 1.0)
            }
            Cellular => {
                let [x, y, z] = self.noise_point(a, t);
                d * (2.0 * smoothstep(0.45, 0.55, value_noise3(x, y, z, self.seed)) - 1.0)
            }
            Coral => {
                let [x, y, z] = self.noise_point(a, t);
                d * (1.0 - (2.0 * fbm3(x, y, z, self.seed, 2) - 1.0).abs()).powi(2)
            }
            Veins => {
                let [x, y, z] = self.noise_point(a, t);
                d * (1.0 - (2.0 * value_noise3(x, y, z, self.seed) - 1.0).abs()).powi(8)
            }
            Bark => {
                let [x, y, z] = self.noise_point(a, t);
                d * (2.0 * value_noise3(2.0 * x, 2.0 * y, 0.25 * z, self.seed) - 1.0)
            }
            Hammered => {
                let [x, y, z] = self.noise_point(a, t);
                -d * value_noise3(2.0 * x, 2.0 * y, 2.0 * z, self.seed).powi(3)
            }
            Moss => {
                let [x, y, z] = self.noise_point(a, t);
                d * (2.0 * fbm3(4.0 * x, 4.0 * y, 4.0 * z, self.seed, 2) - 1.0)
            }
            Lava => {
                let [x, y, z] = self.noise_point(a, t);
                d * (2.0 * smoothstep(0.35, 0.65, fbm3(x, y, z, self.seed, 2)) - 1.0)
            }

            // Tiling
            DiamondPlate => {
                let tile = self.tile(a, t, false);
                let (du, dv) = (tile.fu - 0.5, tile.fv - 0.5);
                let (p, q) = if tile.even() {
                    (du + dv, du - dv)
                } else {
                    (du - dv, du + dv)
                };
                d * (1.0 - 3.0 * p.abs() - 0.8 * q.abs()).max(0.0)
            }
            Bricks => {
                let tile = self.tile(a, t, true);
                if tile.fu < 0.06 || tile.fv < 0.1 {
                    0.0
                } else {
                    d
                }
            }
            GeometricTiles => {
                let tile = self.tile(a, t, false);
                let inset = 1.0 - 2.0 * (tile.fu - 0.5).abs().max((tile.fv - 0.5).abs());
                d * tile.sign() * inset
            }
            CellularAutomata => d * self.automaton_cell(a, t),
            Checkerboard => d * self.tile(a, t, false).sign(),
            Hexagons => {
                let tile = self.tile(a, t, true);
                let (du, dv) = ((tile.fu - 0.5).abs(), (tile.fv - 0.5).abs());
                let hex = (du * 0.866 + dv * 0.5).max(dv);
                d * (1.0 - 2.0 * hex).max(0.0)
            }
            Mosaic => {
                let tile = self.tile(a, t, false);
                if tile.fu < 0.08 || tile.fv < 0.08 {
                    0.0
                } else {
                    d * hash3(tile.ix as f64, tile.iy as f64, 3.0, self.seed)
                }
            }
            Studs => {
                let tile = self.tile(a, t, false);
                let r = (tile.fu - 0.5).hypot(tile.fv - 0.5);
                d * (1.0 - (r / 0.35).powi(2)).max(0.0).sqrt()
            }
            Basketweave => {
                let tile = self.tile(a, t, false);
                if tile.even() {
                    d * (PI * tile.fv).sin()
                } else {
                    d * (PI * tile.fu).sin()
                }
            }
            Meander => {
                let su = (4.0 * n * a / TAU).floor() as i64;
                let sv = (4.0 * v * t).floor() as i64;
                let bit = (MEANDER[sv.rem_euclid(4) as usize] >> su.rem_euclid(4)) & 1;
                d * f64::from(bit)
            }
            Triangles => {
                let tile = self.tile(a, t, false);
                let upper = tile.fu + tile.fv > 1.0;
                if tile.even() != upper {
                    d
                } else {
                    -d
                }
            }
            Scales => {
                let tile = self.tile(a, t, true);
                let r = (tile.fu - 0.5).hypot(tile.fv);
                d * (1.0 - r).max(0.0)
            }
        }
    }

    /// Nearest and second-nearest seed distance, in cell units.
    fn nearest(&self, a: f64, t: f64) -> (f64, f64) {
        let u = a / TAU;
        let mut f1 = f64::MAX;
        let mut f2 = f64::MAX;
        for seed in &self.seeds[..self.active_seeds] {
            let mut du = (u - seed.x).abs();
            if du > 0.5 {
                du = 1.0 - du;
            }
            let dist = (du * self.aspect).hypot(t - seed.y);
            if dist < f1 {
                f2 = f1;
                f1 = dist;
            } else if dist < f2 {
                f2 = dist;
            }
        }
        (f1 / self.cell, f2 / self.cell)
    }

    /// Seamless noise coordinates: a ring around the axis, stretched by
    /// the repetition counts and `scale`.
    fn noise_point(&self, a: f64, t: f64) -> [f64; 3] {
        let ring = self.count * self.scale / TAU;
        [ring * a.cos(), ring * a.sin(), t * self.rows * self.scale]
    }

    /// Cell index and in-cell fraction. `stagger` shifts odd rows half a
    /// cell around the shell.
    fn tile(&self, a: f64, t: f64, stagger: bool) -> Tile {
        let w = t * self.rows;
        let iy = w.floor() as i64;
        let shift = if stagger && iy % 2 != 0 { 0.5 } else { 0.0 };
        let u = self.count * a / TAU + shift;
        let ix = (u.floor() as i64).rem_euclid(self.count as i64);
        Tile {
            ix,
            iy,
            fu: u - u.floor(),
            fv: w - w.floor(),
        }
    }

    fn automaton_cell(&self, a: f64, t: f64) -> f64 {
        let Some(last) = self.automaton.len().checked_sub(1) else {
            return 0.0;
        };
        let row = ((t * self.rows).floor() as usize).min(last);
        let width = self.automaton_width;
        let col = ((a / TAU * f64::from(width)).floor() as u32).min(width - 1);
        if (self.automaton[row] >> col) & 1 == 1 {
            1.0
        } else {
            -1.0
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tile {
    ix: i64,
    iy: i64,
    fu: f64,
    fv: f64,
}

impl Tile {
    fn even(&self) -> bool {
        (self.ix + self.iy).rem_euclid(2) == 0
    }

    fn sign(&self) -> f64 {
        if self.even() {
            1.0
        } else {
            -1.0
        }
    }
}

/// Runs elementary rule 30 on a ring of `width` cells.
pub(crate) fn rule30(row: u64, width: u32) -> u64 {
    let mut next = 0u64;
    for i in 0..width {
        let left = (row >> ((i + width - 1) % width)) & 1;
        let center = (row >> i) & 1;
        let right = (row >> ((i + 1) % width)) & 1;
        next |= (left ^ (center | right)) << i;
    }
    next
}

/// First row seeded from the design seed, each next row by rule 30.
fn automaton_rows(seed: u32, width: u32, rows: u32) -> Vec<u64> {
    let mut first = 0u64;
    for i in 0..width {
        if hash3(f64::from(i), 0.0, 7.0, seed) > 0.5 {
            first |= 1 << i;
        }
    }
    let mut out = Vec::with_capacity(rows as usize);
    let mut row = first;
    for _ in 0..rows {
        out.push(row);
        row = rule30(row, width);
    }
    out
}

/// Displacement at `(angle, height)` for a parameter record.
///
/// Builds a [`DisplacementField`] per call; builders that sample many
/// points hold on to one field instead.
pub fn displacement_at(angle: f64, height: f64, params: &ShellParams) -> f64 {
    DisplacementField::new(params).at(angle, height)
}
