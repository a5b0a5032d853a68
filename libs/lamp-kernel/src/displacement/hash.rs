//! Deterministic hashing and value noise.
//!
//! These are not general-purpose random generators: the same inputs always
//! reproduce the same outputs, which is what makes a design seed shareable.

use glam::DVec2;

/// Hashes a 3D coordinate and seed into `[0, 1)`.
///
/// Sine-fract hash. Clusters slightly, which reads as organic texture.
///
/// # Example
///
/// ```rust
/// use lamp_kernel::displacement::hash::hash3;
///
/// let h = hash3(1.0, 2.0, 3.0, 42);
/// assert!((0.0..1.0).contains(&h));
/// assert_eq!(h.to_bits(), hash3(1.0, 2.0, 3.0, 42).to_bits());
/// ```
#[inline]
pub fn hash3(x: f64, y: f64, z: f64, seed: u32) -> f64 {
    let s = f64::from(seed % 65_521);
    let h = (x * 127.1 + y * 311.7 + z * 74.7 + s * 17.13).sin() * 43_758.545_312_3;
    let f = h - h.floor();
    // h - floor(h) rounds up to 1.0 for tiny negative h
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

#[inline]
fn smoothstep01(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Trilinear value noise in `[0, 1)` over an integer lattice.
pub fn value_noise3(x: f64, y: f64, z: f64, seed: u32) -> f64 {
    let (x0, y0, z0) = (x.floor(), y.floor(), z.floor());
    let (tx, ty, tz) = (
        smoothstep01(x - x0),
        smoothstep01(y - y0),
        smoothstep01(z - z0),
    );

    let c = |dx: f64, dy: f64, dz: f64| hash3(x0 + dx, y0 + dy, z0 + dz, seed);

    let x00 = lerp(c(0.0, 0.0, 0.0), c(1.0, 0.0, 0.0), tx);
    let x10 = lerp(c(0.0, 1.0, 0.0), c(1.0, 1.0, 0.0), tx);
    let x01 = lerp(c(0.0, 0.0, 1.0), c(1.0, 0.0, 1.0), tx);
    let x11 = lerp(c(0.0, 1.0, 1.0), c(1.0, 1.0, 1.0), tx);

    lerp(lerp(x00, x10, ty), lerp(x01, x11, ty), tz)
}

/// Sums `octaves` layers of value noise, normalized back into `[0, 1)`.
pub fn fbm3(x: f64, y: f64, z: f64, seed: u32, octaves: u32) -> f64 {
    let mut sum = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut norm = 0.0;
    for octave in 0..octaves.max(1) {
        sum += amplitude
            * value_noise3(
                x * frequency,
                y * frequency,
                z * frequency,
                seed.wrapping_add(octave * 101),
            );
        norm += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    sum / norm
}

/// Fills `points` with seed positions on the unit square `[0,1)²`.
///
/// `x` runs around the shell (wrapping), `y` runs up the height.
pub fn seed_points(seed: u32, points: &mut [DVec2]) {
    for (i, p) in points.iter_mut().enumerate() {
        let i = i as f64;
        *p = DVec2::new(hash3(i, 1.0, 0.5, seed), hash3(i, 2.0, 0.25, seed));
    }
}

/// Triangle wave in `[0, 1]` with period 1.
#[inline]
pub fn triangle_wave(x: f64) -> f64 {
    1.0 - 2.0 * ((x - x.floor()) - 0.5).abs()
}

/// Hermite smoothstep between two edges.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    smoothstep01(((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0))
}
