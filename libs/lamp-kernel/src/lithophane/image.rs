//! Luminance grids decoded from raster images.

use crate::error::{KernelError, KernelResult};

/// RGB raster handed over by the image collaborator.
///
/// Row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceGrid {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl LuminanceGrid {
    /// Wraps `pixels` in row-major order.
    ///
    /// # Errors
    ///
    /// `InvalidParameter("image")` when a dimension is zero or the pixel
    /// count does not match.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> KernelResult<Self> {
        if width == 0 || height == 0 {
            return Err(KernelError::invalid(
                "image",
                format!("dimensions must be positive (got {width}x{height})"),
            ));
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(KernelError::invalid(
                "image",
                format!("expected {expected} pixels, got {}", pixels.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a grid from packed `RGBRGB…` bytes.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> KernelResult<Self> {
        if bytes.len() % 3 != 0 {
            return Err(KernelError::invalid(
                "image",
                format!("RGB buffer length {} is not a multiple of 3", bytes.len()),
            ));
        }
        let pixels = bytes.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::new(width, height, pixels)
    }

    /// Builds a grid from 8-bit gray levels.
    pub fn from_gray(width: u32, height: u32, levels: &[u8]) -> KernelResult<Self> {
        Self::new(width, height, levels.iter().map(|&l| [l, l, l]).collect())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rec.601 luminance of pixel `(x, y)` in `[0, 1]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lamp_kernel::lithophane::LuminanceGrid;
    ///
    /// let grid = LuminanceGrid::new(1, 1, vec![[255, 255, 255]]).unwrap();
    /// assert!((grid.luminance(0, 0) - 1.0).abs() < 1e-9);
    /// ```
    pub fn luminance(&self, x: u32, y: u32) -> f64 {
        let [r, g, b] = self.pixels[(y * self.width + x) as usize];
        (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
    }

    /// Luminance plane, optionally box blurred by `radius` pixels.
    pub(crate) fn plane(&self, radius: u32) -> Plane {
        let mut values: Vec<f64> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| self.luminance(x, y))
            .collect();
        if radius > 0 {
            box_blur(&mut values, self.width as usize, self.height as usize, radius as usize);
        }
        Plane {
            width: self.width as usize,
            height: self.height as usize,
            values,
        }
    }
}

/// Dense luminance values in row-major order.
#[derive(Debug, Clone)]
pub(crate) struct Plane {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl Plane {
    /// Bilinear sample at continuous pixel coordinates, clamped to the edges.
    pub(crate) fn sample(&self, x: f64, y: f64) -> f64 {
        let x = x.clamp(0.0, (self.width - 1) as f64);
        let y = y.clamp(0.0, (self.height - 1) as f64);
        let (x0, y0) = (x.floor() as usize, y.floor() as usize);
        let (x1, y1) = ((x0 + 1).min(self.width - 1), (y0 + 1).min(self.height - 1));
        let (tx, ty) = (x - x0 as f64, y - y0 as f64);

        let at = |xx: usize, yy: usize| self.values[yy * self.width + xx];
        let top = at(x0, y0) + (at(x1, y0) - at(x0, y0)) * tx;
        let bottom = at(x0, y1) + (at(x1, y1) - at(x0, y1)) * tx;
        top + (bottom - top) * ty
    }
}

/// Separable box blur with clamped edges.
fn box_blur(values: &mut [f64], width: usize, height: usize, radius: usize) {
    let mut scratch = vec![0.0; values.len()];

    for y in 0..height {
        for x in 0..width {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(width - 1);
            let row = &values[y * width..(y + 1) * width];
            scratch[y * width + x] = row[lo..=hi].iter().sum::<f64>() / (hi - lo + 1) as f64;
        }
    }

    for x in 0..width {
        for y in 0..height {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius).min(height - 1);
            let sum: f64 = (lo..=hi).map(|yy| scratch[yy * width + x]).sum();
            values[y * width + x] = sum / (hi - lo + 1) as f64;
        }
    }
}
