//! Panel outlines.
//!
//! Each outline answers an approximate signed distance to its boundary in
//! panel coordinates (`x` right, `y` up, both in length units): positive
//! inside, negative outside. The border band and the inside test both read
//! from it.

use serde::{Deserialize, Serialize};

/// Outline of a lithophane panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlineShape {
    /// Flat rectangle.
    #[default]
    Rect,
    /// Ellipse inscribed in the panel.
    Circle,
    /// Heart curve `(x² + y² - 1)³ - x²y³ ≤ 0` fitted to the panel.
    Heart,
    /// Rectangle with rounded corners.
    Badge,
    /// Rectangle bent on an arc around the vertical axis.
    Curved,
    /// Rectangle wrapped all the way around the vertical axis.
    Cylindrical,
}

/// Corner radius of a badge as a fraction of the shorter side.
const BADGE_CORNER: f64 = 0.2;

impl OutlineShape {
    /// Signed distance from `(px, py)` to the outline of a `width × height`
    /// panel.
    pub fn edge_distance(self, px: f64, py: f64, width: f64, height: f64) -> f64 {
        match self {
            Self::Rect | Self::Curved | Self::Cylindrical => {
                px.min(width - px).min(py).min(height - py)
            }
            Self::Circle => {
                let (a, b) = (0.5 * width, 0.5 * height);
                let rho = ((px - a) / a).hypot((py - b) / b);
                (1.0 - rho) * a.min(b)
            }
            Self::Badge => {
                let corner = BADGE_CORNER * width.min(height);
                let qx = (px - 0.5 * width).abs() - (0.5 * width - corner);
                let qy = (py - 0.5 * height).abs() - (0.5 * height - corner);
                let outside = qx.max(0.0).hypot(qy.max(0.0));
                let inside = qx.max(qy).min(0.0);
                corner - outside - inside
            }
            Self::Heart => {
                let x = (px - 0.5 * width) * 2.4 / width;
                let y = py * 2.35 / height - 1.05;
                let s = x * x + y * y - 1.0;
                let f = s.powi(3) - x * x * y.powi(3);
                let fx = 6.0 * x * s * s - 2.0 * x * y.powi(3);
                let fy = 6.0 * y * s * s - 3.0 * x * x * y * y;
                let scale = (width / 2.4).min(height / 2.35);
                -f / fx.hypot(fy).max(1e-9) * scale
            }
        }
    }

    /// Whether `(px, py)` lies inside the outline.
    pub fn contains(self, px: f64, py: f64, width: f64, height: f64) -> bool {
        self.edge_distance(px, py, width, height) >= 0.0
    }

    /// Outlines whose panel is bent around the vertical axis.
    pub fn is_wrapped(self) -> bool {
        matches!(self, Self::Curved | Self::Cylindrical)
    }
}
