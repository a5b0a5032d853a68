//! # Config Crate
//!
//! Centralized configuration constants for the lampshade and lithophane
//! mesh kernel. All magic numbers and tunable parameters are defined here
//! so the geometry builders stay declarative.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{RADIUS_FLOOR, WELD_EPSILON, approx_zero};
//!
//! // Degenerate radii are clamped, never rejected
//! let radius: f64 = -0.4;
//! assert_eq!(radius.max(RADIUS_FLOOR), RADIUS_FLOOR);
//!
//! // Vertices closer than WELD_EPSILON are merged by the assembler
//! assert!(approx_zero(WELD_EPSILON * 1e-6));
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Printable Defaults**: Floors and margins sized for FDM printing in mm

pub mod constants;
