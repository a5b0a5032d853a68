//! WASM-facing entry points for the lamp kernel.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Parameters cross the boundary as JSON records, images as
//! packed RGB bytes. Native tests call the `*_internal` helpers, which
//! return Rust types instead of `JsValue`.
//!
//! ```
//! let mesh = lamp_wasm::generate_shell_internal(r#"{"angular_resolution": 24}"#).unwrap();
//! assert!(mesh.triangle_count() > 0);
//! ```

mod diagnostics;
mod mesh_handle;

pub use diagnostics::Diagnostic;
pub use mesh_handle::MeshHandle;

use config::constants::DEFAULT_ANGULAR_RESOLUTION;
use lamp_kernel::{LithophaneParams, LuminanceGrid, ShellParams};
use wasm_bindgen::prelude::*;

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "lamp-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Returns the default angular resolution of a shell.
///
/// # Examples
/// ```
/// assert!(lamp_wasm::default_angular_resolution() >= 12);
/// ```
#[wasm_bindgen]
pub fn default_angular_resolution() -> u32 {
    DEFAULT_ANGULAR_RESOLUTION
}

/// Generates a lampshade from a JSON `ShellParams` record.
///
/// # Errors
/// Throws a plain `{ message, parameter }` object when the record is
/// malformed or a parameter is out of range.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const mesh = generate_shell(JSON.stringify({ pattern: "ribbed_drum" }));
/// // console.log("Vertices:", mesh.vertex_count);
/// ```
#[wasm_bindgen]
pub fn generate_shell(json: &str) -> Result<MeshHandle, JsValue> {
    generate_shell_internal(json).map_err(|diag| diag.to_js_object())
}

/// Host-only helper behind [`generate_shell`].
pub fn generate_shell_internal(json: &str) -> Result<MeshHandle, Diagnostic> {
    let params: ShellParams = serde_json::from_str(json)?;
    let mesh = lamp_kernel::generate_shell(&params)?;
    Ok(MeshHandle::from_mesh(&mesh))
}

/// Generates a lithophane from a JSON `LithophaneParams` record and packed
/// `RGBRGB…` pixels, top row first.
///
/// # Errors
/// Throws a plain `{ message, parameter }` object on malformed input.
#[wasm_bindgen]
pub fn generate_lithophane(
    json: &str,
    width: u32,
    height: u32,
    rgb: &[u8],
) -> Result<MeshHandle, JsValue> {
    generate_lithophane_internal(json, width, height, rgb).map_err(|diag| diag.to_js_object())
}

/// Host-only helper behind [`generate_lithophane`].
pub fn generate_lithophane_internal(
    json: &str,
    width: u32,
    height: u32,
    rgb: &[u8],
) -> Result<MeshHandle, Diagnostic> {
    let params: LithophaneParams = serde_json::from_str(json)?;
    let image = LuminanceGrid::from_rgb_bytes(width, height, rgb)?;
    let mesh = lamp_kernel::generate_lithophane(&image, &params)?;
    Ok(MeshHandle::from_mesh(&mesh))
}

/// Encodes a JSON `ShellParams` record as a short design code.
///
/// # Errors
/// Throws a plain `{ message, parameter }` object on a malformed record.
#[wasm_bindgen]
pub fn encode_design(json: &str) -> Result<String, JsValue> {
    encode_design_internal(json).map_err(|diag| diag.to_js_object())
}

/// Host-only helper behind [`encode_design`].
pub fn encode_design_internal(json: &str) -> Result<String, Diagnostic> {
    let params: ShellParams = serde_json::from_str(json)?;
    Ok(lamp_dna::encode(&params))
}

/// Decodes a design code into a JSON `ShellParams` record.
///
/// # Errors
/// Throws a plain `{ message, parameter }` object when the code is corrupt.
#[wasm_bindgen]
pub fn decode_design(code: &str) -> Result<String, JsValue> {
    decode_design_internal(code).map_err(|diag| diag.to_js_object())
}

/// Host-only helper behind [`decode_design`].
pub fn decode_design_internal(code: &str) -> Result<String, Diagnostic> {
    let params = lamp_dna::decode(code)?;
    Ok(serde_json::to_string(&params)?)
}
