//! # Lamp DNA
//!
//! Short shareable design codes for [`ShellParams`].
//!
//! ## Layout
//!
//! All multi-byte values are little-endian. Lengths are quantized to fixed
//! steps, so a round trip reproduces every packed field to within half a
//! step. Fields not listed keep their defaults on decode.
//!
//! | Bytes | Content |
//! |-------|---------|
//! | 0–1   | magic `LD` |
//! | 2     | format version |
//! | 3–8   | pattern, silhouette, fitter kind, rim placement, spoke count, internal ribs |
//! | 9–12  | seed |
//! | 13–50 | 19 `u16` fields (lengths, resolutions, counts, twist) |
//! | 51    | additive checksum of bytes 0–50 |
//!
//! ## Legacy codes
//!
//! Codes without the magic prefix are base64 (standard or URL-safe) JSON
//! parameter records, the format used before packing.

mod error;

#[cfg(test)]
mod tests;

pub use error::DnaError;

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use lamp_kernel::params::{FitterKind, PatternFamily, RimPlacement, ShellParams, SilhouetteFamily};
use tracing::debug;

/// Prefix of every packed code.
pub const MAGIC: [u8; 2] = *b"LD";

/// Current packing version.
pub const VERSION: u8 = 1;

/// Size of a packed code before base64.
pub const PACKED_LEN: usize = 52;

/// Step for heights, radii, diameters.
const LENGTH_STEP: f64 = 0.01;
/// Step for wall thickness, depths, scales and strut radius.
const FINE_STEP: f64 = 0.001;
/// Step for twist, in degrees.
const TWIST_STEP: f64 = 0.1;

/// Encodes the packed fields of `params` as a URL-safe code.
///
/// # Example
///
/// ```rust
/// use lamp_dna::{decode, encode};
/// use lamp_kernel::ShellParams;
///
/// let params = ShellParams { seed: 42, height: 120.25, ..ShellParams::default() };
/// let code = encode(&params);
/// let back = decode(&code).unwrap();
/// assert_eq!(back.seed, 42);
/// assert!((back.height - 120.25).abs() < 0.005);
/// ```
pub fn encode(params: &ShellParams) -> String {
    URL_SAFE_NO_PAD.encode(pack(params))
}

/// Encodes `params` in the legacy JSON format.
///
/// # Errors
///
/// `Legacy` if the record cannot be serialized.
pub fn encode_legacy(params: &ShellParams) -> Result<String, DnaError> {
    let json = serde_json::to_vec(params).map_err(|err| DnaError::Legacy(err.to_string()))?;
    Ok(STANDARD.encode(json))
}

/// Decodes a packed or legacy design code.
///
/// # Errors
///
/// See [`DnaError`]. Decoded values are not range checked; the kernel
/// validates them at generation time.
pub fn decode(code: &str) -> Result<ShellParams, DnaError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(DnaError::Empty);
    }

    let bytes = decode_base64(code)?;
    if bytes.starts_with(&MAGIC) {
        unpack(&bytes)
    } else {
        debug!(len = bytes.len(), "Falling back to legacy design code");
        serde_json::from_slice(&bytes).map_err(|err| DnaError::Legacy(err.to_string()))
    }
}

fn decode_base64(code: &str) -> Result<Vec<u8>, DnaError> {
    let mut last = None;
    for engine in [&URL_SAFE_NO_PAD, &URL_SAFE, &STANDARD, &STANDARD_NO_PAD] {
        match engine.decode(code) {
            Ok(bytes) => return Ok(bytes),
            Err(err) => last = Some(err),
        }
    }
    Err(DnaError::InvalidBase64(
        last.map(|err| err.to_string()).unwrap_or_default(),
    ))
}

/// Packs `params` into the fixed binary layout.
pub fn pack(params: &ShellParams) -> [u8; PACKED_LEN] {
    let mut w = Writer::default();
    w.bytes(&MAGIC);
    w.u8(VERSION);

    w.u8(params.pattern.index());
    w.u8(params.silhouette.index());
    w.u8(params.fitter.kind.index());
    w.u8(params.rim.placement.index());
    w.u8(saturate_u8(params.fitter.spoke_count));
    w.u8(saturate_u8(params.internal_ribs));
    w.u32(params.seed);

    w.fixed(params.height, LENGTH_STEP);
    w.fixed(params.top_radius, LENGTH_STEP);
    w.fixed(params.bottom_radius, LENGTH_STEP);
    w.fixed(params.wall_thickness, FINE_STEP);
    w.u16(saturate_u16(params.angular_resolution));
    w.u16(saturate_u16(params.height_resolution));
    w.u16(saturate_u16(params.rib_count));
    w.fixed(params.rib_depth, FINE_STEP);
    w.u16(saturate_u16(params.vertical_count));
    w.signed(params.twist_degrees, TWIST_STEP);
    w.fixed(params.scale, FINE_STEP);
    w.fixed(params.silhouette_intensity, FINE_STEP);
    w.fixed(params.strut_radius, FINE_STEP);
    w.fixed(params.internal_rib_depth, FINE_STEP);
    w.fixed(params.rim.height, LENGTH_STEP);
    w.fixed(params.fitter.inner_diameter, LENGTH_STEP);
    w.fixed(params.fitter.outer_diameter, LENGTH_STEP);
    w.fixed(params.fitter.ring_height, LENGTH_STEP);
    w.fixed(params.fitter.mount_height_from_base, LENGTH_STEP);

    let sum = checksum(&w.buf);
    w.u8(sum);

    let mut out = [0u8; PACKED_LEN];
    out.copy_from_slice(&w.buf);
    out
}

/// Unpacks a binary code onto the default parameters.
///
/// # Errors
///
/// `InvalidLength`, `UnsupportedVersion`, `Checksum` or `InvalidField`.
pub fn unpack(bytes: &[u8]) -> Result<ShellParams, DnaError> {
    if bytes.len() != PACKED_LEN {
        return Err(DnaError::InvalidLength {
            expected: PACKED_LEN,
            actual: bytes.len(),
        });
    }
    if bytes[2] != VERSION {
        return Err(DnaError::UnsupportedVersion(bytes[2]));
    }
    let (body, sum) = bytes.split_at(PACKED_LEN - 1);
    if checksum(body) != sum[0] {
        return Err(DnaError::Checksum);
    }

    let mut r = Reader { bytes: body, pos: 3 };
    let mut params = ShellParams::default();

    let pattern = r.u8();
    params.pattern = PatternFamily::from_index(pattern).ok_or(DnaError::InvalidField {
        field: "pattern",
        value: pattern.into(),
    })?;
    let silhouette = r.u8();
    params.silhouette =
        SilhouetteFamily::from_index(silhouette).ok_or(DnaError::InvalidField {
            field: "silhouette",
            value: silhouette.into(),
        })?;
    let kind = r.u8();
    params.fitter.kind = FitterKind::from_index(kind).ok_or(DnaError::InvalidField {
        field: "fitter.kind",
        value: kind.into(),
    })?;
    let placement = r.u8();
    params.rim.placement = RimPlacement::from_index(placement).ok_or(DnaError::InvalidField {
        field: "rim.placement",
        value: placement.into(),
    })?;
    params.fitter.spoke_count = r.u8().into();
    params.internal_ribs = r.u8().into();
    params.seed = r.u32();

    params.height = r.fixed(LENGTH_STEP);
    params.top_radius = r.fixed(LENGTH_STEP);
    params.bottom_radius = r.fixed(LENGTH_STEP);
    params.wall_thickness = r.fixed(FINE_STEP);
    params.angular_resolution = r.u16().into();
    params.height_resolution = r.u16().into();
    params.rib_count = r.u16().into();
    params.rib_depth = r.fixed(FINE_STEP);
    params.vertical_count = r.u16().into();
    params.twist_degrees = r.signed(TWIST_STEP);
    params.scale = r.fixed(FINE_STEP);
    params.silhouette_intensity = r.fixed(FINE_STEP);
    params.strut_radius = r.fixed(FINE_STEP);
    params.internal_rib_depth = r.fixed(FINE_STEP);
    params.rim.height = r.fixed(LENGTH_STEP);
    params.fitter.inner_diameter = r.fixed(LENGTH_STEP);
    params.fitter.outer_diameter = r.fixed(LENGTH_STEP);
    params.fitter.ring_height = r.fixed(LENGTH_STEP);
    params.fitter.mount_height_from_base = r.fixed(LENGTH_STEP);

    Ok(params)
}

fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

fn saturate_u8(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn saturate_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn u16(&mut self, value: u16) {
        self.bytes(&value.to_le_bytes());
    }

    fn u32(&mut self, value: u32) {
        self.bytes(&value.to_le_bytes());
    }

    /// Non-negative value in multiples of `step`, saturating.
    fn fixed(&mut self, value: f64, step: f64) {
        let q = (value / step).round();
        let q = if q.is_nan() { 0.0 } else { q.clamp(0.0, f64::from(u16::MAX)) };
        self.u16(q as u16);
    }

    /// Signed value in multiples of `step`, saturating.
    fn signed(&mut self, value: f64, step: f64) {
        let q = (value / step).round();
        let q = if q.is_nan() {
            0.0
        } else {
            q.clamp(f64::from(i16::MIN), f64::from(i16::MAX))
        };
        self.bytes(&(q as i16).to_le_bytes());
    }
}

/// Cursor over a length-checked packed buffer.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn fixed(&mut self, step: f64) -> f64 {
        f64::from(self.u16()) * step
    }

    fn signed(&mut self, step: f64) -> f64 {
        f64::from(i16::from_le_bytes(self.take())) * step
    }
}
