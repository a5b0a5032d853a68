//! Tests for design codes.

use super::*;
use approx::assert_abs_diff_eq;
use base64::Engine as _;
use lamp_kernel::params::{FitterSpec, RimSpec};
use proptest::prelude::*;

fn sample() -> ShellParams {
    ShellParams {
        pattern: PatternFamily::Voronoi,
        silhouette: SilhouetteFamily::Bell,
        height: 123.456,
        top_radius: 44.444,
        bottom_radius: 66.666,
        wall_thickness: 1.2345,
        angular_resolution: 200,
        height_resolution: 80,
        seed: 0xDEAD_BEEF,
        rib_count: 17,
        rib_depth: 2.5,
        vertical_count: 9,
        twist_degrees: -45.67,
        scale: 1.75,
        silhouette_intensity: 0.42,
        strut_radius: 1.1,
        internal_ribs: 4,
        internal_rib_depth: 2.25,
        rim: RimSpec {
            placement: RimPlacement::Both,
            height: 6.5,
            thickness: 2.0,
        },
        fitter: FitterSpec {
            kind: FitterKind::Spider,
            inner_diameter: 28.5,
            outer_diameter: 38.0,
            ring_height: 6.0,
            mount_height_from_base: 20.0,
            spoke_count: 4,
            ..FitterSpec::default()
        },
    }
}

#[test]
fn test_packed_layout() {
    let bytes = pack(&sample());
    assert_eq!(bytes.len(), PACKED_LEN);
    assert_eq!(&bytes[..2], b"LD");
    assert_eq!(bytes[2], VERSION);
    assert_eq!(bytes[3], PatternFamily::Voronoi.index());
    assert_eq!(&bytes[9..13], &0xDEAD_BEEFu32.to_le_bytes());
    // Height 123.456 → 12346 hundredths
    assert_eq!(&bytes[13..15], &12346u16.to_le_bytes());
}

#[test]
fn test_code_is_url_safe() {
    let code = encode(&sample());
    assert!(code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    // 52 bytes → 70 characters without padding
    assert_eq!(code.len(), 70);
}

#[test]
fn test_round_trip_within_precision() {
    let original = sample();
    let back = decode(&encode(&original)).unwrap();

    assert_eq!(back.pattern, original.pattern);
    assert_eq!(back.silhouette, original.silhouette);
    assert_eq!(back.seed, original.seed);
    assert_eq!(back.angular_resolution, 200);
    assert_eq!(back.rib_count, 17);
    assert_eq!(back.internal_ribs, 4);
    assert_eq!(back.rim.placement, RimPlacement::Both);
    assert_eq!(back.fitter.kind, FitterKind::Spider);
    assert_eq!(back.fitter.spoke_count, 4);

    assert_abs_diff_eq!(back.height, original.height, epsilon = 0.005);
    assert_abs_diff_eq!(back.top_radius, original.top_radius, epsilon = 0.005);
    assert_abs_diff_eq!(back.wall_thickness, original.wall_thickness, epsilon = 0.0005);
    assert_abs_diff_eq!(back.twist_degrees, original.twist_degrees, epsilon = 0.05);
    assert_abs_diff_eq!(back.fitter.mount_height_from_base, 20.0, epsilon = 0.005);
}

#[test]
fn test_unpacked_fields_take_defaults() {
    let original = ShellParams {
        rim: RimSpec {
            thickness: 3.5,
            ..RimSpec::default()
        },
        ..sample()
    };
    let back = decode(&encode(&original)).unwrap();
    assert_abs_diff_eq!(back.rim.thickness, RimSpec::default().thickness);
    assert_abs_diff_eq!(back.fitter.spoke_width, FitterSpec::default().spoke_width);
}

#[test]
fn test_truncated_code_is_rejected() {
    let bytes = pack(&sample());
    let code = URL_SAFE_NO_PAD.encode(&bytes[..40]);
    assert_eq!(
        decode(&code),
        Err(DnaError::InvalidLength {
            expected: PACKED_LEN,
            actual: 40
        })
    );
}

#[test]
fn test_corruption_is_detected() {
    let mut bytes = pack(&sample());
    bytes[20] ^= 0x40;
    assert_eq!(unpack(&bytes), Err(DnaError::Checksum));

    let mut future = pack(&sample());
    future[2] = 9;
    assert_eq!(unpack(&future), Err(DnaError::UnsupportedVersion(9)));
}

#[test]
fn test_unknown_index_names_field() {
    let mut bytes = pack(&sample());
    bytes[4] = 200;
    bytes[PACKED_LEN - 1] = checksum(&bytes[..PACKED_LEN - 1]);
    let err = unpack(&bytes).unwrap_err();
    assert_eq!(err.field(), Some("silhouette"));
}

#[test]
fn test_legacy_json_codes() {
    let original = sample();
    let standard = encode_legacy(&original).unwrap();
    assert_eq!(decode(&standard).unwrap(), original);

    let json = br#"{"pattern":"voronoi","seed":9}"#;
    let url_safe = URL_SAFE.encode(json);
    let back = decode(&url_safe).unwrap();
    assert_eq!(back.pattern, PatternFamily::Voronoi);
    assert_eq!(back.seed, 9);
    assert_abs_diff_eq!(back.height, ShellParams::default().height);
}

#[test]
fn test_garbage_is_rejected() {
    assert_eq!(decode("   "), Err(DnaError::Empty));
    assert!(matches!(decode("%%%"), Err(DnaError::InvalidBase64(_))));
    let not_json = STANDARD.encode(b"hello world");
    assert!(matches!(decode(&not_json), Err(DnaError::Legacy(_))));
}

#[test]
fn test_values_saturate() {
    let params = ShellParams {
        height: 1.0e6,
        twist_degrees: -1.0e9,
        wall_thickness: -3.0,
        ..ShellParams::default()
    };
    let back = unpack(&pack(&params)).unwrap();
    assert_abs_diff_eq!(back.height, 655.35, epsilon = 1e-9);
    assert_abs_diff_eq!(back.twist_degrees, -3276.8, epsilon = 1e-9);
    assert_abs_diff_eq!(back.wall_thickness, 0.0);
}

proptest! {
    #[test]
    fn packed_fields_round_trip(
        pattern in 0u8..53,
        seed in any::<u32>(),
        height in 1.0f64..600.0,
        depth in 0.0f64..20.0,
        twist in -720.0f64..720.0,
        ribs in 1u32..500,
    ) {
        let params = ShellParams {
            pattern: PatternFamily::from_index(pattern).unwrap_or_default(),
            seed,
            height,
            rib_depth: depth,
            twist_degrees: twist,
            rib_count: ribs,
            ..ShellParams::default()
        };
        let back = decode(&encode(&params)).unwrap();
        prop_assert_eq!(back.pattern, params.pattern);
        prop_assert_eq!(back.seed, seed);
        prop_assert_eq!(back.rib_count, ribs);
        prop_assert!((back.height - height).abs() <= 0.005 + 1e-9);
        prop_assert!((back.rib_depth - depth).abs() <= 0.0005 + 1e-9);
        prop_assert!((back.twist_degrees - twist).abs() <= 0.05 + 1e-9);
    }
}
