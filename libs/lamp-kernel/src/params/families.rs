//! Closed family enums for patterns and silhouettes.
//!
//! Families are plain tagged variants with a stable `u8` index (used by the
//! compact design codes) and a snake_case name (used by JSON records).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a family enum with its index table and name table.
macro_rules! family_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $index:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $index, )+
        }

        impl $name {
            /// Every family in index order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Stable numeric index.
            #[inline]
            pub fn index(self) -> u8 {
                self as u8
            }

            /// Looks a family up by its stable index.
            pub fn from_index(index: u8) -> Option<Self> {
                match index {
                    $( $index => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Snake_case name as used in parameter records.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownFamily;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    _ => Err(UnknownFamily(s.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// Returned when a family name does not match any known family.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown family `{0}`")]
pub struct UnknownFamily(pub String);

family_enum! {
    /// Surface pattern families.
    pub enum PatternFamily {
        Smooth = 0 => "smooth",
        // Periodic
        RibbedDrum = 1 => "ribbed_drum",
        SpiralRibs = 2 => "spiral_ribs",
        Waves = 3 => "waves",
        DiagonalWaves = 4 => "diagonal_waves",
        Knurling = 5 => "knurling",
        Chevron = 6 => "chevron",
        Scallops = 7 => "scallops",
        Fluted = 8 => "fluted",
        Twisted = 9 => "twisted",
        Bamboo = 10 => "bamboo",
        Herringbone = 11 => "herringbone",
        Ripple = 12 => "ripple",
        Petals = 13 => "petals",
        Braided = 14 => "braided",
        Pleated = 15 => "pleated",
        Zigzag = 16 => "zigzag",
        Corrugated = 17 => "corrugated",
        Lotus = 18 => "lotus",
        Dimples = 19 => "dimples",
        Helix = 20 => "helix",
        // Distance field
        Voronoi = 21 => "voronoi",
        VoronoiEdges = 22 => "voronoi_edges",
        CrackedEarth = 23 => "cracked_earth",
        Bubbles = 24 => "bubbles",
        Crystal = 25 => "crystal",
        Pebbles = 26 => "pebbles",
        // Hash noise
        Organic = 27 => "organic",
        Cellular = 28 => "cellular",
        Coral = 29 => "coral",
        Veins = 30 => "veins",
        Bark = 31 => "bark",
        Hammered = 32 => "hammered",
        Moss = 33 => "moss",
        Lava = 34 => "lava",
        // Tiling
        DiamondPlate = 35 => "diamond_plate",
        Bricks = 36 => "bricks",
        GeometricTiles = 37 => "geometric_tiles",
        CellularAutomata = 38 => "cellular_automata",
        Checkerboard = 39 => "checkerboard",
        Hexagons = 40 => "hexagons",
        Mosaic = 41 => "mosaic",
        Studs = 42 => "studs",
        Basketweave = 43 => "basketweave",
        Meander = 44 => "meander",
        Triangles = 45 => "triangles",
        Scales = 46 => "scales",
        // Lattice
        WireVertical = 47 => "wire_vertical",
        WireTriangular = 48 => "wire_triangular",
        WireHoneycomb = 49 => "wire_honeycomb",
        WireDiamond = 50 => "wire_diamond",
        WireStar = 51 => "wire_star",
        WireWeave = 52 => "wire_weave",
    }
}

/// Algorithmic group a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternGroup {
    /// No displacement at all.
    Smooth,
    /// Closed-form sums of sines and cosines.
    Periodic,
    /// Nearest/second-nearest distance to hashed seed points.
    DistanceField,
    /// Layered deterministic hash noise.
    HashNoise,
    /// Quantized cell index with parity or hashed value.
    Tiling,
    /// Strut lattice built by the lattice builder.
    Lattice,
}

impl PatternFamily {
    /// Returns the algorithmic group of this family.
    pub fn group(self) -> PatternGroup {
        match self.index() {
            0 => PatternGroup::Smooth,
            1..=20 => PatternGroup::Periodic,
            21..=26 => PatternGroup::DistanceField,
            27..=34 => PatternGroup::HashNoise,
            35..=46 => PatternGroup::Tiling,
            _ => PatternGroup::Lattice,
        }
    }

    /// True for wireframe families built from struts.
    #[inline]
    pub fn is_lattice(self) -> bool {
        self.group() == PatternGroup::Lattice
    }
}

impl Default for PatternFamily {
    fn default() -> Self {
        PatternFamily::RibbedDrum
    }
}

family_enum! {
    /// Side-view outline families.
    pub enum SilhouetteFamily {
        Straight = 0 => "straight",
        Hourglass = 1 => "hourglass",
        Bell = 2 => "bell",
        Onion = 3 => "onion",
        Trumpet = 4 => "trumpet",
        Stepped = 5 => "stepped",
        Barrel = 6 => "barrel",
        Vase = 7 => "vase",
        Tulip = 8 => "tulip",
        Cone = 9 => "cone",
        Dome = 10 => "dome",
        Teardrop = 11 => "teardrop",
        Wave = 12 => "wave",
        DoubleBulb = 13 => "double_bulb",
        Lantern = 14 => "lantern",
        Pagoda = 15 => "pagoda",
        Skirt = 16 => "skirt",
        Egg = 17 => "egg",
        Diamond = 18 => "diamond",
        Spindle = 19 => "spindle",
        Chalice = 20 => "chalice",
        Urn = 21 => "urn",
        Gourd = 22 => "gourd",
        Pinched = 23 => "pinched",
        Flared = 24 => "flared",
        Tapered = 25 => "tapered",
        Ripple = 26 => "ripple",
        Cinched = 27 => "cinched",
        Pear = 28 => "pear",
        Capsule = 29 => "capsule",
    }
}

impl Default for SilhouetteFamily {
    fn default() -> Self {
        SilhouetteFamily::Straight
    }
}
