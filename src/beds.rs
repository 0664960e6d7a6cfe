//! Print Bed Registry - Static Geometry Contracts
//!
//! Every supported bed maps to exactly one immutable profile. The bed
//! enumeration is closed, so lookups cannot fail at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::units::internal_to_mm_rounded;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrintBed {
    #[default]
    StandardFlatbed,
    MiniFlatbed,
}

impl PrintBed {
    pub const ALL: [PrintBed; 2] = [PrintBed::StandardFlatbed, PrintBed::MiniFlatbed];

    pub fn as_str(self) -> &'static str {
        match self {
            PrintBed::StandardFlatbed => "standardFlatbed",
            PrintBed::MiniFlatbed => "miniFlatbed",
        }
    }

    /// Profile for this bed
    pub fn profile(self) -> &'static PrintBedProfile {
        match self {
            PrintBed::StandardFlatbed => &STANDARD_FLATBED,
            PrintBed::MiniFlatbed => &MINI_FLATBED,
        }
    }
}

impl fmt::Display for PrintBed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrintBed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrintBed::ALL
            .into_iter()
            .find(|bed| bed.as_str() == s)
            .ok_or_else(|| format!("Unknown print bed: {}", s))
    }
}

/// A point in internal units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InternalPoint {
    pub x: i64,
    pub y: i64,
}

/// Physical and schema metadata for one print bed.
///
/// The zero point is where the document's logical origin sits on the base
/// map. Placements are measured from it towards the top-left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintBedProfile {
    pub zero_point: InternalPoint,
    pub base_map_width: i64,
    pub base_map_height: i64,
    pub base_map_name: &'static str,
    pub category: u32,
    pub sub_category: u32,
    pub is_standard_product: bool,
}

impl PrintBedProfile {
    /// Base-map size in whole millimeters as `[width, height]`
    pub fn format_size_mm(&self) -> [i64; 2] {
        [
            internal_to_mm_rounded(self.base_map_width),
            internal_to_mm_rounded(self.base_map_height),
        ]
    }
}

static STANDARD_FLATBED: PrintBedProfile = PrintBedProfile {
    zero_point: InternalPoint { x: 340_000, y: 430_000 },
    base_map_width: 350_000,
    base_map_height: 440_000,
    base_map_name: "base_map_standard_flatbed",
    category: 1,
    sub_category: 101,
    is_standard_product: true,
};

static MINI_FLATBED: PrintBedProfile = PrintBedProfile {
    zero_point: InternalPoint { x: 220_000, y: 307_000 },
    base_map_width: 230_000,
    base_map_height: 317_000,
    base_map_name: "base_map_mini_flatbed",
    category: 1,
    sub_category: 102,
    is_standard_product: true,
};

/// Look up the profile for a bed
pub fn profile_for(bed: PrintBed) -> &'static PrintBedProfile {
    bed.profile()
}
