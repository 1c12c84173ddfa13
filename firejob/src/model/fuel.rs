//! Fuel breaks, fuel patches and per-fuel option overrides.

use super::geo::{LatLon, PatchShape};

/// Width the engine receives for a break whose width was never set.
pub const UNSET_BREAK_WIDTH: f64 = -1.0;

/// Geometry of a fuel break.
#[derive(Debug, Clone, PartialEq)]
pub enum FuelBreakShape {
    File(String),
    Polyline(Vec<LatLon>),
    Polygon(Vec<LatLon>),
}

/// A non-burnable barrier.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelBreak {
    pub(crate) id: String,
    /// Break width in metres. Required for polylines.
    pub width: Option<f64>,
    pub comments: String,
    pub shape: FuelBreakShape,
}

/// Rules selecting which fuels a patch replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FromFuelRule {
    NoData,
    AllFuels,
    AllCombustibleFuels,
}

impl FromFuelRule {
    pub fn as_str(self) -> &'static str {
        match self {
            FromFuelRule::NoData => "noData",
            FromFuelRule::AllFuels => "allFuels",
            FromFuelRule::AllCombustibleFuels => "allCombustibleFuels",
        }
    }
}

/// The fuels a patch applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum FuelSource {
    Rule(FromFuelRule),
    /// A fuel name from the lookup table.
    Name(String),
    /// A fuel index from the lookup table.
    Index(i32),
}

/// The fuel a patch converts to.
#[derive(Debug, Clone, PartialEq)]
pub enum FuelTarget {
    Name(String),
    Index(i32),
}

/// Replaces fuels over an area.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelPatch {
    pub(crate) id: String,
    pub comments: String,
    pub from: FuelSource,
    pub to: FuelTarget,
    pub shape: PatchShape,
}

/// Fuel attributes that can be overridden per fuel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelOptionType {
    GrassFuelLoad,
    GrassCuring,
    PercentConifer,
    PercentDeadFir,
    CrownBaseHeight,
}

impl FuelOptionType {
    pub fn code(self) -> i32 {
        match self {
            FuelOptionType::GrassFuelLoad => 0,
            FuelOptionType::GrassCuring => 1,
            FuelOptionType::PercentConifer => 2,
            FuelOptionType::PercentDeadFir => 3,
            FuelOptionType::CrownBaseHeight => 4,
        }
    }
}

/// One attribute override for one fuel type.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelOption {
    pub fuel_type: String,
    pub option: FuelOptionType,
    pub value: f64,
}
