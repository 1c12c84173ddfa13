//! Landscape input files and auxiliary grid files.

use super::fuel::{FuelBreak, FuelPatch};
use super::weather::{WeatherGrid, WeatherPatch};

/// Kind of data carried by an auxiliary input grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridFileType {
    FuelGrid,
    DegreeCuring,
    GreenUp,
    PercentConifer,
    PercentDeadFir,
    CrownBaseHeight,
    TreeHeight,
}

impl GridFileType {
    pub fn code(self) -> i32 {
        match self {
            GridFileType::FuelGrid => 0,
            GridFileType::DegreeCuring => 1,
            GridFileType::GreenUp => 2,
            GridFileType::PercentConifer => 3,
            GridFileType::PercentDeadFir => 4,
            GridFileType::CrownBaseHeight => 5,
            GridFileType::TreeHeight => 6,
        }
    }
}

/// An auxiliary raster that overrides part of the landscape.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFile {
    pub(crate) id: String,
    pub comment: String,
    pub kind: GridFileType,
    pub filename: String,
    pub projection: String,
}

/// The landscape files plus every landscape modifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputFiles {
    pub projection: String,
    pub lut: String,
    pub fuel_map: String,
    /// Optional; omitted from the job when empty.
    pub elevation: String,
    pub fuel_breaks: Vec<FuelBreak>,
    pub fuel_patches: Vec<FuelPatch>,
    pub weather_grids: Vec<WeatherGrid>,
    pub weather_patches: Vec<WeatherPatch>,
    pub grid_files: Vec<GridFile>,
}
