//! Weather stations, their streams, and weather modifiers.

use super::geo::{LatLon, PatchShape};
use super::ModelError;
use std::fmt;

/// Sentinel the engine reads as "no diurnal parameters".
pub const UNSET_DIURNAL_ALPHA: f64 = 9999.0;

/// How the starting hourly FFMC was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HffmcMethod {
    #[default]
    VanWagner,
    Lawson,
}

impl HffmcMethod {
    pub fn code(self) -> i32 {
        match self {
            HffmcMethod::VanWagner => 0,
            HffmcMethod::Lawson => 1,
        }
    }
}

/// Diurnal curve parameters for temperature and wind speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiurnalParameters {
    pub temperature_alpha: f64,
    pub temperature_beta: f64,
    pub temperature_gamma: f64,
    pub wind_speed_alpha: f64,
    pub wind_speed_beta: f64,
    pub wind_speed_gamma: f64,
}

/// Values used to create a weather stream.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherStreamSettings {
    pub filename: String,
    pub hffmc_value: f64,
    /// Hour of day the HFFMC value applies to, or `-1` for the engine default.
    pub hffmc_hour: i32,
    pub hffmc_method: HffmcMethod,
    pub starting_ffmc: f64,
    pub starting_dmc: f64,
    pub starting_dc: f64,
    pub starting_precip: f64,
    pub start_time: String,
    pub end_time: String,
    pub comments: String,
}

impl Default for WeatherStreamSettings {
    fn default() -> Self {
        Self {
            filename: String::new(),
            hffmc_value: 0.0,
            hffmc_hour: -1,
            hffmc_method: HffmcMethod::default(),
            starting_ffmc: 0.0,
            starting_dmc: 0.0,
            starting_dc: 0.0,
            starting_precip: 0.0,
            start_time: String::new(),
            end_time: String::new(),
            comments: String::new(),
        }
    }
}

/// Hourly or daily weather observations attached to a station.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherStream {
    pub(crate) id: String,
    pub filename: String,
    pub hffmc_value: f64,
    pub hffmc_hour: i32,
    pub hffmc_method: HffmcMethod,
    pub starting_ffmc: f64,
    pub starting_dmc: f64,
    pub starting_dc: f64,
    pub starting_precip: f64,
    pub start_time: String,
    pub end_time: String,
    pub comments: String,
    pub diurnal: Option<DiurnalParameters>,
}

impl WeatherStream {
    pub(crate) fn from_settings(id: String, settings: WeatherStreamSettings) -> Self {
        Self {
            id,
            filename: settings.filename,
            hffmc_value: settings.hffmc_value,
            hffmc_hour: settings.hffmc_hour,
            hffmc_method: settings.hffmc_method,
            starting_ffmc: settings.starting_ffmc,
            starting_dmc: settings.starting_dmc,
            starting_dc: settings.starting_dc,
            starting_precip: settings.starting_precip,
            start_time: settings.start_time,
            end_time: settings.end_time,
            comments: settings.comments,
            diurnal: None,
        }
    }
}

/// A weather station and the streams recorded at it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherStation {
    pub(crate) id: String,
    pub location: Option<LatLon>,
    /// Metres above sea level.
    pub elevation: f64,
    pub comments: String,
    pub streams: Vec<WeatherStream>,
}

impl WeatherStation {
    pub fn stream(&self, id: &str) -> Option<&WeatherStream> {
        self.streams.iter().find(|s| s.id == id)
    }

    pub fn stream_mut(&mut self, id: &str) -> Option<&mut WeatherStream> {
        self.streams.iter_mut().find(|s| s.id == id)
    }

    /// Remove a stream from this station.
    pub fn remove_stream(&mut self, id: &str) -> bool {
        let before = self.streams.len();
        self.streams.retain(|s| s.id != id);
        self.streams.len() != before
    }
}

/// Arithmetic applied by a weather patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchOperation {
    Equal,
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl PatchOperation {
    pub fn code(self) -> i32 {
        match self {
            PatchOperation::Equal => 0,
            PatchOperation::Plus => 1,
            PatchOperation::Minus => 2,
            PatchOperation::Multiply => 3,
            PatchOperation::Divide => 4,
        }
    }
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One weather value override.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchAdjustment {
    pub operation: PatchOperation,
    pub value: f64,
}

/// Overrides weather values over an area and time window.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPatch {
    pub(crate) id: String,
    pub comments: String,
    pub start_time: String,
    pub end_time: String,
    pub start_time_of_day: String,
    pub end_time_of_day: String,
    pub temperature: Option<PatchAdjustment>,
    /// Stored as a fraction; [`WeatherPatch::set_rh_operation`] takes a percentage.
    pub rh: Option<PatchAdjustment>,
    pub precipitation: Option<PatchAdjustment>,
    pub wind_speed: Option<PatchAdjustment>,
    pub wind_direction: Option<PatchAdjustment>,
    pub shape: PatchShape,
}

impl WeatherPatch {
    pub fn set_temperature_operation(&mut self, operation: PatchOperation, value: f64) {
        self.temperature = Some(PatchAdjustment { operation, value });
    }

    /// Set the relative humidity override from a percentage (0-100).
    pub fn set_rh_operation(&mut self, operation: PatchOperation, percent: f64) {
        self.rh = Some(PatchAdjustment {
            operation,
            value: percent / 100.0,
        });
    }

    pub fn set_precipitation_operation(&mut self, operation: PatchOperation, value: f64) {
        self.precipitation = Some(PatchAdjustment { operation, value });
    }

    pub fn set_wind_speed_operation(&mut self, operation: PatchOperation, value: f64) {
        self.wind_speed = Some(PatchAdjustment { operation, value });
    }

    /// Wind direction only supports `Equal`, `Plus` and `Minus`.
    pub fn set_wind_direction_operation(
        &mut self,
        operation: PatchOperation,
        value: f64,
    ) -> Result<(), ModelError> {
        match operation {
            PatchOperation::Equal | PatchOperation::Plus | PatchOperation::Minus => {
                self.wind_direction = Some(PatchAdjustment { operation, value });
                Ok(())
            }
            other => Err(ModelError::UnsupportedOperation(other)),
        }
    }
}

/// Compass sector a weather grid file covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridSector {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl GridSector {
    pub fn code(self) -> i32 {
        match self {
            GridSector::North => 0,
            GridSector::NorthEast => 1,
            GridSector::East => 2,
            GridSector::SouthEast => 3,
            GridSector::South => 4,
            GridSector::SouthWest => 5,
            GridSector::West => 6,
            GridSector::NorthWest => 7,
        }
    }
}

/// What a weather grid's rasters hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherGridType {
    #[default]
    Direction,
    Speed,
}

impl WeatherGridType {
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherGridType::Direction => "direction",
            WeatherGridType::Speed => "speed",
        }
    }
}

/// One sector raster of a weather grid.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherGridFile {
    pub sector: GridSector,
    pub speed: f64,
    pub filename: String,
    pub projection: String,
}

/// Gridded wind data, one raster per compass sector.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherGrid {
    pub(crate) id: String,
    pub comments: String,
    pub start_time: String,
    pub end_time: String,
    pub start_time_of_day: String,
    pub end_time_of_day: String,
    pub kind: WeatherGridType,
    pub files: Vec<WeatherGridFile>,
}

impl WeatherGrid {
    /// Add the raster for one sector. Each sector may appear once.
    pub fn add_direction_file(
        &mut self,
        filename: impl Into<String>,
        projection: impl Into<String>,
        sector: GridSector,
        speed: f64,
    ) -> Result<&mut WeatherGridFile, ModelError> {
        if self.files.iter().any(|f| f.sector == sector) {
            return Err(ModelError::DuplicateSector(sector));
        }
        self.files.push(WeatherGridFile {
            sector,
            speed,
            filename: filename.into(),
            projection: projection.into(),
        });
        let last = self.files.len() - 1;
        Ok(&mut self.files[last])
    }

    pub fn remove_direction_file(&mut self, sector: GridSector) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.sector != sector);
        self.files.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> WeatherGrid {
        WeatherGrid {
            id: "wthrgrd0".into(),
            comments: String::new(),
            start_time: "2024-07-01T00:00:00".into(),
            end_time: "2024-07-02T00:00:00".into(),
            start_time_of_day: "PT0S".into(),
            end_time_of_day: "PT23H".into(),
            kind: WeatherGridType::Direction,
            files: Vec::new(),
        }
    }

    #[test]
    fn test_duplicate_sector_rejected() {
        let mut grid = grid();
        grid.add_direction_file("n.asc", "n.prj", GridSector::North, 10.0)
            .unwrap();
        let err = grid
            .add_direction_file("n2.asc", "n2.prj", GridSector::North, 12.0)
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateSector(GridSector::North));
        assert_eq!(grid.files.len(), 1);
    }

    #[test]
    fn test_remove_direction_file() {
        let mut grid = grid();
        grid.add_direction_file("e.asc", "e.prj", GridSector::East, 5.0)
            .unwrap();
        assert!(grid.remove_direction_file(GridSector::East));
        assert!(!grid.remove_direction_file(GridSector::East));
    }

    #[test]
    fn test_rh_is_stored_as_fraction() {
        let mut patch = WeatherPatch {
            id: "wthrptch0".into(),
            comments: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            start_time_of_day: String::new(),
            end_time_of_day: String::new(),
            temperature: None,
            rh: None,
            precipitation: None,
            wind_speed: None,
            wind_direction: None,
            shape: PatchShape::Landscape,
        };
        patch.set_rh_operation(PatchOperation::Equal, 45.0);
        assert_eq!(patch.rh.map(|a| a.value), Some(0.45));
        assert!(patch
            .set_wind_direction_operation(PatchOperation::Multiply, 2.0)
            .is_err());
        assert!(patch
            .set_wind_direction_operation(PatchOperation::Plus, 15.0)
            .is_ok());
    }
}
