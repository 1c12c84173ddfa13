//! Output file descriptors and per-timestep statistic subscriptions.

use super::geo::LatLon;
use super::statistics::GlobalStatistics;

/// Units the vector metadata can report areas and perimeters in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataUnit {
    Kilometre,
    Metre,
    Mile,
    Foot,
    SquareKilometre,
    SquareMetre,
    SquareMile,
    SquareFoot,
    Hectare,
    SquareYard,
    Acre,
    Yard,
    Chain,
}

/// Sent when a metadata unit was not chosen.
pub const UNKNOWN_METADATA_UNIT: i32 = -1;

impl MetadataUnit {
    pub fn code(self) -> i32 {
        match self {
            MetadataUnit::Kilometre => 0,
            MetadataUnit::Metre => 1,
            MetadataUnit::Mile => 2,
            MetadataUnit::Foot => 3,
            MetadataUnit::SquareKilometre => 4,
            MetadataUnit::SquareMetre => 5,
            MetadataUnit::SquareMile => 6,
            MetadataUnit::SquareFoot => 7,
            MetadataUnit::Hectare => 8,
            MetadataUnit::SquareYard => 9,
            MetadataUnit::Acre => 10,
            MetadataUnit::Yard => 11,
            MetadataUnit::Chain => 12,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        use MetadataUnit::*;
        [
            Kilometre,
            Metre,
            Mile,
            Foot,
            SquareKilometre,
            SquareMetre,
            SquareMile,
            SquareFoot,
            Hectare,
            SquareYard,
            Acre,
            Yard,
            Chain,
        ]
        .into_iter()
        .find(|u| u.code() == code)
    }

    pub fn is_area(self) -> bool {
        use MetadataUnit::*;
        matches!(
            self,
            SquareFoot | SquareKilometre | SquareMetre | SquareMile | Hectare | SquareYard | Acre
        )
    }

    pub fn is_length(self) -> bool {
        use MetadataUnit::*;
        matches!(self, Foot | Kilometre | Metre | Mile | Yard | Chain)
    }
}

/// Which metadata columns a vector file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VectorMetadata {
    pub version: Option<bool>,
    pub scenario_name: Option<bool>,
    pub job_name: Option<bool>,
    pub ignition_name: Option<bool>,
    pub simulation_date: Option<bool>,
    pub fire_size: Option<bool>,
    pub perimeter_total: Option<bool>,
    pub perimeter_active: Option<bool>,
    pub area_unit: Option<MetadataUnit>,
    pub perimeter_unit: Option<MetadataUnit>,
    pub wx_values: Option<bool>,
    pub fwi_values: Option<bool>,
    pub ignition_location: Option<bool>,
    pub max_burn_distance: Option<bool>,
    pub ignition_attributes: Option<bool>,
    pub asset_arrival_time: Option<bool>,
    pub asset_arrival_count: Option<bool>,
    pub identify_final_perimeter: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorFileType {
    Kml,
    Shp,
}

/// Export window override for one sub-scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerimeterTimeOverride {
    pub sub_scenario_name: String,
    pub start_time: String,
    pub end_time: String,
}

/// Fire perimeter export.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorFile {
    pub scenario_name: String,
    pub filename: String,
    pub kind: Option<VectorFileType>,
    pub multiple_perimeters: Option<bool>,
    pub perimeter_start_time: String,
    pub perimeter_end_time: String,
    pub remove_islands: Option<bool>,
    pub merge_contact: Option<bool>,
    pub perimeter_active: Option<bool>,
    pub sub_scenario_name: Option<String>,
    pub sub_scenario_overrides: Vec<PerimeterTimeOverride>,
    pub metadata: VectorMetadata,
    pub should_stream: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridInterpolation {
    ClosestVertex,
    Idw,
    AreaWeighting,
}

impl GridInterpolation {
    pub fn as_str(self) -> &'static str {
        match self {
            GridInterpolation::ClosestVertex => "ClosestVertex",
            GridInterpolation::Idw => "IDW",
            GridInterpolation::AreaWeighting => "AreaWeighting",
        }
    }
}

/// TIFF compression for exported grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GridCompression {
    #[default]
    None,
    Jpeg,
    Lzw,
    PackBits,
    Deflate,
    CcittRle,
    CcittFax3,
    CcittFax4,
    Lzma,
    Zstd,
    Lerc,
    LercDeflate,
    LercZstd,
    Webp,
}

impl GridCompression {
    pub fn code(self) -> i32 {
        match self {
            GridCompression::None => 0,
            GridCompression::Jpeg => 1,
            GridCompression::Lzw => 2,
            GridCompression::PackBits => 3,
            GridCompression::Deflate => 4,
            GridCompression::CcittRle => 5,
            GridCompression::CcittFax3 => 6,
            GridCompression::CcittFax4 => 7,
            GridCompression::Lzma => 8,
            GridCompression::Zstd => 9,
            GridCompression::Lerc => 10,
            GridCompression::LercDeflate => 11,
            GridCompression::LercZstd => 12,
            GridCompression::Webp => 13,
        }
    }
}

/// Export time override for one sub-scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTimeOverride {
    pub sub_scenario_name: String,
    pub export_time: String,
}

/// Raster export of one statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct GridOutput {
    pub scenario_name: String,
    pub filename: String,
    pub output_time: String,
    pub statistic: GlobalStatistics,
    pub interpolation: GridInterpolation,
    pub should_stream: bool,
    pub compression: GridCompression,
    pub should_minimize: bool,
    pub sub_scenario_name: Option<String>,
    pub sub_scenario_override_times: Vec<ExportTimeOverride>,
}

/// Sections of a summary file. Unset sections use the engine default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryOutputs {
    pub application: Option<bool>,
    pub geo_data: Option<bool>,
    pub scenario: Option<bool>,
    pub scenario_comments: Option<bool>,
    pub inputs: Option<bool>,
    pub landscape: Option<bool>,
    pub fbp_patches: Option<bool>,
    pub wx_patches: Option<bool>,
    pub ignitions: Option<bool>,
    pub wx_streams: Option<bool>,
    pub fbp: Option<bool>,
    pub wx_data: Option<bool>,
    pub asset_info: Option<bool>,
}

/// Plain-text scenario summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryFile {
    pub scenario_name: String,
    pub filename: String,
    pub outputs: SummaryOutputs,
    pub should_stream: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatsFileType {
    #[default]
    AutoDetect,
    Csv,
    JsonRow,
    JsonColumn,
}

impl StatsFileType {
    pub fn code(self) -> i32 {
        match self {
            StatsFileType::AutoDetect => 0,
            StatsFileType::Csv => 1,
            StatsFileType::JsonRow => 2,
            StatsFileType::JsonColumn => 3,
        }
    }
}

/// Where a stats file samples weather from.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsSource {
    Location(LatLon),
    Stream(String),
}

/// Tabular statistics export.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsFile {
    pub scenario_name: String,
    pub filename: String,
    pub file_type: StatsFileType,
    pub should_stream: bool,
    pub source: Option<StatsSource>,
    columns: Vec<GlobalStatistics>,
}

impl StatsFile {
    pub(crate) fn new(scenario_name: String, filename: String, should_stream: bool) -> Self {
        Self {
            scenario_name,
            filename,
            file_type: StatsFileType::default(),
            should_stream,
            source: None,
            columns: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[GlobalStatistics] {
        &self.columns
    }

    /// Add a column. Returns `None` for statistics that cannot be columns
    /// and for columns already present.
    pub fn add_column(&mut self, column: GlobalStatistics) -> Option<GlobalStatistics> {
        if !column.is_stats_column() || self.columns.contains(&column) {
            return None;
        }
        self.columns.push(column);
        Some(column)
    }

    pub fn remove_column(&mut self, column: GlobalStatistics) -> bool {
        match self.columns.iter().position(|c| *c == column) {
            Some(index) => {
                self.columns.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Every output the job produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outputs {
    pub summary_files: Vec<SummaryFile>,
    pub vector_files: Vec<VectorFile>,
    pub grid_files: Vec<GridOutput>,
    pub stats_files: Vec<StatsFile>,
    /// Copied into `should_stream` of files created afterwards.
    pub stream_all: bool,
}

/// Statistics emitted after every simulation time step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimestepSettings {
    statistics: Vec<GlobalStatistics>,
}

impl TimestepSettings {
    pub fn statistics(&self) -> &[GlobalStatistics] {
        &self.statistics
    }

    /// Subscribe to a statistic. Returns `None` if it cannot be emitted per
    /// time step.
    pub fn add_statistic(&mut self, statistic: GlobalStatistics) -> Option<GlobalStatistics> {
        if !statistic.is_timestep_statistic() {
            return None;
        }
        self.statistics.push(statistic);
        Some(statistic)
    }

    pub fn remove_statistic(&mut self, statistic: GlobalStatistics) -> bool {
        match self.statistics.iter().position(|s| *s == statistic) {
            Some(index) => {
                self.statistics.remove(index);
                true
            }
            None => false,
        }
    }
}
