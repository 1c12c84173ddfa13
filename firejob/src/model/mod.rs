//! The job graph.
//!
//! A [`Job`] is the aggregate root: it owns the landscape inputs, weather
//! stations, ignitions, scenarios, assets and output descriptors, and hands
//! out every entity through factory methods so ids come from its own
//! [`IdAllocator`](crate::ids::IdAllocator).
//!
//! Entities are plain data with public fields. Ids are read through the
//! [`Entity`] trait and can only be replaced with [`Entity::set_name`], which
//! strips the wire field separator.

mod attachments;
mod files;
mod fuel;
mod geo;
mod ignition;
mod job;
mod options;
mod outputs;
mod scenario;
mod statistics;
mod streams;
mod timezone;
mod units;
mod weather;

pub use attachments::{is_attachment, validate_filename, FileAttachment, ATTACHMENT_PREFIX};
pub use files::{GridFile, GridFileType, InputFiles};
pub use fuel::{
    FromFuelRule, FuelBreak, FuelBreakShape, FuelOption, FuelOptionType, FuelPatch, FuelSource,
    FuelTarget, UNSET_BREAK_WIDTH,
};
pub use geo::{LatLon, PatchShape};
pub use ignition::{AssetFile, AssetShape, Ignition, IgnitionShape, UNSET_ASSET_BUFFER};
pub use job::Job;
pub use options::{
    AssetOperation, FbpOptions, FgmOptions, FmcOptions, FwiOptions, DEFAULT_IGNITION_SIZE,
    DEFAULT_INITIAL_VERTEX_COUNT, UNSET_ASSET_CODE, UNSET_NODATA_ELEVATION,
};
pub use outputs::{
    ExportTimeOverride, GridCompression, GridInterpolation, GridOutput, MetadataUnit, Outputs,
    PerimeterTimeOverride, StatsFile, StatsFileType, StatsSource, SummaryFile, SummaryOutputs,
    TimestepSettings, VectorFile, VectorFileType, VectorMetadata, UNKNOWN_METADATA_UNIT,
};
pub use scenario::{
    AssetReference, BurningCondition, IgnitionPlacement, IgnitionReference, LayerInfo, Scenario,
    StationStream, StreamOptions,
};
pub use statistics::{GlobalStatistics, MAX_STATS_COLUMN};
pub use streams::OutputStreamSink;
pub use timezone::{Timezone, TimezoneName};
pub use units::{
    AngleUnit, AreaUnit, CoordinateUnit, DistanceUnit, EnergyUnit, IntensityUnit, MassAreaUnit,
    MassUnit, TemperatureUnit, TimeUnit, UnitSettings, VelocityUnit, VolumeUnit, UNSET_UNIT,
};
pub use weather::{
    DiurnalParameters, GridSector, HffmcMethod, PatchAdjustment, PatchOperation, WeatherGrid,
    WeatherGridFile, WeatherGridType, WeatherPatch, WeatherStation, WeatherStream,
    WeatherStreamSettings, UNSET_DIURNAL_ALPHA,
};

use crate::ids::sanitize_name;
use thiserror::Error;

/// Errors raised while editing the job graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("weather grid already has a file for sector {0:?}")]
    DuplicateSector(GridSector),

    #[error("operation {0} is not supported here")]
    UnsupportedOperation(PatchOperation),

    #[error("no {kind} with id '{id}' in the job")]
    UnknownEntity { kind: &'static str, id: String },
}

/// An entity identified by an allocated, renameable id.
pub trait Entity {
    /// The entity's id.
    fn id(&self) -> &str;

    /// Replace the id. Field separators are removed from `name`.
    fn set_name(&mut self, name: &str);
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Entity for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn set_name(&mut self, name: &str) {
                    self.id = sanitize_name(name);
                }
            }
        )*
    };
}

impl_entity!(
    GridFile,
    FuelBreak,
    FuelPatch,
    WeatherPatch,
    WeatherGrid,
    WeatherStation,
    WeatherStream,
    Ignition,
    AssetFile,
    Scenario,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_name_strips_separator() {
        let mut job = Job::new();
        let ignition = job.add_point_ignition("2024-06-01T13:00:00", LatLon::new(51.0, -115.0), "");
        assert_eq!(ignition.id(), "ign0");
        ignition.set_name("fire|one|");
        assert_eq!(ignition.id(), "fireone");
    }
}
