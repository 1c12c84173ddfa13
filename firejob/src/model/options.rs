//! Per-scenario option blocks.
//!
//! Every field is optional. A full scenario fills gaps with the engine's
//! historical defaults when it is encoded; a copied scenario leaves unset
//! fields out so the engine inherits them from the scenario being copied.
//! The defaults below are the values the engine expects for an unset field.

use crate::duration::Duration;

pub const DEFAULT_IGNITION_SIZE: f64 = 0.5;
pub const DEFAULT_INITIAL_VERTEX_COUNT: i32 = 16;
/// Sent when no asset operation or collision count was chosen.
pub const UNSET_ASSET_CODE: i32 = -1;
/// Sent in a full scenario when no NODATA elevation was chosen.
pub const UNSET_NODATA_ELEVATION: f64 = -9999.0;

/// What happens when the fire reaches an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetOperation {
    NoEffect,
    StopImmediately,
    StopAfterX,
}

impl AssetOperation {
    pub fn code(self) -> i32 {
        match self {
            AssetOperation::NoEffect => 0,
            AssetOperation::StopImmediately => 1,
            AssetOperation::StopAfterX => 2,
        }
    }

    /// Wire code of an optional operation, `-1` when unset.
    pub fn code_or_unset(operation: Option<Self>) -> i32 {
        operation.map(Self::code).unwrap_or(UNSET_ASSET_CODE)
    }
}

/// Fire growth model options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FgmOptions {
    /// Maximum time step during acceleration.
    pub max_accel_timestep: Option<Duration>,
    pub distance_resolution: Option<f64>,
    pub perimeter_resolution: Option<f64>,
    pub minimum_spreading_ros: Option<f64>,
    pub stop_at_grid_end: Option<bool>,
    pub breaching: Option<bool>,
    pub dynamic_spatial_threshold: Option<bool>,
    pub spotting: Option<bool>,
    pub purge_non_displayable: Option<bool>,
    /// Ignition offset along x, metres.
    pub dx: Option<f64>,
    /// Ignition offset along y, metres.
    pub dy: Option<f64>,
    /// Ignition start time offset.
    pub dt: Option<Duration>,
    /// Wind direction offset, degrees.
    pub dwd: Option<f64>,
    pub growth_percentile_applied: Option<bool>,
    pub growth_percentile: Option<f64>,
    pub ignition_size: Option<f64>,
    pub initial_vertex_count: Option<i32>,
    pub global_asset_operation: Option<AssetOperation>,
    pub asset_collision_count: Option<i32>,
}

impl FgmOptions {
    pub fn effective_ignition_size(&self) -> f64 {
        self.ignition_size.unwrap_or(DEFAULT_IGNITION_SIZE)
    }

    pub fn effective_initial_vertex_count(&self) -> i32 {
        self.initial_vertex_count
            .unwrap_or(DEFAULT_INITIAL_VERTEX_COUNT)
    }

    /// True if any of the four simulation properties was chosen explicitly.
    pub fn has_simulation_properties(&self) -> bool {
        self.ignition_size.is_some()
            || self.initial_vertex_count.is_some()
            || self.global_asset_operation.is_some()
            || self.asset_collision_count.is_some()
    }

    /// Unset the core growth options, keeping probabilistic offsets and
    /// simulation properties.
    pub fn clear_core(&mut self) {
        self.max_accel_timestep = None;
        self.distance_resolution = None;
        self.perimeter_resolution = None;
        self.minimum_spreading_ros = None;
        self.stop_at_grid_end = None;
        self.breaching = None;
        self.dynamic_spatial_threshold = None;
        self.spotting = None;
        self.purge_non_displayable = None;
        self.growth_percentile_applied = None;
        self.growth_percentile = None;
    }
}

/// Fire behaviour prediction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FbpOptions {
    pub terrain_effect: Option<bool>,
    pub wind_effect: Option<bool>,
}

/// Foliar moisture content options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FmcOptions {
    /// Percent override, 0 to 300.
    pub per_override: Option<f64>,
    /// Elevation used where the elevation grid has no data, 0 to 7000.
    pub nodata_elevation: Option<f64>,
    pub terrain: Option<bool>,
}

/// Fire weather index options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FwiOptions {
    pub spatial_interpolation: Option<bool>,
    pub from_spatial_weather: Option<bool>,
    pub history_on_effected_fwi: Option<bool>,
    pub burning_conditions_on: Option<bool>,
    pub temporal_interpolation: Option<bool>,
}
