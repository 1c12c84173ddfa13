//! Literal tokens of the engine line protocol.

// Session control
pub const STARTUP: &str = "STARTUP";
pub const SHUTDOWN: &str = "SHUTDOWN";
pub const BEGINDATA: &str = "BEGINDATA";
pub const ENDDATA: &str = "ENDDATA";
pub const STARTJOB: &str = "STARTJOB";
pub const GETDEFAULTS: &str = "GETDEFAULTS";
pub const LIST_TIMEZONES: &str = "LIST_TIMEZONES";
pub const GET_LICENSES: &str = "GET_LICENSES";
/// Terminator of listing responses.
pub const COMPLETE: &str = "COMPLETE";

// Administration
pub const TAR: &str = "TAR";
pub const ZIP: &str = "ZIP";
pub const DELETE: &str = "DELETE";
pub const STOP_JOB: &str = "STOP_JOB";
pub const LIST_OPTIONS_COMPLETE: &str = "LIST_OPTIONS_COMPLETE";
pub const LIST_OPTIONS_RUNNING: &str = "LIST_OPTIONS_RUNNING";
pub const LIST_OPTIONS_QUEUED: &str = "LIST_OPTIONS_QUEUED";

// Job body
pub const GLOBAL_COMMENTS: &str = "GLOBALCOMMENTS";
pub const FILE_ATTACHMENT: &str = "file_attachment";
pub const FILE_ATTACHMENT_END: &str = "file_attachment_end";
pub const PROJECTION_FILE: &str = "projfile";
pub const LUT_FILE: &str = "lutfile";
pub const FUEL_MAP_FILE: &str = "fuelmapfile";
pub const ELEVATION_FILE: &str = "elevationfile";
pub const FUEL_BREAK: &str = "fuelbreakfile";
pub const FUEL_PATCH: &str = "fuelpatch";
pub const WEATHER_GRID: &str = "weathergrid";
pub const WEATHER_PATCH: &str = "weatherpatch";
pub const GRID_FILE: &str = "inputgridfile";
pub const WEATHER_STATION: &str = "weatherstation";
pub const WEATHER_STREAM: &str = "weatherstream";
pub const IGNITION: &str = "ignition";
pub const FUEL_OPTION: &str = "fuel_option_setting";
pub const ASSET_FILE: &str = "asset_file";
pub const TIMEZONE: &str = "timezone";

// Scenario
pub const SCENARIO_BEGIN: &str = "scenariostart";
pub const SCENARIO_END: &str = "scenarioend";
pub const SCENARIO_NAME: &str = "scenarioname";
pub const DISPLAY_INTERVAL: &str = "displayinterval";
pub const SCENARIO_TO_COPY: &str = "scenariotocopy";
pub const START_TIME: &str = "starttime";
pub const END_TIME: &str = "endtime";
pub const COMMENTS: &str = "comments";
pub const BURNING_CONDITION: &str = "burningcondition";
pub const VECTOR_REF: &str = "vectorref";
pub const STREAM_REF: &str = "streamref";
pub const LAYER_INFO: &str = "layerinfo";
pub const PRIMARY_STREAM: &str = "primarystream";
pub const IGNITION_REF: &str = "ignitionref";
pub const ASSET_REF: &str = "asset_ref";

// FGM options
pub const MAX_ACCEL_TIMESTEP: &str = "maxaccts";
pub const DISTANCE_RESOLUTION: &str = "distres";
pub const PERIMETER_RESOLUTION: &str = "perimres";
pub const MIN_SPREAD_ROS: &str = "fgm_minspreadros";
pub const STOP_AT_GRID_END: &str = "stopatgridends";
pub const BREACHING: &str = "breaching";
pub const DYNAMIC_THRESHOLD: &str = "fgm_dynamicthreshold";
pub const SPOTTING: &str = "spotting";
pub const PURGE_NON_DISPLAY: &str = "fgm_purgenondisplay";
pub const DX: &str = "fgm_dx";
pub const DY: &str = "fgm_dy";
pub const DT: &str = "fgm_dt";
pub const DWD: &str = "fgm_dwd";
pub const GROWTH_APPLIED: &str = "fgm_growthPercApplied";
pub const GROWTH_PERCENTILE: &str = "fgm_growthPercentile";
pub const SIMULATION_PROPERTIES: &str = "simulation_properties";

// FBP options
pub const TERRAIN_EFFECT: &str = "terraineffect";
pub const WIND_EFFECT: &str = "windeffect";

// FMC options
pub const PERCENT_OVERRIDE: &str = "peroverride";
pub const NODATA_ELEVATION: &str = "nodataelev";
pub const FMC_TERRAIN: &str = "fmc_terrain";

// FWI options
pub const FWI_SPATIAL_INTERP: &str = "fwispacinterp";
pub const FWI_FROM_SPATIAL_WEATHER: &str = "fwifromspacweather";
pub const HISTORY_ON_FWI: &str = "historyonfwi";
pub const BURNING_CONDITIONS_ON: &str = "burningconditionon";
pub const FWI_TEMPORAL_INTERP: &str = "fwitemporalinterp";

// Outputs
pub const SUMMARY_FILE: &str = "summaryfile";
pub const VECTOR_FILE: &str = "vectorfile";
pub const GRID_OUTPUT: &str = "gridfile";
pub const STATS_FILE: &str = "statsfile";
pub const EMIT_STATISTIC: &str = "mng_statistic";
pub const OUTPUT_STREAM: &str = "output_stream";
pub const EXPORT_UNITS: &str = "export_units";

/// Keys of a `GETDEFAULTS` response.
pub mod defaults {
    pub const JOB_LOCATION: &str = "JOBLOCATION";
    pub const MAX_ACCEL_TIMESTEP: &str = "MAXACCTS";
    pub const DISTANCE_RESOLUTION: &str = "DISTRES";
    pub const PERIMETER_RESOLUTION: &str = "PERIMRES";
    pub const MIN_SPREAD_ROS: &str = "fgmd_minspreadros";
    pub const STOP_AT_GRID_END: &str = "STOPGRIDEND";
    pub const BREACHING: &str = "BREACHING";
    pub const DYNAMIC_THRESHOLD: &str = "fgmd_dynamicthreshold";
    pub const SPOTTING: &str = "fgmd_spotting";
    pub const PURGE_NON_DISPLAY: &str = "fgmd_purgenondisplay";
    pub const DX: &str = "fgmd_dx";
    pub const DY: &str = "fgmd_dy";
    /// The engine spells this key with `fmgd`.
    pub const DT: &str = "fmgd_dt";
    pub const GROWTH_APPLIED: &str = "fgmd_growthPercApplied";
    pub const GROWTH_PERCENTILE: &str = "fgmd_growthPercentile";
    pub const TERRAIN_EFFECT: &str = "TERRAINEFFECT";
    pub const WIND_EFFECT: &str = "fgmd_windeffect";
    pub const PERCENT_OVERRIDE: &str = "PEROVERRIDEVAL";
    pub const NODATA_ELEVATION: &str = "NODATAELEV";
    pub const FMC_TERRAIN: &str = "fmcd_terrain";
    pub const FWI_SPATIAL_INTERP: &str = "FWISPACINTERP";
    pub const FWI_FROM_SPATIAL_WEATHER: &str = "FWIFROMSPACWEATH";
    pub const HISTORY_ON_FWI: &str = "HISTORYONFWI";
    pub const BURNING_CONDITIONS_ON: &str = "fwid_burnconditions";
    pub const FWI_TEMPORAL_INTERP: &str = "fwid_tempinterp";
    pub const VERSION: &str = "VERSION";
    pub const SCENARIO_NAME: &str = "SCENNAME";
    pub const JOB_NAME: &str = "JOBNAME";
    pub const IGNITION_NAME: &str = "IGNAME";
    pub const SIMULATION_DATE: &str = "SIMDATE";
    pub const FIRE_SIZE: &str = "FIRESIZE";
    pub const PERIMETER_TOTAL: &str = "PERIMTOTAL";
    pub const PERIMETER_ACTIVE: &str = "PERIMACTIVE";
    pub const AREA_UNIT: &str = "AREAUNIT";
    pub const PERIMETER_UNIT: &str = "PERIMUNIT";
}
