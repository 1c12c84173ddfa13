//! Parsers for the engine's non-submission responses.

use crate::model::{
    FbpOptions, FgmOptions, FmcOptions, FwiOptions, MetadataUnit, TimezoneName, VectorMetadata,
};
use crate::protocol::tokens::{defaults as key, COMPLETE};

/// Option defaults reported by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobDefaults {
    /// Directory the engine writes jobs into.
    pub job_directory: Option<String>,
    pub fgm: FgmOptions,
    pub fbp: FbpOptions,
    pub fmc: FmcOptions,
    pub fwi: FwiOptions,
    pub metadata: VectorMetadata,
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "1" => Some(true),
        "0" => Some(false),
        v if v.eq_ignore_ascii_case("true") => Some(true),
        v if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

impl JobDefaults {
    /// Apply one `key`/`value` pair. Returns false for unknown keys and for
    /// values that do not parse; neither changes anything.
    pub fn apply(&mut self, name: &str, value: &str) -> bool {
        let value = value.trim();
        let number = || value.parse::<f64>().ok();
        let duration = || value.parse().ok();

        fn set<T>(slot: &mut Option<T>, parsed: Option<T>) -> bool {
            match parsed {
                Some(v) => {
                    *slot = Some(v);
                    true
                }
                None => false,
            }
        }

        let fgm = &mut self.fgm;
        let meta = &mut self.metadata;
        match name {
            key::JOB_LOCATION => {
                self.job_directory = Some(value.to_string());
                true
            }
            key::MAX_ACCEL_TIMESTEP => set(&mut fgm.max_accel_timestep, duration()),
            key::DISTANCE_RESOLUTION => set(&mut fgm.distance_resolution, number()),
            key::PERIMETER_RESOLUTION => set(&mut fgm.perimeter_resolution, number()),
            key::MIN_SPREAD_ROS => set(&mut fgm.minimum_spreading_ros, number()),
            key::STOP_AT_GRID_END => set(&mut fgm.stop_at_grid_end, parse_flag(value)),
            key::BREACHING => set(&mut fgm.breaching, parse_flag(value)),
            key::DYNAMIC_THRESHOLD => set(&mut fgm.dynamic_spatial_threshold, parse_flag(value)),
            key::SPOTTING => set(&mut fgm.spotting, parse_flag(value)),
            key::PURGE_NON_DISPLAY => set(&mut fgm.purge_non_displayable, parse_flag(value)),
            key::DX => set(&mut fgm.dx, number()),
            key::DY => set(&mut fgm.dy, number()),
            key::DT => set(&mut fgm.dt, duration()),
            key::GROWTH_APPLIED => set(&mut fgm.growth_percentile_applied, parse_flag(value)),
            key::GROWTH_PERCENTILE => set(&mut fgm.growth_percentile, number()),
            key::TERRAIN_EFFECT => set(&mut self.fbp.terrain_effect, parse_flag(value)),
            key::WIND_EFFECT => set(&mut self.fbp.wind_effect, parse_flag(value)),
            key::PERCENT_OVERRIDE => set(&mut self.fmc.per_override, number()),
            key::NODATA_ELEVATION => set(&mut self.fmc.nodata_elevation, number()),
            key::FMC_TERRAIN => set(&mut self.fmc.terrain, parse_flag(value)),
            key::FWI_SPATIAL_INTERP => set(&mut self.fwi.spatial_interpolation, parse_flag(value)),
            key::FWI_FROM_SPATIAL_WEATHER => {
                set(&mut self.fwi.from_spatial_weather, parse_flag(value))
            }
            key::HISTORY_ON_FWI => set(&mut self.fwi.history_on_effected_fwi, parse_flag(value)),
            key::BURNING_CONDITIONS_ON => {
                set(&mut self.fwi.burning_conditions_on, parse_flag(value))
            }
            key::FWI_TEMPORAL_INTERP => {
                set(&mut self.fwi.temporal_interpolation, parse_flag(value))
            }
            key::VERSION => set(&mut meta.version, parse_flag(value)),
            key::SCENARIO_NAME => set(&mut meta.scenario_name, parse_flag(value)),
            key::JOB_NAME => set(&mut meta.job_name, parse_flag(value)),
            key::IGNITION_NAME => set(&mut meta.ignition_name, parse_flag(value)),
            key::SIMULATION_DATE => set(&mut meta.simulation_date, parse_flag(value)),
            key::FIRE_SIZE => set(&mut meta.fire_size, parse_flag(value)),
            key::PERIMETER_TOTAL => set(&mut meta.perimeter_total, parse_flag(value)),
            key::PERIMETER_ACTIVE => set(&mut meta.perimeter_active, parse_flag(value)),
            key::AREA_UNIT => set(
                &mut meta.area_unit,
                value.parse().ok().and_then(MetadataUnit::from_code),
            ),
            key::PERIMETER_UNIT => set(
                &mut meta.perimeter_unit,
                value.parse().ok().and_then(MetadataUnit::from_code),
            ),
            _ => false,
        }
    }
}

/// Parse a `GETDEFAULTS` response: alternating key and value lines.
pub fn parse_defaults(text: &str) -> JobDefaults {
    let mut defaults = JobDefaults::default();
    let lines: Vec<&str> = text.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    for pair in lines.chunks_exact(2) {
        defaults.apply(pair[0], pair[1]);
    }
    defaults
}

/// Parse a `LIST_TIMEZONES` response. Only the first line carries data, as
/// `name|value|name|value...`. Pairs with a missing or non-numeric value are
/// skipped.
pub fn parse_timezones(text: &str) -> Vec<TimezoneName> {
    let first = text.split('\n').next().unwrap_or_default().trim_end_matches('\r');
    if first.trim() == COMPLETE {
        return Vec::new();
    }
    let fields: Vec<&str> = first.split('|').collect();
    fields
        .chunks_exact(2)
        .filter_map(|pair| {
            let value = pair[1].trim().parse().ok()?;
            Some(TimezoneName {
                name: pair[0].to_string(),
                value,
            })
        })
        .collect()
}

/// Engine component a third-party library ships in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Manager,
    Builder,
    Windows,
    Linux,
    Unknown,
}

impl ComponentType {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "manager" => Some(ComponentType::Manager),
            "builder" => Some(ComponentType::Builder),
            "psaas_windows" => Some(ComponentType::Windows),
            "psaas_linux" => Some(ComponentType::Linux),
            _ => None,
        }
    }

    /// Parse a comma list; no recognized names yields `[Unknown]`.
    pub fn parse_list(value: &str) -> Vec<Self> {
        let parsed: Vec<Self> = value.split(',').filter_map(Self::from_name).collect();
        if parsed.is_empty() {
            vec![ComponentType::Unknown]
        } else {
            parsed
        }
    }
}

/// One third-party license used by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct License {
    pub components: Vec<ComponentType>,
    pub library_name: String,
    pub library_url: String,
    pub license_name: String,
    pub license_url: String,
}

fn unescape(field: &str) -> String {
    field.replace("%7C", "|")
}

/// Parse a `GET_LICENSES` response.
///
/// Records are five `|`-separated fields closed by a `_` field. Empty fields
/// leave the value blank but still count toward the field position.
pub fn parse_licenses(text: &str) -> Vec<License> {
    let mut licenses = Vec::new();
    let mut license = License::default();
    let mut index = 0;
    for field in text.split('|') {
        if field == "_" {
            licenses.push(std::mem::take(&mut license));
            index = 0;
            continue;
        }
        if !field.is_empty() {
            match index {
                0 => license.components = ComponentType::parse_list(field),
                1 => license.library_name = unescape(field),
                2 => license.library_url = unescape(field),
                3 => license.license_name = unescape(field),
                4 => license.license_url = unescape(field),
                _ => {}
            }
        }
        index += 1;
    }
    licenses
}

/// Parse a job listing: one name per line up to the `COMPLETE` terminator.
pub fn parse_job_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .take_while(|line| !line.contains(COMPLETE))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// How urgently a running job should stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopPriority {
    #[default]
    None,
    Soon,
    Now,
}

impl StopPriority {
    pub fn code(self) -> i32 {
        match self {
            StopPriority::None => 0,
            StopPriority::Soon => 1,
            StopPriority::Now => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let text = "JOBLOCATION\n/srv/jobs\nMAXACCTS\nPT2M\nDISTRES\n1.5\nBREACHING\n1\n\
                    fgmd_spotting\nfalse\nfmgd_dt\nPT30S\nNODATAELEV\n-99\nAREAUNIT\n8\n\
                    SOMETHINGNEW\n42\nPERIMRES\n";
        let defaults = parse_defaults(text);
        assert_eq!(defaults.job_directory.as_deref(), Some("/srv/jobs"));
        assert_eq!(defaults.fgm.max_accel_timestep.map(|d| d.to_seconds()), Some(120));
        assert_eq!(defaults.fgm.distance_resolution, Some(1.5));
        assert_eq!(defaults.fgm.breaching, Some(true));
        assert_eq!(defaults.fgm.spotting, Some(false));
        assert_eq!(defaults.fgm.dt.map(|d| d.to_string()), Some("PT30S".to_string()));
        assert_eq!(defaults.fmc.nodata_elevation, Some(-99.0));
        assert_eq!(defaults.metadata.area_unit, Some(MetadataUnit::Hectare));
        assert_eq!(defaults.fgm.perimeter_resolution, None);
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut defaults = JobDefaults::default();
        assert!(!defaults.apply("BREACHING", "maybe"));
        assert!(!defaults.apply("DISTRES", "wide"));
        assert!(!defaults.apply("NOT_A_KEY", "1"));
        assert_eq!(defaults, JobDefaults::default());
    }

    #[test]
    fn test_parse_timezones() {
        let text = "UTC|0|Mountain Daylight Time|22|Broken|x|Dangling\nCOMPLETE\n";
        let zones = parse_timezones(text);
        assert_eq!(
            zones,
            vec![
                TimezoneName {
                    name: "UTC".into(),
                    value: 0
                },
                TimezoneName {
                    name: "Mountain Daylight Time".into(),
                    value: 22
                },
            ]
        );
        assert!(parse_timezones("COMPLETE\n").is_empty());
    }

    #[test]
    fn test_parse_licenses() {
        let text = "builder,manager|protobuf|https://a|BSD%7C3|https://b|_|\
                    nonsense||https://c|MIT||_|\n";
        let licenses = parse_licenses(text);
        assert_eq!(licenses.len(), 2);
        assert_eq!(
            licenses[0].components,
            vec![ComponentType::Builder, ComponentType::Manager]
        );
        assert_eq!(licenses[0].license_name, "BSD|3");
        assert_eq!(licenses[1].components, vec![ComponentType::Unknown]);
        assert_eq!(licenses[1].library_name, "");
        assert_eq!(licenses[1].library_url, "https://c");
        assert_eq!(licenses[1].license_name, "MIT");
    }

    #[test]
    fn test_parse_job_list() {
        let text = "job_20240601\r\n  job_20240602 \n\nCOMPLETE\njunk\n";
        assert_eq!(parse_job_list(text), vec!["job_20240601", "job_20240602"]);
        assert!(parse_job_list("COMPLETE").is_empty());
    }

    #[test]
    fn test_stop_priority_codes() {
        assert_eq!(StopPriority::default().code(), 0);
        assert_eq!(StopPriority::Soon.code(), 1);
        assert_eq!(StopPriority::Now.code(), 2);
    }
}
