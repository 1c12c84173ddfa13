//! Scenarios and the references they hold to other inputs.

use super::options::{AssetOperation, FbpOptions, FgmOptions, FmcOptions, FwiOptions};
use crate::duration::Duration;

/// Hour-of-day window and thresholds during which the fire may burn.
#[derive(Debug, Clone, PartialEq)]
pub struct BurningCondition {
    pub date: String,
    pub start: Duration,
    pub end: Duration,
    pub fwi_greater: f64,
    pub ws_greater: f64,
    pub rh_less: f64,
    pub isi_greater: f64,
}

/// Sub-scenario settings for one referenced weather stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamOptions {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub ignition_time: String,
}

/// A weather stream used by a scenario, with its parent station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStream {
    pub stream: String,
    pub station: String,
    pub primary: bool,
    pub options: Option<StreamOptions>,
}

/// A layered input (grid, patch) and its priority within the scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    pub name: String,
    pub index: i32,
    /// Sub-scenarios the layer is limited to.
    pub sub_names: Option<Vec<String>>,
}

/// How an ignition's geometry is expanded into sub-scenarios.
#[derive(Debug, Clone, PartialEq)]
pub enum IgnitionPlacement {
    Polyline {
        name: String,
        point_spacing: f64,
        poly_index: i32,
        point_index: i32,
    },
    MultiPoint {
        name: String,
        point_index: i32,
    },
    SinglePoint {
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IgnitionReference {
    pub ignition: String,
    pub placement: Option<IgnitionPlacement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    pub name: String,
    pub operation: Option<AssetOperation>,
    pub collision_count: Option<i32>,
}

/// One simulation run configuration.
///
/// A scenario is either a full definition or a copy of another scenario
/// ([`Scenario::make_copy`]), in which case only explicitly set option
/// fields override the copied values.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub(crate) id: String,
    pub copy_of: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub comments: String,
    pub display_interval: Duration,
    pub fgm: FgmOptions,
    pub fbp: FbpOptions,
    pub fmc: FmcOptions,
    pub fwi: FwiOptions,
    pub burning_conditions: Vec<BurningCondition>,
    pub fuel_breaks: Vec<String>,
    pub station_streams: Vec<StationStream>,
    pub layers: Vec<LayerInfo>,
    pub ignitions: Vec<IgnitionReference>,
    pub assets: Vec<AssetReference>,
}

impl Scenario {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            copy_of: None,
            start_time: String::new(),
            end_time: String::new(),
            comments: String::new(),
            display_interval: Duration::create_time(1.0, 0.0, 0.0, false),
            fgm: FgmOptions::default(),
            fbp: FbpOptions::default(),
            fmc: FmcOptions::default(),
            fwi: FwiOptions::default(),
            burning_conditions: Vec::new(),
            fuel_breaks: Vec::new(),
            station_streams: Vec::new(),
            layers: Vec::new(),
            ignitions: Vec::new(),
            assets: Vec::new(),
        }
    }

    pub fn is_copy(&self) -> bool {
        self.copy_of.is_some()
    }

    /// Turn this scenario into a copy of the scenario `other`.
    pub fn make_copy(&mut self, other: &str) {
        self.copy_of = Some(other.to_string());
    }

    /// Add a burning window. Hours past 23 roll over into the next day.
    #[allow(clippy::too_many_arguments)]
    pub fn add_burning_condition(
        &mut self,
        date: impl Into<String>,
        start_hour: f64,
        end_hour: f64,
        fwi_greater: f64,
        ws_greater: f64,
        rh_less: f64,
        isi_greater: f64,
    ) -> &mut BurningCondition {
        let end = if end_hour > 23.0 {
            Duration::create_date_time(0.0, 0.0, 1.0, end_hour - 24.0, 0.0, 0.0, false)
        } else {
            Duration::create_time(end_hour, 0.0, 0.0, false)
        };
        self.burning_conditions.push(BurningCondition {
            date: date.into(),
            start: Duration::create_time(start_hour, 0.0, 0.0, false),
            end,
            fwi_greater,
            ws_greater,
            rh_less,
            isi_greater,
        });
        let last = self.burning_conditions.len() - 1;
        &mut self.burning_conditions[last]
    }

    pub fn remove_burning_condition(&mut self, index: usize) -> bool {
        if index < self.burning_conditions.len() {
            self.burning_conditions.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_probabilistic_values(&mut self, dx: f64, dy: f64, dt: Duration) {
        self.fgm.dx = Some(dx);
        self.fgm.dy = Some(dy);
        self.fgm.dt = Some(dt);
    }

    pub fn clear_probabilistic_values(&mut self) {
        self.fgm.dx = None;
        self.fgm.dy = None;
        self.fgm.dt = None;
    }

    pub fn set_fbp_options(&mut self, terrain_effect: bool, wind_effect: bool) {
        self.fbp = FbpOptions {
            terrain_effect: Some(terrain_effect),
            wind_effect: Some(wind_effect),
        };
    }

    pub fn clear_fbp_options(&mut self) {
        self.fbp = FbpOptions::default();
    }

    pub fn set_fmc_options(&mut self, per_override: Option<f64>, nodata_elevation: Option<f64>, terrain: bool) {
        self.fmc = FmcOptions {
            per_override,
            nodata_elevation,
            terrain: Some(terrain),
        };
    }

    pub fn clear_fmc_options(&mut self) {
        self.fmc = FmcOptions::default();
    }

    pub fn set_fwi_options(
        &mut self,
        spatial_interpolation: bool,
        from_spatial_weather: bool,
        history_on_effected_fwi: bool,
        burning_conditions_on: bool,
        temporal_interpolation: bool,
    ) {
        self.fwi = FwiOptions {
            spatial_interpolation: Some(spatial_interpolation),
            from_spatial_weather: Some(from_spatial_weather),
            history_on_effected_fwi: Some(history_on_effected_fwi),
            burning_conditions_on: Some(burning_conditions_on),
            temporal_interpolation: Some(temporal_interpolation),
        };
    }

    pub fn clear_fwi_options(&mut self) {
        self.fwi = FwiOptions::default();
    }

    pub fn add_ignition_reference(&mut self, ignition: &str) -> &mut IgnitionReference {
        self.ignitions.push(IgnitionReference {
            ignition: ignition.to_string(),
            placement: None,
        });
        let last = self.ignitions.len() - 1;
        &mut self.ignitions[last]
    }

    pub fn remove_ignition_reference(&mut self, ignition: &str) -> bool {
        match self.ignitions.iter().position(|i| i.ignition == ignition) {
            Some(index) => {
                self.ignitions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Reference a weather stream of `station`.
    pub fn add_weather_stream_reference(&mut self, station: &str, stream: &str) -> &mut StationStream {
        self.push_stream(station, stream, false)
    }

    /// Reference a weather stream and mark it as the primary stream.
    pub fn add_primary_weather_stream_reference(&mut self, station: &str, stream: &str) -> &mut StationStream {
        self.push_stream(station, stream, true)
    }

    fn push_stream(&mut self, station: &str, stream: &str, primary: bool) -> &mut StationStream {
        self.station_streams.push(StationStream {
            stream: stream.to_string(),
            station: station.to_string(),
            primary,
            options: None,
        });
        let last = self.station_streams.len() - 1;
        &mut self.station_streams[last]
    }

    pub fn remove_weather_stream_reference(&mut self, stream: &str) -> bool {
        match self.station_streams.iter().position(|s| s.stream == stream) {
            Some(index) => {
                self.station_streams.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the first stream marked as primary.
    pub fn remove_primary_weather_stream_reference(&mut self) -> bool {
        match self.station_streams.iter().position(|s| s.primary) {
            Some(index) => {
                self.station_streams.remove(index);
                true
            }
            None => false,
        }
    }

    /// The stream the engine reports as the primary one.
    pub fn primary_stream(&self) -> Option<&StationStream> {
        self.station_streams.iter().find(|s| s.primary)
    }

    pub fn add_fuel_break_reference(&mut self, fuel_break: &str) {
        self.fuel_breaks.push(fuel_break.to_string());
    }

    pub fn remove_fuel_break_reference(&mut self, fuel_break: &str) -> bool {
        match self.fuel_breaks.iter().position(|b| b == fuel_break) {
            Some(index) => {
                self.fuel_breaks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Reference a weather grid, grid file, fuel patch or weather patch
    /// with its layering priority. The index is rounded.
    pub fn add_layer_reference(&mut self, name: &str, index: f64) -> &mut LayerInfo {
        self.layers.push(LayerInfo {
            name: name.to_string(),
            index: index.round() as i32,
            sub_names: None,
        });
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    pub fn remove_layer_reference(&mut self, name: &str) -> bool {
        match self.layers.iter().position(|l| l.name == name) {
            Some(index) => {
                self.layers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn add_asset_reference(&mut self, asset: &str) -> &mut AssetReference {
        self.assets.push(AssetReference {
            name: asset.to_string(),
            operation: None,
            collision_count: None,
        });
        let last = self.assets.len() - 1;
        &mut self.assets[last]
    }

    pub fn remove_asset_reference(&mut self, asset: &str) -> bool {
        match self.assets.iter().position(|a| a.name == asset) {
            Some(index) => {
                self.assets.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scenario_defaults() {
        let scen = Scenario::new("scen0".into());
        assert!(!scen.is_copy());
        assert_eq!(scen.display_interval.to_string(), "PT1H");
    }

    #[test]
    fn test_burning_condition_end_rolls_over() {
        let mut scen = Scenario::new("scen0".into());
        let bc = scen.add_burning_condition("2024-07-01", 10.0, 26.0, 19.0, 0.0, 95.0, 0.0);
        assert_eq!(bc.start.to_string(), "PT10H");
        assert_eq!(bc.end.to_string(), "P1DT2H");

        let bc = scen.add_burning_condition("2024-07-02", 0.0, 23.0, 19.0, 0.0, 95.0, 0.0);
        assert_eq!(bc.start.to_string(), "PT0S");
        assert_eq!(bc.end.to_string(), "PT23H");
    }

    #[test]
    fn test_remove_primary_stream() {
        let mut scen = Scenario::new("scen0".into());
        scen.add_weather_stream_reference("wthrstn0", "wthrstrm0");
        scen.add_primary_weather_stream_reference("wthrstn0", "wthrstrm1");
        assert_eq!(scen.primary_stream().map(|s| s.stream.as_str()), Some("wthrstrm1"));
        assert!(scen.remove_primary_weather_stream_reference());
        assert!(scen.primary_stream().is_none());
        assert!(!scen.remove_primary_weather_stream_reference());
        assert_eq!(scen.station_streams.len(), 1);
    }

    #[test]
    fn test_layer_index_rounded() {
        let mut scen = Scenario::new("scen0".into());
        assert_eq!(scen.add_layer_reference("flptch0", 2.6).index, 3);
        assert!(scen.remove_layer_reference("flptch0"));
        assert!(!scen.remove_layer_reference("flptch0"));
    }
}
