//! The job aggregate root.

use super::attachments::{attachment_reference, validate_filename, FileAttachment};
use super::files::{GridFile, GridFileType, InputFiles};
use super::fuel::{
    FuelBreak, FuelBreakShape, FuelOption, FuelOptionType, FuelPatch, FuelSource, FuelTarget,
};
use super::geo::{LatLon, PatchShape};
use super::ignition::{AssetFile, AssetShape, Ignition, IgnitionShape};
use super::outputs::{
    GridCompression, GridInterpolation, GridOutput, Outputs, StatsFile, SummaryFile,
    SummaryOutputs, TimestepSettings, VectorFile, VectorFileType, VectorMetadata,
};
use super::scenario::Scenario;
use super::statistics::GlobalStatistics;
use super::streams::OutputStreamSink;
use super::timezone::Timezone;
use super::units::UnitSettings;
use super::weather::{
    WeatherGrid, WeatherGridType, WeatherPatch, WeatherStation, WeatherStream,
    WeatherStreamSettings,
};
use super::{Entity, ModelError};
use crate::duration::Duration;
use crate::ids::{EntityKind, IdAllocator};

fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: &str) -> bool {
    match items.iter().position(|item| item.id() == id) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

/// One complete simulation request.
///
/// Every entity is created through a factory method so its id is drawn from
/// this job's allocator. Factories return a mutable reference for further
/// configuration; removal methods only edit the in-memory graph.
#[derive(Debug)]
pub struct Job {
    ids: IdAllocator,
    pub comments: String,
    pub timezone: Timezone,
    pub files: InputFiles,
    pub weather_stations: Vec<WeatherStation>,
    pub ignitions: Vec<Ignition>,
    pub scenarios: Vec<Scenario>,
    pub fuel_options: Vec<FuelOption>,
    pub assets: Vec<AssetFile>,
    pub outputs: Outputs,
    pub timestep_settings: TimestepSettings,
    pub stream_sinks: Vec<OutputStreamSink>,
    pub export_units: UnitSettings,
    attachments: Vec<FileAttachment>,
    next_attachment: u32,
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}

impl Job {
    /// Create an empty job with its own sequential id counters.
    pub fn new() -> Self {
        Self::with_ids(IdAllocator::new())
    }

    /// Create an empty job drawing ids from `ids`.
    pub fn with_ids(ids: IdAllocator) -> Self {
        Self {
            ids,
            comments: String::new(),
            timezone: Timezone::default(),
            files: InputFiles::default(),
            weather_stations: Vec::new(),
            ignitions: Vec::new(),
            scenarios: Vec::new(),
            fuel_options: Vec::new(),
            assets: Vec::new(),
            outputs: Outputs::default(),
            timestep_settings: TimestepSettings::default(),
            stream_sinks: Vec::new(),
            export_units: UnitSettings::default(),
            attachments: Vec::new(),
            next_attachment: 1,
        }
    }

    // Time zone

    pub fn set_timezone(&mut self, offset: Duration, dst: bool) {
        self.timezone = Timezone::from_offset(offset, dst);
    }

    /// Use a zone from the engine's list. Negative values clear the zone id.
    pub fn set_timezone_by_value(&mut self, value: i32) {
        self.timezone = Timezone::from_value(value);
    }

    pub fn clear_timezone(&mut self) {
        self.timezone = Timezone::default();
    }

    // Landscape files

    pub fn set_projection_file(&mut self, file: impl Into<String>) {
        self.files.projection = file.into();
    }

    pub fn set_lut_file(&mut self, file: impl Into<String>) {
        self.files.lut = file.into();
    }

    pub fn set_fuel_map_file(&mut self, file: impl Into<String>) {
        self.files.fuel_map = file.into();
    }

    pub fn set_elevation_file(&mut self, file: impl Into<String>) {
        self.files.elevation = file.into();
    }

    pub fn clear_elevation_file(&mut self) {
        self.files.elevation.clear();
    }

    // Fuel options

    fn push_fuel_option(&mut self, fuel_type: &str, option: FuelOptionType, value: f64) {
        self.fuel_options.push(FuelOption {
            fuel_type: fuel_type.to_string(),
            option,
            value,
        });
    }

    /// Percent conifer (0-100) for M-1, M-2, NZ-54 or NZ-69.
    pub fn set_percent_conifer(&mut self, fuel: &str, value: f64) {
        self.push_fuel_option(fuel, FuelOptionType::PercentConifer, value);
    }

    /// Percent dead fir (0-100) for M-3 or M-4.
    pub fn set_percent_dead_fir(&mut self, fuel: &str, value: f64) {
        self.push_fuel_option(fuel, FuelOptionType::PercentDeadFir, value);
    }

    pub fn set_grass_curing(&mut self, fuel: &str, value: f64) {
        self.push_fuel_option(fuel, FuelOptionType::GrassCuring, value);
    }

    /// Grass fuel load in kg/m².
    pub fn set_grass_fuel_load(&mut self, fuel: &str, value: f64) {
        self.push_fuel_option(fuel, FuelOptionType::GrassFuelLoad, value);
    }

    pub fn set_crown_base_height(&mut self, fuel: &str, value: f64) {
        self.push_fuel_option(fuel, FuelOptionType::CrownBaseHeight, value);
    }

    /// Remove the fuel option at `index`.
    pub fn remove_fuel_option(&mut self, index: usize) -> bool {
        if index < self.fuel_options.len() {
            self.fuel_options.remove(index);
            true
        } else {
            false
        }
    }

    // Grid files

    pub fn add_grid_file(
        &mut self,
        kind: GridFileType,
        filename: impl Into<String>,
        projection: impl Into<String>,
        comment: impl Into<String>,
    ) -> &mut GridFile {
        let id = self.ids.allocate(EntityKind::GridFile);
        self.files.grid_files.push(GridFile {
            id,
            comment: comment.into(),
            kind,
            filename: filename.into(),
            projection: projection.into(),
        });
        last(&mut self.files.grid_files)
    }

    pub fn remove_grid_file(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.files.grid_files, id)
    }

    // Fuel patches

    fn push_fuel_patch(
        &mut self,
        from: FuelSource,
        to: FuelTarget,
        shape: PatchShape,
        comments: &str,
    ) -> &mut FuelPatch {
        let id = self.ids.allocate(EntityKind::FuelPatch);
        self.files.fuel_patches.push(FuelPatch {
            id,
            comments: comments.to_string(),
            from,
            to,
            shape,
        });
        last(&mut self.files.fuel_patches)
    }

    pub fn add_landscape_fuel_patch(
        &mut self,
        from: FuelSource,
        to: FuelTarget,
        comments: &str,
    ) -> &mut FuelPatch {
        self.push_fuel_patch(from, to, PatchShape::Landscape, comments)
    }

    pub fn add_file_fuel_patch(
        &mut self,
        from: FuelSource,
        to: FuelTarget,
        filename: impl Into<String>,
        comments: &str,
    ) -> &mut FuelPatch {
        self.push_fuel_patch(from, to, PatchShape::File(filename.into()), comments)
    }

    pub fn add_polygon_fuel_patch(
        &mut self,
        from: FuelSource,
        to: FuelTarget,
        vertices: Vec<LatLon>,
        comments: &str,
    ) -> &mut FuelPatch {
        self.push_fuel_patch(from, to, PatchShape::Polygon(vertices), comments)
    }

    pub fn remove_fuel_patch(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.files.fuel_patches, id)
    }

    // Fuel breaks

    fn push_fuel_break(
        &mut self,
        width: Option<f64>,
        shape: FuelBreakShape,
        comments: &str,
    ) -> &mut FuelBreak {
        let id = self.ids.allocate(EntityKind::FuelBreak);
        self.files.fuel_breaks.push(FuelBreak {
            id,
            width,
            comments: comments.to_string(),
            shape,
        });
        last(&mut self.files.fuel_breaks)
    }

    pub fn add_file_fuel_break(&mut self, filename: impl Into<String>, comments: &str) -> &mut FuelBreak {
        self.push_fuel_break(None, FuelBreakShape::File(filename.into()), comments)
    }

    pub fn add_polygon_fuel_break(&mut self, vertices: Vec<LatLon>, comments: &str) -> &mut FuelBreak {
        self.push_fuel_break(None, FuelBreakShape::Polygon(vertices), comments)
    }

    /// A line break `width` metres wide.
    pub fn add_polyline_fuel_break(
        &mut self,
        width: f64,
        vertices: Vec<LatLon>,
        comments: &str,
    ) -> &mut FuelBreak {
        self.push_fuel_break(Some(width), FuelBreakShape::Polyline(vertices), comments)
    }

    pub fn remove_fuel_break(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.files.fuel_breaks, id)
    }

    // Weather stations and streams

    pub fn add_weather_station(
        &mut self,
        elevation: f64,
        location: LatLon,
        comments: &str,
    ) -> &mut WeatherStation {
        let id = self.ids.allocate(EntityKind::WeatherStation);
        self.weather_stations.push(WeatherStation {
            id,
            location: Some(location),
            elevation,
            comments: comments.to_string(),
            streams: Vec::new(),
        });
        last(&mut self.weather_stations)
    }

    pub fn remove_weather_station(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.weather_stations, id)
    }

    pub fn weather_station(&self, id: &str) -> Option<&WeatherStation> {
        self.weather_stations.iter().find(|s| s.id == id)
    }

    /// Attach a new stream to the station `station`.
    pub fn add_weather_stream(
        &mut self,
        station: &str,
        settings: WeatherStreamSettings,
    ) -> Result<&mut WeatherStream, ModelError> {
        let index = self
            .weather_stations
            .iter()
            .position(|s| s.id == station)
            .ok_or_else(|| ModelError::UnknownEntity {
                kind: "weather station",
                id: station.to_string(),
            })?;
        let id = self.ids.allocate(EntityKind::WeatherStream);
        let streams = &mut self.weather_stations[index].streams;
        streams.push(WeatherStream::from_settings(id, settings));
        Ok(last(streams))
    }

    // Weather patches

    fn push_weather_patch(
        &mut self,
        shape: PatchShape,
        start_time: &str,
        start_time_of_day: &str,
        end_time: &str,
        end_time_of_day: &str,
        comments: &str,
    ) -> &mut WeatherPatch {
        let id = self.ids.allocate(EntityKind::WeatherPatch);
        self.files.weather_patches.push(WeatherPatch {
            id,
            comments: comments.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            start_time_of_day: start_time_of_day.to_string(),
            end_time_of_day: end_time_of_day.to_string(),
            temperature: None,
            rh: None,
            precipitation: None,
            wind_speed: None,
            wind_direction: None,
            shape,
        });
        last(&mut self.files.weather_patches)
    }

    pub fn add_file_weather_patch(
        &mut self,
        filename: impl Into<String>,
        start_time: &str,
        start_time_of_day: &str,
        end_time: &str,
        end_time_of_day: &str,
        comments: &str,
    ) -> &mut WeatherPatch {
        self.push_weather_patch(
            PatchShape::File(filename.into()),
            start_time,
            start_time_of_day,
            end_time,
            end_time_of_day,
            comments,
        )
    }

    pub fn add_polygon_weather_patch(
        &mut self,
        vertices: Vec<LatLon>,
        start_time: &str,
        start_time_of_day: &str,
        end_time: &str,
        end_time_of_day: &str,
        comments: &str,
    ) -> &mut WeatherPatch {
        self.push_weather_patch(
            PatchShape::Polygon(vertices),
            start_time,
            start_time_of_day,
            end_time,
            end_time_of_day,
            comments,
        )
    }

    pub fn add_landscape_weather_patch(
        &mut self,
        start_time: &str,
        start_time_of_day: &str,
        end_time: &str,
        end_time_of_day: &str,
        comments: &str,
    ) -> &mut WeatherPatch {
        self.push_weather_patch(
            PatchShape::Landscape,
            start_time,
            start_time_of_day,
            end_time,
            end_time_of_day,
            comments,
        )
    }

    pub fn remove_weather_patch(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.files.weather_patches, id)
    }

    // Weather grids

    fn push_weather_grid(
        &mut self,
        kind: WeatherGridType,
        start_time: &str,
        start_time_of_day: &str,
        end_time: &str,
        end_time_of_day: &str,
        comments: &str,
    ) -> &mut WeatherGrid {
        let id = self.ids.allocate(EntityKind::WeatherGrid);
        self.files.weather_grids.push(WeatherGrid {
            id,
            comments: comments.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            start_time_of_day: start_time_of_day.to_string(),
            end_time_of_day: end_time_of_day.to_string(),
            kind,
            files: Vec::new(),
        });
        last(&mut self.files.weather_grids)
    }

    pub fn add_direction_weather_grid(
        &mut self,
        start_time: &str,
        start_time_of_day: &str,
        end_time: &str,
        end_time_of_day: &str,
        comments: &str,
    ) -> &mut WeatherGrid {
        self.push_weather_grid(
            WeatherGridType::Direction,
            start_time,
            start_time_of_day,
            end_time,
            end_time_of_day,
            comments,
        )
    }

    pub fn add_speed_weather_grid(
        &mut self,
        start_time: &str,
        start_time_of_day: &str,
        end_time: &str,
        end_time_of_day: &str,
        comments: &str,
    ) -> &mut WeatherGrid {
        self.push_weather_grid(
            WeatherGridType::Speed,
            start_time,
            start_time_of_day,
            end_time,
            end_time_of_day,
            comments,
        )
    }

    pub fn remove_weather_grid(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.files.weather_grids, id)
    }

    // Ignitions

    fn push_ignition(&mut self, start_time: &str, shape: IgnitionShape, comments: &str) -> &mut Ignition {
        let id = self.ids.allocate(EntityKind::Ignition);
        self.ignitions.push(Ignition {
            id,
            start_time: start_time.to_string(),
            comments: comments.to_string(),
            shape,
            attributes: Vec::new(),
        });
        last(&mut self.ignitions)
    }

    pub fn add_file_ignition(
        &mut self,
        start_time: &str,
        filename: impl Into<String>,
        comments: &str,
    ) -> &mut Ignition {
        self.push_ignition(start_time, IgnitionShape::File(filename.into()), comments)
    }

    pub fn add_point_ignition(&mut self, start_time: &str, point: LatLon, comments: &str) -> &mut Ignition {
        self.push_ignition(start_time, IgnitionShape::Point(vec![point]), comments)
    }

    pub fn add_multi_point_ignition(
        &mut self,
        start_time: &str,
        points: Vec<LatLon>,
        comments: &str,
    ) -> &mut Ignition {
        self.push_ignition(start_time, IgnitionShape::Point(points), comments)
    }

    pub fn add_polygon_ignition(
        &mut self,
        start_time: &str,
        vertices: Vec<LatLon>,
        comments: &str,
    ) -> &mut Ignition {
        self.push_ignition(start_time, IgnitionShape::Polygon(vertices), comments)
    }

    pub fn add_polyline_ignition(
        &mut self,
        start_time: &str,
        vertices: Vec<LatLon>,
        comments: &str,
    ) -> &mut Ignition {
        self.push_ignition(start_time, IgnitionShape::Polyline(vertices), comments)
    }

    pub fn remove_ignition(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.ignitions, id)
    }

    // Assets

    fn push_asset(&mut self, shape: AssetShape, comments: &str) -> &mut AssetFile {
        let id = self.ids.allocate(EntityKind::Asset);
        self.assets.push(AssetFile {
            id,
            comments: comments.to_string(),
            shape,
            buffer: None,
        });
        last(&mut self.assets)
    }

    pub fn add_file_asset(&mut self, filename: impl Into<String>, comments: &str) -> &mut AssetFile {
        self.push_asset(AssetShape::File(filename.into()), comments)
    }

    pub fn add_point_asset(&mut self, location: LatLon, comments: &str) -> &mut AssetFile {
        self.push_asset(AssetShape::Point(vec![location]), comments)
    }

    pub fn add_polygon_asset(&mut self, vertices: Vec<LatLon>, comments: &str) -> &mut AssetFile {
        self.push_asset(AssetShape::Polygon(vertices), comments)
    }

    pub fn add_polyline_asset(&mut self, vertices: Vec<LatLon>, comments: &str) -> &mut AssetFile {
        self.push_asset(AssetShape::Polyline(vertices), comments)
    }

    pub fn remove_asset(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.assets, id)
    }

    // Scenarios

    pub fn add_scenario(&mut self, start_time: &str, end_time: &str, comments: &str) -> &mut Scenario {
        let id = self.ids.allocate(EntityKind::Scenario);
        let mut scenario = Scenario::new(id);
        scenario.start_time = start_time.to_string();
        scenario.end_time = end_time.to_string();
        scenario.comments = comments.to_string();
        self.scenarios.push(scenario);
        last(&mut self.scenarios)
    }

    pub fn remove_scenario(&mut self, id: &str) -> bool {
        remove_by_id(&mut self.scenarios, id)
    }

    pub fn scenario_mut(&mut self, id: &str) -> Option<&mut Scenario> {
        self.scenarios.iter_mut().find(|s| s.id == id)
    }

    // Outputs

    /// Export `statistic` as a raster at `time` for `scenario`.
    pub fn add_grid_output(
        &mut self,
        scenario: &str,
        statistic: GlobalStatistics,
        filename: impl Into<String>,
        time: &str,
        interpolation: GridInterpolation,
    ) -> &mut GridOutput {
        let should_stream = self.outputs.stream_all;
        self.outputs.grid_files.push(GridOutput {
            scenario_name: scenario.to_string(),
            filename: filename.into(),
            output_time: time.to_string(),
            statistic,
            interpolation,
            should_stream,
            compression: GridCompression::None,
            should_minimize: false,
            sub_scenario_name: None,
            sub_scenario_override_times: Vec::new(),
        });
        last(&mut self.outputs.grid_files)
    }

    pub fn remove_grid_output(&mut self, filename: &str) -> bool {
        remove_by_filename(&mut self.outputs.grid_files, filename, |f| &f.filename)
    }

    /// Export the fire perimeter of `scenario` between two times.
    pub fn add_vector_output(
        &mut self,
        scenario: &str,
        kind: VectorFileType,
        filename: impl Into<String>,
        perimeter_start_time: &str,
        perimeter_end_time: &str,
    ) -> &mut VectorFile {
        let should_stream = self.outputs.stream_all;
        self.outputs.vector_files.push(VectorFile {
            scenario_name: scenario.to_string(),
            filename: filename.into(),
            kind: Some(kind),
            multiple_perimeters: Some(false),
            perimeter_start_time: perimeter_start_time.to_string(),
            perimeter_end_time: perimeter_end_time.to_string(),
            remove_islands: None,
            merge_contact: None,
            perimeter_active: Some(false),
            sub_scenario_name: None,
            sub_scenario_overrides: Vec::new(),
            metadata: VectorMetadata::default(),
            should_stream,
        });
        last(&mut self.outputs.vector_files)
    }

    pub fn remove_vector_output(&mut self, filename: &str) -> bool {
        remove_by_filename(&mut self.outputs.vector_files, filename, |f| &f.filename)
    }

    pub fn add_summary_output(&mut self, scenario: &str, filename: impl Into<String>) -> &mut SummaryFile {
        let should_stream = self.outputs.stream_all;
        self.outputs.summary_files.push(SummaryFile {
            scenario_name: scenario.to_string(),
            filename: filename.into(),
            outputs: SummaryOutputs::default(),
            should_stream,
        });
        last(&mut self.outputs.summary_files)
    }

    pub fn remove_summary_output(&mut self, filename: &str) -> bool {
        remove_by_filename(&mut self.outputs.summary_files, filename, |f| &f.filename)
    }

    /// Add a stats file. The file type follows the extension unless
    /// `file_type` is set on the returned value.
    pub fn add_stats_output(&mut self, scenario: &str, filename: impl Into<String>) -> &mut StatsFile {
        let should_stream = self.outputs.stream_all;
        self.outputs
            .stats_files
            .push(StatsFile::new(scenario.to_string(), filename.into(), should_stream));
        last(&mut self.outputs.stats_files)
    }

    pub fn remove_stats_output(&mut self, filename: &str) -> bool {
        remove_by_filename(&mut self.outputs.stats_files, filename, |f| &f.filename)
    }

    // Output streams

    pub fn stream_output_to_mqtt(&mut self) {
        self.stream_sinks.push(OutputStreamSink::Mqtt);
    }

    /// Remove every MQTT sink.
    pub fn clear_stream_output_to_mqtt(&mut self) {
        self.stream_sinks.retain(|sink| !sink.is_mqtt());
    }

    /// Upload GeoTIFF outputs to a GeoServer instance.
    pub fn stream_output_to_geoserver(
        &mut self,
        username: &str,
        password: &str,
        url: &str,
        workspace: &str,
        coverage_store: &str,
        declared_srs: Option<&str>,
    ) {
        self.stream_sinks.push(OutputStreamSink::GeoServer {
            username: username.to_string(),
            password: password.to_string(),
            url: url.to_string(),
            workspace: workspace.to_string(),
            coverage_store: coverage_store.to_string(),
            declared_srs: declared_srs.map(str::to_string),
        });
    }

    // Attachments

    /// Attach in-memory file contents.
    ///
    /// Returns the `attachment:/` path to use in place of a filename, or
    /// `None` if `filename` is not a valid file name.
    pub fn add_attachment(&mut self, filename: &str, contents: impl Into<String>) -> Option<String> {
        if !validate_filename(filename) {
            return None;
        }
        let reference = attachment_reference(self.next_attachment, filename);
        self.next_attachment += 1;
        self.attachments.push(FileAttachment {
            reference: reference.clone(),
            contents: contents.into(),
        });
        Some(reference)
    }

    pub fn attachments(&self) -> &[FileAttachment] {
        &self.attachments
    }
}

fn last<T>(items: &mut [T]) -> &mut T {
    let index = items.len() - 1;
    &mut items[index]
}

fn remove_by_filename<T>(items: &mut Vec<T>, filename: &str, name: impl Fn(&T) -> &String) -> bool {
    match items.iter().position(|item| name(item) == filename) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories_allocate_per_kind_ids() {
        let mut job = Job::new();
        let first = job.add_point_ignition("2024-06-01T13:00:00", LatLon::new(51.0, -115.0), "").id().to_string();
        let second = job.add_file_ignition("2024-06-01T13:00:00", "fire.kml", "").id().to_string();
        let scenario = job.add_scenario("2024-06-01T13:00:00", "2024-06-02T13:00:00", "").id().to_string();
        assert_eq!(first, "ign0");
        assert_eq!(second, "ign1");
        assert_eq!(scenario, "scen0");
    }

    #[test]
    fn test_weather_stream_needs_existing_station() {
        let mut job = Job::new();
        let station = job.add_weather_station(1483.0, LatLon::new(51.65, -115.37), "").id().to_string();
        let stream = job
            .add_weather_stream(&station, WeatherStreamSettings::default())
            .map(|s| s.id().to_string());
        assert_eq!(stream, Ok("wthrstrm0".to_string()));

        let missing = job.add_weather_stream("nope", WeatherStreamSettings::default());
        assert!(matches!(missing, Err(ModelError::UnknownEntity { .. })));
        assert_eq!(job.weather_stations[0].streams.len(), 1);
    }

    #[test]
    fn test_removals_only_touch_matching_entity() {
        let mut job = Job::new();
        job.add_file_fuel_break("a.shp", "");
        job.add_file_fuel_break("b.shp", "");
        assert!(job.remove_fuel_break("flbrk0"));
        assert!(!job.remove_fuel_break("flbrk0"));
        assert_eq!(job.files.fuel_breaks.len(), 1);
        assert_eq!(job.files.fuel_breaks[0].id(), "flbrk1");
    }

    #[test]
    fn test_attachments_count_from_one() {
        let mut job = Job::new();
        assert_eq!(job.add_attachment("a b.txt", "x").as_deref(), Some("attachment:/1/a%20b.txt"));
        assert_eq!(job.add_attachment("bad:name", "x"), None);
        assert_eq!(job.add_attachment("c.txt", "y").as_deref(), Some("attachment:/2/c.txt"));
        assert_eq!(job.attachments().len(), 2);
    }

    #[test]
    fn test_stream_all_applies_to_new_outputs() {
        let mut job = Job::new();
        job.add_summary_output("scen0", "before.txt");
        job.outputs.stream_all = true;
        job.add_summary_output("scen0", "after.txt");
        job.add_stats_output("scen0", "stats.csv");
        assert!(!job.outputs.summary_files[0].should_stream);
        assert!(job.outputs.summary_files[1].should_stream);
        assert!(job.outputs.stats_files[0].should_stream);
    }

    #[test]
    fn test_clear_mqtt_sinks_keeps_geoserver() {
        let mut job = Job::new();
        job.stream_output_to_mqtt();
        job.stream_output_to_geoserver("u", "p", "http://geo", "ws", "cs", None);
        job.stream_output_to_mqtt();
        job.clear_stream_output_to_mqtt();
        assert_eq!(job.stream_sinks.len(), 1);
        assert!(!job.stream_sinks[0].is_mqtt());
    }

    #[test]
    fn test_vector_output_defaults() {
        let mut job = Job::new();
        let file = job.add_vector_output("scen0", VectorFileType::Kml, "perim.kml", "a", "b");
        assert_eq!(file.multiple_perimeters, Some(false));
        assert_eq!(file.perimeter_active, Some(false));
        assert_eq!(file.remove_islands, None);
    }
}
