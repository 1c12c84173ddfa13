//! Job graph to protocol lines.
//!
//! The emission order is fixed: global comment, attachments, inputs
//! (landscape files, fuel breaks, fuel patches, weather grids, weather
//! patches, grid files, stations with their streams, ignitions, scenarios,
//! fuel options, assets, time zone), outputs (summary, vector, grid, stats),
//! timestep statistics, output-stream sinks and export units.
//!
//! # Unset values
//!
//! Most optional fields are simply left out when unset. A few fields keep a
//! sentinel instead:
//!
//! | Field | Unset on the wire |
//! |---|---|
//! | fuel break width, asset buffer | `-1` |
//! | `simulation_properties` parts | `0.5`, `16`, `-1`, `-1` |
//! | summary and vector nullable flags | `-1` |
//! | metadata units, export units | `-1` |
//! | full-scenario `nodataelev` | `-9999` |
//! | full-scenario `distres`, `perimres` | empty payload |
//! | stream diurnal parameters | whole group omitted |

use super::frame::{flag, tristate, Fields, FrameWriter, Num};
use super::tokens as t;
use crate::model::*;

/// Encode a whole submission: session tokens around the job body.
///
/// Expects a job that passed [`Validator::check`](crate::validation::Validator::check).
pub fn encode_submission(job: &Job) -> FrameWriter {
    let mut out = FrameWriter::new();
    out.line(t::STARTUP);
    out.line(t::BEGINDATA);
    encode_job(job, &mut out);
    out.line(t::ENDDATA);
    out.line(t::STARTJOB);
    out
}

/// Encode the job body.
///
/// Encoding assumes a validated job and never checks values itself. Required
/// fields that are unset go out as empty payloads (see the table above), and
/// a line break in any value would split its payload line.
pub fn encode_job(job: &Job, out: &mut FrameWriter) {
    out.pair(t::GLOBAL_COMMENTS, &job.comments);
    for attachment in job.attachments() {
        encode_attachment(attachment, out);
    }
    encode_inputs(job, out);
    encode_outputs(&job.outputs, out);
    for statistic in job.timestep_settings.statistics() {
        out.pair(t::EMIT_STATISTIC, statistic.code());
    }
    for sink in &job.stream_sinks {
        encode_sink(sink, out);
    }
    encode_units(&job.export_units, out);
}

fn encode_attachment(attachment: &FileAttachment, out: &mut FrameWriter) {
    out.line(t::FILE_ATTACHMENT);
    out.line(&attachment.reference);
    out.line(&attachment.contents);
    out.line(t::FILE_ATTACHMENT_END);
}

fn encode_inputs(job: &Job, out: &mut FrameWriter) {
    let files = &job.files;
    out.pair(t::PROJECTION_FILE, &files.projection);
    out.pair(t::LUT_FILE, &files.lut);
    out.pair(t::FUEL_MAP_FILE, &files.fuel_map);
    if !files.elevation.is_empty() {
        out.pair(t::ELEVATION_FILE, &files.elevation);
    }
    for fuel_break in &files.fuel_breaks {
        out.pair(t::FUEL_BREAK, fuel_break_payload(fuel_break));
    }
    for patch in &files.fuel_patches {
        out.pair(t::FUEL_PATCH, fuel_patch_payload(patch));
    }
    for grid in &files.weather_grids {
        out.pair(t::WEATHER_GRID, weather_grid_payload(grid));
    }
    for patch in &files.weather_patches {
        out.pair(t::WEATHER_PATCH, weather_patch_payload(patch));
    }
    for grid_file in &files.grid_files {
        let mut fields = Fields::start(grid_file.id());
        fields
            .push(&grid_file.comment)
            .push(grid_file.kind.code())
            .push(&grid_file.filename)
            .push(&grid_file.projection);
        out.pair(t::GRID_FILE, fields);
    }

    for station in &job.weather_stations {
        let mut fields = Fields::start(station.id());
        match station.location {
            Some(location) => fields.push(Num(location.latitude)).push(Num(location.longitude)),
            None => fields.push("").push(""),
        };
        fields.push(Num(station.elevation)).push(&station.comments);
        out.pair(t::WEATHER_STATION, fields);
        for stream in &station.streams {
            out.pair(t::WEATHER_STREAM, weather_stream_payload(stream, station.id()));
        }
    }

    for ignition in &job.ignitions {
        out.pair(t::IGNITION, ignition_payload(ignition));
    }
    for scenario in &job.scenarios {
        encode_scenario(scenario, out);
    }
    for option in &job.fuel_options {
        let mut fields = Fields::start(&option.fuel_type);
        fields.push(option.option.code()).push(Num(option.value));
        out.pair(t::FUEL_OPTION, fields);
    }
    for asset in &job.assets {
        out.pair(t::ASSET_FILE, asset_payload(asset));
    }
    out.pair(t::TIMEZONE, timezone_payload(&job.timezone));
}

fn timezone_payload(timezone: &Timezone) -> Fields {
    match timezone.value {
        Some(value) if value >= 0 => Fields::start(value),
        _ => {
            let mut fields = Fields::start(timezone.offset);
            fields.push(flag(timezone.dst));
            fields
        }
    }
}

fn push_patch_shape(fields: &mut Fields, shape: &PatchShape) {
    match shape {
        PatchShape::File(filename) => {
            fields.push("file").push(filename);
        }
        PatchShape::Landscape => {
            fields.push("landscape");
        }
        PatchShape::Polygon(points) => {
            fields.push("polygon").push_points(points);
        }
    }
}

fn fuel_break_payload(fuel_break: &FuelBreak) -> Fields {
    let mut fields = Fields::start(fuel_break.id());
    fields
        .push(Num(fuel_break.width.unwrap_or(UNSET_BREAK_WIDTH)))
        .push(&fuel_break.comments);
    match &fuel_break.shape {
        FuelBreakShape::File(filename) => fields.push("file").push(filename),
        FuelBreakShape::Polyline(points) => fields.push("polyline").push_points(points),
        FuelBreakShape::Polygon(points) => fields.push("polygon").push_points(points),
    };
    fields
}

fn fuel_patch_payload(patch: &FuelPatch) -> Fields {
    let mut fields = Fields::start(patch.id());
    fields.push(&patch.comments);
    match &patch.to {
        FuelTarget::Name(name) => fields.push(name),
        FuelTarget::Index(index) => fields.push(index),
    };
    match &patch.from {
        FuelSource::Rule(rule) => fields.push("rule").push(rule.as_str()),
        FuelSource::Name(name) => fields.push("fuel").push(name),
        FuelSource::Index(index) => fields.push("ifuel").push(index),
    };
    push_patch_shape(&mut fields, &patch.shape);
    fields
}

fn weather_patch_payload(patch: &WeatherPatch) -> Fields {
    let mut fields = Fields::start(patch.id());
    fields
        .push(&patch.comments)
        .push(&patch.start_time)
        .push(&patch.end_time)
        .push(&patch.start_time_of_day)
        .push(&patch.end_time_of_day);
    let adjustments = [
        ("temperature", &patch.temperature),
        ("rh", &patch.rh),
        ("precip", &patch.precipitation),
        ("windspeed", &patch.wind_speed),
        ("winddir", &patch.wind_direction),
    ];
    for (tag, adjustment) in adjustments {
        if let Some(adjustment) = adjustment {
            fields
                .push(tag)
                .push(adjustment.operation.code())
                .push(Num(adjustment.value));
        }
    }
    push_patch_shape(&mut fields, &patch.shape);
    fields
}

fn weather_grid_payload(grid: &WeatherGrid) -> Fields {
    let mut fields = Fields::start(grid.id());
    fields
        .push(&grid.comments)
        .push(&grid.start_time)
        .push(&grid.end_time)
        .push(&grid.start_time_of_day)
        .push(&grid.end_time_of_day)
        .push(grid.kind.as_str());
    for file in &grid.files {
        fields
            .push(Num(file.speed))
            .push(file.sector.code())
            .push(&file.filename)
            .push(&file.projection);
    }
    fields
}

fn weather_stream_payload(stream: &WeatherStream, station: &str) -> Fields {
    let mut fields = Fields::start(stream.id());
    fields
        .push(&stream.filename)
        .push(Num(stream.hffmc_value))
        .push(stream.hffmc_hour)
        .push(stream.hffmc_method.code())
        .push(Num(stream.starting_ffmc))
        .push(Num(stream.starting_dmc))
        .push(Num(stream.starting_dc))
        .push(Num(stream.starting_precip))
        .push(&stream.start_time)
        .push(&stream.end_time)
        .push(station)
        .push(&stream.comments);
    if let Some(diurnal) = &stream.diurnal {
        if diurnal.temperature_alpha != UNSET_DIURNAL_ALPHA {
            fields
                .push(Num(diurnal.temperature_alpha))
                .push(Num(diurnal.temperature_beta))
                .push(Num(diurnal.temperature_gamma))
                .push(Num(diurnal.wind_speed_alpha))
                .push(Num(diurnal.wind_speed_beta))
                .push(Num(diurnal.wind_speed_gamma));
        }
    }
    fields
}

fn ignition_payload(ignition: &Ignition) -> Fields {
    let mut fields = Fields::start(ignition.id());
    fields.push(&ignition.start_time).push(&ignition.comments);
    match &ignition.shape {
        IgnitionShape::File(filename) => fields.push("file").push(filename),
        IgnitionShape::Point(points) => fields.push("point").push_points(points),
        IgnitionShape::Polygon(points) => fields.push("polygon").push_points(points),
        IgnitionShape::Polyline(points) => fields.push("polyline").push_points(points),
    };
    fields.push("attr").push(ignition.attributes.len());
    for (key, value) in &ignition.attributes {
        fields.push(key).push(value);
    }
    fields
}

fn asset_payload(asset: &AssetFile) -> Fields {
    let mut fields = Fields::start(asset.id());
    fields
        .push(&asset.comments)
        .push(asset.shape.code())
        .push(Num(asset.buffer.unwrap_or(UNSET_ASSET_BUFFER)));
    match &asset.shape {
        AssetShape::File(filename) => fields.push(filename),
        AssetShape::Point(points) | AssetShape::Polygon(points) | AssetShape::Polyline(points) => {
            fields.push_points(points)
        }
    };
    fields
}

fn pair_if<T: std::fmt::Display>(out: &mut FrameWriter, token: &str, value: Option<T>) {
    if let Some(value) = value {
        out.pair(token, value);
    }
}

fn flag_if(out: &mut FrameWriter, token: &str, value: Option<bool>) {
    pair_if(out, token, value.map(flag));
}

/// Encode one scenario, choosing full or copy mode from the scenario itself.
pub fn encode_scenario(scenario: &Scenario, out: &mut FrameWriter) {
    out.line(t::SCENARIO_BEGIN);
    out.pair(t::SCENARIO_NAME, scenario.id());
    out.pair(t::DISPLAY_INTERVAL, scenario.display_interval);
    let copy = scenario.is_copy();
    if let Some(original) = &scenario.copy_of {
        out.pair(t::SCENARIO_TO_COPY, original);
    }
    if !copy || !scenario.start_time.is_empty() {
        out.pair(t::START_TIME, &scenario.start_time);
    }
    if !copy || !scenario.end_time.is_empty() {
        out.pair(t::END_TIME, &scenario.end_time);
    }
    if !scenario.comments.is_empty() {
        out.pair(t::COMMENTS, &scenario.comments);
    }

    if copy {
        encode_fgm_copy(&scenario.fgm, out);
    } else {
        encode_fgm_full(&scenario.fgm, out);
    }
    flag_if(out, t::TERRAIN_EFFECT, scenario.fbp.terrain_effect);
    flag_if(out, t::WIND_EFFECT, scenario.fbp.wind_effect);
    encode_fmc(&scenario.fmc, copy, out);
    encode_fwi(&scenario.fwi, out);

    for condition in &scenario.burning_conditions {
        let mut fields = Fields::start(&condition.date);
        fields
            .push(condition.start)
            .push(condition.end)
            .push(Num(condition.fwi_greater))
            .push(Num(condition.ws_greater))
            .push(Num(condition.rh_less))
            .push(Num(condition.isi_greater));
        out.pair(t::BURNING_CONDITION, fields);
    }
    for fuel_break in &scenario.fuel_breaks {
        out.pair(t::VECTOR_REF, fuel_break);
    }
    for reference in &scenario.station_streams {
        let mut fields = Fields::start(&reference.stream);
        fields.push(&reference.station);
        if let Some(options) = &reference.options {
            fields
                .push(&options.name)
                .push(&options.start_time)
                .push(&options.end_time)
                .push(&options.ignition_time);
        }
        out.pair(t::STREAM_REF, fields);
    }
    for layer in &scenario.layers {
        let mut fields = Fields::start(&layer.name);
        fields.push(layer.index);
        if let Some(names) = &layer.sub_names {
            fields.push(names.len());
            for name in names {
                fields.push(name);
            }
        }
        out.pair(t::LAYER_INFO, fields);
    }
    if let Some(primary) = scenario.primary_stream() {
        out.pair(t::PRIMARY_STREAM, &primary.stream);
    }
    for reference in &scenario.ignitions {
        let mut fields = Fields::start(&reference.ignition);
        match &reference.placement {
            Some(IgnitionPlacement::Polyline {
                name,
                point_spacing,
                poly_index,
                point_index,
            }) => {
                fields
                    .push("line")
                    .push(name)
                    .push(Num(*point_spacing))
                    .push(poly_index)
                    .push(point_index);
            }
            Some(IgnitionPlacement::MultiPoint { name, point_index }) => {
                fields.push("mp").push(name).push(point_index);
            }
            Some(IgnitionPlacement::SinglePoint { name }) => {
                fields.push("sp").push(name);
            }
            None => {}
        }
        out.pair(t::IGNITION_REF, fields);
    }
    for asset in &scenario.assets {
        let mut fields = Fields::start(&asset.name);
        fields
            .push(AssetOperation::code_or_unset(asset.operation))
            .push(asset.collision_count.unwrap_or(UNSET_ASSET_CODE));
        out.pair(t::ASSET_REF, fields);
    }
    out.line(t::SCENARIO_END);
}

fn simulation_properties(fgm: &FgmOptions) -> Fields {
    let mut fields = Fields::start(Num(fgm.effective_ignition_size()));
    fields
        .push(fgm.effective_initial_vertex_count())
        .push(AssetOperation::code_or_unset(fgm.global_asset_operation))
        .push(fgm.asset_collision_count.unwrap_or(UNSET_ASSET_CODE));
    fields
}

fn encode_fgm_full(fgm: &FgmOptions, out: &mut FrameWriter) {
    pair_if(out, t::MAX_ACCEL_TIMESTEP, fgm.max_accel_timestep);
    out.pair(
        t::DISTANCE_RESOLUTION,
        fgm.distance_resolution.map(|v| Num(v).to_string()).unwrap_or_default(),
    );
    out.pair(
        t::PERIMETER_RESOLUTION,
        fgm.perimeter_resolution.map(|v| Num(v).to_string()).unwrap_or_default(),
    );
    pair_if(out, t::MIN_SPREAD_ROS, fgm.minimum_spreading_ros.map(Num));
    out.pair(t::STOP_AT_GRID_END, flag(fgm.stop_at_grid_end.unwrap_or(false)));
    out.pair(t::BREACHING, flag(fgm.breaching.unwrap_or(false)));
    encode_fgm_optional(fgm, out);
    out.pair(t::SIMULATION_PROPERTIES, simulation_properties(fgm));
}

fn encode_fgm_copy(fgm: &FgmOptions, out: &mut FrameWriter) {
    pair_if(out, t::MAX_ACCEL_TIMESTEP, fgm.max_accel_timestep);
    pair_if(out, t::DISTANCE_RESOLUTION, fgm.distance_resolution.map(Num));
    pair_if(out, t::PERIMETER_RESOLUTION, fgm.perimeter_resolution.map(Num));
    pair_if(out, t::MIN_SPREAD_ROS, fgm.minimum_spreading_ros.map(Num));
    flag_if(out, t::STOP_AT_GRID_END, fgm.stop_at_grid_end);
    flag_if(out, t::BREACHING, fgm.breaching);
    encode_fgm_optional(fgm, out);
    if fgm.has_simulation_properties() {
        out.pair(t::SIMULATION_PROPERTIES, simulation_properties(fgm));
    }
}

/// Fields emitted only when set, in either mode.
fn encode_fgm_optional(fgm: &FgmOptions, out: &mut FrameWriter) {
    flag_if(out, t::DYNAMIC_THRESHOLD, fgm.dynamic_spatial_threshold);
    flag_if(out, t::SPOTTING, fgm.spotting);
    flag_if(out, t::PURGE_NON_DISPLAY, fgm.purge_non_displayable);
    pair_if(out, t::DX, fgm.dx.map(Num));
    pair_if(out, t::DY, fgm.dy.map(Num));
    pair_if(out, t::DT, fgm.dt);
    pair_if(out, t::DWD, fgm.dwd.map(Num));
    flag_if(out, t::GROWTH_APPLIED, fgm.growth_percentile_applied);
    pair_if(out, t::GROWTH_PERCENTILE, fgm.growth_percentile.map(Num));
}

fn encode_fmc(fmc: &FmcOptions, copy: bool, out: &mut FrameWriter) {
    if let Some(percent) = fmc.per_override.filter(|p| *p >= 0.0) {
        out.pair(t::PERCENT_OVERRIDE, Num(percent));
    }
    let nodata = fmc
        .nodata_elevation
        .filter(|e| *e != UNSET_NODATA_ELEVATION);
    match (nodata, copy) {
        (Some(elevation), _) => out.pair(t::NODATA_ELEVATION, Num(elevation)),
        (None, false) => out.pair(t::NODATA_ELEVATION, Num(UNSET_NODATA_ELEVATION)),
        (None, true) => {}
    }
    flag_if(out, t::FMC_TERRAIN, fmc.terrain);
}

fn encode_fwi(fwi: &FwiOptions, out: &mut FrameWriter) {
    flag_if(out, t::FWI_SPATIAL_INTERP, fwi.spatial_interpolation);
    flag_if(out, t::FWI_FROM_SPATIAL_WEATHER, fwi.from_spatial_weather);
    flag_if(out, t::HISTORY_ON_FWI, fwi.history_on_effected_fwi);
    flag_if(out, t::BURNING_CONDITIONS_ON, fwi.burning_conditions_on);
    flag_if(out, t::FWI_TEMPORAL_INTERP, fwi.temporal_interpolation);
}

fn encode_outputs(outputs: &Outputs, out: &mut FrameWriter) {
    for file in &outputs.summary_files {
        out.pair(t::SUMMARY_FILE, summary_payload(file));
    }
    for file in &outputs.vector_files {
        out.pair(t::VECTOR_FILE, vector_payload(file));
    }
    for file in &outputs.grid_files {
        out.pair(t::GRID_OUTPUT, grid_payload(file));
    }
    for file in &outputs.stats_files {
        out.pair(t::STATS_FILE, stats_payload(file));
    }
}

fn summary_payload(file: &SummaryFile) -> Fields {
    let o = &file.outputs;
    let mut fields = Fields::start(&file.scenario_name);
    fields.push(&file.filename);
    for value in [
        o.application,
        o.geo_data,
        o.scenario,
        o.scenario_comments,
        o.inputs,
        o.landscape,
        o.fbp_patches,
        o.wx_patches,
        o.ignitions,
        o.wx_streams,
        o.fbp,
    ] {
        fields.push(tristate(value));
    }
    fields
        .push(flag(file.should_stream))
        .push(tristate(o.wx_data))
        .push(tristate(o.asset_info));
    fields
}

fn text_bool(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    }
}

fn unit_code(unit: Option<MetadataUnit>) -> i32 {
    unit.map_or(UNKNOWN_METADATA_UNIT, MetadataUnit::code)
}

fn vector_payload(file: &VectorFile) -> Fields {
    let m = &file.metadata;
    let mut fields = Fields::start(&file.scenario_name);
    fields
        .push(&file.filename)
        .push(flag(file.multiple_perimeters.unwrap_or(false)))
        .push(&file.perimeter_start_time)
        .push(&file.perimeter_end_time)
        .push(flag(file.remove_islands.unwrap_or(false)))
        .push(flag(file.merge_contact.unwrap_or(false)))
        .push(flag(file.perimeter_active.unwrap_or(false)));
    for value in [
        m.version,
        m.scenario_name,
        m.job_name,
        m.ignition_name,
        m.simulation_date,
        m.fire_size,
        m.perimeter_total,
        m.perimeter_active,
    ] {
        fields.push(text_bool(value));
    }
    fields
        .push(unit_code(m.perimeter_unit))
        .push(unit_code(m.area_unit))
        .push(flag(file.should_stream));
    for value in [
        m.wx_values,
        m.fwi_values,
        m.ignition_location,
        m.max_burn_distance,
        m.ignition_attributes,
    ] {
        fields.push(tristate(value));
    }
    fields
        .push(file.sub_scenario_name.as_deref().unwrap_or(""))
        .push(file.sub_scenario_overrides.len());
    for entry in &file.sub_scenario_overrides {
        fields
            .push(&entry.sub_scenario_name)
            .push(&entry.start_time)
            .push(&entry.end_time);
    }
    fields
        .push(tristate(m.asset_arrival_time))
        .push(tristate(m.asset_arrival_count))
        .push(tristate(m.identify_final_perimeter));
    fields
}

fn grid_payload(file: &GridOutput) -> Fields {
    let mut fields = Fields::start(&file.scenario_name);
    fields
        .push(&file.filename)
        .push(&file.output_time)
        .push(file.statistic.code())
        .push(file.interpolation.as_str())
        .push(flag(file.should_stream))
        .push(file.compression.code())
        .push(file.should_minimize)
        .push(file.sub_scenario_name.as_deref().unwrap_or(""))
        .push(file.sub_scenario_override_times.len());
    for entry in &file.sub_scenario_override_times {
        fields.push(&entry.sub_scenario_name).push(&entry.export_time);
    }
    fields
}

fn stats_payload(file: &StatsFile) -> Fields {
    let mut fields = Fields::start(&file.scenario_name);
    fields
        .push(&file.filename)
        .push(file.file_type.code())
        .push(flag(file.should_stream));
    match &file.source {
        Some(StatsSource::Location(location)) => {
            fields
                .push("loc")
                .push(Num(location.latitude))
                .push(Num(location.longitude));
        }
        Some(StatsSource::Stream(stream)) => {
            fields.push("name").push(stream);
        }
        None => {
            fields.push("name").push("");
        }
    }
    fields.push(0).push(file.columns().len());
    for column in file.columns() {
        fields.push(column.code());
    }
    fields
}

fn encode_sink(sink: &OutputStreamSink, out: &mut FrameWriter) {
    match sink {
        OutputStreamSink::Mqtt => out.pair(t::OUTPUT_STREAM, "mqtt"),
        OutputStreamSink::GeoServer {
            username,
            password,
            url,
            workspace,
            coverage_store,
            declared_srs,
        } => {
            let mut fields = Fields::start("geo");
            fields
                .push(username)
                .push(password)
                .push(url)
                .push(workspace)
                .push(coverage_store)
                .push(declared_srs.as_deref().unwrap_or(""));
            out.pair(t::OUTPUT_STREAM, fields);
        }
    }
}

fn encode_units(units: &UnitSettings, out: &mut FrameWriter) {
    let mut fields = Fields::new();
    for code in units.codes() {
        fields.push(code);
    }
    out.pair(t::EXPORT_UNITS, fields);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::Duration;

    fn lines(out: &FrameWriter) -> Vec<&str> {
        out.as_str().lines().collect()
    }

    fn scenario_lines(job: &Job, index: usize) -> Vec<String> {
        let mut out = FrameWriter::new();
        encode_scenario(&job.scenarios[index], &mut out);
        out.as_str().lines().map(str::to_string).collect()
    }

    #[test]
    fn test_copy_scenario_without_overrides_emits_no_fgm() {
        let mut job = Job::new();
        job.add_scenario("2024-06-01T13:00:00", "2024-06-02T13:00:00", "");
        job.add_scenario("", "", "").make_copy("scen0");

        let copy = scenario_lines(&job, 1);
        assert_eq!(
            copy,
            vec![
                "scenariostart",
                "scenarioname",
                "scen1",
                "displayinterval",
                "PT1H",
                "scenariotocopy",
                "scen0",
                "scenarioend",
            ]
        );

        let full = scenario_lines(&job, 0);
        assert!(full.iter().any(|l| l == "distres"));
        assert!(full.iter().any(|l| l == "perimres"));
        let props = full.iter().position(|l| l == "simulation_properties").expect("props");
        assert_eq!(full[props + 1], "0.5|16|-1|-1");
        let nodata = full.iter().position(|l| l == "nodataelev").expect("nodata");
        assert_eq!(full[nodata + 1], "-9999");
    }

    #[test]
    fn test_unvalidated_resolutions_encode_empty() {
        let mut job = Job::new();
        job.add_scenario("2024-06-01T13:00:00", "2024-06-02T13:00:00", "");

        let full = scenario_lines(&job, 0);
        let distres = full.iter().position(|l| l == "distres").expect("distres");
        assert_eq!(full[distres + 1], "");
        let perimres = full.iter().position(|l| l == "perimres").expect("perimres");
        assert_eq!(full[perimres + 1], "");

        let validator = crate::validation::Validator::new().with_file_checks(false);
        let errors = validator.check(&job);
        let scenario = errors
            .iter()
            .find(|e| e.subject == crate::validation::Subject::Scenario(0))
            .expect("scenario errors");
        let fgm: Vec<_> = scenario.children[0].children.iter().filter_map(|e| e.property).collect();
        assert!(fgm.contains(&"distance_resolution"));
        assert!(fgm.contains(&"perimeter_resolution"));
    }

    #[test]
    fn test_copy_scenario_emits_only_set_fields() {
        let mut job = Job::new();
        job.add_scenario("a", "b", "");
        let copy = job.add_scenario("", "", "");
        copy.make_copy("scen0");
        copy.fgm.dwd = Some(15.0);
        copy.fgm.ignition_size = Some(2.0);
        copy.fmc.nodata_elevation = Some(150.0);

        let lines = scenario_lines(&job, 1);
        let body: Vec<&str> = lines[7..lines.len() - 1].iter().map(String::as_str).collect();
        assert_eq!(
            body,
            vec!["fgm_dwd", "15", "simulation_properties", "2|16|-1|-1", "nodataelev", "150"]
        );
    }

    #[test]
    fn test_fuel_patch_and_break_payloads() {
        let mut job = Job::new();
        job.add_polygon_fuel_patch(
            FuelSource::Rule(FromFuelRule::AllFuels),
            FuelTarget::Name("O-1a".into()),
            vec![LatLon::new(51.0, -115.5), LatLon::new(51.1, -115.6)],
            "",
        );
        job.add_polyline_fuel_break(12.5, vec![LatLon::new(1.0, 2.0)], "road");
        job.add_file_fuel_break("/data/breaks.shp", "");

        let files = &job.files;
        assert_eq!(
            fuel_patch_payload(&files.fuel_patches[0]).as_str(),
            "flptch0||O-1a|rule|allFuels|polygon|51|-115.5|51.1|-115.6"
        );
        assert_eq!(
            fuel_break_payload(&files.fuel_breaks[0]).as_str(),
            "flbrk0|12.5|road|polyline|1|2"
        );
        assert_eq!(
            fuel_break_payload(&files.fuel_breaks[1]).as_str(),
            "flbrk1|-1||file|/data/breaks.shp"
        );
    }

    #[test]
    fn test_weather_stream_follows_station() {
        let mut job = Job::new();
        let station = job
            .add_weather_station(1483.0, LatLon::new(51.65, -115.37), "")
            .id()
            .to_string();
        let settings = WeatherStreamSettings {
            filename: "/data/wx.txt".into(),
            hffmc_value: 89.0,
            hffmc_hour: 13,
            starting_ffmc: 86.1,
            starting_dmc: 20.0,
            starting_dc: 300.5,
            start_time: "2024-06-01".into(),
            end_time: "2024-06-03".into(),
            ..WeatherStreamSettings::default()
        };
        job.add_weather_stream(&station, settings).expect("station");

        let mut out = FrameWriter::new();
        encode_inputs(&job, &mut out);
        let lines = lines(&out);
        let at = lines.iter().position(|l| *l == "weatherstation").expect("station");
        assert_eq!(lines[at + 1], "wthrstn0|51.65|-115.37|1483|");
        assert_eq!(lines[at + 2], "weatherstream");
        assert_eq!(
            lines[at + 3],
            "wthrstrm0|/data/wx.txt|89|13|0|86.1|20|300.5|0|2024-06-01|2024-06-03|wthrstn0|"
        );
    }

    #[test]
    fn test_asset_payload_separates_filename() {
        let mut job = Job::new();
        job.add_file_asset("/data/cabins.shp", "");
        job.add_point_asset(LatLon::new(1.5, 2.5), "cabin");
        assert_eq!(asset_payload(&job.assets[0]).as_str(), "asset0||0|-1|/data/cabins.shp");
        assert_eq!(asset_payload(&job.assets[1]).as_str(), "asset1|cabin|4|-1|1.5|2.5");
    }

    #[test]
    fn test_ignition_attributes() {
        let mut job = Job::new();
        job.add_point_ignition("2024-06-01T13:00:00", LatLon::new(51.0, -115.0), "")
            .add_attribute("source", "lightning");
        assert_eq!(
            ignition_payload(&job.ignitions[0]).as_str(),
            "ign0|2024-06-01T13:00:00||point|51|-115|attr|1|source|lightning"
        );
    }

    #[test]
    fn test_timezone_payload() {
        let mut job = Job::new();
        job.set_timezone(Duration::create_time(6.0, 0.0, 0.0, true), true);
        assert_eq!(timezone_payload(&job.timezone).as_str(), "-PT6H|1");
        job.set_timezone_by_value(25);
        assert_eq!(timezone_payload(&job.timezone).as_str(), "25");
    }

    #[test]
    fn test_vector_payload_layout() {
        let mut job = Job::new();
        let file = job.add_vector_output("scen0", VectorFileType::Kml, "p.kml", "t0", "t1");
        file.remove_islands = Some(true);
        file.merge_contact = Some(false);
        file.metadata.version = Some(true);
        file.metadata.area_unit = Some(MetadataUnit::Hectare);
        assert_eq!(
            vector_payload(&job.outputs.vector_files[0]).as_str(),
            "scen0|p.kml|0|t0|t1|1|0|0|true||||||||-1|8|0|-1|-1|-1|-1|-1||0|-1|-1|-1"
        );
    }

    #[test]
    fn test_stats_and_grid_payloads() {
        let mut job = Job::new();
        let stats = job.add_stats_output("scen0", "stats.csv");
        stats.file_type = StatsFileType::Csv;
        stats.source = Some(StatsSource::Stream("wthrstrm0".into()));
        stats.add_column(GlobalStatistics::DateTime);
        stats.add_column(GlobalStatistics::TotalArea);
        assert_eq!(
            stats_payload(&job.outputs.stats_files[0]).as_str(),
            "scen0|stats.csv|1|0|name|wthrstrm0|0|2|0|20"
        );

        job.add_grid_output("scen0", GlobalStatistics::Hfi, "hfi.tif", "t1", GridInterpolation::Idw);
        assert_eq!(
            grid_payload(&job.outputs.grid_files[0]).as_str(),
            "scen0|hfi.tif|t1|75|IDW|0|0|false||0"
        );
    }

    #[test]
    fn test_submission_frame_order() {
        let mut job = Job::new();
        job.comments = "test run".into();
        job.set_projection_file("/data/a.prj");
        job.add_attachment("lut.lut", "1,2\n3,4").expect("valid name");
        job.stream_output_to_mqtt();
        job.timestep_settings.add_statistic(GlobalStatistics::TotalBurnArea);

        let out = encode_submission(&job);
        let lines = lines(&out);
        assert_eq!(&lines[..4], &["STARTUP", "BEGINDATA", "GLOBALCOMMENTS", "test run"]);
        assert_eq!(lines[4], "file_attachment");
        assert_eq!(lines[5], "attachment:/1/lut.lut");
        assert_eq!(lines[8], "file_attachment_end");
        assert_eq!(lines[9], "projfile");
        let tail = &lines[lines.len() - 8..];
        assert_eq!(
            tail,
            &[
                "mng_statistic",
                "21",
                "output_stream",
                "mqtt",
                "export_units",
                "-1|-1|-1|-1|-1|-1|-1|-1|-1|-1|-1|-1|-1|-1|-1|-1|-1|-1|-1",
                "ENDDATA",
                "STARTJOB",
            ]
        );
    }
}
