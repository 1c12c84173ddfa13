//! Job validation.
//!
//! Validation never fails: it returns a list of [`ValidationError`] trees.
//! Each node points at the offending entity through a positional
//! [`Subject`] and names the offending field, so the current value can be
//! re-read from the job at print time instead of being copied when the
//! check runs.
//!
//! # Order
//!
//! [`Job::check_valid`] runs its checks in a fixed order:
//!
//! 1. time zone
//! 2. landscape files (projection, lookup table, fuel map, elevation)
//! 3. every entity collection, one group node per invalid entity
//! 4. id uniqueness, stopping at the first colliding pair
//! 5. outputs and attachments
//!
//! Each entity also implements [`Validate`], so a single ignition, stream or
//! output can be checked on its own. The job-level pass composes those and
//! adds the rules that need more than one entity.
//!
//! File existence goes through a [`FileProbe`]. Attachment references are
//! accepted without consulting the probe, and a [`Validator`] built with
//! file checks disabled accepts every path. Ids, names and paths must not
//! contain line breaks, since every value travels as one protocol line.

use std::fmt::{self, Write as _};
use std::path::Path;
use std::sync::Arc;

use crate::duration::Duration;
use crate::model::*;

/// Upper bound of the FGM distance and perimeter resolutions.
const MAX_RESOLUTION: f64 = 10.0;
const MIN_RESOLUTION: f64 = 0.2;
const MAX_NODATA_ELEVATION: f64 = 7000.0;
const MAX_PERCENT_OVERRIDE: f64 = 300.0;
/// Terminator line of an attachment on the wire.
pub(crate) const ATTACHMENT_END: &str = "file_attachment_end";

/// Locates the entity a [`ValidationError`] refers to.
///
/// Positions are indexes into the owning collection at the time the check
/// ran. Editing the job afterwards can make a subject point elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Job,
    Timezone,
    InputFiles,
    GridFile(usize),
    FuelBreak(usize),
    FuelPatch(usize),
    WeatherPatch(usize),
    WeatherGrid(usize),
    WeatherGridFile { grid: usize, file: usize },
    WeatherStation(usize),
    WeatherStream { station: usize, stream: usize },
    Ignition(usize),
    Asset(usize),
    Scenario(usize),
    Fgm(usize),
    Fmc(usize),
    BurningCondition { scenario: usize, index: usize },
    SummaryFile(usize),
    VectorFile(usize),
    VectorMetadata(usize),
    GridOutput(usize),
    StatsFile(usize),
    Attachment(usize),
}

impl Subject {
    /// Index of the top-level entity this subject sits in.
    fn position(self) -> usize {
        match self {
            Subject::Job | Subject::Timezone | Subject::InputFiles => 0,
            Subject::GridFile(i)
            | Subject::FuelBreak(i)
            | Subject::FuelPatch(i)
            | Subject::WeatherPatch(i)
            | Subject::WeatherGrid(i)
            | Subject::WeatherStation(i)
            | Subject::Ignition(i)
            | Subject::Asset(i)
            | Subject::Scenario(i)
            | Subject::Fgm(i)
            | Subject::Fmc(i)
            | Subject::SummaryFile(i)
            | Subject::VectorFile(i)
            | Subject::VectorMetadata(i)
            | Subject::GridOutput(i)
            | Subject::StatsFile(i)
            | Subject::Attachment(i) => i,
            Subject::WeatherGridFile { grid, .. } => grid,
            Subject::WeatherStream { station, .. } => station,
            Subject::BurningCondition { scenario, .. } => scenario,
        }
    }

    fn resolve<'a>(&self, job: &'a Job) -> Option<&'a dyn FieldValue> {
        let found: &dyn FieldValue = match *self {
            Subject::Job => job,
            Subject::Timezone => &job.timezone,
            Subject::InputFiles => &job.files,
            Subject::GridFile(i) => job.files.grid_files.get(i)?,
            Subject::FuelBreak(i) => job.files.fuel_breaks.get(i)?,
            Subject::FuelPatch(i) => job.files.fuel_patches.get(i)?,
            Subject::WeatherPatch(i) => job.files.weather_patches.get(i)?,
            Subject::WeatherGrid(i) => job.files.weather_grids.get(i)?,
            Subject::WeatherGridFile { grid, file } => {
                job.files.weather_grids.get(grid)?.files.get(file)?
            }
            Subject::WeatherStation(i) => job.weather_stations.get(i)?,
            Subject::WeatherStream { station, stream } => {
                job.weather_stations.get(station)?.streams.get(stream)?
            }
            Subject::Ignition(i) => job.ignitions.get(i)?,
            Subject::Asset(i) => job.assets.get(i)?,
            Subject::Scenario(i) => job.scenarios.get(i)?,
            Subject::Fgm(i) => &job.scenarios.get(i)?.fgm,
            Subject::Fmc(i) => &job.scenarios.get(i)?.fmc,
            Subject::BurningCondition { scenario, index } => {
                job.scenarios.get(scenario)?.burning_conditions.get(index)?
            }
            Subject::SummaryFile(i) => job.outputs.summary_files.get(i)?,
            Subject::VectorFile(i) => job.outputs.vector_files.get(i)?,
            Subject::VectorMetadata(i) => &job.outputs.vector_files.get(i)?.metadata,
            Subject::GridOutput(i) => job.outputs.grid_files.get(i)?,
            Subject::StatsFile(i) => job.outputs.stats_files.get(i)?,
            Subject::Attachment(i) => job.attachments().get(i)?,
        };
        Some(found)
    }
}

/// A node of a validation report.
///
/// Leaves describe one bad field. Group nodes (no `property`) describe an
/// entity and carry the leaves found inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub property: Option<&'static str>,
    pub message: String,
    pub subject: Subject,
    pub children: Vec<ValidationError>,
}

impl ValidationError {
    /// A leaf error about `property` of `subject`.
    pub fn new(property: &'static str, message: impl Into<String>, subject: Subject) -> Self {
        Self {
            property: Some(property),
            message: message.into(),
            subject,
            children: Vec::new(),
        }
    }

    /// A group node about `subject` as a whole.
    pub fn group(message: impl Into<String>, subject: Subject) -> Self {
        Self {
            property: None,
            message: message.into(),
            subject,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: ValidationError) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Re-read the offending field from `job`.
    ///
    /// Returns `None` for group nodes, for unset fields and when the subject
    /// no longer exists.
    pub fn value(&self, job: &Job) -> Option<String> {
        let property = self.property?;
        self.subject.resolve(job)?.field(property)
    }

    /// Render the tree as indented text with live field values.
    pub fn render(&self, job: &Job) -> String {
        let mut out = String::new();
        self.render_into(job, 0, &mut out);
        out
    }

    fn render_into(&self, job: &Job, depth: usize, out: &mut String) {
        let _ = write!(out, "{:indent$}{}", "", self.message, indent = depth * 2);
        if let Some(property) = self.property {
            let value = self.value(job).unwrap_or_else(|| "<unset>".to_string());
            let _ = write!(out, " [{} = {}]", property, value);
        }
        out.push('\n');
        for child in &self.children {
            child.render_into(job, depth + 1, out);
        }
    }

    /// Number of leaves under this node, counting itself if it is one.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(ValidationError::leaf_count).sum()
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Checks whether a referenced path exists.
pub trait FileProbe: Send + Sync {
    fn exists(&self, path: &str) -> bool;
}

/// Probes the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl FileProbe for LocalFiles {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }
}

/// Validation settings.
#[derive(Clone)]
pub struct Validator {
    check_files: bool,
    probe: Arc<dyn FileProbe>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("check_files", &self.check_files)
            .finish_non_exhaustive()
    }
}

impl Validator {
    /// Check files against the local file system.
    pub fn new() -> Self {
        Self {
            check_files: true,
            probe: Arc::new(LocalFiles),
        }
    }

    /// Use a custom probe for file existence.
    pub fn with_probe(probe: impl FileProbe + 'static) -> Self {
        Self {
            check_files: true,
            probe: Arc::new(probe),
        }
    }

    /// Enable or disable file existence checks.
    pub fn with_file_checks(mut self, enabled: bool) -> Self {
        self.check_files = enabled;
        self
    }

    pub fn checks_files(&self) -> bool {
        self.check_files
    }

    fn file_ok(&self, path: &str) -> bool {
        !self.check_files || is_attachment(path) || self.probe.exists(path)
    }

    /// Validate `job`. An empty result means the job can be submitted.
    pub fn check(&self, job: &Job) -> Vec<ValidationError> {
        let mut errors = job.timezone.check_valid_with(self, Subject::Timezone);
        errors.extend(job.files.check_valid_with(self, Subject::InputFiles));

        if job.weather_stations.is_empty() {
            errors.push(ValidationError::group(
                "There were no weather stations specified.",
                Subject::Job,
            ));
        }
        if job.scenarios.is_empty() {
            errors.push(ValidationError::group(
                "There were no scenarios specified.",
                Subject::Job,
            ));
        }
        if has_line_break(&job.comments) {
            errors.push(ValidationError::new(
                "comments",
                "Job comments must not contain line breaks.",
                Subject::Job,
            ));
        }

        self.check_entities(job, &mut errors);

        if let Some(duplicate) = first_duplicate(job) {
            errors.push(duplicate);
        }

        self.check_outputs(&job.outputs, &mut errors);

        for (i, attachment) in job.attachments().iter().enumerate() {
            errors.extend(attachment.check_valid_with(self, Subject::Attachment(i)));
        }

        errors
    }

    fn check_entities(&self, job: &Job, errors: &mut Vec<ValidationError>) {
        self.check_collection(&job.files.grid_files, "grid file", Subject::GridFile, errors);
        self.check_collection(&job.files.fuel_breaks, "fuel break", Subject::FuelBreak, errors);
        self.check_collection(&job.files.fuel_patches, "fuel patch", Subject::FuelPatch, errors);
        self.check_collection(
            &job.files.weather_patches,
            "weather patch",
            Subject::WeatherPatch,
            errors,
        );
        self.check_collection(
            &job.files.weather_grids,
            "weather grid",
            Subject::WeatherGrid,
            errors,
        );
        self.check_collection(
            &job.weather_stations,
            "weather station",
            Subject::WeatherStation,
            errors,
        );
        self.check_collection(&job.ignitions, "ignition", Subject::Ignition, errors);

        // Copy targets are a cross-entity rule, so they are checked here.
        for (i, scenario) in job.scenarios.iter().enumerate() {
            let subject = Subject::Scenario(i);
            let mut leaves = scenario.check_valid_with(self, subject);
            if let Some(original) = scenario.copy_of.as_deref().filter(|o| !o.is_empty()) {
                let found = job
                    .scenarios
                    .iter()
                    .enumerate()
                    .any(|(j, s)| j != i && s.id() == original);
                if !found {
                    leaves.push(ValidationError::new(
                        "copy_of",
                        "The scenario to copy does not exist.",
                        subject,
                    ));
                }
            }
            push_group(errors, "scenario", scenario.id(), subject, leaves);
        }

        self.check_collection(&job.assets, "asset", Subject::Asset, errors);
    }

    fn check_collection<T: Validate + Entity>(
        &self,
        items: &[T],
        kind: &str,
        subject: fn(usize) -> Subject,
        errors: &mut Vec<ValidationError>,
    ) {
        for (i, item) in items.iter().enumerate() {
            let leaves = item.check_valid_with(self, subject(i));
            push_group(errors, kind, item.id(), subject(i), leaves);
        }
    }

    fn check_outputs(&self, outputs: &Outputs, errors: &mut Vec<ValidationError>) {
        for (i, file) in outputs.summary_files.iter().enumerate() {
            let subject = Subject::SummaryFile(i);
            let leaves = file.check_valid_with(self, subject);
            push_group(errors, "summary file", &file.filename, subject, leaves);
        }
        for (i, file) in outputs.vector_files.iter().enumerate() {
            let subject = Subject::VectorFile(i);
            let leaves = file.check_valid_with(self, subject);
            push_group(errors, "vector file", &file.filename, subject, leaves);
        }
        for (i, file) in outputs.grid_files.iter().enumerate() {
            let subject = Subject::GridOutput(i);
            let leaves = file.check_valid_with(self, subject);
            push_group(errors, "grid output", &file.filename, subject, leaves);
        }
        for (i, file) in outputs.stats_files.iter().enumerate() {
            let subject = Subject::StatsFile(i);
            let leaves = file.check_valid_with(self, subject);
            push_group(errors, "stats file", &file.filename, subject, leaves);
        }
    }

    /// Push an error if `path` would break framing or does not exist.
    fn check_path(
        &self,
        property: &'static str,
        path: &str,
        missing: &str,
        subject: Subject,
        leaves: &mut Vec<ValidationError>,
    ) {
        if has_line_break(path) {
            leaves.push(ValidationError::new(
                property,
                "File paths must not contain line breaks.",
                subject,
            ));
        } else if !self.file_ok(path) {
            leaves.push(ValidationError::new(property, missing, subject));
        }
    }

    fn check_patch_shape(
        &self,
        shape: &PatchShape,
        label: &str,
        subject: Subject,
        leaves: &mut Vec<ValidationError>,
    ) {
        match shape {
            PatchShape::File(path) => {
                let missing = format!("The {} file does not exist.", label);
                self.check_path("filename", path, &missing, subject, leaves);
            }
            PatchShape::Polygon(points) => {
                if points.is_empty() {
                    leaves.push(ValidationError::new(
                        "vertices",
                        format!("The {} polygon has no vertices.", label),
                        subject,
                    ));
                }
            }
            PatchShape::Landscape => {}
        }
    }
}

/// Validation of a single entity.
///
/// `check_valid_with` returns the problems found on the entity itself,
/// located by `subject`. Rules that compare entities with each other (id
/// uniqueness, copy targets) need the whole job and live in
/// [`Validator::check`].
pub trait Validate {
    /// Where errors point when the entity is checked on its own.
    const SUBJECT: Subject;

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError>;

    /// Check against the local file system.
    fn check_valid(&self) -> Vec<ValidationError> {
        self.check_valid_with(&Validator::new(), Self::SUBJECT)
    }

    fn is_valid(&self) -> bool {
        self.check_valid().is_empty()
    }
}

impl Validate for Timezone {
    const SUBJECT: Subject = Subject::Timezone;

    fn check_valid_with(&self, _validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        if self.value.is_none() && !self.offset.is_valid() {
            vec![ValidationError::new(
                "offset",
                "The timezone offset is not valid.",
                subject,
            )]
        } else {
            Vec::new()
        }
    }
}

/// Only the landscape files. The collections are checked entity by entity.
impl Validate for InputFiles {
    const SUBJECT: Subject = Subject::InputFiles;

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let required = [
            ("projection", &self.projection, "Projection file"),
            ("lut", &self.lut, "LUT file"),
            ("fuel_map", &self.fuel_map, "Fuel map file"),
        ];
        for (property, path, label) in required {
            if path.is_empty() {
                errors.push(ValidationError::new(
                    property,
                    format!("{} was not specified.", label),
                    subject,
                ));
            } else {
                let missing = format!("{} does not exist.", label);
                validator.check_path(property, path, &missing, subject, &mut errors);
            }
        }
        if !self.elevation.is_empty() {
            validator.check_path(
                "elevation",
                &self.elevation,
                "Elevation file does not exist.",
                subject,
                &mut errors,
            );
        }
        errors
    }
}

impl Validate for GridFile {
    const SUBJECT: Subject = Subject::GridFile(0);

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = common_checks(self.id(), &self.comment, subject);
        validator.check_path(
            "filename",
            &self.filename,
            "The grid file does not exist.",
            subject,
            &mut leaves,
        );
        validator.check_path(
            "projection",
            &self.projection,
            "The grid file projection does not exist.",
            subject,
            &mut leaves,
        );
        leaves
    }
}

impl Validate for FuelBreak {
    const SUBJECT: Subject = Subject::FuelBreak(0);

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = common_checks(self.id(), &self.comments, subject);
        match &self.shape {
            FuelBreakShape::Polyline(_) => {
                if self.width.unwrap_or(UNSET_BREAK_WIDTH) < 0.0 {
                    leaves.push(ValidationError::new(
                        "width",
                        "A polyline fuel break needs a width of at least zero.",
                        subject,
                    ));
                }
            }
            FuelBreakShape::File(path) => {
                validator.check_path(
                    "filename",
                    path,
                    "The fuel break file does not exist.",
                    subject,
                    &mut leaves,
                );
            }
            FuelBreakShape::Polygon(points) => {
                if points.is_empty() {
                    leaves.push(ValidationError::new(
                        "vertices",
                        "The fuel break polygon has no vertices.",
                        subject,
                    ));
                }
            }
        }
        leaves
    }
}

impl Validate for FuelPatch {
    const SUBJECT: Subject = Subject::FuelPatch(0);

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = common_checks(self.id(), &self.comments, subject);
        if matches!(&self.from, FuelSource::Name(name) if name.is_empty()) {
            leaves.push(ValidationError::new("from", "The fuel to change from is not set.", subject));
        }
        if matches!(&self.to, FuelTarget::Name(name) if name.is_empty()) {
            leaves.push(ValidationError::new("to", "The fuel to change to is not set.", subject));
        }
        validator.check_patch_shape(&self.shape, "fuel patch", subject, &mut leaves);
        leaves
    }
}

impl Validate for WeatherPatch {
    const SUBJECT: Subject = Subject::WeatherPatch(0);

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = common_checks(self.id(), &self.comments, subject);
        leaves.extend(time_window_checks(
            [
                &self.start_time,
                &self.end_time,
                &self.start_time_of_day,
                &self.end_time_of_day,
            ],
            subject,
        ));
        validator.check_patch_shape(&self.shape, "weather patch", subject, &mut leaves);
        leaves
    }
}

impl Validate for WeatherGridFile {
    const SUBJECT: Subject = Subject::WeatherGridFile { grid: 0, file: 0 };

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = Vec::new();
        if self.speed < 0.0 {
            leaves.push(ValidationError::new("speed", "The wind speed is negative.", subject));
        }
        validator.check_path(
            "filename",
            &self.filename,
            "The weather grid file does not exist.",
            subject,
            &mut leaves,
        );
        validator.check_path(
            "projection",
            &self.projection,
            "The weather grid projection does not exist.",
            subject,
            &mut leaves,
        );
        leaves
    }
}

impl Validate for WeatherGrid {
    const SUBJECT: Subject = Subject::WeatherGrid(0);

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = common_checks(self.id(), &self.comments, subject);
        leaves.extend(time_window_checks(
            [
                &self.start_time,
                &self.end_time,
                &self.start_time_of_day,
                &self.end_time_of_day,
            ],
            subject,
        ));
        let grid = subject.position();
        for (j, file) in self.files.iter().enumerate() {
            let file_subject = Subject::WeatherGridFile { grid, file: j };
            let file_leaves = file.check_valid_with(validator, file_subject);
            if !file_leaves.is_empty() {
                let mut node = ValidationError::group(
                    format!("Invalid weather grid file for sector {:?}", file.sector),
                    file_subject,
                );
                node.children = file_leaves;
                leaves.push(node);
            }
        }
        leaves
    }
}

impl Validate for WeatherStream {
    const SUBJECT: Subject = Subject::WeatherStream { station: 0, stream: 0 };

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = common_checks(self.id(), &self.comments, subject);
        validator.check_path(
            "filename",
            &self.filename,
            "The weather stream file does not exist.",
            subject,
            &mut leaves,
        );
        let starting = [
            ("starting_ffmc", self.starting_ffmc, "The starting FFMC is negative."),
            ("starting_dmc", self.starting_dmc, "The starting DMC is negative."),
            ("starting_dc", self.starting_dc, "The starting DC is negative."),
            ("starting_precip", self.starting_precip, "The starting precipitation is negative."),
        ];
        for (property, value, message) in starting {
            if value < 0.0 {
                leaves.push(ValidationError::new(property, message, subject));
            }
        }
        if !(-1..=23).contains(&self.hffmc_hour) {
            leaves.push(ValidationError::new(
                "hffmc_hour",
                "The HFFMC hour must be between -1 and 23.",
                subject,
            ));
        }
        if self.start_time.is_empty() {
            leaves.push(ValidationError::new("start_time", "The start time is not set.", subject));
        }
        if self.end_time.is_empty() {
            leaves.push(ValidationError::new("end_time", "The end time is not set.", subject));
        }
        leaves
    }
}

impl Validate for WeatherStation {
    const SUBJECT: Subject = Subject::WeatherStation(0);

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = common_checks(self.id(), &self.comments, subject);
        if self.location.is_none() {
            leaves.push(ValidationError::new("location", "The station location is not set.", subject));
        }
        let station = subject.position();
        for (j, stream) in self.streams.iter().enumerate() {
            let stream_subject = Subject::WeatherStream { station, stream: j };
            let stream_leaves = stream.check_valid_with(validator, stream_subject);
            push_group(&mut leaves, "weather stream", stream.id(), stream_subject, stream_leaves);
        }
        if let Some((_, second)) = duplicate_pair(&self.streams) {
            leaves.push(ValidationError::new(
                "id",
                "Weather stream names must be unique.",
                Subject::WeatherStream { station, stream: second },
            ));
        }
        leaves
    }
}

impl Validate for Ignition {
    const SUBJECT: Subject = Subject::Ignition(0);

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = common_checks(self.id(), &self.comments, subject);
        if self.start_time.is_empty() {
            leaves.push(ValidationError::new("start_time", "The start time is not set.", subject));
        }
        match &self.shape {
            IgnitionShape::File(path) => {
                validator.check_path(
                    "filename",
                    path,
                    "The ignition file does not exist.",
                    subject,
                    &mut leaves,
                );
            }
            IgnitionShape::Point(points)
            | IgnitionShape::Polygon(points)
            | IgnitionShape::Polyline(points) => {
                if points.is_empty() {
                    leaves.push(ValidationError::new("vertices", "The ignition has no points.", subject));
                }
            }
        }
        leaves
    }
}

impl Validate for AssetFile {
    const SUBJECT: Subject = Subject::Asset(0);

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = common_checks(self.id(), &self.comments, subject);
        match &self.shape {
            AssetShape::File(path) => {
                validator.check_path(
                    "filename",
                    path,
                    "The asset file does not exist.",
                    subject,
                    &mut leaves,
                );
            }
            AssetShape::Point(points) | AssetShape::Polygon(points) | AssetShape::Polyline(points) => {
                if points.is_empty() {
                    leaves.push(ValidationError::new("vertices", "The asset has no points.", subject));
                }
            }
        }
        leaves
    }
}

/// A copied scenario only needs the name of the scenario it copies. Whether
/// that scenario exists is checked by [`Validator::check`].
impl Validate for Scenario {
    const SUBJECT: Subject = Subject::Scenario(0);

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = common_checks(self.id(), &self.comments, subject);

        if let Some(original) = &self.copy_of {
            if original.is_empty() {
                leaves.push(ValidationError::new("copy_of", "The scenario to copy is not set.", subject));
            } else if has_line_break(original) {
                leaves.push(ValidationError::new(
                    "copy_of",
                    "Scenario names must not contain line breaks.",
                    subject,
                ));
            }
            return leaves;
        }

        if self.start_time.is_empty() {
            leaves.push(ValidationError::new("start_time", "The start time is not set.", subject));
        }
        if self.end_time.is_empty() {
            leaves.push(ValidationError::new("end_time", "The end time is not set.", subject));
        }

        let index = subject.position();
        let fgm = self.fgm.check_valid_with(validator, Subject::Fgm(index));
        if !fgm.is_empty() {
            let mut node = ValidationError::group("The FGM options are not valid.", Subject::Fgm(index));
            node.children = fgm;
            leaves.push(node);
        }
        let fmc = self.fmc.check_valid_with(validator, Subject::Fmc(index));
        if !fmc.is_empty() {
            let mut node = ValidationError::group("The FMC options are not valid.", Subject::Fmc(index));
            node.children = fmc;
            leaves.push(node);
        }
        for (i, condition) in self.burning_conditions.iter().enumerate() {
            let condition_subject = Subject::BurningCondition { scenario: index, index: i };
            leaves.extend(condition.check_valid_with(validator, condition_subject));
        }
        leaves
    }
}

impl Validate for BurningCondition {
    const SUBJECT: Subject = Subject::BurningCondition { scenario: 0, index: 0 };

    fn check_valid_with(&self, _validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        if self.date.is_empty() {
            vec![ValidationError::new(
                "date",
                "The burning condition date is not set.",
                subject,
            )]
        } else {
            Vec::new()
        }
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains('\n') || text.contains('\r')
}

fn common_checks(id: &str, comments: &str, subject: Subject) -> Vec<ValidationError> {
    let mut leaves = Vec::new();
    if id.is_empty() {
        leaves.push(ValidationError::new("id", "The id is not set.", subject));
    } else if has_line_break(id) {
        leaves.push(ValidationError::new("id", "Ids must not contain line breaks.", subject));
    }
    if has_line_break(comments) {
        leaves.push(ValidationError::new(
            "comments",
            "Comments must not contain line breaks.",
            subject,
        ));
    }
    leaves
}

fn time_window_checks(times: [&String; 4], subject: Subject) -> Vec<ValidationError> {
    const FIELDS: [(&str, &str); 4] = [
        ("start_time", "The start time is not set."),
        ("end_time", "The end time is not set."),
        ("start_time_of_day", "The start time of day is not set."),
        ("end_time_of_day", "The end time of day is not set."),
    ];
    times
        .iter()
        .zip(FIELDS)
        .filter(|(value, _)| value.is_empty())
        .map(|(_, (property, message))| ValidationError::new(property, message, subject))
        .collect()
}

fn push_group(
    errors: &mut Vec<ValidationError>,
    kind: &str,
    id: &str,
    subject: Subject,
    leaves: Vec<ValidationError>,
) {
    if leaves.is_empty() {
        return;
    }
    let mut group = ValidationError::group(format!("Invalid {} {}", kind, id), subject);
    group.children = leaves;
    errors.push(group);
}

fn out_of_range(value: Option<f64>, min: f64, max: f64) -> bool {
    matches!(value, Some(v) if v < min || v > max)
}

/// Fire growth model options of a full scenario.
impl Validate for FgmOptions {
    const SUBJECT: Subject = Subject::Fgm(0);

    fn check_valid_with(&self, _validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let fgm = self;
        let mut errs = Vec::new();
        let mut err =
            |property, message: &str| errs.push(ValidationError::new(property, message, subject));

        if fgm.stop_at_grid_end.is_none() {
            err(
                "stop_at_grid_end",
                "Whether the simulation should stop if it reaches the grid boundary is not set.",
            );
        }
        if fgm.breaching.is_none() {
            err("breaching", "Whether breaching should be used is not set.");
        }
        match &fgm.max_accel_timestep {
            None => err(
                "max_accel_timestep",
                "The maximum timestep to use during acceleration is not set.",
            ),
            Some(ts) if !ts.is_valid() => err(
                "max_accel_timestep",
                "The maximum timestep to use during acceleration is not valid.",
            ),
            Some(_) => {}
        }
        if fgm.spotting.is_none() {
            err("spotting", "Whether spotting should be used is not set.");
        }
        match fgm.distance_resolution {
            None => err("distance_resolution", "The distance resolution is not set."),
            Some(_) if out_of_range(fgm.distance_resolution, MIN_RESOLUTION, MAX_RESOLUTION) => err(
                "distance_resolution",
                "The specified distance resolution is invalid.",
            ),
            Some(_) => {}
        }
        match fgm.perimeter_resolution {
            None => err("perimeter_resolution", "The perimeter resolution is not set."),
            Some(_) if out_of_range(fgm.perimeter_resolution, MIN_RESOLUTION, MAX_RESOLUTION) => {
                err("perimeter_resolution", "The perimeter resolution is not valid.")
            }
            Some(_) => {}
        }
        if out_of_range(fgm.minimum_spreading_ros, 0.0000001, 1.0) {
            err(
                "minimum_spreading_ros",
                "The minimum spreading ROS is set but is not valid.",
            );
        }
        if out_of_range(fgm.dx, -250.0, 250.0) {
            err(
                "dx",
                "A delta value for the x direction of the ignition points is set but is not valid.",
            );
        }
        if out_of_range(fgm.dy, -250.0, 250.0) {
            err(
                "dy",
                "A delta value for the y direction of the ignition points is set but is not valid.",
            );
        }
        if out_of_range(fgm.dt.as_ref().map(dt_hours), -4.0, 4.0) {
            err(
                "dt",
                "A delta value for the start time of the ignition points is set but is not valid.",
            );
        }
        if out_of_range(fgm.dwd, -360.0, 360.0) {
            err("dwd", "A delta value for the wind direction is set but is not valid.");
        }
        if fgm.growth_percentile_applied == Some(true)
            && !matches!(fgm.growth_percentile, Some(p) if p > 0.0 && p < 100.0)
        {
            err(
                "growth_percentile",
                "Growth percentile is enabled but the specified growth percentile is not valid.",
            );
        }
        if !(6..=64).contains(&fgm.effective_initial_vertex_count()) {
            err(
                "initial_vertex_count",
                "The specified initial vertex count is not valid.",
            );
        }
        let size = fgm.effective_ignition_size();
        if size <= 0.0 || size > 25.0 {
            err("ignition_size", "The specified ignition size is not valid.");
        }
        if fgm.global_asset_operation == Some(AssetOperation::StopAfterX)
            && fgm.asset_collision_count.map_or(true, |c| c < 0)
        {
            err(
                "asset_collision_count",
                "The number of assets to stop the simulation after reaching has not been set.",
            );
        }
        errs
    }
}

fn dt_hours(dt: &Duration) -> f64 {
    dt.to_seconds() as f64 / 3600.0
}

/// Foliar moisture content options of a full scenario.
impl Validate for FmcOptions {
    const SUBJECT: Subject = Subject::Fmc(0);

    fn check_valid_with(&self, _validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut errs = Vec::new();
        if let Some(elevation) = self.nodata_elevation {
            if elevation != UNSET_NODATA_ELEVATION
                && !(0.0..=MAX_NODATA_ELEVATION).contains(&elevation)
            {
                errs.push(ValidationError::new(
                    "nodata_elevation",
                    "The elevation to use where NODATA exists is invalid.",
                    subject,
                ));
            }
        }
        if let Some(percent) = self.per_override {
            if percent != -1.0 && !(0.0..=MAX_PERCENT_OVERRIDE).contains(&percent) {
                errs.push(ValidationError::new(
                    "per_override",
                    "The FMC percent override was set but is invalid.",
                    subject,
                ));
            }
        }
        errs
    }
}

impl Validate for VectorMetadata {
    const SUBJECT: Subject = Subject::VectorMetadata(0);

    fn check_valid_with(&self, _validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let required = [
            ("version", self.version, "version"),
            ("scenario_name", self.scenario_name, "scenario name"),
            ("job_name", self.job_name, "job name"),
            ("ignition_name", self.ignition_name, "ignition name"),
            ("simulation_date", self.simulation_date, "simulation date"),
            ("fire_size", self.fire_size, "fire area"),
            ("perimeter_total", self.perimeter_total, "total perimeter size"),
            ("perimeter_active", self.perimeter_active, "active perimeter size"),
        ];
        let mut errs: Vec<ValidationError> = required
            .into_iter()
            .filter(|(_, value, _)| value.is_none())
            .map(|(property, _, label)| {
                ValidationError::new(
                    property,
                    format!(
                        "Whether the {} metadata should be exported or not has not been set.",
                        label
                    ),
                    subject,
                )
            })
            .collect();
        if !self.area_unit.is_some_and(MetadataUnit::is_area) {
            errs.push(ValidationError::new(
                "area_unit",
                "Invalid unit for area metadata.",
                subject,
            ));
        }
        if !self.perimeter_unit.is_some_and(MetadataUnit::is_length) {
            errs.push(ValidationError::new(
                "perimeter_unit",
                "Invalid unit for perimeter size metadata.",
                subject,
            ));
        }
        errs
    }
}

fn output_target_checks(filename: &str, scenario: &str, subject: Subject) -> Vec<ValidationError> {
    let mut leaves = Vec::new();
    if filename.is_empty() {
        leaves.push(ValidationError::new("filename", "The output filename is not set.", subject));
    } else if has_line_break(filename) {
        leaves.push(ValidationError::new(
            "filename",
            "File paths must not contain line breaks.",
            subject,
        ));
    }
    if scenario.is_empty() {
        leaves.push(ValidationError::new("scenario_name", "The scenario is not set.", subject));
    } else if has_line_break(scenario) {
        leaves.push(ValidationError::new(
            "scenario_name",
            "Scenario names must not contain line breaks.",
            subject,
        ));
    }
    leaves
}

impl Validate for SummaryFile {
    const SUBJECT: Subject = Subject::SummaryFile(0);

    fn check_valid_with(&self, _validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        output_target_checks(&self.filename, &self.scenario_name, subject)
    }
}

impl Validate for VectorFile {
    const SUBJECT: Subject = Subject::VectorFile(0);

    fn check_valid_with(&self, validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = output_target_checks(&self.filename, &self.scenario_name, subject);
        if self.perimeter_start_time.is_empty() {
            leaves.push(ValidationError::new(
                "perimeter_start_time",
                "The perimeter start time is not set.",
                subject,
            ));
        }
        if self.perimeter_end_time.is_empty() {
            leaves.push(ValidationError::new(
                "perimeter_end_time",
                "The perimeter end time is not set.",
                subject,
            ));
        }
        if self.kind.is_none() {
            leaves.push(ValidationError::new("kind", "The vector file type is not set.", subject));
        }
        let flags = [
            ("multiple_perimeters", self.multiple_perimeters, "Whether to output multiple perimeters is not set."),
            ("remove_islands", self.remove_islands, "Whether to remove islands is not set."),
            ("merge_contact", self.merge_contact, "Whether to merge touching perimeters is not set."),
            ("perimeter_active", self.perimeter_active, "Whether to output only the active perimeter is not set."),
        ];
        for (property, value, message) in flags {
            if value.is_none() {
                leaves.push(ValidationError::new(property, message, subject));
            }
        }
        let metadata_subject = Subject::VectorMetadata(subject.position());
        let metadata = self.metadata.check_valid_with(validator, metadata_subject);
        if !metadata.is_empty() {
            let mut node = ValidationError::group("The vector metadata is not valid.", metadata_subject);
            node.children = metadata;
            leaves.push(node);
        }
        leaves
    }
}

impl Validate for GridOutput {
    const SUBJECT: Subject = Subject::GridOutput(0);

    fn check_valid_with(&self, _validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        let mut leaves = output_target_checks(&self.filename, &self.scenario_name, subject);
        if self.output_time.is_empty() {
            leaves.push(ValidationError::new("output_time", "The output time is not set.", subject));
        }
        if !self.statistic.is_grid_export_statistic() {
            leaves.push(ValidationError::new(
                "statistic",
                "The statistic cannot be exported as a grid.",
                subject,
            ));
        }
        leaves
    }
}

impl Validate for StatsFile {
    const SUBJECT: Subject = Subject::StatsFile(0);

    fn check_valid_with(&self, _validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        output_target_checks(&self.filename, &self.scenario_name, subject)
    }
}

impl Validate for FileAttachment {
    const SUBJECT: Subject = Subject::Attachment(0);

    fn check_valid_with(&self, _validator: &Validator, subject: Subject) -> Vec<ValidationError> {
        if self.contents.lines().any(|line| line == ATTACHMENT_END) {
            vec![ValidationError::new(
                "contents",
                "The attachment contents contain the attachment terminator line.",
                subject,
            )]
        } else {
            Vec::new()
        }
    }
}

/// First pair of entities whose ids match ignoring case.
fn duplicate_pair<T: Entity>(items: &[T]) -> Option<(usize, usize)> {
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if items[i].id().to_uppercase() == items[j].id().to_uppercase() {
                return Some((i, j));
            }
        }
    }
    None
}

fn first_duplicate(job: &Job) -> Option<ValidationError> {
    fn found(
        pair: Option<(usize, usize)>,
        message: &str,
        subject: fn(usize) -> Subject,
    ) -> Option<ValidationError> {
        pair.map(|(_, second)| ValidationError::new("id", message, subject(second)))
    }

    found(
        duplicate_pair(&job.weather_stations),
        "Weather station names must be unique.",
        Subject::WeatherStation,
    )
    .or_else(|| found(duplicate_pair(&job.ignitions), "Ignition names must be unique.", Subject::Ignition))
    .or_else(|| found(duplicate_pair(&job.scenarios), "Scenario names must be unique.", Subject::Scenario))
    .or_else(|| found(duplicate_pair(&job.assets), "Asset names must be unique.", Subject::Asset))
    .or_else(|| {
        found(
            duplicate_pair(&job.files.fuel_patches),
            "Fuel patch names must be unique.",
            Subject::FuelPatch,
        )
    })
    .or_else(|| {
        found(
            duplicate_pair(&job.files.fuel_breaks),
            "Fuel break names must be unique.",
            Subject::FuelBreak,
        )
    })
    .or_else(|| {
        found(
            duplicate_pair(&job.files.weather_grids),
            "Weather grid names must be unique.",
            Subject::WeatherGrid,
        )
    })
    .or_else(|| {
        found(
            duplicate_pair(&job.files.weather_patches),
            "Weather patch names must be unique.",
            Subject::WeatherPatch,
        )
    })
    .or_else(|| {
        found(
            duplicate_pair(&job.files.grid_files),
            "Grid file names must be unique.",
            Subject::GridFile,
        )
    })
}

impl Job {
    /// Validate against the local file system.
    pub fn check_valid(&self) -> Vec<ValidationError> {
        Validator::new().check(self)
    }

    /// Validate with custom settings.
    pub fn check_valid_with(&self, validator: &Validator) -> Vec<ValidationError> {
        validator.check(self)
    }

    pub fn is_valid(&self) -> bool {
        self.check_valid().is_empty()
    }
}

/// Read access to named fields for live error values.
pub trait FieldValue {
    /// Current value of `name` rendered as text, or `None` if unset or unknown.
    fn field(&self, name: &str) -> Option<String>;
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn opt<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|v| v.to_string())
}

fn points(shape_points: &[LatLon]) -> Option<String> {
    Some(shape_points.len().to_string())
}

impl FieldValue for Job {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "comments" => text(&self.comments),
            _ => None,
        }
    }
}

impl FieldValue for Timezone {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "offset" => Some(self.offset.to_string()),
            "dst" => Some(self.dst.to_string()),
            "value" => opt(self.value),
            _ => None,
        }
    }
}

impl FieldValue for InputFiles {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "projection" => text(&self.projection),
            "lut" => text(&self.lut),
            "fuel_map" => text(&self.fuel_map),
            "elevation" => text(&self.elevation),
            _ => None,
        }
    }
}

impl FieldValue for GridFile {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(self.id()),
            "comments" => text(&self.comment),
            "filename" => text(&self.filename),
            "projection" => text(&self.projection),
            _ => None,
        }
    }
}

impl FieldValue for FuelBreak {
    fn field(&self, name: &str) -> Option<String> {
        match (name, &self.shape) {
            ("id", _) => text(self.id()),
            ("comments", _) => text(&self.comments),
            ("width", _) => opt(self.width),
            ("filename", FuelBreakShape::File(f)) => text(f),
            ("vertices", FuelBreakShape::Polygon(p) | FuelBreakShape::Polyline(p)) => points(p),
            _ => None,
        }
    }
}

fn patch_shape_field(name: &str, shape: &PatchShape) -> Option<String> {
    match (name, shape) {
        ("filename", PatchShape::File(f)) => text(f),
        ("vertices", PatchShape::Polygon(p)) => points(p),
        _ => None,
    }
}

impl FieldValue for FuelPatch {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(self.id()),
            "comments" => text(&self.comments),
            "from" => match &self.from {
                FuelSource::Rule(rule) => text(rule.as_str()),
                FuelSource::Name(n) => text(n),
                FuelSource::Index(i) => Some(i.to_string()),
            },
            "to" => match &self.to {
                FuelTarget::Name(n) => text(n),
                FuelTarget::Index(i) => Some(i.to_string()),
            },
            other => patch_shape_field(other, &self.shape),
        }
    }
}

impl FieldValue for WeatherPatch {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(self.id()),
            "comments" => text(&self.comments),
            "start_time" => text(&self.start_time),
            "end_time" => text(&self.end_time),
            "start_time_of_day" => text(&self.start_time_of_day),
            "end_time_of_day" => text(&self.end_time_of_day),
            other => patch_shape_field(other, &self.shape),
        }
    }
}

impl FieldValue for WeatherGrid {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(self.id()),
            "comments" => text(&self.comments),
            "start_time" => text(&self.start_time),
            "end_time" => text(&self.end_time),
            "start_time_of_day" => text(&self.start_time_of_day),
            "end_time_of_day" => text(&self.end_time_of_day),
            _ => None,
        }
    }
}

impl FieldValue for WeatherGridFile {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "speed" => Some(self.speed.to_string()),
            "filename" => text(&self.filename),
            "projection" => text(&self.projection),
            _ => None,
        }
    }
}

impl FieldValue for WeatherStation {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(self.id()),
            "comments" => text(&self.comments),
            "location" => self
                .location
                .map(|l| format!("{}, {}", l.latitude, l.longitude)),
            "elevation" => Some(self.elevation.to_string()),
            _ => None,
        }
    }
}

impl FieldValue for WeatherStream {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(self.id()),
            "comments" => text(&self.comments),
            "filename" => text(&self.filename),
            "starting_ffmc" => Some(self.starting_ffmc.to_string()),
            "starting_dmc" => Some(self.starting_dmc.to_string()),
            "starting_dc" => Some(self.starting_dc.to_string()),
            "starting_precip" => Some(self.starting_precip.to_string()),
            "hffmc_hour" => Some(self.hffmc_hour.to_string()),
            "start_time" => text(&self.start_time),
            "end_time" => text(&self.end_time),
            _ => None,
        }
    }
}

impl FieldValue for Ignition {
    fn field(&self, name: &str) -> Option<String> {
        match (name, &self.shape) {
            ("id", _) => text(self.id()),
            ("comments", _) => text(&self.comments),
            ("start_time", _) => text(&self.start_time),
            ("filename", IgnitionShape::File(f)) => text(f),
            (
                "vertices",
                IgnitionShape::Point(p) | IgnitionShape::Polygon(p) | IgnitionShape::Polyline(p),
            ) => points(p),
            _ => None,
        }
    }
}

impl FieldValue for AssetFile {
    fn field(&self, name: &str) -> Option<String> {
        match (name, &self.shape) {
            ("id", _) => text(self.id()),
            ("comments", _) => text(&self.comments),
            ("buffer", _) => opt(self.buffer),
            ("filename", AssetShape::File(f)) => text(f),
            ("vertices", AssetShape::Point(p) | AssetShape::Polygon(p) | AssetShape::Polyline(p)) => {
                points(p)
            }
            _ => None,
        }
    }
}

impl FieldValue for Scenario {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(self.id()),
            "comments" => text(&self.comments),
            "copy_of" => self.copy_of.clone(),
            "start_time" => text(&self.start_time),
            "end_time" => text(&self.end_time),
            _ => None,
        }
    }
}

impl FieldValue for FgmOptions {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "max_accel_timestep" => opt(self.max_accel_timestep),
            "distance_resolution" => opt(self.distance_resolution),
            "perimeter_resolution" => opt(self.perimeter_resolution),
            "minimum_spreading_ros" => opt(self.minimum_spreading_ros),
            "stop_at_grid_end" => opt(self.stop_at_grid_end),
            "breaching" => opt(self.breaching),
            "spotting" => opt(self.spotting),
            "dx" => opt(self.dx),
            "dy" => opt(self.dy),
            "dt" => opt(self.dt),
            "dwd" => opt(self.dwd),
            "growth_percentile" => opt(self.growth_percentile),
            "initial_vertex_count" => Some(self.effective_initial_vertex_count().to_string()),
            "ignition_size" => Some(self.effective_ignition_size().to_string()),
            "asset_collision_count" => opt(self.asset_collision_count),
            _ => None,
        }
    }
}

impl FieldValue for FmcOptions {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "per_override" => opt(self.per_override),
            "nodata_elevation" => opt(self.nodata_elevation),
            "terrain" => opt(self.terrain),
            _ => None,
        }
    }
}

impl FieldValue for BurningCondition {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "date" => text(&self.date),
            _ => None,
        }
    }
}

impl FieldValue for SummaryFile {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "filename" => text(&self.filename),
            "scenario_name" => text(&self.scenario_name),
            _ => None,
        }
    }
}

impl FieldValue for VectorFile {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "filename" => text(&self.filename),
            "scenario_name" => text(&self.scenario_name),
            "perimeter_start_time" => text(&self.perimeter_start_time),
            "perimeter_end_time" => text(&self.perimeter_end_time),
            "kind" => self.kind.map(|k| format!("{:?}", k)),
            "multiple_perimeters" => opt(self.multiple_perimeters),
            "remove_islands" => opt(self.remove_islands),
            "merge_contact" => opt(self.merge_contact),
            "perimeter_active" => opt(self.perimeter_active),
            _ => None,
        }
    }
}

impl FieldValue for VectorMetadata {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "version" => opt(self.version),
            "scenario_name" => opt(self.scenario_name),
            "job_name" => opt(self.job_name),
            "ignition_name" => opt(self.ignition_name),
            "simulation_date" => opt(self.simulation_date),
            "fire_size" => opt(self.fire_size),
            "perimeter_total" => opt(self.perimeter_total),
            "perimeter_active" => opt(self.perimeter_active),
            "area_unit" => self.area_unit.map(|u| format!("{:?}", u)),
            "perimeter_unit" => self.perimeter_unit.map(|u| format!("{:?}", u)),
            _ => None,
        }
    }
}

impl FieldValue for GridOutput {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "filename" => text(&self.filename),
            "scenario_name" => text(&self.scenario_name),
            "output_time" => text(&self.output_time),
            "statistic" => text(self.statistic.name()),
            _ => None,
        }
    }
}

impl FieldValue for StatsFile {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "filename" => text(&self.filename),
            "scenario_name" => text(&self.scenario_name),
            _ => None,
        }
    }
}

impl FieldValue for FileAttachment {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "reference" => text(&self.reference),
            "contents" => Some(format!("{} bytes", self.contents.len())),
            _ => None,
        }
    }
}
