//! Ignitions and assets.

use super::geo::LatLon;

/// Geometry of an ignition.
#[derive(Debug, Clone, PartialEq)]
pub enum IgnitionShape {
    File(String),
    Point(Vec<LatLon>),
    Polygon(Vec<LatLon>),
    Polyline(Vec<LatLon>),
}

/// A fire start.
#[derive(Debug, Clone, PartialEq)]
pub struct Ignition {
    pub(crate) id: String,
    pub start_time: String,
    pub comments: String,
    pub shape: IgnitionShape,
    /// Key/value pairs forwarded to the engine verbatim.
    pub attributes: Vec<(String, String)>,
}

impl Ignition {
    /// Append a vertex to a geometric ignition. File ignitions are left untouched.
    pub fn add_point(&mut self, point: LatLon) -> &mut Self {
        match &mut self.shape {
            IgnitionShape::Point(points)
            | IgnitionShape::Polygon(points)
            | IgnitionShape::Polyline(points) => points.push(point),
            IgnitionShape::File(_) => {}
        }
        self
    }

    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.push((key.into(), value.into()));
        self
    }
}

/// Geometry of an asset.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetShape {
    File(String),
    Polyline(Vec<LatLon>),
    Polygon(Vec<LatLon>),
    Point(Vec<LatLon>),
}

impl AssetShape {
    pub fn code(&self) -> i32 {
        match self {
            AssetShape::File(_) => 0,
            AssetShape::Polyline(_) => 1,
            AssetShape::Polygon(_) => 2,
            AssetShape::Point(_) => 4,
        }
    }
}

/// Buffer the engine receives for an asset whose buffer was never set.
pub const UNSET_ASSET_BUFFER: f64 = -1.0;

/// Something the fire should be tracked against (a building, a road).
#[derive(Debug, Clone, PartialEq)]
pub struct AssetFile {
    pub(crate) id: String,
    pub comments: String,
    pub shape: AssetShape,
    /// Buffer distance in metres around the asset.
    pub buffer: Option<f64>,
}
