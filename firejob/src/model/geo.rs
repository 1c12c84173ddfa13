//! Coordinates and the shapes that entities are drawn with.

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<(f64, f64)> for LatLon {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Area an input patch applies to.
///
/// Shared by fuel patches and weather patches, which accept the same three
/// forms on the wire (`file`, `landscape`, `polygon`).
#[derive(Debug, Clone, PartialEq)]
pub enum PatchShape {
    /// A vector file on disk or an attachment reference.
    File(String),
    /// A polygon given vertex by vertex.
    Polygon(Vec<LatLon>),
    /// The whole landscape.
    Landscape,
}

impl PatchShape {
    /// The referenced file, if the shape is file based.
    pub fn filename(&self) -> Option<&str> {
        match self {
            PatchShape::File(f) => Some(f),
            _ => None,
        }
    }
}
