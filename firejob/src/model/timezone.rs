//! The job's time zone.

use crate::duration::Duration;

/// Time zone the job's times are expressed in.
///
/// Either a zone id from the engine's own list (see
/// [`EngineClient::fetch_timezones`](crate::client::EngineClient::fetch_timezones))
/// or an explicit UTC offset with a daylight saving flag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timezone {
    pub offset: Duration,
    pub dst: bool,
    pub value: Option<i32>,
}

impl Timezone {
    /// A zone given as an offset from UTC.
    pub fn from_offset(offset: Duration, dst: bool) -> Self {
        Self {
            offset,
            dst,
            value: None,
        }
    }

    /// A zone picked from the engine's zone list.
    pub fn from_value(value: i32) -> Self {
        Self {
            value: Some(value).filter(|v| *v >= 0),
            ..Self::default()
        }
    }
}

/// One entry of the engine's time zone list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneName {
    pub name: String,
    pub value: i32,
}
