pub mod audit;
mod lenient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    schedule::{speed::SpeedTier, window::WindowStatus},
    shared::{Identifiable, geo::Coordinate},
};

pub const MIN_UTC_OFFSET: f64 = -12.0;
pub const MAX_UTC_OFFSET: f64 = 14.0;

/// Problems with a single node that exclude it from the timing chain
/// without failing the recalculation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum NodeIssue {
    #[error("latitude is missing or not a number")]
    MissingLatitude,
    #[error("longitude is missing or not a number")]
    MissingLongitude,
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("utc offset {0} is outside [-12, 14]")]
    UtcOffsetOutOfRange(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Origin,
    Delivery,
    Flyby,
}

/// Map framing used by the rendering client.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CameraZoom {
    Globe,
    Continental,
    #[default]
    Regional,
    City,
    Street,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Snow,
    Blizzard,
    Rain,
    Fog,
    Aurora,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub latitude_degrees: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub longitude_degrees: Option<f64>,
    #[serde(default)]
    pub utc_offset_hours: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, utc_offset: f64) -> Self {
        Self {
            name: name.into(),
            region: String::new(),
            latitude_degrees: Some(latitude),
            longitude_degrees: Some(longitude),
            utc_offset_hours: utc_offset,
        }
    }

    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Validated coordinate of this location.
    pub fn coordinate(&self) -> Result<Coordinate, NodeIssue> {
        let latitude = self.latitude_degrees.ok_or(NodeIssue::MissingLatitude)?;
        let longitude = self.longitude_degrees.ok_or(NodeIssue::MissingLongitude)?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(NodeIssue::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(NodeIssue::LongitudeOutOfRange(longitude));
        }
        Ok(Coordinate {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StopExperience {
    pub duration_seconds: u32,
    pub camera_zoom_stop: CameraZoom,
    pub weather_condition: Weather,
    pub presents_delivered_at_stop: u64,
}

/// Derived timing of a node. Owned by the engine and rewritten on every
/// recalculation.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schedule {
    pub arrival_utc: Option<DateTime<Utc>>,
    pub departure_utc: Option<DateTime<Utc>>,
    pub local_arrival_hour: Option<f64>,
    pub window_status: Option<WindowStatus>,
}

/// Derived description of the hop that ends at a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transit {
    pub distance_km: f64,
    pub duration_seconds: f64,
    pub speed_tier: SpeedTier,
    pub camera_zoom_transit: CameraZoom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    pub id: String,
    pub kind: NodeKind,
    pub location: Location,
    #[serde(default)]
    pub stop_experience: StopExperience,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default)]
    pub transit_to_here: Option<Transit>,
}

impl Identifiable for RouteNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.location.name
    }
}

impl RouteNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, location: Location) -> Self {
        Self {
            id: id.into(),
            kind,
            location,
            stop_experience: Default::default(),
            schedule: Default::default(),
            transit_to_here: None,
        }
    }

    pub fn origin(id: impl Into<String>, location: Location) -> Self {
        Self::new(id, NodeKind::Origin, location)
    }

    pub fn delivery(id: impl Into<String>, location: Location, duration_seconds: u32) -> Self {
        Self::new(id, NodeKind::Delivery, location).with_duration(duration_seconds)
    }

    pub fn flyby(id: impl Into<String>, location: Location) -> Self {
        Self::new(id, NodeKind::Flyby, location)
    }

    pub fn with_duration(mut self, duration_seconds: u32) -> Self {
        self.stop_experience.duration_seconds = duration_seconds;
        self
    }

    pub fn is_origin(&self) -> bool {
        self.kind == NodeKind::Origin
    }

    /// Seconds spent at the stop. Flybys never dwell.
    pub fn dwell_seconds(&self) -> u32 {
        match self.kind {
            NodeKind::Flyby => 0,
            NodeKind::Origin | NodeKind::Delivery => self.stop_experience.duration_seconds,
        }
    }

    /// Checks that the node can take part in the timing chain and returns
    /// its coordinate.
    pub fn screen(&self) -> Result<Coordinate, NodeIssue> {
        let coordinate = self.location.coordinate()?;
        let offset = self.location.utc_offset_hours;
        if !offset.is_finite() || !(MIN_UTC_OFFSET..=MAX_UTC_OFFSET).contains(&offset) {
            return Err(NodeIssue::UtcOffsetOutOfRange(offset));
        }
        Ok(coordinate)
    }
}
