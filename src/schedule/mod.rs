pub mod anchor;
pub mod camera;
pub mod propagate;
pub mod speed;
pub mod window;

pub use anchor::*;
pub use propagate::{Hop, Slot, Timing, propagate, propagate_forward};
pub use speed::{SpeedClass, SpeedTier};
pub use window::{WindowCheck, WindowStatus};

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    route::{NodeIssue, RouteNode, Schedule, Transit},
    shared::geo::Coordinate,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Route has no nodes, the origin is required")]
    EmptyRoute,
    #[error("First node of the route must be the origin")]
    OriginNotFirst,
    #[error("Node at position {index} is a second origin")]
    DuplicateOrigin { index: usize },
    #[error("Node id {0} is used more than once")]
    DuplicateNodeId(String),
    #[error("Origin node is malformed: {0}")]
    InvalidOrigin(NodeIssue),
    #[error("First arrival local hour is required once the route has a stop")]
    MissingFirstArrivalHour,
    #[error("First arrival local hour {0} is outside [0, 24)")]
    InvalidFirstArrivalHour(f64),
    #[error("Year {0} has no December 24th")]
    InvalidTargetYear(i32),
    #[error("Schedule runs past the representable time range")]
    TimestampOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    pub target_year: i32,
    #[serde(default)]
    pub first_arrival_local_hour: Option<f64>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            target_year: 2024,
            first_arrival_local_hour: None,
        }
    }
}

impl ScheduleConfig {
    pub fn new(target_year: i32) -> Self {
        Self {
            target_year,
            first_arrival_local_hour: None,
        }
    }

    /// Local hour (decimal, `[0, 24)`) at which the first stop is reached.
    pub fn first_arrival_at(mut self, local_hour: f64) -> Self {
        self.first_arrival_local_hour = Some(local_hour);
        self
    }

    pub fn first_arrival_hour(&self) -> Result<f64, self::Error> {
        let hour = self
            .first_arrival_local_hour
            .ok_or(Error::MissingFirstArrivalHour)?;
        if hour.is_finite() && (0.0..24.0).contains(&hour) {
            Ok(hour)
        } else {
            Err(Error::InvalidFirstArrivalHour(hour))
        }
    }

    /// Christmas Eve of the target year.
    pub fn target_date(&self) -> Result<NaiveDate, self::Error> {
        NaiveDate::from_ymd_opt(self.target_year, 12, 24)
            .ok_or(Error::InvalidTargetYear(self.target_year))
    }
}

/// Per-node outcome handed to the editing surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeValidation {
    pub node_id: String,
    pub status: Option<WindowStatus>,
    pub local_arrival_hour: Option<f64>,
    pub issue: Option<NodeIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recalculation {
    pub nodes: Vec<RouteNode>,
    pub validations: Vec<NodeValidation>,
}

/// Rebuilds every derived field of a route.
///
/// The input is never modified. The returned list has the same length and
/// order, with `schedule` and `transit_to_here` overwritten on every node.
/// Malformed stops are left unscheduled and reported as [`WindowStatus::Red`]
/// with their [`NodeIssue`].
pub fn recalculate(nodes: &[RouteNode], config: &ScheduleConfig) -> Result<Recalculation, self::Error> {
    let slots = propagate(nodes, config)?;
    let (nodes, validations): (Vec<_>, Vec<_>) = nodes
        .iter()
        .zip(slots)
        .map(|(node, slot)| settle(node, slot))
        .unzip();
    debug!(
        "Recalculated {} nodes, {} flagged",
        nodes.len(),
        validations.iter().filter(|v| v.issue.is_some()).count()
    );
    Ok(Recalculation { nodes, validations })
}

fn settle(node: &RouteNode, slot: Slot) -> (RouteNode, NodeValidation) {
    let mut node = node.clone();
    node.schedule = Schedule::default();
    node.transit_to_here = None;
    let mut validation = NodeValidation {
        node_id: node.id.clone(),
        status: None,
        local_arrival_hour: None,
        issue: None,
    };

    match slot {
        Slot::Skipped(issue) => {
            validation.status = Some(WindowStatus::Red);
            validation.issue = Some(issue);
        }
        Slot::Timed(timing) => {
            node.schedule.arrival_utc = timing.arrival;
            node.schedule.departure_utc = timing.departure;
            if let Some(arrival) = timing.arrival {
                let check = window::classify(&arrival, node.location.utc_offset_hours);
                node.schedule.local_arrival_hour = Some(check.local_arrival_hour);
                node.schedule.window_status = Some(check.status);
                validation.status = Some(check.status);
                validation.local_arrival_hour = Some(check.local_arrival_hour);
            }
            if let Some(hop) = timing.hop {
                node.transit_to_here = Some(Transit {
                    distance_km: hop.distance.as_kilometers(),
                    duration_seconds: hop.duration().num_milliseconds() as f64 / 1000.0,
                    speed_tier: hop.speed.tier,
                    camera_zoom_transit: camera::assign(&hop.speed),
                });
            }
        }
    }
    (node, validation)
}

/// Rejects lists that break the origin contract and returns the origin's
/// coordinate.
pub(crate) fn check_structure(nodes: &[RouteNode]) -> Result<Coordinate, self::Error> {
    let origin = nodes.first().ok_or(Error::EmptyRoute)?;
    if !origin.is_origin() {
        return Err(Error::OriginNotFirst);
    }
    if let Some(index) = nodes.iter().skip(1).position(RouteNode::is_origin) {
        return Err(Error::DuplicateOrigin { index: index + 1 });
    }
    let mut seen = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !seen.insert(node.id.as_str()) {
            return Err(Error::DuplicateNodeId(node.id.clone()));
        }
    }
    origin.screen().map_err(Error::InvalidOrigin)
}
