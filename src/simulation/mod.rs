//! Preview of where the sleigh is at a given instant, computed from a
//! recalculated route.

use chrono::{DateTime, TimeDelta, Utc};
use rayon::prelude::*;
use serde::Serialize;

use tracing::warn;

use crate::{
    route::RouteNode,
    shared::{Identifiable, geo::Coordinate},
};

/// Upper bound on the number of samples a single timeline may hold.
pub const MAX_TIMELINE_SAMPLES: i64 = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRef {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub arrival_utc: Option<DateTime<Utc>>,
    pub departure_utc: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Snapshot {
    NoRoute,
    NoTimes,
    NotStarted {
        start: StopRef,
        locations_visited: usize,
        total_locations: usize,
        progress: f64,
    },
    AtLocation {
        current: StopRef,
        previous: Option<StopRef>,
        next: Option<StopRef>,
        locations_visited: usize,
        total_locations: usize,
        progress: f64,
    },
    Traveling {
        position: Coordinate,
        previous: StopRef,
        next: StopRef,
        travel_progress: f64,
        locations_visited: usize,
        total_locations: usize,
        progress: f64,
    },
    Completed {
        current: StopRef,
        locations_visited: usize,
        total_locations: usize,
        progress: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub total_locations: usize,
    pub locations_with_times: usize,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub valid: bool,
}

struct TimedStop<'a> {
    node: &'a RouteNode,
    coordinate: Coordinate,
    arrival: DateTime<Utc>,
    departure: DateTime<Utc>,
}

impl TimedStop<'_> {
    fn to_ref(&self) -> StopRef {
        StopRef {
            id: self.node.id().to_string(),
            name: self.node.name().to_string(),
            coordinate: self.coordinate,
            arrival_utc: self.node.schedule.arrival_utc,
            departure_utc: self.node.schedule.departure_utc,
        }
    }
}

// The origin has no arrival, so it is treated as a stop that ends on departure.
fn timed_stops(nodes: &[RouteNode]) -> Vec<TimedStop<'_>> {
    nodes
        .iter()
        .filter_map(|node| {
            let departure = node.schedule.departure_utc?;
            let coordinate = node.location.coordinate().ok()?;
            Some(TimedStop {
                node,
                coordinate,
                arrival: node.schedule.arrival_utc.unwrap_or(departure),
                departure,
            })
        })
        .collect()
}

/// Fraction of `[start, end]` elapsed at `now`, clamped to `[0, 1]`.
pub fn progress_between(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    if now <= start {
        return 0.0;
    }
    if now >= end {
        return 1.0;
    }
    let total = (end - start).num_milliseconds() as f64;
    let elapsed = (now - start).num_milliseconds() as f64;
    elapsed / total
}

/// Straight-line interpolation in latitude and longitude.
pub fn interpolate(from: &Coordinate, to: &Coordinate, progress: f64) -> Coordinate {
    Coordinate {
        latitude: from.latitude + (to.latitude - from.latitude) * progress,
        longitude: from.longitude + (to.longitude - from.longitude) * progress,
    }
}

pub fn simulate_at(nodes: &[RouteNode], instant: DateTime<Utc>) -> Snapshot {
    if nodes.is_empty() {
        return Snapshot::NoRoute;
    }
    snapshot(&timed_stops(nodes), instant)
}

/// Samples the route every `step` between `from` and `to`, both inclusive.
/// Requests that would exceed [`MAX_TIMELINE_SAMPLES`] yield no samples.
pub fn timeline(
    nodes: &[RouteNode],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    step: TimeDelta,
) -> Vec<(DateTime<Utc>, Snapshot)> {
    if nodes.is_empty() || step <= TimeDelta::zero() || to < from {
        return Vec::new();
    }
    let span = (to - from).num_milliseconds();
    let samples = span / step.num_milliseconds().max(1) + 1;
    if samples > MAX_TIMELINE_SAMPLES {
        warn!(
            samples,
            max = MAX_TIMELINE_SAMPLES,
            "Timeline step too fine for the requested span"
        );
        return Vec::new();
    }
    let stops = timed_stops(nodes);
    let mut instants = Vec::with_capacity(samples as usize);
    let mut instant = from;
    while instant <= to {
        instants.push(instant);
        match instant.checked_add_signed(step) {
            Some(next) => instant = next,
            None => break,
        }
    }
    instants
        .into_par_iter()
        .map(|instant| (instant, snapshot(&stops, instant)))
        .collect()
}

pub fn summarize(nodes: &[RouteNode]) -> RouteSummary {
    let stops = timed_stops(nodes);
    RouteSummary {
        total_locations: nodes.len(),
        locations_with_times: stops.len(),
        start: stops.first().map(|stop| stop.arrival),
        end: stops.last().map(|stop| stop.departure),
        valid: !stops.is_empty(),
    }
}

fn snapshot(stops: &[TimedStop], instant: DateTime<Utc>) -> Snapshot {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Snapshot::NoTimes;
    };
    let total = stops.len();
    if instant < first.arrival {
        return Snapshot::NotStarted {
            start: first.to_ref(),
            locations_visited: 0,
            total_locations: total,
            progress: 0.0,
        };
    }
    if instant >= last.departure {
        return Snapshot::Completed {
            current: last.to_ref(),
            locations_visited: total,
            total_locations: total,
            progress: 1.0,
        };
    }

    for (i, stop) in stops.iter().enumerate() {
        if stop.arrival <= instant && instant < stop.departure {
            return Snapshot::AtLocation {
                current: stop.to_ref(),
                previous: i.checked_sub(1).map(|p| stops[p].to_ref()),
                next: stops.get(i + 1).map(TimedStop::to_ref),
                locations_visited: i + 1,
                total_locations: total,
                progress: (i + 1) as f64 / total as f64,
            };
        }
        if let Some(next) = stops.get(i + 1)
            && stop.departure <= instant
            && instant < next.arrival
        {
            let travel_progress = progress_between(stop.departure, next.arrival, instant);
            return Snapshot::Traveling {
                position: interpolate(&stop.coordinate, &next.coordinate, travel_progress),
                previous: stop.to_ref(),
                next: next.to_ref(),
                travel_progress,
                locations_visited: i + 1,
                total_locations: total,
                progress: (i as f64 + 1.0 + travel_progress) / total as f64,
            };
        }
    }
    // Only reachable if the stops are not in time order.
    Snapshot::NoTimes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 24, h, m, 0).unwrap()
    }

    #[test]
    fn progress_clamps() {
        assert_eq!(progress_between(at(10, 0), at(11, 0), at(9, 0)), 0.0);
        assert_eq!(progress_between(at(10, 0), at(11, 0), at(12, 0)), 1.0);
        assert_eq!(progress_between(at(10, 0), at(12, 0), at(11, 0)), 0.5);
    }

    #[test]
    fn progress_zero_length() {
        assert_eq!(progress_between(at(10, 0), at(10, 0), at(10, 0)), 0.0);
    }

    #[test]
    fn interpolate_midpoint() {
        let point = interpolate(
            &Coordinate::from((0.0, 0.0)),
            &Coordinate::from((10.0, 20.0)),
            0.5,
        );
        assert_eq!(point, Coordinate::from((5.0, 10.0)));
    }

    #[test]
    fn empty_route() {
        assert_eq!(simulate_at(&[], at(0, 0)), Snapshot::NoRoute);
        assert!(!summarize(&[]).valid);
    }
}
