use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::{
    route::{NodeIssue, RouteNode},
    schedule::{
        Error, ScheduleConfig,
        anchor::solve_anchor,
        check_structure,
        speed::{self, SpeedClass},
    },
    shared::{
        geo::{Coordinate, Distance},
        time::seconds_to_delta,
    },
};

/// One flight between two consecutive nodes of the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hop {
    pub distance: Distance,
    pub speed: SpeedClass,
}

impl Hop {
    pub fn between(from: &Coordinate, to: &Coordinate) -> Self {
        let distance = from.great_circle_distance(to);
        Self {
            distance,
            speed: speed::classify(distance),
        }
    }

    /// Travel time as it is laid onto the timeline.
    pub fn duration(&self) -> TimeDelta {
        seconds_to_delta(self.speed.travel_seconds)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Timing {
    pub arrival: Option<DateTime<Utc>>,
    pub departure: Option<DateTime<Utc>>,
    pub hop: Option<Hop>,
}

/// Propagation result for a single node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot {
    Timed(Timing),
    Skipped(NodeIssue),
}

/// Derives the timing chain for a route. The returned slots are parallel to
/// `nodes`.
pub fn propagate(nodes: &[RouteNode], config: &ScheduleConfig) -> Result<Vec<Slot>, self::Error> {
    let origin = check_structure(nodes)?;

    let mut slots = Vec::with_capacity(nodes.len());
    slots.push(Slot::Timed(Timing::default()));
    let mut chain: Vec<(usize, Coordinate)> = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate().skip(1) {
        match node.screen() {
            Ok(coordinate) => {
                chain.push((index, coordinate));
                slots.push(Slot::Timed(Timing::default()));
            }
            Err(issue) => {
                warn!(node = %node.id, %issue, "Leaving node out of the schedule chain");
                slots.push(Slot::Skipped(issue));
            }
        }
    }

    if nodes.len() < 2 {
        return Ok(slots);
    }
    // Holds even when every stop after the origin is malformed.
    config.first_arrival_hour()?;
    config.target_date()?;

    let Some(&(first_idx, first_coordinate)) = chain.first() else {
        debug!("No schedulable stops after the origin");
        return Ok(slots);
    };
    let first_hop = Hop::between(&origin, &first_coordinate);
    let anchor = solve_anchor(&nodes[first_idx], &first_hop, config)?;

    slots[0] = Slot::Timed(Timing {
        arrival: None,
        departure: Some(anchor.origin_departure),
        hop: None,
    });
    propagate_forward(nodes, origin, anchor.origin_departure, &chain, &mut slots)?;
    debug!(
        "Propagated {} of {} stops from origin departure {}",
        chain.len(),
        nodes.len() - 1,
        anchor.origin_departure
    );
    Ok(slots)
}

/// Walks the chain from the origin, laying each hop and dwell end to end.
pub fn propagate_forward(
    nodes: &[RouteNode],
    origin: Coordinate,
    origin_departure: DateTime<Utc>,
    chain: &[(usize, Coordinate)],
    slots: &mut [Slot],
) -> Result<(), self::Error> {
    let mut previous = origin;
    let mut departure = origin_departure;
    for &(index, coordinate) in chain {
        let hop = Hop::between(&previous, &coordinate);
        let dwell = TimeDelta::seconds(nodes[index].dwell_seconds() as i64);
        let arrival = departure
            .checked_add_signed(hop.duration())
            .ok_or(Error::TimestampOverflow)?;
        let leave = arrival
            .checked_add_signed(dwell)
            .ok_or(Error::TimestampOverflow)?;

        slots[index] = Slot::Timed(Timing {
            arrival: Some(arrival),
            departure: Some(leave),
            hop: Some(hop),
        });
        previous = coordinate;
        departure = leave;
    }
    Ok(())
}
