use chrono::{DateTime, NaiveTime, Utc};

use crate::{
    route::RouteNode,
    schedule::{Error, ScheduleConfig, propagate::Hop},
    shared::time::hours_to_delta,
};

/// Boundary condition of the timing chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub origin_departure: DateTime<Utc>,
    pub first_arrival: DateTime<Utc>,
}

/// Solves the origin's departure so that the first stop in the chain is
/// reached at the configured local hour on the 24th of December.
pub fn solve_anchor(
    first_stop: &RouteNode,
    first_hop: &Hop,
    config: &ScheduleConfig,
) -> Result<Anchor, self::Error> {
    let local_hour = config.first_arrival_hour()?;
    let local_midnight = config.target_date()?.and_time(NaiveTime::MIN).and_utc();
    let offset = hours_to_delta(first_stop.location.utc_offset_hours);

    let first_arrival = local_midnight
        .checked_add_signed(hours_to_delta(local_hour))
        .and_then(|local| local.checked_sub_signed(offset))
        .ok_or(Error::TimestampOverflow)?;
    let origin_departure = first_arrival
        .checked_sub_signed(first_hop.duration())
        .ok_or(Error::TimestampOverflow)?;

    Ok(Anchor {
        origin_departure,
        first_arrival,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{route::Location, shared::geo::Coordinate};
    use chrono::TimeZone;

    #[test]
    fn first_stop_east_of_utc() {
        let first = RouteNode::delivery("tonga", Location::new("Nuku'alofa", -21.1, -175.2, 14.0), 0);
        let hop = Hop::between(&Coordinate::from((90.0, 0.0)), &Coordinate::from((-21.1, -175.2)));
        let config = ScheduleConfig::new(2024).first_arrival_at(0.0);

        let anchor = solve_anchor(&first, &hop, &config).unwrap();
        assert_eq!(
            anchor.first_arrival,
            Utc.with_ymd_and_hms(2024, 12, 23, 10, 0, 0).unwrap()
        );
        assert_eq!(anchor.first_arrival - anchor.origin_departure, hop.duration());
    }

    #[test]
    fn missing_hour_is_an_error() {
        let first = RouteNode::delivery("a", Location::new("A", 0.0, 0.0, 0.0), 0);
        let hop = Hop::between(&Coordinate::from((90.0, 0.0)), &Coordinate::from((0.0, 0.0)));
        let result = solve_anchor(&first, &hop, &ScheduleConfig::new(2024));
        assert!(matches!(result, Err(Error::MissingFirstArrivalHour)));
    }
}
