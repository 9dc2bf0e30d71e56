use crate::{route::CameraZoom, schedule::speed::SpeedClass};

/// Hops longer than this are framed from orbit.
pub const GLOBE_TRANSIT_SECONDS: f64 = 15.0 * 60.0;

pub fn assign(speed: &SpeedClass) -> CameraZoom {
    if speed.travel_seconds > GLOBE_TRANSIT_SECONDS {
        CameraZoom::Globe
    } else {
        CameraZoom::Regional
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::speed::{SpeedTier, classify};
    use crate::shared::geo::Distance;

    fn with_seconds(travel_seconds: f64) -> SpeedClass {
        SpeedClass {
            tier: SpeedTier::Hypersonic,
            speed_kmh: 14_000.0,
            travel_seconds,
        }
    }

    #[test]
    fn fifteen_minutes_stays_regional() {
        assert_eq!(assign(&with_seconds(900.0)), CameraZoom::Regional);
        assert_eq!(assign(&with_seconds(900.5)), CameraZoom::Globe);
    }

    #[test]
    fn framing_follows_travel_time() {
        // 450 km at cruising speed takes just over 13 minutes.
        let speed = classify(Distance::from_kilometers(450.0));
        assert_eq!(assign(&speed), CameraZoom::Regional);

        // 4000 km at hypersonic speed takes a bit over 17 minutes.
        let speed = classify(Distance::from_kilometers(4000.0));
        assert_eq!(assign(&speed), CameraZoom::Globe);
    }
}
