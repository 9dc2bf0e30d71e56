use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::shared::geo::Distance;

pub const CRUISING_SPEED_KMH: f64 = 2050.0;
pub const HYPERSONIC_SPEED_KMH: f64 = 14_000.0;
pub const HYPERSONIC_LONG_SPEED_KMH: f64 = 60_000.0;

/// Hops up to this distance fly at cruising speed.
pub const CRUISING_LIMIT: Distance = Distance::from_kilometers(450.0);
/// Hops from this distance on fly hypersonic.
pub const HYPERSONIC_THRESHOLD: Distance = Distance::from_kilometers(800.0);
pub const HYPERSONIC_LONG_THRESHOLD: Distance = Distance::from_kilometers(5000.0);

pub const MIN_TRAVEL_SECONDS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeedTier {
    Cruising,
    Regional,
    Hypersonic,
    HypersonicLong,
}

impl Display for SpeedTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpeedTier::Cruising => "CRUISING",
            SpeedTier::Regional => "REGIONAL",
            SpeedTier::Hypersonic => "HYPERSONIC",
            SpeedTier::HypersonicLong => "HYPERSONIC_LONG",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedClass {
    pub tier: SpeedTier,
    pub speed_kmh: f64,
    pub travel_seconds: f64,
}

/// Picks the speed tier for a hop and the time it takes to fly it.
pub fn classify(distance: Distance) -> SpeedClass {
    let (tier, speed_kmh) = if distance >= HYPERSONIC_LONG_THRESHOLD {
        (SpeedTier::HypersonicLong, HYPERSONIC_LONG_SPEED_KMH)
    } else if distance >= HYPERSONIC_THRESHOLD {
        (SpeedTier::Hypersonic, HYPERSONIC_SPEED_KMH)
    } else if distance > CRUISING_LIMIT {
        (SpeedTier::Regional, regional_speed(distance))
    } else {
        (SpeedTier::Cruising, CRUISING_SPEED_KMH)
    };
    let travel_seconds = (distance.as_kilometers() / speed_kmh * 3600.0).max(MIN_TRAVEL_SECONDS);
    SpeedClass {
        tier,
        speed_kmh,
        travel_seconds,
    }
}

// Linear in distance so the speed meets both neighbouring tiers.
fn regional_speed(distance: Distance) -> f64 {
    let span = HYPERSONIC_THRESHOLD.as_kilometers() - CRUISING_LIMIT.as_kilometers();
    let t = (distance.as_kilometers() - CRUISING_LIMIT.as_kilometers()) / span;
    CRUISING_SPEED_KMH + t * (HYPERSONIC_SPEED_KMH - CRUISING_SPEED_KMH)
}
