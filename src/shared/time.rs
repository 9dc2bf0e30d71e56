use chrono::{DateTime, TimeDelta, Timelike, Utc};

const SECONDS_PER_HOUR: f64 = 60.0 * 60.0;

/// Wall-clock hour of an instant as a decimal, e.g. 23:45:00 is `23.75`.
pub fn hour_of_day(instant: &DateTime<Utc>) -> f64 {
    let seconds = instant.num_seconds_from_midnight() as f64
        + instant.nanosecond() as f64 / 1_000_000_000.0;
    seconds / SECONDS_PER_HOUR
}

/// Converts fractional seconds into a delta rounded to the millisecond.
pub fn seconds_to_delta(seconds: f64) -> TimeDelta {
    TimeDelta::milliseconds((seconds * 1000.0).round() as i64)
}

pub fn hours_to_delta(hours: f64) -> TimeDelta {
    seconds_to_delta(hours * SECONDS_PER_HOUR)
}

/// Parses `HH:MM` or `HH:MM:SS` into a decimal hour.
pub fn from_hms(time: &str) -> Option<f64> {
    let mut split = time.split(':');
    let hours: u32 = split.next()?.trim().parse().ok()?;
    let minutes: u32 = split.next()?.trim().parse().ok()?;
    let seconds: u32 = match split.next() {
        Some(value) => value.trim().parse().ok()?,
        None => 0,
    };
    if split.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }
    Some(hours as f64 + minutes as f64 / 60.0 + seconds as f64 / SECONDS_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn hour_of_day_midnight() {
        let instant = Utc.with_ymd_and_hms(2024, 12, 24, 0, 0, 0).unwrap();
        assert_eq!(hour_of_day(&instant), 0.0);
    }

    #[test]
    fn hour_of_day_fraction() {
        let instant = Utc.with_ymd_and_hms(2024, 12, 24, 23, 45, 0).unwrap();
        assert_eq!(hour_of_day(&instant), 23.75);
    }

    #[test]
    fn seconds_round_to_millis() {
        assert_eq!(seconds_to_delta(600.4526).num_milliseconds(), 600_453);
    }

    #[test]
    fn hours_to_delta_negative() {
        assert_eq!(hours_to_delta(-14.0), TimeDelta::hours(-14));
    }

    #[test]
    fn parse_hm() {
        assert_eq!(from_hms("23:30"), Some(23.5));
    }

    #[test]
    fn parse_hms() {
        assert_eq!(from_hms("00:00:36"), Some(0.01));
    }

    #[test]
    fn parse_invalid() {
        assert!(from_hms("00:0a").is_none());
        assert!(from_hms("00").is_none());
        assert!(from_hms("10:75").is_none());
    }
}
