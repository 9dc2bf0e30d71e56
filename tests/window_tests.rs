use chrono::{TimeZone, Utc};
use sleighline::schedule::window::{WindowStatus, classify};

#[test]
fn green_boundaries_are_inclusive() {
    assert_eq!(WindowStatus::from_local_hour(22.68), WindowStatus::Green);
    assert_eq!(WindowStatus::from_local_hour(27.25), WindowStatus::Green);
}

#[test]
fn yellow_bands() {
    assert_eq!(WindowStatus::from_local_hour(22.67), WindowStatus::Yellow);
    assert_eq!(WindowStatus::from_local_hour(22.5), WindowStatus::Yellow);
    assert_eq!(WindowStatus::from_local_hour(27.26), WindowStatus::Yellow);
    assert_eq!(WindowStatus::from_local_hour(28.0), WindowStatus::Yellow);
}

#[test]
fn red_outside() {
    assert_eq!(WindowStatus::from_local_hour(22.49), WindowStatus::Red);
    assert_eq!(WindowStatus::from_local_hour(28.01), WindowStatus::Red);
    assert_eq!(WindowStatus::from_local_hour(18.0), WindowStatus::Red);
}

#[test]
fn arrival_uses_local_offset() {
    // 10:00 UTC is midnight in UTC+14.
    let arrival = Utc.with_ymd_and_hms(2024, 12, 23, 10, 0, 0).unwrap();
    let check = classify(&arrival, 14.0);
    assert_eq!(check.local_arrival_hour, 24.0);
    assert_eq!(check.status, WindowStatus::Green);
}

#[test]
fn half_hour_offsets() {
    // 18:00 UTC is 23:30 in India.
    let arrival = Utc.with_ymd_and_hms(2024, 12, 24, 18, 0, 0).unwrap();
    let check = classify(&arrival, 5.5);
    assert_eq!(check.local_arrival_hour, 23.5);
    assert_eq!(check.status, WindowStatus::Green);
}

#[test]
fn morning_arrival_is_red() {
    let arrival = Utc.with_ymd_and_hms(2024, 12, 25, 6, 0, 0).unwrap();
    let check = classify(&arrival, 0.0);
    assert_eq!(check.local_arrival_hour, 30.0);
    assert_eq!(check.status, WindowStatus::Red);
}
