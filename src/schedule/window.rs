//! Traffic-light classification of a local arrival time against the
//! delivery window.
//!
//! Local hours live on a single axis running from noon to noon of the next
//! day: anything before 12 is shifted by 24, so 01:30 is `25.5`. The window
//! never has to wrap around midnight on that axis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::time::hour_of_day;

/// Earliest acceptable local arrival (22:40:48).
pub const GREEN_START: f64 = 22.68;
/// Latest acceptable local arrival (03:15).
pub const GREEN_END: f64 = 27.25;
pub const YELLOW_START: f64 = 22.5;
pub const YELLOW_END: f64 = 28.0;

const AXIS_START: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowStatus {
    Green,
    Yellow,
    Red,
}

impl WindowStatus {
    pub fn from_local_hour(hour: f64) -> Self {
        if (GREEN_START..=GREEN_END).contains(&hour) {
            WindowStatus::Green
        } else if (YELLOW_START..GREEN_START).contains(&hour)
            || (hour > GREEN_END && hour <= YELLOW_END)
        {
            WindowStatus::Yellow
        } else {
            WindowStatus::Red
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowCheck {
    pub local_arrival_hour: f64,
    pub status: WindowStatus,
}

/// Local decimal hour of an arrival on the noon-to-noon axis.
pub fn local_arrival_hour(arrival: &DateTime<Utc>, utc_offset_hours: f64) -> f64 {
    let hour = hour_of_day(arrival) + utc_offset_hours;
    if hour < AXIS_START { hour + 24.0 } else { hour }
}

pub fn classify(arrival: &DateTime<Utc>, utc_offset_hours: f64) -> WindowCheck {
    let local_arrival_hour = local_arrival_hour(arrival, utc_offset_hours);
    WindowCheck {
        local_arrival_hour,
        status: WindowStatus::from_local_hour(local_arrival_hour),
    }
}
