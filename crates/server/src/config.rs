use sleighline::{schedule::ScheduleConfig, shared::time};
use std::env;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

pub struct Config {
    pub port: u16,
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Reads `PORT`, `TARGET_YEAR` and `FIRST_ARRIVAL_LOCAL_HOUR`.
    pub fn from_env() -> Result<Self, self::Error> {
        let port = match env::var("PORT") {
            Ok(value) => value.parse().map_err(|_| invalid("PORT", value))?,
            Err(_) => DEFAULT_PORT,
        };

        let mut schedule = ScheduleConfig::default();
        if let Ok(value) = env::var("TARGET_YEAR") {
            schedule.target_year = value
                .parse()
                .map_err(|_| invalid("TARGET_YEAR", value.clone()))?;
            schedule
                .target_date()
                .map_err(|_| invalid("TARGET_YEAR", value))?;
        }
        if let Ok(value) = env::var("FIRST_ARRIVAL_LOCAL_HOUR") {
            let hour = parse_hour(&value)
                .ok_or_else(|| invalid("FIRST_ARRIVAL_LOCAL_HOUR", value.clone()))?;
            schedule = schedule.first_arrival_at(hour);
            schedule
                .first_arrival_hour()
                .map_err(|_| invalid("FIRST_ARRIVAL_LOCAL_HOUR", value))?;
        }

        Ok(Self { port, schedule })
    }
}

/// Accepts a decimal hour (`23.5`) or a clock time (`23:30`).
fn parse_hour(value: &str) -> Option<f64> {
    if value.contains(':') {
        time::from_hms(value)
    } else {
        value.trim().parse().ok()
    }
}

fn invalid(name: &'static str, value: String) -> Error {
    Error::InvalidValue { name, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_formats() {
        assert_eq!(parse_hour("23.5"), Some(23.5));
        assert_eq!(parse_hour("23:30"), Some(23.5));
        assert_eq!(parse_hour("late"), None);
    }
}
