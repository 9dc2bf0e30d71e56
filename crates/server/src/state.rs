use sleighline::schedule::ScheduleConfig;

pub struct AppState {
    pub schedule: ScheduleConfig,
}

impl AppState {
    pub fn new(schedule: ScheduleConfig) -> Self {
        Self { schedule }
    }
}
