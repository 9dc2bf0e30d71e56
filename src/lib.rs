pub mod route;
pub mod schedule;
pub mod shared;
pub mod simulation;

pub mod prelude {
    pub use crate::route::{
        CameraZoom, Location, NodeIssue, NodeKind, RouteNode, Schedule, StopExperience, Transit,
        Weather,
        audit::{AuditReport, audit},
    };
    pub use crate::schedule::{
        NodeValidation, Recalculation, ScheduleConfig, SpeedTier, WindowStatus, recalculate,
    };
    pub use crate::shared::geo::{Coordinate, Distance, distance_km};
    pub use crate::simulation::{Snapshot, simulate_at, summarize, timeline};
}
