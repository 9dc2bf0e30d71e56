pub mod geo;
pub mod time;

pub use geo::*;
pub use time::*;

/// Anything addressable by a stable id and a display name.
pub trait Identifiable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}
