//! Settings, persisted profiles and the ramp pipeline entry point.

pub mod evaluate;
pub mod params;
pub mod profile;
pub mod ranges;
