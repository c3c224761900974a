//! GamerGamma Core: gamma-ramp computation for display color correction.
//!
//! Turns a settings aggregate (three channel parameter sets plus global
//! grading) into three 256-entry, 16-bit lookup tables ready for a display
//! driver. Contains the tone pipeline, point-curve interpolation, the global
//! grade and 1D LUT ingestion. No windowing or driver dependencies.

pub mod color_management;
pub mod config;
pub mod grading;
pub mod lut;
pub mod ramp;
pub mod service;
pub mod transform;

// Re-exports for convenience.
pub use config::EngineConfig;
pub use lut::{LutCache, LutTable};
pub use ramp::{ChannelRamp, GammaRamp};
pub use service::{GammaService, RampSink, RecordingSink, SinkError};
pub use transform::evaluate::compute_ramp;
pub use transform::params::{ChannelParams, GlobalParams, MonoMode, Settings, TransferMode};
pub use transform::profile::{ProfileError, ProfileRecord, migrate};
