//! Ramp grading stages: the per-channel tone chain, point curves and the
//! cross-channel global grade.

pub mod channel;
pub mod curves;
pub mod effects;
pub mod global;
pub mod tone;
