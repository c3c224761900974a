//! Ramp evaluation: settings in, three 16-bit channel ramps out.

use rand::Rng;

use crate::grading::channel::build_channel_ramp;
use crate::grading::global::{apply_global_grade, apply_point_curves, needs_global_grade};
use crate::lut::LutTable;
use crate::ramp::GammaRamp;
use crate::transform::params::Settings;

/// The core function.
///
/// Runs the complete pipeline:
/// 1. Per-channel tone chain, each channel with its own parameters and the
///    shared transfer mode
/// 2. Point curves (per-channel, then master)
/// 3. Global grade, when any global parameter is away from neutral
///
/// `lut` is the resampled table for the selected LUT, already resolved by the
/// caller. `rng` feeds dithering only; with dithering at zero the result is a
/// pure function of `settings` and `lut`.
pub fn compute_ramp<R: Rng + ?Sized>(
    settings: &Settings,
    lut: Option<&LutTable>,
    rng: &mut R,
) -> GammaRamp {
    let mode = settings.global.transfer_mode;
    let mut ramp = GammaRamp {
        red: build_channel_ramp(&settings.red, mode, rng),
        green: build_channel_ramp(&settings.green, mode, rng),
        blue: build_channel_ramp(&settings.blue, mode, rng),
    };

    apply_point_curves(&mut ramp, &settings.global);

    if !needs_global_grade(settings) {
        tracing::debug!("global grade neutral, skipping");
        return ramp;
    }
    apply_global_grade(&ramp, settings, lut)
}
