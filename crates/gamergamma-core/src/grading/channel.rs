//! Per-channel tone pipeline: one `ChannelParams` → one 256-entry ramp.
//!
//! # Stage order
//! ```text
//!   i/255 ──→ Levels ──→ Black Stab ──→ Black Floor ──→ White Stab ──→ White Ceiling ──→ clamp
//!         ──→ OETF + Gamma ──→ Contrast ──→ Mid-Gamma ──→ Brightness ──→ Dither(0.15)
//!         ──→ Luminance ──→ Smart Contrast ──→ De-Haze ──→ Tone Sculpt ──→ clamp
//!         ──→ Dither(0.10) ──→ clamp ──→ round(× 65535)
//! ```
//! The order is fixed: later stages are tuned against the range produced by
//! earlier ones.

use rand::Rng;

use crate::color_management::transfer::{TransferFunction, get_transfer};
use crate::grading::tone;
use crate::ramp::{ChannelRamp, RAMP_SIZE, quantize};
use crate::transform::params::{ChannelParams, TransferMode};

/// Noise scale of the mid-pipeline dither pass.
const DITHER_SCALE_MID: f64 = 0.15;
/// Noise scale of the final dither pass.
const DITHER_SCALE_FINAL: f64 = 0.1;

/// Build one channel's 16-bit ramp.
///
/// Pure in `params` and `mode`; `rng` only feeds the dither stages, so a
/// seeded source gives a reproducible ramp.
pub fn build_channel_ramp<R: Rng + ?Sized>(
    params: &ChannelParams,
    mode: TransferMode,
    rng: &mut R,
) -> ChannelRamp {
    let oetf = get_transfer(mode);
    let mut curve = [0u16; RAMP_SIZE];
    for (i, out) in curve.iter_mut().enumerate() {
        let val = i as f64 / (RAMP_SIZE - 1) as f64;
        *out = quantize(tone_value(val, params, oetf.as_deref(), rng));
    }
    curve
}

/// Run the full tone chain on one normalized input sample.
pub fn tone_value<R: Rng + ?Sized>(
    input: f64,
    p: &ChannelParams,
    oetf: Option<&dyn TransferFunction>,
    rng: &mut R,
) -> f64 {
    let mut val = tone::remap_levels(input, p.black_level, p.white_level);
    val = tone::black_stabilizer(val, p.black_stab);
    val = tone::black_floor(val, p.black_floor);
    val = tone::white_stabilizer(val, p.white_stab);
    val = tone::white_ceiling(val, p.white_ceiling);
    val = val.clamp(0.0, 1.0);

    val = tone::transfer(val, p.gamma, oetf);
    val = tone::contrast(val, p.contrast);
    val = tone::mid_gamma(val, p.mid_gamma);
    val = tone::brightness(val, p.brightness);
    val = tone::dither(val, p.dithering, DITHER_SCALE_MID, rng);

    val = tone::luminance_gain(val, p.luminance);
    val = tone::smart_contrast(val, p.smart_contrast);
    val = tone::de_haze(val, p.de_haze);
    val = tone::tone_sculpt(val, p.tone_sculpt);
    val = val.clamp(0.0, 1.0);

    val = tone::dither(val, p.dithering, DITHER_SCALE_FINAL, rng);
    val.clamp(0.0, 1.0)
}
