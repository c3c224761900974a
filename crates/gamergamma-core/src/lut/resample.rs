//! Linear resampling of an arbitrary-length 1D LUT onto the ramp grid.

use crate::lut::{LutError, LutResult};
use crate::ramp::RAMP_SIZE;

/// Resample `src` to exactly [`RAMP_SIZE`] entries.
///
/// Output entry `i` reads source position `(N − 1) × i / 255` and linearly
/// interpolates between its floor and the next sample, holding the final
/// source sample once the position reaches the end. The first and last
/// outputs equal the first and last source samples.
pub fn resample(src: &[f64]) -> LutResult<[f64; RAMP_SIZE]> {
    if src.len() < 2 {
        return Err(LutError::TooFewSamples(src.len()));
    }

    let last = src.len() - 1;
    let mut out = [0.0; RAMP_SIZE];
    for (i, value) in out.iter_mut().enumerate() {
        let pos = last as f64 * (i as f64 / (RAMP_SIZE - 1) as f64);
        let idx = pos.floor() as usize;
        *value = if idx >= last {
            src[last]
        } else {
            let t = pos - idx as f64;
            src[idx] * (1.0 - t) + src[idx + 1] * t
        };
    }
    Ok(out)
}
