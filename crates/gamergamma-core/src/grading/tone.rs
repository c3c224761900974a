//! Slider-based tone stages of the per-channel ramp.
//!
//! Every stage maps one normalized sample to another. Stages whose amount is
//! within [`ACTIVE_EPSILON`] of neutral return their input unchanged.
//! Exponents are floored at [`MIN_EXPONENT`] and power bases at zero, so no
//! stage produces NaN or infinity from finite input.

use std::f64::consts::TAU;

use rand::Rng;

use crate::color_management::transfer::TransferFunction;

/// Amounts with a smaller magnitude are treated as neutral.
pub const ACTIVE_EPSILON: f64 = 1e-3;

/// Floor applied to every gamma-like exponent before it is used.
pub const MIN_EXPONENT: f64 = 0.1;

/// Mid-gamma is only applied above this magnitude.
const MID_GAMMA_EPSILON: f64 = 0.01;

fn is_active(amount: f64) -> bool {
    amount.abs() > ACTIVE_EPSILON
}

/// `base^exponent` with the base clamped to zero.
fn pow0(base: f64, exponent: f64) -> f64 {
    base.max(0.0).powf(exponent)
}

/// Dynamic range remap.
///
/// ```text
/// out = black + in × (white − black)
/// ```
pub fn remap_levels(val: f64, black: f64, white: f64) -> f64 {
    black + val * (white - black)
}

/// Black stabilizer: positive lifts shadows, negative crushes them.
///
/// ```text
/// stab > 0 → in ^ max(0.1, 1 − stab × 0.6)
/// stab < 0 → in ^ (1 + |stab| × 2.5)
/// ```
pub fn black_stabilizer(val: f64, stab: f64) -> f64 {
    if !is_active(stab) {
        return val;
    }
    if stab > 0.0 {
        pow0(val, (1.0 - stab * 0.6).max(MIN_EXPONENT))
    } else {
        pow0(val, 1.0 + stab.abs() * 2.5)
    }
}

/// Black floor: positive is a hard floor at `floor × 0.5`, negative subtracts
/// `|floor| × 0.2` and clamps at zero.
pub fn black_floor(val: f64, floor: f64) -> f64 {
    if !is_active(floor) {
        return val;
    }
    if floor > 0.0 {
        val.max(floor * 0.5)
    } else {
        (val - floor.abs() * 0.2).max(0.0)
    }
}

/// White stabilizer: the black stabilizer mirrored around the top.
///
/// ```text
/// out = 1 − (1 − in) ^ max(0.1, 1 − stab × 0.4)
/// ```
pub fn white_stabilizer(val: f64, stab: f64) -> f64 {
    if !is_active(stab) {
        return val;
    }
    1.0 - pow0(1.0 - val, (1.0 - stab * 0.4).max(MIN_EXPONENT))
}

/// White ceiling: positive is a hard ceiling at `1 − ceiling × 0.5`, negative
/// adds `|ceiling| × 0.2` and clamps at one.
pub fn white_ceiling(val: f64, ceiling: f64) -> f64 {
    if !is_active(ceiling) {
        return val;
    }
    if ceiling > 0.0 {
        val.min(1.0 - ceiling * 0.5)
    } else {
        (val + ceiling.abs() * 0.2).min(1.0)
    }
}

/// Signal stage: optional OETF, then the gamma exponent on top.
///
/// ```text
/// out = oetf(in) ^ (1 / max(0.1, gamma))
/// ```
pub fn transfer(val: f64, gamma: f64, oetf: Option<&dyn TransferFunction>) -> f64 {
    let encoded = oetf.map_or(val, |t| t.to_encoded(val));
    pow0(encoded, 1.0 / gamma.max(MIN_EXPONENT))
}

/// Contrast around a fixed 0.5 pivot.
pub fn contrast(val: f64, contrast: f64) -> f64 {
    0.5 + (val - 0.5) * contrast
}

/// Secondary gamma around the transfer output. 0.0 = neutral.
pub fn mid_gamma(val: f64, mid_gamma: f64) -> f64 {
    if mid_gamma.abs() <= MID_GAMMA_EPSILON {
        return val;
    }
    pow0(val, 1.0 / (1.0 + mid_gamma).max(MIN_EXPONENT))
}

/// Additive offset. 1.0 = neutral.
pub fn brightness(val: f64, brightness: f64) -> f64 {
    val + (brightness - 1.0)
}

/// Uniform noise of width `amount × scale`, centered on zero.
pub fn dither<R: Rng + ?Sized>(val: f64, amount: f64, scale: f64, rng: &mut R) -> f64 {
    if amount <= 0.0 {
        return val;
    }
    val + (rng.gen_range(0.0..1.0) - 0.5) * amount * scale
}

/// Post gain. 0.0 = neutral.
pub fn luminance_gain(val: f64, luminance: f64) -> f64 {
    if !is_active(luminance) {
        return val;
    }
    val * (1.0 + luminance)
}

/// Smart contrast: lift, mid-tone gamma and spread in one signed control.
///
/// ```text
/// h > 0: in ^ (1 − h×0.3) → ^ 1/(1 + h×0.4) → 0.5 + (x − 0.5)(1 + h×0.3)
/// h < 0: in ^ (1 + |h|×0.3) → ^ 1/max(0.1, 1 − |h|×0.4) → 0.5 + (x − 0.5)/(1 + |h|×0.3)
/// ```
pub fn smart_contrast(val: f64, amount: f64) -> f64 {
    if !is_active(amount) {
        return val;
    }
    if amount > 0.0 {
        let lifted = pow0(val, (1.0 - amount * 0.3).max(MIN_EXPONENT));
        let boosted = pow0(lifted, 1.0 / (1.0 + amount * 0.4));
        0.5 + (boosted - 0.5) * (1.0 + amount * 0.3)
    } else {
        let h = amount.abs();
        let crushed = pow0(val, 1.0 + h * 0.3);
        let reduced = pow0(crushed, 1.0 / (1.0 - h * 0.4).max(MIN_EXPONENT));
        0.5 + (reduced - 0.5) / (1.0 + h * 0.3)
    }
}

/// De-haze: positive is a logistic S-curve renormalized so that 0 and 1 are
/// fixed points; negative flattens toward 0.5.
///
/// ```text
/// amount > 0: s(x) = 1 / (1 + e^(−k(x − 0.5))), k = 5 × amount
///             out  = (s(in) − s(0)) / (s(1) − s(0))
/// amount < 0: out  = 0.5 + (in − 0.5) / (1 + |amount|)
/// ```
pub fn de_haze(val: f64, amount: f64) -> f64 {
    if !is_active(amount) {
        return val;
    }
    if amount > 0.0 {
        let k = 5.0 * amount;
        let logistic = |x: f64| 1.0 / (1.0 + (-k * (x - 0.5)).exp());
        let lo = logistic(0.0);
        let hi = logistic(1.0);
        (logistic(val) - lo) / (hi - lo)
    } else {
        0.5 + (val - 0.5) / (1.0 + amount.abs())
    }
}

/// Tone sculpt: a sine offset that vanishes at mid-gray and grows toward the
/// ends.
///
/// ```text
/// out = in + sin(2π × in) × amount × 0.08 × |2×in − 1|²
/// ```
pub fn tone_sculpt(val: f64, amount: f64) -> f64 {
    if !is_active(amount) {
        return val;
    }
    let weight = (2.0 * val - 1.0).abs().powi(2);
    val + (val * TAU).sin() * (amount * 0.08) * weight
}
