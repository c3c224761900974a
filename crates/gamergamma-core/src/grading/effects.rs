//! Per-channel post effects and split toning for the global grade.

use glam::DVec3;
use palette::Srgb;

use crate::grading::tone::ACTIVE_EPSILON;

/// Rec. 709 luminance weights.
pub const LUMA_REC709: DVec3 = DVec3::new(0.2126, 0.7152, 0.0722);

/// Weight of the shadow tint at luma 0.
const SHADOW_TINT_WEIGHT: f64 = 0.2;
/// Weight of the highlight tint at luma 1.
const HIGHLIGHT_TINT_WEIGHT: f64 = 0.3;

pub fn luma(rgb: DVec3) -> f64 {
    rgb.dot(LUMA_REC709)
}

/// Blend with the photographic negative.
///
/// ```text
/// out = in × (1 − amount) + (1 − in) × amount
/// ```
pub fn invert(val: f64, amount: f64) -> f64 {
    if amount <= ACTIVE_EPSILON {
        return val;
    }
    val * (1.0 - amount) + (1.0 - val) * amount
}

/// Threshold clipping around mid-gray.
///
/// Positive spreads samples away from 0.5 by `clip`; negative pulls them
/// toward 0.5 by `|clip|` without crossing it.
pub fn clip(val: f64, clip: f64) -> f64 {
    if clip.abs() < ACTIVE_EPSILON {
        return val;
    }
    if clip > 0.0 {
        if val > 0.5 {
            (val + clip).min(1.0)
        } else {
            (val - clip).max(0.0)
        }
    } else {
        let c = clip.abs();
        if val > 0.5 {
            (val - c).max(0.5)
        } else {
            (val + c).min(0.5)
        }
    }
}

/// Blend with the folded tent `1 − |2×in − 1|`.
pub fn solarize(val: f64, amount: f64) -> f64 {
    if amount <= ACTIVE_EPSILON {
        return val;
    }
    val * (1.0 - amount) + (1.0 - (2.0 * val - 1.0).abs()) * amount
}

fn tint_vec(color: Srgb<u8>) -> DVec3 {
    DVec3::new(
        f64::from(color.red),
        f64::from(color.green),
        f64::from(color.blue),
    ) / 255.0
}

/// Split toning.
///
/// The shadow tint is added with weight `(1 − luma)² × 0.2`; the highlight
/// tint is mixed in with weight `luma² × 0.3`. A tint equal to its neutral
/// value (`None`) is skipped.
pub fn split_tone(rgb: DVec3, shadow: Option<Srgb<u8>>, highlight: Option<Srgb<u8>>) -> DVec3 {
    if shadow.is_none() && highlight.is_none() {
        return rgb;
    }

    let l = luma(rgb);
    let mut out = rgb;

    if let Some(shadow) = shadow {
        let factor = (1.0 - l) * (1.0 - l) * SHADOW_TINT_WEIGHT;
        out += tint_vec(shadow) * factor;
    }

    if let Some(highlight) = highlight {
        let factor = l * l * HIGHLIGHT_TINT_WEIGHT;
        out = out * (1.0 - factor) + tint_vec(highlight) * factor;
    }

    out
}
