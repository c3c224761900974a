//! Transfer function (OETF) implementations for the ramp's signal stage.
//!
//! Each implementation uses the published ITU-R constants.
//! The ramp builder encodes with the selected OETF and then layers the
//! channel's artistic gamma on top.

use crate::grading::curves::CurvePoint;
use crate::transform::params::TransferMode;

/// A transfer function that encodes linear light.
///
/// Ramps only ever encode, so there is no inverse.
pub trait TransferFunction: Send + Sync {
    /// Convert from linear light to non-linear (encoded).
    fn to_encoded(&self, linear: f64) -> f64;
}

/// Get the transfer function for a mode, if it has an OETF stage.
///
/// Returns `None` for [`TransferMode::PowerLaw`], where only the gamma
/// exponent applies.
pub fn get_transfer(mode: TransferMode) -> Option<Box<dyn TransferFunction>> {
    match mode {
        TransferMode::PowerLaw => None,
        TransferMode::Bt709 => Some(Box::new(Bt709Transfer)),
        TransferMode::Bt2020 => Some(Box::new(Bt2020Transfer)),
    }
}

// ---------------------------------------------------------------------------
// ITU-R BT.709
// ---------------------------------------------------------------------------

/// BT.709 OETF.
///
/// # Reference
/// ITU-R BT.709-6, item 1.2
///
/// ```text
/// from_linear: L <= 0.018 → 4.5 × L
///              L >  0.018 → 1.099 × L^0.45 − 0.099
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bt709Transfer;

impl Bt709Transfer {
    const BREAK: f64 = 0.018;
    const ALPHA: f64 = 1.099;
    const SLOPE: f64 = 4.5;
    const EXPONENT: f64 = 0.45;
}

impl TransferFunction for Bt709Transfer {
    fn to_encoded(&self, linear: f64) -> f64 {
        if linear <= Self::BREAK {
            Self::SLOPE * linear
        } else {
            Self::ALPHA * linear.powf(Self::EXPONENT) - (Self::ALPHA - 1.0)
        }
    }
}

// ---------------------------------------------------------------------------
// ITU-R BT.2020
// ---------------------------------------------------------------------------

/// BT.2020 OETF with the 10-bit system constants.
///
/// # Reference
/// ITU-R BT.2020-2, table 4 (α ≈ 1.099, β ≈ 0.018)
///
/// ```text
/// from_linear: E <  β → 4.5 × E
///              E >= β → α × E^0.45 − (α − 1)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bt2020Transfer;

impl Bt2020Transfer {
    const ALPHA: f64 = 1.099;
    const BETA: f64 = 0.018;
    const SLOPE: f64 = 4.5;
    const EXPONENT: f64 = 0.45;
}

impl TransferFunction for Bt2020Transfer {
    fn to_encoded(&self, linear: f64) -> f64 {
        if linear < Self::BETA {
            Self::SLOPE * linear
        } else {
            Self::ALPHA * linear.powf(Self::EXPONENT) - (Self::ALPHA - 1.0)
        }
    }
}

/// Steps used when sampling an OETF for preview.
const PREVIEW_STEPS: u32 = 128;

/// Sample the selected OETF over `[0, 1]` as grid points for a curve preview.
///
/// Returns `PREVIEW_STEPS + 1` points; power-law mode yields the diagonal.
pub fn oetf_points(mode: TransferMode) -> Vec<CurvePoint> {
    let transfer = get_transfer(mode);
    (0..=PREVIEW_STEPS)
        .map(|i| {
            let linear = f64::from(i) / f64::from(PREVIEW_STEPS);
            let encoded = transfer
                .as_ref()
                .map_or(linear, |t| t.to_encoded(linear))
                .clamp(0.0, 1.0);
            CurvePoint::new((linear * 255.0) as u8, (encoded * 255.0) as u8)
        })
        .collect()
}
