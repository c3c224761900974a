//! Point-curve evaluation and 256-entry lookup baking.
//!
//! A point curve is a handful of user-placed `(x, y)` control points on the
//! `0..=255` grid. It is evaluated either by piecewise-linear interpolation or
//! by a uniform Catmull-Rom spline through the points.
//!
//! # Algorithm
//! For each segment between P1 and P2, with neighbors P0 and P3 (edge points
//! are reused at the boundaries):
//! ```text
//! q(t) = 0.5 × ((2×P1) + (-P0 + P2)×t + (2×P0 - 5×P1 + 4×P2 - P3)×t² + (-P0 + 3×P1 - 3×P2 + P3)×t³)
//! ```
//! with `t = (x − P1.x) / max(1, P2.x − P1.x)`, i.e. parameterized by x, not
//! by arc length.
//!
//! # Complexity
//! - Evaluate: O(N log N) sort + O(N) segment scan
//! - Bake to lookup: one sort + O(N × 256)

use serde::{Deserialize, Serialize};

use crate::ramp::{ChannelRamp, RAMP_SIZE, normalize, quantize};

/// Segments narrower than this are treated as a single point.
const MIN_SEGMENT_WIDTH: f64 = 1e-3;

/// Upper bound of the curve grid on both axes.
const GRID_MAX: f64 = 255.0;

/// One control point on the `0..=255` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: u8,
    pub y: u8,
}

impl CurvePoint {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    fn xf(self) -> f64 {
        f64::from(self.x)
    }

    fn yf(self) -> f64 {
        f64::from(self.y)
    }
}

/// An ordered list of control points. Caller order is not trusted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointCurve(pub Vec<CurvePoint>);

impl PointCurve {
    /// The two-point diagonal `(0,0) → (255,255)`.
    pub fn identity() -> Self {
        Self(vec![CurvePoint::new(0, 0), CurvePoint::new(255, 255)])
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.0
    }

    /// Fewer than two points: the curve is a no-op.
    pub fn is_degenerate(&self) -> bool {
        self.0.len() < 2
    }

    /// Whether applying this curve can be skipped entirely.
    ///
    /// True for degenerate curves and for the linear diagonal. A two-point
    /// spline through the diagonal eases in and out, so it is not skipped.
    pub fn is_passthrough(&self, smooth: bool) -> bool {
        if self.is_degenerate() {
            return true;
        }
        !smooth && sorted_unique(&self.0) == Self::identity().0
    }

    /// Evaluate at `x` on the `0..=255` grid.
    pub fn evaluate(&self, x: f64, smooth: bool) -> f64 {
        interpolate(&self.0, x, smooth)
    }

    /// Bake into a 256-entry lookup of grid values (`0..=255`).
    pub fn bake(&self, smooth: bool) -> [f64; RAMP_SIZE] {
        let mut lookup = [0.0; RAMP_SIZE];
        if self.is_degenerate() {
            for (i, value) in lookup.iter_mut().enumerate() {
                *value = i as f64;
            }
            return lookup;
        }

        let sorted = sorted_unique(&self.0);
        for (i, value) in lookup.iter_mut().enumerate() {
            *value = evaluate_sorted(&sorted, i as f64, smooth);
        }
        lookup
    }
}

/// Evaluate a point curve at `x`.
///
/// Points are sorted by x internally; of several points sharing an x, the
/// first one in caller order wins. Fewer than 2 points returns `x` unchanged.
pub fn interpolate(points: &[CurvePoint], x: f64, smooth: bool) -> f64 {
    if points.len() < 2 {
        return x;
    }
    evaluate_sorted(&sorted_unique(points), x, smooth)
}

fn sorted_unique(points: &[CurvePoint]) -> Vec<CurvePoint> {
    let mut sorted = points.to_vec();
    // Stable, so `dedup_by_key` keeps the first caller-order point per x.
    sorted.sort_by_key(|p| p.x);
    sorted.dedup_by_key(|p| p.x);
    sorted
}

fn evaluate_sorted(pts: &[CurvePoint], x: f64, smooth: bool) -> f64 {
    match pts {
        [] => x,
        [only] => only.yf(),
        _ if smooth => evaluate_spline(pts, x),
        _ => evaluate_linear(pts, x),
    }
}

/// Index of the segment `[i, i+1]` bracketing `x`, clamped to the end segments.
fn segment_index(pts: &[CurvePoint], x: f64) -> usize {
    let last = pts.len() - 2;
    if x <= pts[0].xf() {
        return 0;
    }
    pts.windows(2)
        .position(|w| x >= w[0].xf() && x <= w[1].xf())
        .unwrap_or(last)
}

fn evaluate_linear(pts: &[CurvePoint], x: f64) -> f64 {
    let i = segment_index(pts, x);
    let (p1, p2) = (pts[i], pts[i + 1]);

    let width = p2.xf() - p1.xf();
    if width.abs() < MIN_SEGMENT_WIDTH {
        return p1.yf();
    }

    // Outside the covered range the end point's y holds.
    let t = ((x - p1.xf()) / width).clamp(0.0, 1.0);
    p1.yf() + (p2.yf() - p1.yf()) * t
}

fn evaluate_spline(pts: &[CurvePoint], x: f64) -> f64 {
    let i = segment_index(pts, x);

    let p1 = pts[i];
    let p2 = pts[i + 1];
    let p0 = if i > 0 { pts[i - 1] } else { p1 };
    let p3 = if i + 2 < pts.len() { pts[i + 2] } else { p2 };

    let t = (x - p1.xf()) / (p2.xf() - p1.xf()).max(1.0);

    catmull_rom(p0.yf(), p1.yf(), p2.yf(), p3.yf(), t).clamp(0.0, GRID_MAX)
}

/// Catmull-Rom cubic interpolation between P1 and P2.
///
/// ```text
/// q(t) = 0.5 × ((2×P1) + (-P0 + P2)×t + (2×P0 - 5×P1 + 4×P2 - P3)×t² + (-P0 + 3×P1 - 3×P2 + P3)×t³)
/// ```
fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Replace every sample of `channel` through a baked curve lookup.
///
/// Each 16-bit sample is mapped to its nearest `0..=255` grid position and
/// replaced by `lookup[pos] / 255`, scaled back to 16 bits.
pub fn apply_lookup(channel: &mut ChannelRamp, lookup: &[f64; RAMP_SIZE]) {
    for sample in channel.iter_mut() {
        let pos = (normalize(*sample) * GRID_MAX).round() as usize;
        *sample = quantize(lookup[pos.min(RAMP_SIZE - 1)] / GRID_MAX);
    }
}
