//! Documented slider ranges for every ramp parameter.
//!
//! The pipeline never validates against these; it only guarantees a finite,
//! clamped ramp for any input. The ranges describe what the settings
//! collaborator is expected to produce.

/// Inclusive range and neutral value of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub neutral: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64, neutral: f64) -> Self {
        Self { min, max, neutral }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// `steps + 1` evenly spaced values from `min` to `max`.
    pub fn sweep(&self, steps: usize) -> impl Iterator<Item = f64> + '_ {
        let steps = steps.max(1);
        (0..=steps).map(move |i| self.min + (self.max - self.min) * i as f64 / steps as f64)
    }
}

// Channel tone
pub const GAMMA: ParamRange = ParamRange::new(0.1, 4.0, 1.0);
pub const BRIGHTNESS: ParamRange = ParamRange::new(0.0, 2.0, 1.0);
pub const CONTRAST: ParamRange = ParamRange::new(0.0, 2.0, 1.0);
pub const BLACK_LEVEL: ParamRange = ParamRange::new(-1.0, 1.0, 0.0);
pub const WHITE_LEVEL: ParamRange = ParamRange::new(0.0, 2.0, 1.0);
pub const BLACK_FLOOR: ParamRange = ParamRange::new(-1.0, 1.0, 0.0);
pub const WHITE_CEILING: ParamRange = ParamRange::new(-1.0, 1.0, 0.0);
pub const BLACK_STAB: ParamRange = ParamRange::new(-2.0, 2.0, 0.0);
pub const WHITE_STAB: ParamRange = ParamRange::new(-2.0, 2.0, 0.0);
pub const MID_GAMMA: ParamRange = ParamRange::new(-1.0, 1.0, 0.0);
pub const LUMINANCE: ParamRange = ParamRange::new(-1.0, 1.0, 0.0);
pub const DE_HAZE: ParamRange = ParamRange::new(-4.0, 4.0, 0.0);
pub const SMART_CONTRAST: ParamRange = ParamRange::new(-1.0, 1.0, 0.0);
pub const TONE_SCULPT: ParamRange = ParamRange::new(-4.0, 4.0, 0.0);
pub const DITHERING: ParamRange = ParamRange::new(0.0, 5.0, 0.0);

// Channel post effects
pub const SOLARIZATION: ParamRange = ParamRange::new(0.0, 1.0, 0.0);
pub const INVERSION: ParamRange = ParamRange::new(0.0, 1.0, 0.0);
pub const CLIPPING: ParamRange = ParamRange::new(-0.5, 0.5, 0.0);
pub const MONO_STRENGTH: ParamRange = ParamRange::new(0.0, 1.0, 0.0);

// Global
pub const SATURATION: ParamRange = ParamRange::new(0.0, 2.0, 1.0);
pub const HUE: ParamRange = ParamRange::new(0.0, 359.0, 0.0);
pub const TEMPERATURE: ParamRange = ParamRange::new(-1.0, 1.0, 0.0);
pub const TINT: ParamRange = ParamRange::new(-1.0, 1.0, 0.0);
pub const LUT_STRENGTH: ParamRange = ParamRange::new(0.0, 0.6, 0.01);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_hits_both_ends() {
        let values: Vec<f64> = DE_HAZE.sweep(8).collect();
        assert_eq!(values.len(), 9);
        assert_eq!(values[0], -4.0);
        assert_eq!(values[8], 4.0);
        assert!(values.contains(&0.0));
    }

    #[test]
    fn test_neutral_values_are_in_range() {
        for range in [GAMMA, BRIGHTNESS, CONTRAST, WHITE_LEVEL, CLIPPING, LUT_STRENGTH] {
            assert!(range.contains(range.neutral));
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(SMART_CONTRAST.clamp(2.0), 1.0);
        assert_eq!(GAMMA.clamp(0.0), 0.1);
        assert_eq!(CLIPPING.clamp(-0.2), -0.2);
    }
}
