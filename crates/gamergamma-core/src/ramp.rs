//! Gamma ramp representation handed to the display sink.

/// Entries per channel in a hardware gamma ramp.
pub const RAMP_SIZE: usize = 256;

/// Largest 16-bit ramp value.
pub const RAMP_MAX: f64 = 65535.0;

/// One channel of a gamma ramp.
pub type ChannelRamp = [u16; RAMP_SIZE];

/// Three 256-entry, 16-bit lookup tables (R, G, B).
///
/// Every value is already clamped to `0..=65535`; a sink may push the arrays
/// to the display driver verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaRamp {
    pub red: ChannelRamp,
    pub green: ChannelRamp,
    pub blue: ChannelRamp,
}

impl GammaRamp {
    /// Linear ramp `i * 257`, which maps `0..=255` onto `0..=65535`.
    pub fn identity() -> Self {
        let mut channel = [0u16; RAMP_SIZE];
        for (i, value) in channel.iter_mut().enumerate() {
            *value = quantize(i as f64 / 255.0);
        }
        Self {
            red: channel,
            green: channel,
            blue: channel,
        }
    }

    pub fn channels(&self) -> [&ChannelRamp; 3] {
        [&self.red, &self.green, &self.blue]
    }

    pub fn channels_mut(&mut self) -> [&mut ChannelRamp; 3] {
        [&mut self.red, &mut self.green, &mut self.blue]
    }
}

/// Map a normalized value to a 16-bit ramp entry.
///
/// Clamps to `[0, 1]` first; NaN maps to 0.
pub fn quantize(value: f64) -> u16 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * RAMP_MAX).round() as u16
}

/// Map a 16-bit ramp entry back to `[0, 1]`.
pub fn normalize(sample: u16) -> f64 {
    f64::from(sample) / RAMP_MAX
}
