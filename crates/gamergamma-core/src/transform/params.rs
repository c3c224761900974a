//! Central parameter structs that define the entire gamma ramp.
//!
//! `Settings` is the single source of truth for all ramp adjustments.
//! Every collaborator writes here; the ramp pipeline reads the full struct.

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::grading::curves::PointCurve;
use crate::transform::ranges;

/// Single-hue presets that attenuate the channels outside the chosen family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonoMode {
    #[default]
    None,
    Red,
    Green,
    Blue,
    Amber,
    Cyan,
    Magenta,
    Yellow,
}

impl MonoMode {
    /// Human-readable label for UI menus.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Amber => "Amber",
            Self::Cyan => "Cyan",
            Self::Magenta => "Magenta",
            Self::Yellow => "Yellow",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [MonoMode; 8] = [
            MonoMode::None,
            MonoMode::Red,
            MonoMode::Green,
            MonoMode::Blue,
            MonoMode::Amber,
            MonoMode::Cyan,
            MonoMode::Magenta,
            MonoMode::Yellow,
        ];
        &ALL
    }
}

/// Opto-electronic transfer function applied before the artistic gamma.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferMode {
    /// Plain `x^(1/gamma)`.
    #[default]
    PowerLaw,
    /// ITU-R BT.709 OETF with gamma layered on top.
    Bt709,
    /// ITU-R BT.2020 OETF with gamma layered on top.
    Bt2020,
}

impl TransferMode {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PowerLaw => "Power Law",
            Self::Bt709 => "BT.709",
            Self::Bt2020 => "BT.2020",
        }
    }
}

/// Tone parameters for one of the three display channels.
///
/// Defaults are the neutral values: the channel ramp is the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelParams {
    /// Gamma exponent. 1.0 = neutral, floored at 0.1 before use.
    pub gamma: f64,
    /// Additive offset. 1.0 = neutral.
    pub brightness: f64,
    /// Gain around 0.5. 1.0 = neutral.
    pub contrast: f64,
    /// Lower bound of the dynamic-range remap.
    pub black_level: f64,
    /// Upper bound of the dynamic-range remap.
    pub white_level: f64,
    /// Positive = hard floor, negative = crush.
    pub black_floor: f64,
    /// Positive = hard ceiling, negative = boost.
    pub white_ceiling: f64,
    /// Positive lifts shadows, negative crushes them.
    pub black_stab: f64,
    /// Positive rolls highlights off, negative pushes them.
    pub white_stab: f64,
    /// Secondary gamma offset applied after contrast.
    pub mid_gamma: f64,
    /// Post gain. 0.0 = neutral.
    pub luminance: f64,
    /// Signed S-curve strength.
    pub de_haze: f64,
    /// Signed lift + gamma + spread composite.
    pub smart_contrast: f64,
    /// Signed sinusoidal offset, weighted away from mid-gray.
    pub tone_sculpt: f64,
    /// Random noise amplitude.
    pub dithering: f64,
    pub solarization: f64,
    pub inversion: f64,
    pub clipping: f64,
    pub mono_mode: MonoMode,
    pub mono_strength: f64,
}

impl Default for ChannelParams {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            brightness: 1.0,
            contrast: 1.0,
            black_level: 0.0,
            white_level: 1.0,
            black_floor: 0.0,
            white_ceiling: 0.0,
            black_stab: 0.0,
            white_stab: 0.0,
            mid_gamma: 0.0,
            luminance: 0.0,
            de_haze: 0.0,
            smart_contrast: 0.0,
            tone_sculpt: 0.0,
            dithering: 0.0,
            solarization: 0.0,
            inversion: 0.0,
            clipping: 0.0,
            mono_mode: MonoMode::None,
            mono_strength: 0.0,
        }
    }
}

/// Parameters shared by all three channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalParams {
    /// Saturation. 1.0 = neutral. Away from neutral it only opens the global
    /// grade; samples are shifted by the hue/temperature/tint gains.
    pub saturation: f64,
    /// Fake hue rotation in degrees. 0.0 = neutral.
    pub hue: f64,
    /// Warm (+) / cool (−) gain shift on red and blue.
    pub temperature: f64,
    /// Green gain shift.
    pub tint: f64,
    /// Color blended into dark samples. Black = off.
    pub shadow_tint: Srgb<u8>,
    /// Color blended into bright samples. White = off.
    pub highlight_tint: Srgb<u8>,
    /// File name inside the LUT directory, empty for none.
    pub selected_lut: String,
    /// LUT blend factor in 0..1.
    pub lut_strength: f64,
    pub transfer_mode: TransferMode,
    pub curve_red: PointCurve,
    pub curve_green: PointCurve,
    pub curve_blue: PointCurve,
    /// Applied after the per-channel curve, identically to every channel.
    pub curve_master: PointCurve,
    /// Catmull-Rom spline instead of linear interpolation for all four curves.
    pub smooth: bool,
}

impl GlobalParams {
    /// The shadow tint value that disables shadow toning.
    pub fn neutral_shadow_tint() -> Srgb<u8> {
        Srgb::new(0, 0, 0)
    }

    /// The highlight tint value that disables highlight toning.
    pub fn neutral_highlight_tint() -> Srgb<u8> {
        Srgb::new(255, 255, 255)
    }

    pub fn has_lut(&self) -> bool {
        !self.selected_lut.is_empty()
    }
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            hue: 0.0,
            temperature: 0.0,
            tint: 0.0,
            shadow_tint: Self::neutral_shadow_tint(),
            highlight_tint: Self::neutral_highlight_tint(),
            selected_lut: String::new(),
            lut_strength: 1.0,
            transfer_mode: TransferMode::PowerLaw,
            curve_red: PointCurve::identity(),
            curve_green: PointCurve::identity(),
            curve_blue: PointCurve::identity(),
            curve_master: PointCurve::identity(),
            smooth: false,
        }
    }
}

/// Per-channel fields that linked editing writes to all three channels at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedField {
    Luminance,
    SmartContrast,
    DeHaze,
    ToneSculpt,
    Dithering,
    WhiteLevel,
    Solarization,
    Inversion,
    Clipping,
    MonoStrength,
}

impl LinkedField {
    pub(crate) fn get(self, channel: &ChannelParams) -> f64 {
        match self {
            Self::Luminance => channel.luminance,
            Self::SmartContrast => channel.smart_contrast,
            Self::DeHaze => channel.de_haze,
            Self::ToneSculpt => channel.tone_sculpt,
            Self::Dithering => channel.dithering,
            Self::WhiteLevel => channel.white_level,
            Self::Solarization => channel.solarization,
            Self::Inversion => channel.inversion,
            Self::Clipping => channel.clipping,
            Self::MonoStrength => channel.mono_strength,
        }
    }

    fn slot(self, channel: &mut ChannelParams) -> &mut f64 {
        match self {
            Self::Luminance => &mut channel.luminance,
            Self::SmartContrast => &mut channel.smart_contrast,
            Self::DeHaze => &mut channel.de_haze,
            Self::ToneSculpt => &mut channel.tone_sculpt,
            Self::Dithering => &mut channel.dithering,
            Self::WhiteLevel => &mut channel.white_level,
            Self::Solarization => &mut channel.solarization,
            Self::Inversion => &mut channel.inversion,
            Self::Clipping => &mut channel.clipping,
            Self::MonoStrength => &mut channel.mono_strength,
        }
    }
}

/// The full settings aggregate: three channels plus the global block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub red: ChannelParams,
    pub green: ChannelParams,
    pub blue: ChannelParams,
    pub global: GlobalParams,
}

impl Settings {
    /// Channels in R, G, B order.
    pub fn channels(&self) -> [&ChannelParams; 3] {
        [&self.red, &self.green, &self.blue]
    }

    pub fn channels_mut(&mut self) -> [&mut ChannelParams; 3] {
        [&mut self.red, &mut self.green, &mut self.blue]
    }

    /// Write one per-channel field to all three channels.
    ///
    /// Smart contrast is clamped to its slider range on the way in.
    pub fn set_linked(&mut self, field: LinkedField, value: f64) {
        let value = match field {
            LinkedField::SmartContrast => ranges::SMART_CONTRAST.clamp(value),
            _ => value,
        };
        for channel in self.channels_mut() {
            *field.slot(channel) = value;
        }
    }

    /// Read a linked field. The red channel is the reference.
    pub fn linked(&self, field: LinkedField) -> f64 {
        field.get(&self.red)
    }

    pub fn set_mono_mode(&mut self, mode: MonoMode) {
        for channel in self.channels_mut() {
            channel.mono_mode = mode;
        }
    }

    /// Mono preset and strength used by the global grade.
    ///
    /// Mono is a cross-channel effect, so it is driven by the red channel's
    /// values; linked editing keeps all three in step.
    pub fn mono(&self) -> (MonoMode, f64) {
        (self.red.mono_mode, self.red.mono_strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_linked_writes_every_channel() {
        let mut settings = Settings::default();
        settings.set_linked(LinkedField::DeHaze, 1.5);
        for channel in settings.channels() {
            assert_eq!(channel.de_haze, 1.5);
        }
        assert_eq!(settings.linked(LinkedField::DeHaze), 1.5);
    }

    #[test]
    fn test_smart_contrast_is_clamped_when_linked() {
        let mut settings = Settings::default();
        settings.set_linked(LinkedField::SmartContrast, 3.0);
        assert_eq!(settings.green.smart_contrast, 1.0);
        settings.set_linked(LinkedField::SmartContrast, -7.0);
        assert_eq!(settings.blue.smart_contrast, -1.0);
    }

    #[test]
    fn test_set_mono_mode_links_channels() {
        let mut settings = Settings::default();
        settings.set_mono_mode(MonoMode::Amber);
        settings.set_linked(LinkedField::MonoStrength, 0.4);
        assert_eq!(settings.mono(), (MonoMode::Amber, 0.4));
        assert_eq!(settings.blue.mono_mode, MonoMode::Amber);
    }

    #[test]
    fn test_settings_json_fills_missing_fields_with_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"red":{"gamma":2.2},"global":{"hue":30.0}}"#)
                .expect("partial settings should deserialize");
        assert_eq!(settings.red.gamma, 2.2);
        assert_eq!(settings.red.contrast, 1.0);
        assert_eq!(settings.green, ChannelParams::default());
        assert_eq!(settings.global.hue, 30.0);
        assert_eq!(settings.global.lut_strength, 1.0);
    }

    #[test]
    fn test_default_tints_are_neutral() {
        let globals = GlobalParams::default();
        assert_eq!(globals.shadow_tint, GlobalParams::neutral_shadow_tint());
        assert_eq!(globals.highlight_tint, GlobalParams::neutral_highlight_tint());
        assert!(!globals.has_lut());
    }
}
