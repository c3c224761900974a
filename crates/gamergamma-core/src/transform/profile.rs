//! Persisted profile shape and its one-time migration into [`Settings`].
//!
//! Profiles are stored with PascalCase keys, ARGB integer tints and point
//! curves as `{ "X": .., "Y": .. }` lists. Older profiles kept luminance,
//! smart contrast, de-haze, tone sculpt, dithering, white level and mono
//! settings as single global values; [`migrate`] pushes those into the
//! per-channel fields when the channels are still untouched.

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::grading::curves::{CurvePoint, PointCurve};
use crate::transform::params::{
    ChannelParams, GlobalParams, LinkedField, MonoMode, Settings, TransferMode,
};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// ARGB of opaque black.
pub const ARGB_BLACK: i32 = 0xFF00_0000_u32 as i32;
/// ARGB of opaque white.
pub const ARGB_WHITE: i32 = -1;

/// One stored curve control point. Out-of-range values are clamped on
/// migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointRecord {
    pub x: i32,
    pub y: i32,
}

/// Stored per-channel block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChannelRecord {
    pub gamma: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub black_level: f64,
    pub black_floor: f64,
    pub white_ceiling: f64,
    pub black_stab: f64,
    pub white_stab: f64,
    pub mid_gamma: f64,
    pub luminance: f64,
    pub de_haze: f64,
    pub tone_sculpt: f64,
    pub smart_contrast: f64,
    pub dithering: f64,
    pub white_level: f64,
    pub solarization: f64,
    pub inversion: f64,
    pub clipping: f64,
    pub mono_mode: MonoMode,
    pub mono_strength: f64,
}

impl Default for ChannelRecord {
    fn default() -> Self {
        Self::from(&ChannelParams::default())
    }
}

impl From<&ChannelParams> for ChannelRecord {
    fn from(c: &ChannelParams) -> Self {
        Self {
            gamma: c.gamma,
            brightness: c.brightness,
            contrast: c.contrast,
            black_level: c.black_level,
            black_floor: c.black_floor,
            white_ceiling: c.white_ceiling,
            black_stab: c.black_stab,
            white_stab: c.white_stab,
            mid_gamma: c.mid_gamma,
            luminance: c.luminance,
            de_haze: c.de_haze,
            tone_sculpt: c.tone_sculpt,
            smart_contrast: c.smart_contrast,
            dithering: c.dithering,
            white_level: c.white_level,
            solarization: c.solarization,
            inversion: c.inversion,
            clipping: c.clipping,
            mono_mode: c.mono_mode,
            mono_strength: c.mono_strength,
        }
    }
}

impl From<&ChannelRecord> for ChannelParams {
    fn from(r: &ChannelRecord) -> Self {
        Self {
            gamma: r.gamma,
            brightness: r.brightness,
            contrast: r.contrast,
            black_level: r.black_level,
            white_level: r.white_level,
            black_floor: r.black_floor,
            white_ceiling: r.white_ceiling,
            black_stab: r.black_stab,
            white_stab: r.white_stab,
            mid_gamma: r.mid_gamma,
            luminance: r.luminance,
            de_haze: r.de_haze,
            smart_contrast: r.smart_contrast,
            tone_sculpt: r.tone_sculpt,
            dithering: r.dithering,
            solarization: r.solarization,
            inversion: r.inversion,
            clipping: r.clipping,
            mono_mode: r.mono_mode,
            mono_strength: r.mono_strength,
        }
    }
}

/// A stored profile, current and legacy fields side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProfileRecord {
    pub red: Option<ChannelRecord>,
    pub green: Option<ChannelRecord>,
    pub blue: Option<ChannelRecord>,
    pub saturation: f64,
    pub hue: f64,
    pub temperature: f64,
    pub tint: f64,

    // Legacy global copies of per-channel fields.
    pub luminance: f64,
    pub smart_contrast: f64,
    pub de_haze: f64,
    pub tone_sculpt: f64,
    pub dithering: f64,
    pub white_level: f64,
    pub mono_mode: MonoMode,
    pub mono_strength: f64,

    pub selected_lut: Option<String>,
    pub lut_strength: f64,
    pub shadow_tint: i32,
    pub highlight_tint: i32,
    pub curves_r: Option<Vec<PointRecord>>,
    pub curves_g: Option<Vec<PointRecord>>,
    pub curves_b: Option<Vec<PointRecord>>,
    pub curves_master: Option<Vec<PointRecord>>,
    pub smooth: bool,
    pub transfer_mode: TransferMode,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Settings::default().to_record()
    }
}

impl ProfileRecord {
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Decode an ARGB integer, dropping alpha.
pub fn argb_to_srgb(argb: i32) -> Srgb<u8> {
    let [_, r, g, b] = (argb as u32).to_be_bytes();
    Srgb::new(r, g, b)
}

/// Encode an opaque ARGB integer.
pub fn srgb_to_argb(color: Srgb<u8>) -> i32 {
    u32::from_be_bytes([0xFF, color.red, color.green, color.blue]) as i32
}

fn curve_from_record(points: Option<&Vec<PointRecord>>) -> PointCurve {
    let points = points.map(Vec::as_slice).unwrap_or_default();
    PointCurve(
        points
            .iter()
            .map(|p| CurvePoint::new(p.x.clamp(0, 255) as u8, p.y.clamp(0, 255) as u8))
            .collect(),
    )
}

fn curve_to_record(curve: &PointCurve) -> Vec<PointRecord> {
    curve
        .points()
        .iter()
        .map(|p| PointRecord {
            x: i32::from(p.x),
            y: i32::from(p.y),
        })
        .collect()
}

/// Push a legacy global value into all channels when every channel still
/// holds `neutral` and the legacy value does not.
fn migrate_linked(settings: &mut Settings, field: LinkedField, legacy: f64, neutral: f64) {
    let untouched = settings
        .channels()
        .iter()
        .all(|c| field.get(c) == neutral);
    if untouched && legacy != neutral {
        settings.set_linked(field, legacy);
    }
}

/// Turn a stored profile into settings, applying each legacy rule once.
///
/// Missing channel blocks become neutral channels; null curves become empty
/// curves, which evaluate as identity. LUT existence is not checked
/// here since it depends on the LUT directory.
pub fn migrate(record: &ProfileRecord) -> Settings {
    let channel = |r: &Option<ChannelRecord>| r.as_ref().map(ChannelParams::from).unwrap_or_default();

    let mut settings = Settings {
        red: channel(&record.red),
        green: channel(&record.green),
        blue: channel(&record.blue),
        global: GlobalParams {
            saturation: record.saturation,
            hue: record.hue,
            temperature: record.temperature,
            tint: record.tint,
            shadow_tint: argb_to_srgb(record.shadow_tint),
            highlight_tint: argb_to_srgb(record.highlight_tint),
            selected_lut: record.selected_lut.clone().unwrap_or_default(),
            lut_strength: record.lut_strength,
            transfer_mode: record.transfer_mode,
            curve_red: curve_from_record(record.curves_r.as_ref()),
            curve_green: curve_from_record(record.curves_g.as_ref()),
            curve_blue: curve_from_record(record.curves_b.as_ref()),
            curve_master: curve_from_record(record.curves_master.as_ref()),
            smooth: record.smooth,
        },
    };

    migrate_linked(&mut settings, LinkedField::Luminance, record.luminance, 0.0);
    migrate_linked(&mut settings, LinkedField::SmartContrast, record.smart_contrast, 0.0);
    migrate_linked(&mut settings, LinkedField::DeHaze, record.de_haze, 0.0);
    migrate_linked(&mut settings, LinkedField::ToneSculpt, record.tone_sculpt, 0.0);
    migrate_linked(&mut settings, LinkedField::Dithering, record.dithering, 0.0);
    migrate_linked(&mut settings, LinkedField::WhiteLevel, record.white_level, 1.0);
    if record.mono_mode != MonoMode::None {
        settings.set_mono_mode(record.mono_mode);
    }
    migrate_linked(&mut settings, LinkedField::MonoStrength, record.mono_strength, 0.0);

    settings
}

impl Settings {
    /// Current record shape. Legacy globals mirror the red channel.
    pub fn to_record(&self) -> ProfileRecord {
        let g = &self.global;
        let (mono_mode, mono_strength) = self.mono();
        ProfileRecord {
            red: Some(ChannelRecord::from(&self.red)),
            green: Some(ChannelRecord::from(&self.green)),
            blue: Some(ChannelRecord::from(&self.blue)),
            saturation: g.saturation,
            hue: g.hue,
            temperature: g.temperature,
            tint: g.tint,
            luminance: self.linked(LinkedField::Luminance),
            smart_contrast: self.linked(LinkedField::SmartContrast),
            de_haze: self.linked(LinkedField::DeHaze),
            tone_sculpt: self.linked(LinkedField::ToneSculpt),
            dithering: self.linked(LinkedField::Dithering),
            white_level: self.linked(LinkedField::WhiteLevel),
            mono_mode,
            mono_strength,
            selected_lut: Some(g.selected_lut.clone()),
            lut_strength: g.lut_strength,
            shadow_tint: srgb_to_argb(g.shadow_tint),
            highlight_tint: srgb_to_argb(g.highlight_tint),
            curves_r: Some(curve_to_record(&g.curve_red)),
            curves_g: Some(curve_to_record(&g.curve_green)),
            curves_b: Some(curve_to_record(&g.curve_blue)),
            curves_master: Some(curve_to_record(&g.curve_master)),
            smooth: g.smooth,
            transfer_mode: g.transfer_mode,
        }
    }
}
