//! Global grade: point curves plus the cross-channel grading pass.
//!
//! Point curves always run (per-channel curve, then master). The numeric
//! pass only runs when some global parameter is away from neutral; for each
//! of the 256 ramp indices:
//!
//! ```text
//!   rgb ──→ ×Gains ──→ Mono ──→ LUT blend ──→ Invert ──→ Clip
//!       ──→ Solarize ──→ Split tone ──→ clamp ──→ 16-bit
//! ```
//!
//! Saturation has no stage of its own. A non-neutral value only opens the
//! pass; the color shift comes from the gains.

use std::f64::consts::TAU;

use glam::DVec3;
use palette::Srgb;

use crate::grading::curves::apply_lookup;
use crate::grading::effects;
use crate::grading::tone::ACTIVE_EPSILON;
use crate::lut::LutTable;
use crate::ramp::{GammaRamp, RAMP_SIZE, normalize, quantize};
use crate::transform::params::{ChannelParams, GlobalParams, MonoMode, Settings};

/// Gain swing of the fake hue rotation and of temperature/tint at full scale.
const GAIN_SCALE: f64 = 0.2;

/// Amber keeps most of its green.
const AMBER_GREEN_FACTOR: f64 = 0.2;

/// Apply the per-channel curves, then the master curve to every channel.
///
/// Each curve is baked to a 256-entry lookup once per call. Degenerate curves
/// and the linear diagonal are skipped.
pub fn apply_point_curves(ramp: &mut GammaRamp, globals: &GlobalParams) {
    let smooth = globals.smooth;
    let per_channel = [&globals.curve_red, &globals.curve_green, &globals.curve_blue];

    for (channel, curve) in ramp.channels_mut().into_iter().zip(per_channel) {
        if !curve.is_passthrough(smooth) {
            apply_lookup(channel, &curve.bake(smooth));
        }
    }

    if !globals.curve_master.is_passthrough(smooth) {
        let master = globals.curve_master.bake(smooth);
        for channel in ramp.channels_mut() {
            apply_lookup(channel, &master);
        }
    }
}

/// Whether any parameter of the numeric grading pass is away from neutral.
pub fn needs_global_grade(settings: &Settings) -> bool {
    let g = &settings.global;
    let globals_active = (g.saturation - 1.0).abs() > ACTIVE_EPSILON
        || g.hue.abs() > ACTIVE_EPSILON
        || g.temperature.abs() > ACTIVE_EPSILON
        || g.tint.abs() > ACTIVE_EPSILON
        || g.shadow_tint != GlobalParams::neutral_shadow_tint()
        || g.highlight_tint != GlobalParams::neutral_highlight_tint()
        || g.has_lut();

    let (mono_mode, mono_strength) = settings.mono();
    let mono_active = mono_mode != MonoMode::None && mono_strength > ACTIVE_EPSILON;

    globals_active
        || mono_active
        || settings.channels().iter().any(|c| {
            c.inversion > ACTIVE_EPSILON
                || c.clipping.abs() > ACTIVE_EPSILON
                || c.solarization > ACTIVE_EPSILON
        })
}

/// Per-channel gains from fake hue rotation, temperature and tint.
///
/// Hue drives three sines 120° apart:
/// ```text
/// gain_c = 1 + sin(hue + c × 120°) × 0.2
/// ```
/// then temperature adds to red and subtracts from blue, tint adds to green.
pub fn channel_gains(globals: &GlobalParams) -> DVec3 {
    let mut gains = DVec3::ONE;

    if globals.hue.abs() > ACTIVE_EPSILON {
        let rad = globals.hue.to_radians();
        gains += DVec3::new(
            rad.sin(),
            (rad + TAU / 3.0).sin(),
            (rad + 2.0 * TAU / 3.0).sin(),
        ) * GAIN_SCALE;
    }

    if globals.temperature.abs() > ACTIVE_EPSILON {
        gains.x += globals.temperature * GAIN_SCALE;
        gains.z -= globals.temperature * GAIN_SCALE;
    }

    if globals.tint.abs() > ACTIVE_EPSILON {
        gains.y += globals.tint * GAIN_SCALE;
    }

    gains
}

/// Channel multipliers of a mono preset at `strength`.
pub fn mono_multipliers(mode: MonoMode, strength: f64) -> DVec3 {
    let keep = 1.0;
    let cut = 1.0 - strength;
    match mode {
        MonoMode::None => DVec3::ONE,
        MonoMode::Red => DVec3::new(keep, cut, cut),
        MonoMode::Green => DVec3::new(cut, keep, cut),
        MonoMode::Blue => DVec3::new(cut, cut, keep),
        MonoMode::Amber => DVec3::new(keep, 1.0 - strength * AMBER_GREEN_FACTOR, cut),
        MonoMode::Cyan => DVec3::new(cut, keep, keep),
        MonoMode::Magenta => DVec3::new(keep, cut, keep),
        MonoMode::Yellow => DVec3::new(keep, keep, cut),
    }
}

/// `in × (1 − strength) + lut(in) × strength`, per channel.
pub fn blend_lut(rgb: DVec3, table: &LutTable, strength: f64) -> DVec3 {
    rgb * (1.0 - strength) + table.sample(rgb) * strength
}

/// Per-sample global grade, resolved once from the settings.
pub struct GlobalGrade<'a> {
    gains: DVec3,
    mono: Option<DVec3>,
    lut: Option<(&'a LutTable, f64)>,
    channels: [&'a ChannelParams; 3],
    shadow: Option<Srgb<u8>>,
    highlight: Option<Srgb<u8>>,
}

impl<'a> GlobalGrade<'a> {
    /// `lut` is the resampled table for `settings.global.selected_lut`, or
    /// `None` when no LUT is selected or it failed to load; the blend is then
    /// skipped.
    pub fn new(settings: &'a Settings, lut: Option<&'a LutTable>) -> Self {
        let g = &settings.global;
        let (mono_mode, mono_strength) = settings.mono();
        let mono = (mono_mode != MonoMode::None && mono_strength > ACTIVE_EPSILON)
            .then(|| mono_multipliers(mono_mode, mono_strength));
        Self {
            gains: channel_gains(g),
            mono,
            lut: lut.map(|table| (table, g.lut_strength)),
            channels: settings.channels(),
            shadow: (g.shadow_tint != GlobalParams::neutral_shadow_tint()).then_some(g.shadow_tint),
            highlight: (g.highlight_tint != GlobalParams::neutral_highlight_tint())
                .then_some(g.highlight_tint),
        }
    }

    /// Grade one normalized RGB sample. The result is not clamped.
    pub fn grade(&self, rgb: DVec3) -> DVec3 {
        let mut rgb = rgb * self.gains;
        if let Some(multipliers) = self.mono {
            rgb *= multipliers;
        }
        if let Some((table, strength)) = self.lut {
            rgb = blend_lut(rgb, table, strength);
        }

        for (c, params) in self.channels.iter().enumerate() {
            let mut v = rgb[c];
            v = effects::invert(v, params.inversion);
            v = effects::clip(v, params.clipping);
            v = effects::solarize(v, params.solarization);
            rgb[c] = v;
        }

        effects::split_tone(rgb, self.shadow, self.highlight)
    }
}

/// Run the numeric grading pass over all 256 indices.
pub fn apply_global_grade(ramp: &GammaRamp, settings: &Settings, lut: Option<&LutTable>) -> GammaRamp {
    let grade = GlobalGrade::new(settings, lut);
    let mut out = ramp.clone();
    for i in 0..RAMP_SIZE {
        let rgb = grade.grade(DVec3::new(
            normalize(ramp.red[i]),
            normalize(ramp.green[i]),
            normalize(ramp.blue[i]),
        ));
        out.red[i] = quantize(rgb.x);
        out.green[i] = quantize(rgb.y);
        out.blue[i] = quantize(rgb.z);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::curves::{CurvePoint, PointCurve};
    use crate::transform::params::LinkedField;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_defaults_need_no_grade() {
        assert!(!needs_global_grade(&Settings::default()));
    }

    #[test]
    fn test_each_trigger_enables_grade() {
        let mut cases: Vec<Settings> = Vec::new();
        let base = Settings::default();

        let mut s = base.clone();
        s.global.saturation = 0.5;
        cases.push(s);
        let mut s = base.clone();
        s.global.hue = 90.0;
        cases.push(s);
        let mut s = base.clone();
        s.global.tint = -0.2;
        cases.push(s);
        let mut s = base.clone();
        s.global.shadow_tint = Srgb::new(10, 0, 0);
        cases.push(s);
        let mut s = base.clone();
        s.global.selected_lut = "film.cube".into();
        cases.push(s);
        let mut s = base.clone();
        s.blue.clipping = -0.2;
        cases.push(s);
        let mut s = base.clone();
        s.green.solarization = 0.3;
        cases.push(s);
        let mut s = base.clone();
        s.set_mono_mode(MonoMode::Cyan);
        s.set_linked(LinkedField::MonoStrength, 0.5);
        cases.push(s);

        for (i, settings) in cases.iter().enumerate() {
            assert!(needs_global_grade(settings), "case {i}");
        }
    }

    #[test]
    fn test_mono_mode_without_strength_is_neutral() {
        let mut s = Settings::default();
        s.set_mono_mode(MonoMode::Red);
        assert!(!needs_global_grade(&s));
    }

    #[test]
    fn test_hue_gains_are_phase_shifted() {
        let globals = GlobalParams {
            hue: 90.0,
            ..Default::default()
        };
        let gains = channel_gains(&globals);
        assert!((gains.x - 1.2).abs() < EPSILON);
        assert!((gains.y - 0.9).abs() < EPSILON);
        assert!((gains.z - 0.9).abs() < EPSILON);
    }

    #[test]
    fn test_temperature_and_tint_gains() {
        let globals = GlobalParams {
            temperature: 0.5,
            tint: -1.0,
            ..Default::default()
        };
        let gains = channel_gains(&globals);
        assert!((gains.x - 1.1).abs() < EPSILON);
        assert!((gains.y - 0.8).abs() < EPSILON);
        assert!((gains.z - 0.9).abs() < EPSILON);
    }

    #[test]
    fn test_saturation_opens_pass_without_changing_samples() {
        let mut ramp = GammaRamp::identity();
        ramp.red[64] = 34961;
        ramp.green[64] = 16448;
        ramp.blue[64] = 2000;

        let mut settings = Settings::default();
        settings.global.saturation = 0.0;
        assert!(needs_global_grade(&settings));
        assert_eq!(apply_global_grade(&ramp, &settings, None), ramp);
    }

    #[test]
    fn test_mono_presets() {
        assert_eq!(mono_multipliers(MonoMode::Red, 1.0), DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(mono_multipliers(MonoMode::Cyan, 0.5), DVec3::new(0.5, 1.0, 1.0));
        let amber = mono_multipliers(MonoMode::Amber, 1.0);
        assert_eq!(amber.x, 1.0);
        assert!((amber.y - 0.8).abs() < EPSILON);
        assert_eq!(amber.z, 0.0);
        assert_eq!(mono_multipliers(MonoMode::None, 1.0), DVec3::ONE);
    }

    #[test]
    fn test_deadzone_clipping_lands_on_midgray() {
        let mut settings = Settings::default();
        settings.set_linked(LinkedField::Clipping, -0.3);
        let mut ramp = GammaRamp::identity();
        ramp.red[0] = quantize(0.6);
        let out = apply_global_grade(&ramp, &settings, None);
        assert_eq!(out.red[0], quantize(0.5));
    }

    #[test]
    fn test_full_inversion_flips_ramp() {
        let mut settings = Settings::default();
        settings.set_linked(LinkedField::Inversion, 1.0);
        let out = apply_global_grade(&GammaRamp::identity(), &settings, None);
        assert_eq!(out.red[0], 65535);
        assert_eq!(out.green[255], 0);
        assert_eq!(out.blue[128], quantize(127.0 / 255.0));
    }

    #[test]
    fn test_lut_blend_at_full_strength_replaces_ramp() {
        let table = LutTable {
            red: [0.25; RAMP_SIZE],
            green: [0.5; RAMP_SIZE],
            blue: [0.75; RAMP_SIZE],
        };
        let mut settings = Settings::default();
        settings.global.selected_lut = "flat.txt".into();
        settings.global.lut_strength = 1.0;
        let out = apply_global_grade(&GammaRamp::identity(), &settings, Some(&table));
        assert!(out.red.iter().all(|v| *v == quantize(0.25)));
        assert!(out.blue.iter().all(|v| *v == quantize(0.75)));
    }

    #[test]
    fn test_missing_lut_table_skips_blend() {
        let mut settings = Settings::default();
        settings.global.selected_lut = "broken.txt".into();
        let ramp = GammaRamp::identity();
        assert_eq!(apply_global_grade(&ramp, &settings, None), ramp);
    }

    #[test]
    fn test_point_curves_apply_channel_then_master() {
        let globals = GlobalParams {
            curve_red: PointCurve(vec![CurvePoint::new(0, 255), CurvePoint::new(255, 0)]),
            curve_master: PointCurve(vec![CurvePoint::new(0, 255), CurvePoint::new(255, 0)]),
            ..Default::default()
        };
        let mut ramp = GammaRamp::identity();
        apply_point_curves(&mut ramp, &globals);
        // Red inverted twice, green and blue once.
        assert_eq!(ramp.red, GammaRamp::identity().red);
        assert_eq!(ramp.green[0], 65535);
        assert_eq!(ramp.blue[255], 0);
    }

    #[test]
    fn test_identity_curves_leave_ramp_untouched() {
        let mut ramp = GammaRamp::identity();
        ramp.red[100] = 12345;
        let before = ramp.clone();
        apply_point_curves(&mut ramp, &GlobalParams::default());
        assert_eq!(ramp, before);
    }
}
