//! End-to-end properties of the ramp pipeline.
//!
//! Run with: `cargo test -p gamergamma-core --test ramp_properties`

use gamergamma_core::grading::channel::{build_channel_ramp, tone_value};
use gamergamma_core::grading::curves::{CurvePoint, interpolate};
use gamergamma_core::grading::global::{GlobalGrade, apply_global_grade};
use gamergamma_core::transform::params::LinkedField;
use gamergamma_core::transform::ranges::{self, ParamRange};
use gamergamma_core::{ChannelParams, GammaRamp, MonoMode, Settings, TransferMode, compute_ramp};
use glam::DVec3;
use palette::Srgb;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

fn compute(settings: &Settings) -> GammaRamp {
    compute_ramp(settings, None, &mut rng())
}

#[test]
fn test_neutral_settings_are_identity() {
    let ramp = compute(&Settings::default());
    for channel in ramp.channels() {
        assert_eq!(channel[0], 0);
        assert_eq!(channel[255], 65535);
        assert!(channel.windows(2).all(|w| w[0] <= w[1]));
    }
}

type Setter = fn(&mut ChannelParams, f64);
type Field = (&'static str, ParamRange, Setter);

fn field(name: &'static str, range: ParamRange, set: Setter) -> Field {
    (name, range, set)
}

fn channel_fields() -> Vec<Field> {
    vec![
        field("gamma", ranges::GAMMA, |c, v| c.gamma = v),
        field("brightness", ranges::BRIGHTNESS, |c, v| c.brightness = v),
        field("contrast", ranges::CONTRAST, |c, v| c.contrast = v),
        field("black_level", ranges::BLACK_LEVEL, |c, v| c.black_level = v),
        field("white_level", ranges::WHITE_LEVEL, |c, v| c.white_level = v),
        field("black_floor", ranges::BLACK_FLOOR, |c, v| c.black_floor = v),
        field("white_ceiling", ranges::WHITE_CEILING, |c, v| c.white_ceiling = v),
        field("black_stab", ranges::BLACK_STAB, |c, v| c.black_stab = v),
        field("white_stab", ranges::WHITE_STAB, |c, v| c.white_stab = v),
        field("mid_gamma", ranges::MID_GAMMA, |c, v| c.mid_gamma = v),
        field("luminance", ranges::LUMINANCE, |c, v| c.luminance = v),
        field("de_haze", ranges::DE_HAZE, |c, v| c.de_haze = v),
        field("smart_contrast", ranges::SMART_CONTRAST, |c, v| c.smart_contrast = v),
        field("tone_sculpt", ranges::TONE_SCULPT, |c, v| c.tone_sculpt = v),
        field("dithering", ranges::DITHERING, |c, v| c.dithering = v),
    ]
}

#[test]
fn test_tone_chain_stays_finite_and_clamped_across_ranges() {
    let modes = [TransferMode::PowerLaw, TransferMode::Bt709, TransferMode::Bt2020];
    let mut rng = rng();

    for (name, range, set) in channel_fields() {
        for value in range.sweep(8) {
            let mut params = ChannelParams::default();
            set(&mut params, value);
            for mode in modes {
                let oetf = gamergamma_core::color_management::transfer::get_transfer(mode);
                for i in 0..=255 {
                    let out = tone_value(i as f64 / 255.0, &params, oetf.as_deref(), &mut rng);
                    assert!(
                        out.is_finite() && (0.0..=1.0).contains(&out),
                        "{name}={value} {mode:?} i={i} -> {out}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_all_extremes_at_once_still_produce_a_ramp() {
    for pick_max in [false, true] {
        let mut params = ChannelParams::default();
        for (_, range, set) in channel_fields() {
            set(&mut params, if pick_max { range.max } else { range.min });
        }
        // Out-of-range values are not validated either.
        params.gamma = 0.0;
        let ramp = build_channel_ramp(&params, TransferMode::Bt709, &mut rng());
        assert_eq!(ramp.len(), 256);

        let mut settings = Settings {
            red: params.clone(),
            green: params.clone(),
            blue: params,
            ..Default::default()
        };
        settings.global.saturation = ranges::SATURATION.max;
        settings.global.hue = 200.0;
        settings.global.temperature = ranges::TEMPERATURE.min;
        settings.global.tint = ranges::TINT.max;
        settings.global.shadow_tint = Srgb::new(255, 0, 128);
        settings.global.highlight_tint = Srgb::new(0, 0, 0);
        settings.set_linked(LinkedField::Inversion, 0.5);
        settings.set_linked(LinkedField::Clipping, ranges::CLIPPING.min);
        settings.set_linked(LinkedField::Solarization, 1.0);
        settings.set_mono_mode(MonoMode::Magenta);
        settings.set_linked(LinkedField::MonoStrength, 1.0);
        settings.global.smooth = true;

        let grade = GlobalGrade::new(&settings, None);
        for i in 0..=20 {
            // Include inputs outside [0, 1], as produced by the gains.
            let v = -0.5 + f64::from(i) * 0.1;
            let out = grade.grade(DVec3::new(v, 1.0 - v, v * v));
            assert!(out.is_finite(), "pick_max={pick_max} v={v} -> {out}");
        }

        assert_eq!(compute(&settings), compute(&settings));
        let identity = GammaRamp::identity();
        assert_eq!(
            apply_global_grade(&identity, &settings, None),
            apply_global_grade(&identity, &settings, None)
        );
    }
}

#[test]
fn test_two_point_diagonal_is_exact_identity() {
    let diagonal = [CurvePoint::new(0, 0), CurvePoint::new(255, 255)];
    for x in 0..=255 {
        assert_eq!(interpolate(&diagonal, f64::from(x), false), f64::from(x));
    }
}

#[test]
fn test_degenerate_curves_pass_query_through() {
    let one = [CurvePoint::new(30, 200)];
    for x in [0.0, 17.5, 128.0, 255.0, 400.0] {
        assert_eq!(interpolate(&[], x, false), x);
        assert_eq!(interpolate(&one, x, true), x);
    }
}

#[test]
fn test_gamma_22_scenario() {
    let mut settings = Settings::default();
    for channel in settings.channels_mut() {
        channel.gamma = 2.2;
    }
    let ramp = compute(&settings);
    let expected = 65535.0 * (128.0_f64 / 255.0).powf(1.0 / 2.2);
    for channel in ramp.channels() {
        assert!((f64::from(channel[128]) - expected).abs() <= 1.0);
    }
}

#[test]
fn test_black_floor_scenario() {
    let mut settings = Settings::default();
    settings.red.black_floor = 0.5;
    let ramp = compute(&settings);
    let floor = ramp.red[0];
    assert_eq!(floor, (0.25_f64 * 65535.0).round() as u16);
    for i in 0..=63 {
        assert_eq!(ramp.red[i], floor, "i={i}");
    }
    assert!(ramp.red.iter().all(|v| *v >= floor));
    assert!(ramp.red[64] > floor);
}

#[test]
fn test_clipping_deadzone_scenario() {
    let mut settings = Settings::default();
    settings.set_linked(LinkedField::Clipping, -0.3);
    let ramp = compute(&settings);
    let mid = (0.5_f64 * 65535.0).round() as u16;
    // i = 153 sits at 0.6.
    assert_eq!(ramp.green[153], mid);
    // Everything within 0.3 of mid-gray collapses onto it.
    for i in 52..=203 {
        assert_eq!(ramp.green[i], mid, "i={i}");
    }
    assert_eq!(ramp.green[0], (0.3_f64 * 65535.0).round() as u16);
}
