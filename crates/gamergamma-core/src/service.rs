//! Ramp service: the single lock around "mutate settings → rebuild ramp →
//! publish to sink".
//!
//! The display driver call lives behind [`RampSink`]. Two overlapping
//! updates (a UI edit and a hotkey profile switch, say) serialize on the
//! service mutex, so a published ramp always comes from one settings
//! snapshot.

use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::lut::{LutCache, lut_exists};
use crate::ramp::GammaRamp;
use crate::transform::evaluate::compute_ramp;
use crate::transform::params::Settings;
use crate::transform::profile::{ProfileRecord, migrate};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("display rejected gamma ramp: {0}")]
    Rejected(String),
    #[error("display unavailable: {0}")]
    Unavailable(String),
}

/// Receiver of finished ramps, typically a display driver binding.
pub trait RampSink: Send {
    fn push(&mut self, ramp: &GammaRamp) -> Result<(), SinkError>;
}

/// Sink that keeps the last pushed ramp. For tests and headless callers.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub last: Option<GammaRamp>,
    pub pushes: usize,
}

impl RampSink for RecordingSink {
    fn push(&mut self, ramp: &GammaRamp) -> Result<(), SinkError> {
        self.last = Some(ramp.clone());
        self.pushes += 1;
        Ok(())
    }
}

struct ServiceState<S> {
    settings: Settings,
    cache: LutCache,
    sink: S,
}

impl<S> ServiceState<S> {
    fn build(&mut self, config: &EngineConfig) -> GammaRamp {
        let lut = self
            .cache
            .resolve(&self.settings.global.selected_lut, config.lut_dir());
        compute_ramp(&self.settings, lut, &mut rand::thread_rng())
    }
}

impl<S: RampSink> ServiceState<S> {
    fn publish(&mut self, config: &EngineConfig) -> Result<GammaRamp, SinkError> {
        let ramp = self.build(config);
        if let Err(e) = self.sink.push(&ramp) {
            tracing::warn!("ramp sink failed: {e}");
            return Err(e);
        }
        tracing::debug!("published gamma ramp");
        Ok(ramp)
    }
}

/// Owns the settings, the LUT cache and the sink behind one mutex.
pub struct GammaService<S> {
    config: EngineConfig,
    state: Mutex<ServiceState<S>>,
}

impl<S: RampSink> GammaService<S> {
    pub fn new(config: EngineConfig, sink: S) -> Self {
        Self {
            config,
            state: Mutex::new(ServiceState {
                settings: Settings::default(),
                cache: LutCache::new(),
                sink,
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> Settings {
        self.state.lock().settings.clone()
    }

    /// Mutate the settings, rebuild and publish, all under one lock.
    ///
    /// The settings change sticks even if the sink then fails.
    pub fn update<F>(&self, edit: F) -> Result<GammaRamp, SinkError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut state = self.state.lock();
        edit(&mut state.settings);
        state.publish(&self.config)
    }

    /// Restore neutral settings and publish the identity ramp.
    pub fn reset(&self) -> Result<GammaRamp, SinkError> {
        self.update(|settings| *settings = Settings::default())
    }

    /// Migrate a stored profile, apply it and publish.
    ///
    /// A selected LUT that is no longer in the LUT directory is cleared.
    pub fn apply_record(&self, record: &ProfileRecord) -> Result<GammaRamp, SinkError> {
        let mut settings = migrate(record);
        let lut = &settings.global.selected_lut;
        if !lut.is_empty() && !lut_exists(self.config.lut_dir(), lut) {
            tracing::info!("profile LUT {lut} not found, clearing selection");
            settings.global.selected_lut.clear();
        }
        tracing::info!("applying profile");
        self.update(move |current| *current = settings)
    }

    /// Compute the ramp for the current settings without publishing it.
    pub fn current_ramp(&self) -> GammaRamp {
        self.state.lock().build(&self.config)
    }

    /// Run `f` against the sink under the service lock.
    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.lock().sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl RampSink for FailingSink {
        fn push(&mut self, _ramp: &GammaRamp) -> Result<(), SinkError> {
            Err(SinkError::Unavailable("no display".into()))
        }
    }

    fn service() -> GammaService<RecordingSink> {
        GammaService::new(
            EngineConfig::with_lut_dir("/nonexistent/luts"),
            RecordingSink::default(),
        )
    }

    #[test]
    fn test_update_publishes_to_sink() {
        let service = service();
        let ramp = service
            .update(|s| s.red.gamma = 2.2)
            .expect("recording sink accepts");
        service.with_sink(|sink| {
            assert_eq!(sink.pushes, 1);
            assert_eq!(sink.last.as_ref(), Some(&ramp));
        });
        assert_eq!(service.settings().red.gamma, 2.2);
    }

    #[test]
    fn test_reset_publishes_identity() {
        let service = service();
        service.update(|s| s.global.hue = 45.0).expect("publish");
        let ramp = service.reset().expect("publish");
        assert_eq!(ramp, GammaRamp::identity());
        assert_eq!(service.settings(), Settings::default());
    }

    #[test]
    fn test_current_ramp_does_not_publish() {
        let service = service();
        assert_eq!(service.current_ramp(), GammaRamp::identity());
        service.with_sink(|sink| assert_eq!(sink.pushes, 0));
    }

    #[test]
    fn test_sink_error_is_returned_and_settings_kept() {
        let service = GammaService::new(EngineConfig::with_lut_dir("."), FailingSink);
        let result = service.update(|s| s.global.tint = 0.5);
        assert!(matches!(result, Err(SinkError::Unavailable(_))));
        assert_eq!(service.settings().global.tint, 0.5);
    }

    #[test]
    fn test_missing_profile_lut_is_cleared() {
        let service = service();
        let record = ProfileRecord {
            selected_lut: Some("gone.cube".into()),
            ..Default::default()
        };
        service.apply_record(&record).expect("publish");
        assert!(service.settings().global.selected_lut.is_empty());
    }
}
