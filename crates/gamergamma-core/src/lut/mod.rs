//! External 1D LUT ingestion: text and image-strip readers, resampling onto
//! the 256-entry ramp grid, and a selection-keyed cache.

pub mod cache;
pub mod catalog;
mod error;
pub mod resample;
pub mod strip;
pub mod text;

use std::path::Path;

use glam::DVec3;

pub use cache::LutCache;
pub use catalog::{list_luts, lut_exists};
pub use error::{LutError, LutResult};

use crate::ramp::RAMP_SIZE;

/// Raw per-channel samples in file order, before resampling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LutSamples {
    pub red: Vec<f64>,
    pub green: Vec<f64>,
    pub blue: Vec<f64>,
}

impl LutSamples {
    pub fn push(&mut self, rgb: [f64; 3]) {
        self.red.push(rgb[0]);
        self.green.push(rgb[1]);
        self.blue.push(rgb[2]);
    }

    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }
}

/// A 1D LUT resampled to one entry per ramp index, per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct LutTable {
    pub red: [f64; RAMP_SIZE],
    pub green: [f64; RAMP_SIZE],
    pub blue: [f64; RAMP_SIZE],
}

impl LutTable {
    /// Resample raw samples onto the ramp grid.
    pub fn from_samples(samples: &LutSamples) -> LutResult<Self> {
        let (r, g, b) = (samples.red.len(), samples.green.len(), samples.blue.len());
        if r != g || r != b {
            return Err(LutError::ChannelMismatch { r, g, b });
        }
        Ok(Self {
            red: resample::resample(&samples.red)?,
            green: resample::resample(&samples.green)?,
            blue: resample::resample(&samples.blue)?,
        })
    }

    /// Look up each channel at its own quantized position.
    ///
    /// Inputs are clamped to `[0, 1]` and truncated to an index in `0..=255`.
    pub fn sample(&self, rgb: DVec3) -> DVec3 {
        let index = |v: f64| (v * 255.0).clamp(0.0, 255.0) as usize;
        DVec3::new(
            self.red[index(rgb.x)],
            self.green[index(rgb.y)],
            self.blue[index(rgb.z)],
        )
    }
}

/// Load and resample a LUT file, reporting why it failed.
///
/// Image extensions go through the strip reader; everything else is parsed
/// as text.
pub fn try_load(path: &Path) -> LutResult<LutTable> {
    let samples = if strip::is_image_path(path) {
        strip::read_strip(path)?
    } else {
        text::read_text(path)?
    };
    LutTable::from_samples(&samples)
}

/// Load a LUT file, or `None` if it cannot be used.
///
/// Failures are logged and never propagated: a LUT that does not load is
/// equivalent to no LUT being selected.
pub fn load(path: &Path) -> Option<LutTable> {
    match try_load(path) {
        Ok(table) => Some(table),
        Err(e) => {
            tracing::warn!("ignoring LUT {}: {e}", path.display());
            None
        }
    }
}
