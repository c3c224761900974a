//! Engine configuration.

use std::path::{Path, PathBuf};

/// Default LUT directory, relative to the working directory.
const DEFAULT_LUT_DIR: &str = "LUTS";

/// Environment variable overriding the LUT directory.
pub const LUT_DIR_ENV: &str = "GAMERGAMMA_LUT_DIR";

/// Runtime configuration for the ramp engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory that `selected_lut` names are resolved against.
    pub lut_dir: PathBuf,
}

impl EngineConfig {
    pub fn with_lut_dir(lut_dir: impl Into<PathBuf>) -> Self {
        Self {
            lut_dir: lut_dir.into(),
        }
    }

    pub fn lut_dir(&self) -> &Path {
        &self.lut_dir
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lut_dir: std::env::var_os(LUT_DIR_ENV)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LUT_DIR)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let config = EngineConfig::with_lut_dir("/tmp/luts");
        assert_eq!(config.lut_dir(), Path::new("/tmp/luts"));
    }

    #[test]
    fn test_default_is_never_empty() {
        assert!(!EngineConfig::default().lut_dir.as_os_str().is_empty());
    }
}
