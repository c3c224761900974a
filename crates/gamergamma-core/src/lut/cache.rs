//! Selection-keyed cache of the resampled LUT table.

use std::path::Path;

use crate::lut::{LutTable, load};

/// Holds the table for the currently selected LUT name.
///
/// The table is built once per selection and reused until the name changes.
/// A failed load is cached too, so a broken file is not re-read on every
/// ramp build; selecting another name (or the same name again after
/// [`LutCache::invalidate`]) retries.
#[derive(Debug, Default)]
pub struct LutCache {
    key: Option<String>,
    table: Option<LutTable>,
}

impl LutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for `name` inside `dir`, loading it on a selection change.
    ///
    /// An empty name means no LUT and clears the cache.
    pub fn resolve(&mut self, name: &str, dir: &Path) -> Option<&LutTable> {
        if name.is_empty() {
            self.invalidate();
            return None;
        }

        if self.key.as_deref() != Some(name) {
            let path = dir.join(name);
            self.table = load(&path);
            if self.table.is_some() {
                tracing::info!("loaded LUT {}", path.display());
            }
            self.key = Some(name.to_owned());
        }
        self.table.as_ref()
    }

    /// Drop the cached table; the next `resolve` reloads.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.table = None;
    }

    /// Name the cache currently holds a load result for.
    pub fn cached_name(&self) -> Option<&str> {
        self.key.as_deref()
    }
}
