//! Process-wide registry of loaded HRTF datasets.

use crate::dataset::Hrtf;
use crate::decode::decode_dataset;
use crate::error::Result;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Owns every loaded dataset and deduplicates loads by source filename.
///
/// Construct one registry when the audio subsystem comes up and keep it for
/// the subsystem's lifetime. All registry operations are serialized behind
/// an internal mutex; the datasets themselves are immutable and handed out
/// as `Arc<Hrtf>`, so interpolation and synthesis never touch the lock.
#[derive(Debug, Default)]
pub struct HrtfRegistry {
    loaded: Mutex<Vec<Arc<Hrtf>>>,
}

impl HrtfRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `data` as a MinPHR dataset and register it under `filename`,
    /// or return the already-loaded dataset with that name without looking
    /// at the bytes again.
    ///
    /// # Errors
    ///
    /// Any decode error from [`decode_dataset`]; a failed load leaves the
    /// registry unchanged, so the caller can move on to the next candidate.
    pub fn load(&self, filename: &str, data: &[u8]) -> Result<Arc<Hrtf>> {
        let mut loaded = self.lock();

        if let Some(existing) = loaded.iter().find(|h| h.filename() == filename) {
            log::debug!("skipping load of already-loaded dataset {filename}");
            return Ok(existing.clone());
        }

        match decode_dataset(filename, data) {
            Ok(hrtf) => {
                log::info!(
                    "loaded HRTF dataset {filename}: {} Hz, {} directions, {}-sample HRIRs",
                    hrtf.sample_rate(),
                    hrtf.ir_count(),
                    hrtf.ir_size()
                );
                let hrtf = Arc::new(hrtf);
                loaded.insert(0, hrtf.clone());
                Ok(hrtf)
            }
            Err(err) => {
                log::error!("failed to load {filename}: {err}");
                Err(err)
            }
        }
    }

    /// Read the file at `path` and load its contents, keyed by the path
    /// string.
    ///
    /// # Errors
    ///
    /// [`crate::HrtfError::Io`] when the file cannot be read, otherwise as
    /// [`HrtfRegistry::load`].
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Arc<Hrtf>> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        self.load(&path.to_string_lossy(), &data)
    }

    /// Look up a previously loaded dataset without decoding anything.
    pub fn get(&self, filename: &str) -> Option<Arc<Hrtf>> {
        self.lock()
            .iter()
            .find(|h| h.filename() == filename)
            .cloned()
    }

    /// Number of loaded datasets.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every registry reference. Outstanding `Arc` handles keep their
    /// datasets alive; new loads after this decode from scratch.
    pub fn clear(&self) {
        let mut loaded = self.lock();
        log::debug!("releasing {} loaded HRTF datasets", loaded.len());
        loaded.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Arc<Hrtf>>> {
        // Dataset lists hold no invariants a panicking thread could break
        // mid-update, so a poisoned lock is still usable.
        self.loaded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
