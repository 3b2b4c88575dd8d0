use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::models::Snapshot;
use crate::utils::CacheError;

pub const CACHE_FILE_NAME: &str = "tokenData.json";

/// Write-through store holding the last successful snapshot
pub struct SnapshotCache {
    dir: PathBuf,
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(CACHE_FILE_NAME);
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the cache file with `snapshot`
    pub fn write(&self, snapshot: &Snapshot) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(snapshot)?;

        self.ensure_dir()?;

        // Write to a sibling file then rename so readers never see a partial document
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|source| CacheError::Io {
            path: tmp_path.display().to_string(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| CacheError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        debug!("Cached snapshot to {}", self.path.display());
        Ok(())
    }

    /// Write and swallow failures. Returns whether the write succeeded.
    pub fn write_best_effort(&self, snapshot: &Snapshot) -> bool {
        match self.write(snapshot) {
            Ok(()) => true,
            Err(e) => {
                warn!("Snapshot cache write skipped: {}", e);
                false
            }
        }
    }

    /// Last cached snapshot, if any. Not used by the render path.
    pub fn read_latest(&self) -> Option<Snapshot> {
        let contents = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    fn ensure_dir(&self) -> Result<(), CacheError> {
        let io_err = |source: std::io::Error| CacheError::Io {
            path: self.dir.display().to_string(),
            source,
        };

        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir).map_err(io_err)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)).map_err(io_err)?;
            }
        }
        Ok(())
    }
}
