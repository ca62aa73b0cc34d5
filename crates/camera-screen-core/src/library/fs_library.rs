use crate::{
    CaptureError, CoreResult,
    library::{Asset, AssetKind, AssetLibrary},
};

use std::{
    fs, io,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Asset library rooted at a directory, one subdirectory per [`AssetKind`].
#[derive(Debug, Clone)]
pub struct FsAssetLibrary {
    root: PathBuf,
}

impl FsAssetLibrary {
    /// Create a library rooted at `root`. Directories are created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Library root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, kind: AssetKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }
}

impl AssetLibrary for FsAssetLibrary {
    #[track_caller]
    #[instrument(skip(self))]
    fn save_asset(&self, source: &Path, kind: AssetKind) -> CoreResult<Asset> {
        let location = Location::caller();
        let save_failed = |source_err: io::Error| CaptureError::SaveFailed {
            path: source.to_path_buf(),
            source: source_err,
            location: ErrorLocation::from(location),
        };

        let file_name = source.file_name().ok_or_else(|| {
            save_failed(io::Error::new(
                io::ErrorKind::InvalidInput,
                "artifact path has no file name",
            ))
        })?;

        let dir = self.kind_dir(kind);
        fs::create_dir_all(&dir).map_err(save_failed)?;

        let dest = dir.join(file_name);
        fs::copy(source, &dest).map_err(save_failed)?;

        let modified = fs::metadata(&dest)
            .and_then(|m| m.modified())
            .map_err(save_failed)?;

        info!(asset = ?dest, kind = ?kind, "Asset saved");

        Ok(Asset {
            path: dest,
            kind,
            modified,
        })
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn recent(&self, kind: AssetKind, first: usize) -> CoreResult<Vec<Asset>> {
        let dir = self.kind_dir(kind);

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(dir = ?dir, "Library directory missing, nothing to list");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(CaptureError::Library {
                    reason: format!("Failed to read {:?}: {}", dir, e),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let mut assets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CaptureError::Library {
                reason: format!("Failed to read entry in {:?}: {}", dir, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let metadata = match entry.metadata() {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };

            let modified = metadata.modified().map_err(|e| CaptureError::Library {
                reason: format!("No modification time for {:?}: {}", entry.path(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            assets.push(Asset {
                path: entry.path(),
                kind,
                modified,
            });
        }

        // Newest first; path breaks ties so the order is stable.
        assets.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.path.cmp(&a.path)));
        assets.truncate(first);

        Ok(assets)
    }
}
