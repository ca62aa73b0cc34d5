//! Persistent media library behind the gallery strip and grid.

mod fs_library;

pub use fs_library::FsAssetLibrary;

use crate::CoreResult;

use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

/// Number of photos loaded into the gallery grid.
pub const GRID_PAGE_SIZE: usize = 20;

/// Kind of a persisted asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Still photo.
    Photo,
    /// Video recording.
    Video,
}

impl AssetKind {
    pub(crate) fn dir_name(self) -> &'static str {
        match self {
            AssetKind::Photo => "photos",
            AssetKind::Video => "videos",
        }
    }
}

/// An asset stored in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Location inside the library.
    pub path: PathBuf,
    /// Photo or video.
    pub kind: AssetKind,
    /// Last modification time, used for newest-first ordering.
    pub modified: SystemTime,
}

/// Persistent media library (the device photo roll).
pub trait AssetLibrary: Send + Sync {
    /// Copy `source` into the library.
    fn save_asset(&self, source: &Path, kind: AssetKind) -> CoreResult<Asset>;

    /// Up to `first` assets of `kind`, newest first.
    fn recent(&self, kind: AssetKind, first: usize) -> CoreResult<Vec<Asset>>;
}
