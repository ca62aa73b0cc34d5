use crate::{
    CoreResult,
    camera::{CameraControls, Permissions},
    library::{Asset, AssetKind, AssetLibrary},
};

use std::path::PathBuf;

use tracing::{info, instrument};

/// Options passed to [`PhotoSink::take_photo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoOptions {
    /// Fire the flash.
    pub flash_enabled: bool,
    /// Play the shutter sound.
    pub shutter_sound: bool,
}

/// External still-capture capability.
pub trait PhotoSink {
    /// Capture one photo and return where it was written.
    ///
    /// Fails with [`crate::CaptureError::SinkUnavailable`] when the camera is
    /// not ready.
    fn take_photo(&mut self, options: PhotoOptions) -> CoreResult<PathBuf>;
}

/// Capture a photo with the current controls and save it to the library.
#[track_caller]
#[instrument(skip(sink, library))]
pub fn take_photo<P: PhotoSink + ?Sized>(
    sink: &mut P,
    library: &dyn AssetLibrary,
    permissions: Permissions,
    controls: CameraControls,
) -> CoreResult<Asset> {
    permissions.require_media()?;

    let path = sink.take_photo(PhotoOptions {
        flash_enabled: controls.flash_enabled,
        shutter_sound: true,
    })?;

    let asset = library.save_asset(&path, AssetKind::Photo)?;

    info!(photo = ?asset.path, flash = controls.flash_enabled, "Photo captured");

    Ok(asset)
}
