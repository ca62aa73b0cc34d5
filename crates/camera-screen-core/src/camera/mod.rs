//! Camera switches, permissions, photo capture and the capture overlay.

mod controls;
mod overlay;
mod permissions;
mod photo;

pub use {
    controls::{CameraControls, CameraPosition, CaptureMode},
    overlay::{OVERLAY_DURATION, PhotoOverlay},
    permissions::Permissions,
    photo::{PhotoOptions, PhotoSink, take_photo},
};
