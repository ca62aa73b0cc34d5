use crate::AppError;

use std::{panic::Location, str::FromStr};

use error_location::ErrorLocation;

/// Help text listing every command.
pub(crate) const COMMAND_HELP: &str = "commands: shutter | record | photo | video | flash | flip | \
                                       gallery | close | grant | status | quit";

/// User actions on the camera screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Press the shutter: photo in photo mode, record toggle in video mode.
    Shutter,
    /// Toggle video recording regardless of mode.
    ToggleRecording,
    /// Switch the shutter to photo mode.
    PhotoMode,
    /// Switch the shutter to video mode.
    VideoMode,
    /// Flip the flash switch.
    ToggleFlash,
    /// Switch between back and front camera.
    FlipCamera,
    /// Open the photo grid.
    OpenGallery,
    /// Close the photo grid and return to the live view.
    CloseGallery,
    /// Grant the camera and media permissions.
    GrantPermissions,
    /// Re-render the screen.
    Status,
    /// Request application shutdown.
    Shutdown,
}

impl FromStr for AppCommand {
    type Err = AppError;

    #[track_caller]
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let command = match input.trim().to_ascii_lowercase().as_str() {
            "shutter" | "s" => AppCommand::Shutter,
            "record" | "r" => AppCommand::ToggleRecording,
            "photo" => AppCommand::PhotoMode,
            "video" => AppCommand::VideoMode,
            "flash" => AppCommand::ToggleFlash,
            "flip" => AppCommand::FlipCamera,
            "gallery" | "g" => AppCommand::OpenGallery,
            "close" => AppCommand::CloseGallery,
            "grant" => AppCommand::GrantPermissions,
            "status" => AppCommand::Status,
            "quit" | "exit" | "q" => AppCommand::Shutdown,
            _ => {
                return Err(AppError::UnknownCommand {
                    input: input.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };
        Ok(command)
    }
}
