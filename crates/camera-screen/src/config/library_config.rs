use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Media library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Root directory of the photo roll.
    pub path: PathBuf,
}
