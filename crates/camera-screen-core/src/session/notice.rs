use crate::{CaptureError, library::Asset};

use uuid::Uuid;

/// Something the screen should tell the user about.
#[derive(Debug)]
pub enum SessionNotice {
    /// The sink accepted the start request and the timer is running.
    Started {
        /// Session that started.
        session_id: Uuid,
    },
    /// The recording ended and was saved to the library.
    Saved {
        /// Session that ended.
        session_id: Uuid,
        /// Saved video.
        asset: Asset,
    },
    /// The attempt ended in an error. The session is inactive.
    Failed {
        /// Session that failed.
        session_id: Uuid,
        /// What went wrong.
        error: CaptureError,
    },
}
