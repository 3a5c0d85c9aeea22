use thiserror::Error;

use crate::landmark::layout::FRAME_FEATURES;

/// Session-level error taxonomy.
///
/// Structural errors (`Load`, `Acquisition`) block the responsible state
/// transition. `Decode` and `RenderUnavailable` abort the current render and
/// force playback to stop. `Transport` is reported per-frame by the capture
/// loop and never halts the sampler.
#[derive(Debug, Error)]
pub enum Error {
    #[error("sequence load failed: {0}")]
    Load(String),

    #[error("video source unavailable: {0}")]
    Acquisition(String),

    #[error("frame vector has {got} values, expected {expected}")]
    Decode { got: usize, expected: usize },

    #[error("drawing primitives unavailable")]
    RenderUnavailable,

    #[error("detector transport error: {0}")]
    Transport(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn bad_length(got: usize) -> Self {
        Self::Decode {
            got,
            expected: FRAME_FEATURES,
        }
    }
}
