pub mod codec;
pub mod layout;
mod point;

pub use layout::{GroupKind, FRAME_FEATURES};
pub use point::{FrameLandmarks, LandmarkPoint};
