#[cfg(feature = "camera")]
pub mod camera;
pub mod capture;
pub mod config;
pub mod dataset;
pub mod error;
pub mod landmark;
pub mod playback;
pub mod protocol;
pub mod render;
pub mod sequence;
