//! nokhwa-backed webcam source for the capture loop.

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use crate::capture::{RgbFrame, VideoSource};
use crate::error::Error;

/// Live webcam wrapped as a `VideoSource`. Acquisition failures (no device,
/// permission denied) surface as `Error::Acquisition`.
pub struct WebcamSource {
    camera: Camera,
    width: u32,
    height: u32,
}

impl WebcamSource {
    /// Open the camera at the given index and start its stream.
    pub fn open(index: u32) -> Result<Self, Error> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| Error::Acquisition(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| Error::Acquisition(e.to_string()))?;

        let resolution = camera.resolution();
        let (width, height) = (resolution.width(), resolution.height());

        Ok(Self { camera, width, height })
    }
}

impl VideoSource for WebcamSource {
    /// Current frame, decoded to RGB24. A failed read is a skipped sample,
    /// not an error: the loop is lossy by design.
    fn grab(&mut self) -> Option<RgbFrame> {
        let buffer = self.camera.frame().ok()?;
        let image = buffer.decode_image::<RgbFormat>().ok()?;
        let (width, height) = (image.width(), image.height());
        Some(RgbFrame {
            width,
            height,
            data: image.into_raw(),
        })
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
