//! Sequence files: one recording session persisted as a single UTF-8 JSON
//! file, a top-level array of 1629-number frame arrays.
//!
//! Load-time validation only checks that the array is non-empty and that the
//! *first* frame has the expected length (representative sample). A malformed
//! later frame surfaces as a decode error at render time, not here.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::landmark::codec;
use crate::landmark::{FrameLandmarks, FRAME_FEATURES};

/// An ordered recording of frame vectors for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    frames: Vec<Vec<f32>>,
}

impl Sequence {
    /// Parse a sequence from JSON text.
    pub fn parse(json: &str) -> Result<Self, Error> {
        let frames: Vec<Vec<f32>> =
            serde_json::from_str(json).map_err(|e| Error::Load(e.to_string()))?;

        if frames.is_empty() {
            return Err(Error::Load("sequence file contains no frames".to_string()));
        }
        let first_len = frames[0].len();
        if first_len != FRAME_FEATURES {
            return Err(Error::Load(format!(
                "first frame has {first_len} values, expected {FRAME_FEATURES}"
            )));
        }

        Ok(Self { frames })
    }

    /// Read and parse a sequence file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Encode collected detector results into a sequence, one frame vector
    /// per result in arrival order.
    pub fn from_landmarks(frames: &[FrameLandmarks]) -> Self {
        Self {
            frames: frames.iter().map(codec::encode).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        self.frames.get(index).map(|f| f.as_slice())
    }

    pub fn frames(&self) -> &[Vec<f32>] {
        &self.frames
    }

    /// Write the sequence as pretty-printed JSON to
    /// `{dir}/{base}_{%Y%m%d_%H%M%S}_landmarks.json` and return the path.
    pub fn save<P: AsRef<Path>>(&self, dir: P, base: &str) -> Result<PathBuf, Error> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("{base}_{ts}_landmarks.json"));

        let json =
            serde_json::to_string_pretty(&self.frames).map_err(|e| Error::Load(e.to_string()))?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::LandmarkPoint;

    fn zero_frame_json(n: usize) -> String {
        let frame: Vec<f32> = vec![0.0; n];
        serde_json::to_string(&vec![frame]).unwrap()
    }

    #[test]
    fn test_parse_valid_sequence() {
        let seq = Sequence::parse(&zero_frame_json(1629)).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.frame(0).unwrap().len(), 1629);
        assert!(seq.frame(1).is_none());
    }

    #[test]
    fn test_parse_rejects_empty_array() {
        assert!(matches!(Sequence::parse("[]"), Err(Error::Load(_))));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(Sequence::parse("{}"), Err(Error::Load(_))));
        assert!(matches!(Sequence::parse("not json"), Err(Error::Load(_))));
    }

    #[test]
    fn test_parse_rejects_wrong_first_frame_length() {
        assert!(matches!(
            Sequence::parse(&zero_frame_json(100)),
            Err(Error::Load(_))
        ));
    }

    #[test]
    fn test_parse_checks_only_first_frame() {
        // Later malformed frames are accepted at load time and only fail
        // at render time.
        let frames = vec![vec![0.0f32; 1629], vec![0.0f32; 10]];
        let json = serde_json::to_string(&frames).unwrap();
        let seq = Sequence::parse(&json).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.frame(1).unwrap().len(), 10);
    }

    #[test]
    fn test_from_landmarks_encodes_in_arrival_order() {
        let mut a = FrameLandmarks::default();
        a.pose = Some(vec![LandmarkPoint::new(0.1, 0.2, 0.3); 33]);
        let b = FrameLandmarks::default();

        let seq = Sequence::from_landmarks(&[a, b]);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.frame(0).unwrap()[0], 0.1);
        assert!(seq.frame(1).unwrap().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut frame = FrameLandmarks::default();
        frame.left_hand = Some(vec![LandmarkPoint::new(0.4, 0.5, -0.1); 21]);
        let seq = Sequence::from_landmarks(&[frame]);

        let path = seq.save(dir.path(), "capture").unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("capture_"));
        assert!(name.ends_with("_landmarks.json"));

        let reloaded = Sequence::load(&path).unwrap();
        assert_eq!(reloaded, seq);
    }
}
