//! Dataset assembly from recorded sequence files: select one or more
//! landmark groups' feature slices from each frame, then pad or truncate
//! every sequence to a fixed frame count so the result is rectangular.
//!
//! Unreadable or malformed files in the input directory are skipped with a
//! warning rather than failing the whole build.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::landmark::layout::{GroupKind, FRAME_FEATURES};
use crate::sequence::Sequence;

/// Concatenate the selected groups' segments of one frame vector, in the
/// order the groups were requested.
pub fn select_features(vector: &[f32], kinds: &[GroupKind]) -> Vec<f32> {
    let mut out = Vec::with_capacity(kinds.iter().map(|k| k.feature_len()).sum());
    for kind in kinds {
        out.extend_from_slice(&vector[kind.range()]);
    }
    out
}

/// Width of one output row for the selected groups.
pub fn selected_width(kinds: &[GroupKind]) -> usize {
    kinds.iter().map(|k| k.feature_len()).sum()
}

/// Reduce one sequence to the selected features and a fixed length.
/// Shorter sequences are padded with zero rows, longer ones truncated.
/// Fails when any frame has the wrong length.
pub fn shape_sequence(
    sequence: &Sequence,
    kinds: &[GroupKind],
    max_len: usize,
) -> Result<Vec<Vec<f32>>, Error> {
    let width = selected_width(kinds);
    let mut rows = Vec::with_capacity(max_len);

    for frame in sequence.frames().iter().take(max_len) {
        if frame.len() != FRAME_FEATURES {
            return Err(Error::bad_length(frame.len()));
        }
        rows.push(select_features(frame, kinds));
    }
    while rows.len() < max_len {
        rows.push(vec![0.0; width]);
    }
    Ok(rows)
}

/// Load every `*.json` sequence in `input_dir` (sorted by name for
/// reproducibility) and shape each one. Returns the stacked dataset and the
/// paths that contributed to it.
pub fn build_dataset<P: AsRef<Path>>(
    input_dir: P,
    kinds: &[GroupKind],
    max_len: usize,
) -> Result<(Vec<Vec<Vec<f32>>>, Vec<PathBuf>), Error> {
    if kinds.is_empty() {
        return Err(Error::Load("no landmark groups selected".to_string()));
    }
    if max_len == 0 {
        return Err(Error::Load("max_len must be positive".to_string()));
    }

    let entries = std::fs::read_dir(input_dir.as_ref())
        .map_err(|e| Error::Load(format!("{}: {e}", input_dir.as_ref().display())))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|x| x == "json").unwrap_or(false))
        .collect();
    paths.sort();

    let mut dataset = Vec::new();
    let mut used = Vec::new();
    for path in paths {
        let sequence = match Sequence::load(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("[dataset] skipping {}: {e}", path.display());
                continue;
            }
        };
        match shape_sequence(&sequence, kinds, max_len) {
            Ok(rows) => {
                dataset.push(rows);
                used.push(path);
            }
            Err(e) => eprintln!("[dataset] skipping {}: {e}", path.display()),
        }
    }

    if dataset.is_empty() {
        return Err(Error::Load("no usable sequence files found".to_string()));
    }
    Ok((dataset, used))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{FrameLandmarks, LandmarkPoint};

    fn sample_sequence(frames: usize) -> Sequence {
        let frame = FrameLandmarks {
            pose: Some(vec![LandmarkPoint::new(0.2, 0.4, -0.1); 33]),
            left_hand: Some(vec![LandmarkPoint::new(0.6, 0.6, 0.0); 21]),
            ..Default::default()
        };
        Sequence::from_landmarks(&vec![frame; frames])
    }

    #[test]
    fn test_select_features_widths_and_order() {
        let seq = sample_sequence(1);
        let frame = seq.frame(0).unwrap();

        let pose_only = select_features(frame, &[GroupKind::Pose]);
        assert_eq!(pose_only.len(), 99);
        assert_eq!(pose_only[0], 0.2);

        // requested order is preserved, not layout order
        let hands_first = select_features(frame, &[GroupKind::LeftHand, GroupKind::Pose]);
        assert_eq!(hands_first.len(), 63 + 99);
        assert_eq!(hands_first[0], 0.6);
        assert_eq!(hands_first[63], 0.2);
    }

    #[test]
    fn test_shape_sequence_pads_short() {
        let rows = shape_sequence(&sample_sequence(2), &[GroupKind::Pose], 5).unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows[1].iter().any(|v| *v != 0.0));
        assert!(rows[2].iter().all(|v| *v == 0.0));
        assert_eq!(rows[4].len(), 99);
    }

    #[test]
    fn test_shape_sequence_truncates_long() {
        let rows = shape_sequence(&sample_sequence(8), &[GroupKind::Face], 3).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 1404);
    }

    #[test]
    fn test_build_dataset_skips_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        sample_sequence(2).save(dir.path(), "good").unwrap();
        std::fs::write(dir.path().join("bad_landmarks.json"), "not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let (dataset, used) =
            build_dataset(dir.path(), &[GroupKind::Pose, GroupKind::LeftHand], 4).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(used.len(), 1);
        assert_eq!(dataset[0].len(), 4);
        assert_eq!(dataset[0][0].len(), 99 + 63);
    }

    #[test]
    fn test_build_dataset_rejects_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        assert!(build_dataset(dir.path(), &[], 4).is_err());
        assert!(build_dataset(dir.path(), &[GroupKind::Pose], 0).is_err());
    }
}
