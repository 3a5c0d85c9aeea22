//! フレームベクトルの固定レイアウト定義。
//!
//! エンコーダとデコーダが共有するオフセット表。既存の記録ファイルと
//! 互換性を保つため、この並び順とサイズは変更してはならない。

use std::ops::Range;

/// Pose のランドマーク数
pub const POSE_POINTS: usize = 33;
/// Face のランドマーク数
pub const FACE_POINTS: usize = 468;
/// 片手のランドマーク数
pub const HAND_POINTS: usize = 21;

/// 1フレームの特徴量数 (99 + 1404 + 63 + 63 = 1629)
pub const FRAME_FEATURES: usize = (POSE_POINTS + FACE_POINTS + 2 * HAND_POINTS) * 3;

/// 4つのランドマークグループ種別。
/// フレームベクトル内の並び順は `ALL` の順に固定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Pose,
    Face,
    LeftHand,
    RightHand,
}

impl GroupKind {
    pub const ALL: [GroupKind; 4] = [
        GroupKind::Pose,
        GroupKind::Face,
        GroupKind::LeftHand,
        GroupKind::RightHand,
    ];

    /// グループのランドマーク数
    pub fn point_count(self) -> usize {
        match self {
            GroupKind::Pose => POSE_POINTS,
            GroupKind::Face => FACE_POINTS,
            GroupKind::LeftHand | GroupKind::RightHand => HAND_POINTS,
        }
    }

    /// フレームベクトル内の要素数 (point_count * 3)
    pub fn feature_len(self) -> usize {
        self.point_count() * 3
    }

    /// フレームベクトル内の開始オフセット
    pub fn offset(self) -> usize {
        GroupKind::ALL
            .iter()
            .take_while(|k| **k != self)
            .map(|k| k.feature_len())
            .sum()
    }

    /// フレームベクトル内のスライス範囲
    pub fn range(self) -> Range<usize> {
        let start = self.offset();
        start..start + self.feature_len()
    }

    pub fn name(self) -> &'static str {
        match self {
            GroupKind::Pose => "pose",
            GroupKind::Face => "face",
            GroupKind::LeftHand => "left_hand",
            GroupKind::RightHand => "right_hand",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pose" => Some(GroupKind::Pose),
            "face" => Some(GroupKind::Face),
            "left_hand" => Some(GroupKind::LeftHand),
            "right_hand" => Some(GroupKind::RightHand),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_features_total() {
        assert_eq!(FRAME_FEATURES, 1629);
    }

    #[test]
    fn test_segment_offsets() {
        assert_eq!(GroupKind::Pose.offset(), 0);
        assert_eq!(GroupKind::Face.offset(), 99);
        assert_eq!(GroupKind::LeftHand.offset(), 1503);
        assert_eq!(GroupKind::RightHand.offset(), 1566);
    }

    #[test]
    fn test_segments_cover_frame() {
        let total: usize = GroupKind::ALL.iter().map(|k| k.feature_len()).sum();
        assert_eq!(total, FRAME_FEATURES);
        assert_eq!(GroupKind::RightHand.range().end, FRAME_FEATURES);
    }

    #[test]
    fn test_group_names_round_trip() {
        for kind in GroupKind::ALL {
            assert_eq!(GroupKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(GroupKind::from_name("torso"), None);
    }
}
