use serde::{Deserialize, Serialize};

use super::layout::GroupKind;

/// 単一ランドマーク。
/// x, y はフレームの幅・高さで正規化された座標 (0.0〜1.0)、
/// z は相対的な深度（符号付き、無次元）。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// いずれかの座標が非ゼロか
    pub fn is_nonzero(&self) -> bool {
        self.x != 0.0 || self.y != 0.0 || self.z != 0.0
    }

    /// ピクセル座標に変換
    pub fn to_pixel(&self, width: u32, height: u32) -> (i32, i32) {
        let px = (self.x * width as f32) as i32;
        let py = (self.y * height as f32) as i32;
        (px, py)
    }
}

/// 1フレーム分の検出結果。グループごとに present (`Some`) / absent (`None`)。
///
/// 検出器の応答契約: 不在グループは省略または明示的な null であり、
/// 部分的に埋まることはない。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameLandmarks {
    #[serde(default)]
    pub pose: Option<Vec<LandmarkPoint>>,
    #[serde(default)]
    pub face: Option<Vec<LandmarkPoint>>,
    #[serde(default)]
    pub left_hand: Option<Vec<LandmarkPoint>>,
    #[serde(default)]
    pub right_hand: Option<Vec<LandmarkPoint>>,
}

impl FrameLandmarks {
    pub fn group(&self, kind: GroupKind) -> Option<&[LandmarkPoint]> {
        match kind {
            GroupKind::Pose => self.pose.as_deref(),
            GroupKind::Face => self.face.as_deref(),
            GroupKind::LeftHand => self.left_hand.as_deref(),
            GroupKind::RightHand => self.right_hand.as_deref(),
        }
    }

    pub fn set_group(&mut self, kind: GroupKind, points: Option<Vec<LandmarkPoint>>) {
        match kind {
            GroupKind::Pose => self.pose = points,
            GroupKind::Face => self.face = points,
            GroupKind::LeftHand => self.left_hand = points,
            GroupKind::RightHand => self.right_hand = points,
        }
    }

    /// 4グループすべて不在か
    pub fn is_empty(&self) -> bool {
        GroupKind::ALL.iter().all(|k| self.group(*k).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_is_nonzero() {
        assert!(!LandmarkPoint::default().is_nonzero());
        assert!(LandmarkPoint::new(0.0, 0.0, -0.1).is_nonzero());
        assert!(LandmarkPoint::new(0.5, 0.0, 0.0).is_nonzero());
    }

    #[test]
    fn test_point_to_pixel() {
        let p = LandmarkPoint::new(0.5, 0.25, 0.0);
        assert_eq!(p.to_pixel(640, 480), (320, 120));
    }

    #[test]
    fn test_group_accessors() {
        let mut frame = FrameLandmarks::default();
        assert!(frame.is_empty());

        frame.set_group(GroupKind::LeftHand, Some(vec![LandmarkPoint::new(0.1, 0.2, 0.3)]));
        assert!(!frame.is_empty());
        assert_eq!(frame.group(GroupKind::LeftHand).unwrap().len(), 1);
        assert!(frame.group(GroupKind::RightHand).is_none());
    }

    #[test]
    fn test_detector_reply_json_with_null_groups() {
        // Absent groups may arrive omitted or as explicit null.
        let json = r#"{"pose":[{"x":0.1,"y":0.2,"z":0.3}],"face":null}"#;
        let frame: FrameLandmarks = serde_json::from_str(json).unwrap();
        assert_eq!(frame.pose.as_ref().unwrap().len(), 1);
        assert!(frame.face.is_none());
        assert!(frame.left_hand.is_none());
    }
}
