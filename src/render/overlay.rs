//! デコード済みフレームを外部供給の描画プリミティブで描くアダプタ。
//! 不在グループはスキップされる。

use crate::landmark::{FrameLandmarks, LandmarkPoint};
use crate::render::connections::{
    DrawStyle, FACE_LEFT_EYE, FACE_LIPS, FACE_OVAL, FACE_RIGHT_EYE, FACE_STYLE, HAND_CONNECTIONS,
    LEFT_HAND_STYLE, POSE_CONNECTIONS, POSE_STYLE, RIGHT_HAND_STYLE,
};

/// 外部供給の描画プリミティブ契約。
/// 副作用のみで戻り値は消費されない。
pub trait DrawPrimitives {
    /// 接続表に従ってランドマーク間の線を描く
    fn draw_connectors(&mut self, points: &[LandmarkPoint], connections: &[(usize, usize)], style: DrawStyle);
    /// ランドマーク点を描く
    fn draw_landmarks(&mut self, points: &[LandmarkPoint], style: DrawStyle);
}

/// 1フレーム分のランドマークをグループ別スタイルで描画する。
///
/// Face は輪郭・唇・目の接続線のみ（468 点の散布は描かない）。
pub fn draw_frame<P: DrawPrimitives>(canvas: &mut P, frame: &FrameLandmarks) {
    if let Some(pose) = frame.pose.as_deref() {
        canvas.draw_connectors(pose, &POSE_CONNECTIONS, POSE_STYLE);
        canvas.draw_landmarks(pose, POSE_STYLE);
    }

    if let Some(face) = frame.face.as_deref() {
        canvas.draw_connectors(face, &FACE_OVAL, FACE_STYLE);
        canvas.draw_connectors(face, &FACE_LIPS, FACE_STYLE);
        canvas.draw_connectors(face, &FACE_LEFT_EYE, FACE_STYLE);
        canvas.draw_connectors(face, &FACE_RIGHT_EYE, FACE_STYLE);
    }

    if let Some(hand) = frame.left_hand.as_deref() {
        canvas.draw_connectors(hand, &HAND_CONNECTIONS, LEFT_HAND_STYLE);
        canvas.draw_landmarks(hand, LEFT_HAND_STYLE);
    }

    if let Some(hand) = frame.right_hand.as_deref() {
        canvas.draw_connectors(hand, &HAND_CONNECTIONS, RIGHT_HAND_STYLE);
        canvas.draw_landmarks(hand, RIGHT_HAND_STYLE);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Records draw calls instead of rasterizing.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub connector_calls: Vec<(usize, u32)>,
        pub landmark_calls: Vec<(usize, u32)>,
    }

    impl DrawPrimitives for RecordingCanvas {
        fn draw_connectors(
            &mut self,
            _points: &[LandmarkPoint],
            connections: &[(usize, usize)],
            style: DrawStyle,
        ) {
            self.connector_calls.push((connections.len(), style.color));
        }

        fn draw_landmarks(&mut self, points: &[LandmarkPoint], style: DrawStyle) {
            self.landmark_calls.push((points.len(), style.color));
        }
    }
}
