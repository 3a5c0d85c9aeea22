//! 骨格の接続定義と描画スタイル。
//!
//! インデックスは MediaPipe Holistic のランドマーク番号に対応する。
//! Face は 468 点すべてではなく、輪郭・唇・目のみを描画する。

/// 描画スタイル（色は 0xRRGGBB）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawStyle {
    pub color: u32,
    pub point_radius: i32,
}

/// Pose の線色（緑）
pub const POSE_STYLE: DrawStyle = DrawStyle { color: 0x00CC66, point_radius: 3 };
/// 左手の線色（青）
pub const LEFT_HAND_STYLE: DrawStyle = DrawStyle { color: 0x3399FF, point_radius: 2 };
/// 右手の線色（橙）
pub const RIGHT_HAND_STYLE: DrawStyle = DrawStyle { color: 0xFF8800, point_radius: 2 };
/// 顔輪郭の線色（灰）
pub const FACE_STYLE: DrawStyle = DrawStyle { color: 0xC0C0C0, point_radius: 1 };

/// Pose の接続 (開始インデックス, 終了インデックス)
pub const POSE_CONNECTIONS: [(usize, usize); 35] = [
    // 顔
    (0, 1), (1, 2), (2, 3), (3, 7), (0, 4), (4, 5), (5, 6), (6, 8), (9, 10),
    // 腕
    (11, 12), (11, 13), (13, 15), (15, 17), (15, 19), (15, 21), (17, 19),
    (12, 14), (14, 16), (16, 18), (16, 20), (16, 22), (18, 20),
    // 胴体
    (11, 23), (12, 24), (23, 24),
    // 脚
    (23, 25), (24, 26), (25, 27), (26, 28), (27, 29), (28, 30), (29, 31),
    (30, 32), (27, 31), (28, 32),
];

/// 手の接続（親指→小指の順）
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

/// 顔の輪郭
pub const FACE_OVAL: [(usize, usize); 36] = [
    (10, 338), (338, 297), (297, 332), (332, 284), (284, 251), (251, 389),
    (389, 356), (356, 454), (454, 323), (323, 361), (361, 288), (288, 397),
    (397, 365), (365, 379), (379, 378), (378, 400), (400, 377), (377, 152),
    (152, 148), (148, 176), (176, 149), (149, 150), (150, 136), (136, 172),
    (172, 58), (58, 132), (132, 93), (93, 234), (234, 127), (127, 162),
    (162, 21), (21, 54), (54, 103), (103, 67), (67, 109), (109, 10),
];

/// 唇（外周と内周）
pub const FACE_LIPS: [(usize, usize); 40] = [
    (61, 146), (146, 91), (91, 181), (181, 84), (84, 17), (17, 314),
    (314, 405), (405, 321), (321, 375), (375, 291), (61, 185), (185, 40),
    (40, 39), (39, 37), (37, 0), (0, 267), (267, 269), (269, 270),
    (270, 409), (409, 291), (78, 95), (95, 88), (88, 178), (178, 87),
    (87, 14), (14, 317), (317, 402), (402, 318), (318, 324), (324, 308),
    (78, 191), (191, 80), (80, 81), (81, 82), (82, 13), (13, 312),
    (312, 311), (311, 310), (310, 415), (415, 308),
];

/// 左目
pub const FACE_LEFT_EYE: [(usize, usize); 16] = [
    (263, 249), (249, 390), (390, 373), (373, 374), (374, 380), (380, 381),
    (381, 382), (382, 362), (263, 466), (466, 388), (388, 387), (387, 386),
    (386, 385), (385, 384), (384, 398), (398, 362),
];

/// 右目
pub const FACE_RIGHT_EYE: [(usize, usize); 16] = [
    (33, 7), (7, 163), (163, 144), (144, 145), (145, 153), (153, 154),
    (154, 155), (155, 133), (33, 246), (246, 161), (161, 160), (160, 159),
    (159, 158), (158, 157), (157, 173), (173, 133),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::layout::{FACE_POINTS, HAND_POINTS, POSE_POINTS};

    #[test]
    fn test_pose_connections_in_range() {
        for (a, b) in POSE_CONNECTIONS {
            assert!(a < POSE_POINTS && b < POSE_POINTS, "({a},{b})");
        }
    }

    #[test]
    fn test_hand_connections_in_range() {
        for (a, b) in HAND_CONNECTIONS {
            assert!(a < HAND_POINTS && b < HAND_POINTS, "({a},{b})");
        }
    }

    #[test]
    fn test_face_connections_in_range() {
        let all = FACE_OVAL
            .iter()
            .chain(FACE_LIPS.iter())
            .chain(FACE_LEFT_EYE.iter())
            .chain(FACE_RIGHT_EYE.iter());
        for (a, b) in all {
            assert!(*a < FACE_POINTS && *b < FACE_POINTS, "({a},{b})");
        }
    }

    #[test]
    fn test_group_colors_are_distinct() {
        assert_ne!(POSE_STYLE.color, LEFT_HAND_STYLE.color);
        assert_ne!(LEFT_HAND_STYLE.color, RIGHT_HAND_STYLE.color);
        assert_ne!(POSE_STYLE.color, RIGHT_HAND_STYLE.color);
    }
}
