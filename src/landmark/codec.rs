//! ランドマーク特徴量コーデック。
//!
//! 4グループを固定長 1629 のフラットなベクトルへ展開し、逆方向に復元する。
//! 不在グループは全ゼロ区間として埋められ、明示的なフラグは持たない。
//! 原点ちょうどに検出されたランドマークだけのグループは不在と区別できないが、
//! これは既存の記録ファイルとのラウンドトリップ互換のため仕様として保持する。

use crate::error::Error;
use crate::landmark::layout::{GroupKind, FRAME_FEATURES};
use crate::landmark::point::{FrameLandmarks, LandmarkPoint};

/// フレームの検出結果をフレームベクトルへエンコードする。
///
/// 出力長は常に 1629（全グループ不在なら全ゼロ）。点数が規定と異なる
/// グループはセグメント幅までゼロ埋め・切り詰めされ、エラーにはならない。
pub fn encode(frame: &FrameLandmarks) -> Vec<f32> {
    let mut out = Vec::with_capacity(FRAME_FEATURES);

    for kind in GroupKind::ALL {
        let start = out.len();
        if let Some(points) = frame.group(kind) {
            for p in points.iter().take(kind.point_count()) {
                out.push(p.x);
                out.push(p.y);
                out.push(p.z);
            }
        }
        out.resize(start + kind.feature_len(), 0.0);
    }

    debug_assert_eq!(out.len(), FRAME_FEATURES);
    out
}

/// フレームベクトルをデコードし、グループごとに present / absent を判定する。
///
/// 長さが 1629 でない入力は `Error::Decode` となり、部分的な結果は返さない。
/// セグメント内に非ゼロ座標が1つでもあれば present。
pub fn decode(vector: &[f32]) -> Result<FrameLandmarks, Error> {
    if vector.len() != FRAME_FEATURES {
        return Err(Error::bad_length(vector.len()));
    }

    let mut frame = FrameLandmarks::default();
    for kind in GroupKind::ALL {
        let segment = &vector[kind.range()];
        if segment.iter().all(|v| *v == 0.0) {
            continue;
        }
        let points: Vec<LandmarkPoint> = segment
            .chunks_exact(3)
            .map(|c| LandmarkPoint::new(c[0], c[1], c[2]))
            .collect();
        frame.set_group(kind, Some(points));
    }

    Ok(frame)
}
