//! ソフトウェアラスタの描画プリミティブ実装。
//! 正規化座標をピクセルへ変換し、u32 RGB バッファへ直接描く。

use crate::landmark::LandmarkPoint;
use crate::render::connections::DrawStyle;
use crate::render::overlay::DrawPrimitives;

/// u32 (0xRRGGBB) ピクセルバッファのキャンバス
pub struct BufferCanvas {
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl BufferCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: vec![0u32; width * height],
            width,
            height,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }

    /// バッファを黒でクリア
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// ピクセル値を取得（範囲外は `None`）
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.buffer[y * self.width + x])
        } else {
            None
        }
    }

    /// Bresenhamのアルゴリズムで線を描画
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// 円を描画（塗りつぶし）
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// ピクセルをセット（境界チェック付き）
    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize * self.width + x as usize] = color;
        }
    }
}

impl DrawPrimitives for BufferCanvas {
    fn draw_connectors(&mut self, points: &[LandmarkPoint], connections: &[(usize, usize)], style: DrawStyle) {
        let w = self.width as u32;
        let h = self.height as u32;
        for (a, b) in connections {
            let (Some(start), Some(end)) = (points.get(*a), points.get(*b)) else {
                continue;
            };
            let (x0, y0) = start.to_pixel(w, h);
            let (x1, y1) = end.to_pixel(w, h);
            self.draw_line(x0, y0, x1, y1, style.color);
        }
    }

    fn draw_landmarks(&mut self, points: &[LandmarkPoint], style: DrawStyle) {
        let w = self.width as u32;
        let h = self.height as u32;
        for p in points {
            let (px, py) = p.to_pixel(w, h);
            self.draw_circle(px, py, style.point_radius, style.color);
        }
    }
}
