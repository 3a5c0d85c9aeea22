use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaptureConfig {
    /// カメラ番号
    #[serde(default = "default_camera_index")]
    pub camera_index: u32,
    /// 送信フレームのJPEG品質
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// 収集結果の保存先ディレクトリ
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlaybackConfig {
    /// 再生速度の初期倍率
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// キャンバス幅（ピクセル）
    #[serde(default = "default_canvas_width")]
    pub canvas_width: usize,
    /// キャンバス高さ（ピクセル）
    #[serde(default = "default_canvas_height")]
    pub canvas_height: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectorConfig {
    /// 検出器サーバのアドレス
    #[serde(default = "default_detector_addr")]
    pub addr: String,
}

fn default_camera_index() -> u32 { 0 }
fn default_jpeg_quality() -> u8 { 80 }
fn default_output_dir() -> String { "data".to_string() }
fn default_speed() -> f64 { 1.0 }
fn default_canvas_width() -> usize { 640 }
fn default_canvas_height() -> usize { 480 }
fn default_detector_addr() -> String { "127.0.0.1:5000".to_string() }

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            camera_index: default_camera_index(),
            jpeg_quality: default_jpeg_quality(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            addr: default_detector_addr(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがなければデフォルトを使う
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.capture.camera_index, 0);
        assert_eq!(config.capture.jpeg_quality, 80);
        assert_eq!(config.playback.speed, 1.0);
        assert_eq!(config.playback.canvas_width, 640);
        assert_eq!(config.detector.addr, "127.0.0.1:5000");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [capture]
            camera_index = 2

            [playback]
            speed = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.capture.camera_index, 2);
        assert_eq!(config.capture.jpeg_quality, 80);
        assert_eq!(config.playback.speed, 0.5);
        assert_eq!(config.detector.addr, "127.0.0.1:5000");
    }
}
