//! パレット検出モジュール
//!
//! 撮影画像を一時JPEGに再エンコードし、Roboflowの検出APIへ
//! multipart POSTして予測数をパレット数として数える。

mod roboflow;

pub use roboflow::{parse_detect_response, DetectResponse, Prediction};

use crate::config::Config;
use crate::error::{PalletError, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// 撮影ビュー
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ViewName {
    Front,
    Side,
}

impl ViewName {
    /// 表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            ViewName::Front => "正面",
            ViewName::Side => "側面",
        }
    }

    /// ファイル名用の接頭辞
    pub fn stem(&self) -> &'static str {
        match self {
            ViewName::Front => "front",
            ViewName::Side => "side",
        }
    }
}

/// 1枚分の検出結果（作成後は不変）
#[derive(Debug, Clone, Copy)]
pub struct DetectionResult {
    pub view: ViewName,
    pub detected_count: u32,
}

/// ビューごとの一時JPEGパス（新しい撮影で上書きされる）
pub fn temp_image_path(view: ViewName) -> PathBuf {
    std::env::temp_dir().join(format!("{}_pallet_temp.jpg", view.stem()))
}

/// 撮影画像を読み込み、一時JPEGへ再エンコードする
pub fn prepare_capture(image_path: &Path, view: ViewName) -> Result<PathBuf> {
    if !image_path.exists() {
        return Err(PalletError::FileNotFound(image_path.display().to_string()));
    }

    let image = image::open(image_path)
        .map_err(|e| PalletError::ImageLoad(format!("{}: {}", image_path.display(), e)))?;

    let temp_path = temp_image_path(view);
    image
        .save(&temp_path)
        .map_err(|e| PalletError::ImageLoad(format!("{}: {}", temp_path.display(), e)))?;

    Ok(temp_path)
}

/// 一時JPEGを検出APIへ送り、検出数を返す
pub async fn detect(
    client: &reqwest::Client,
    config: &Config,
    temp_path: &Path,
    view: ViewName,
) -> Result<DetectionResult> {
    let url = config.detection_url()?;
    let count = roboflow::request_count(client, &url, temp_path).await?;

    Ok(DetectionResult {
        view,
        detected_count: count,
    })
}

/// セッション用ラッパ。エラーは表示して検出数0に落とし、外へは伝播しない。
pub async fn detect_or_zero(
    client: &reqwest::Client,
    config: &Config,
    temp_path: &Path,
    view: ViewName,
) -> DetectionResult {
    match detect(client, config, temp_path, view).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("⚠ {}ビューの検出エラー: {}", view.label(), e);
            DetectionResult {
                view,
                detected_count: 0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_labels() {
        assert_eq!(ViewName::Front.label(), "正面");
        assert_eq!(ViewName::Side.label(), "側面");
        assert_eq!(ViewName::Front.stem(), "front");
        assert_eq!(ViewName::Side.stem(), "side");
    }

    #[test]
    fn test_temp_image_path_per_view() {
        let front = temp_image_path(ViewName::Front);
        let side = temp_image_path(ViewName::Side);
        assert!(front.to_string_lossy().ends_with("front_pallet_temp.jpg"));
        assert!(side.to_string_lossy().ends_with("side_pallet_temp.jpg"));
        assert_ne!(front, side);
    }

    #[test]
    fn test_prepare_capture_missing_file() {
        let result = prepare_capture(Path::new("/nonexistent/photo.jpg"), ViewName::Front);
        assert!(matches!(
            result,
            Err(crate::error::PalletError::FileNotFound(_))
        ));
    }
}
