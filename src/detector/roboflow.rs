//! Roboflow検出API連携
//!
//! `POST https://detect.roboflow.com/<model>?api_key=<key>` へ
//! multipartフィールド `file` で画像を送る。レスポンスの
//! `predictions` 配列の長さが検出数。

use crate::error::{PalletError, Result};
use reqwest::multipart;
use serde::Deserialize;
use std::path::Path;

/// 検出APIのレスポンス
#[derive(Debug, Deserialize)]
pub struct DetectResponse {
    /// `predictions` が無いレスポンスは検出数0として扱う
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// バウンディングボックス1件。数えるだけなので中身はほぼ読まない。
#[derive(Debug, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub confidence: f64,
}

/// レスポンスJSONをパースする
pub fn parse_detect_response(body: &str) -> Result<DetectResponse> {
    serde_json::from_str(body)
        .map_err(|e| PalletError::Detection(format!("不正なレスポンス: {}", e)))
}

/// 画像を送信して検出数を返す
pub async fn request_count(
    client: &reqwest::Client,
    url: &str,
    image_path: &Path,
) -> Result<u32> {
    let bytes = std::fs::read(image_path)?;
    let file_name = image_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "pallet.jpg".to_string());

    let part = multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("image/jpeg")?;
    let form = multipart::Form::new().part("file", part);

    // タイムアウトは設定しない（応答が来るまで待つ）
    let response = client.post(url).multipart(form).send().await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(PalletError::Detection(format!(
            "status {}: {}",
            status, body
        )));
    }

    let parsed = parse_detect_response(&body)?;
    Ok(parsed.predictions.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_predictions() {
        let parsed = parse_detect_response(r#"{"predictions": []}"#).unwrap();
        assert_eq!(parsed.predictions.len(), 0);
    }

    #[test]
    fn test_parse_missing_predictions_key() {
        let parsed = parse_detect_response(r#"{"time": 0.2}"#).unwrap();
        assert_eq!(parsed.predictions.len(), 0);
    }

    #[test]
    fn test_parse_n_predictions() {
        let body = r#"{
            "predictions": [
                {"x": 100, "y": 80, "width": 50, "height": 40, "confidence": 0.91, "class": "pallet"},
                {"x": 200, "y": 85, "width": 52, "height": 41, "confidence": 0.88, "class": "pallet"},
                {"x": 300, "y": 90, "width": 49, "height": 39, "confidence": 0.76, "class": "pallet"}
            ]
        }"#;
        let parsed = parse_detect_response(body).unwrap();
        assert_eq!(parsed.predictions.len(), 3);
        assert_eq!(parsed.predictions[0].class, "pallet");
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_detect_response("not json");
        assert!(matches!(result, Err(PalletError::Detection(_))));
    }
}
