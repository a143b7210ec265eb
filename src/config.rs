use crate::error::{PalletError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Roboflow APIキー（環境変数 ROBOFLOW_API_KEY が優先）
    pub api_key: Option<String>,
    /// 検出モデルのパス（model/version）
    pub detection_model: String,
    /// 記録先スプレッドシートのキー
    pub spreadsheet_key: Option<String>,
    /// Drive上の保存先フォルダ名
    pub drive_folder_name: String,
    /// サービスアカウントJSONのパス
    pub service_account_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            detection_model: "pallet-detection-measurement/1".into(),
            spreadsheet_key: None,
            drive_folder_name: "Pallet_TWN".into(),
            service_account_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PalletError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("pallet-count").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var("ROBOFLOW_API_KEY") {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key.clone().ok_or(PalletError::MissingApiKey)
    }

    pub fn get_spreadsheet_key(&self) -> Result<String> {
        self.spreadsheet_key
            .clone()
            .ok_or(PalletError::MissingSpreadsheetKey)
    }

    pub fn get_service_account_path(&self) -> Result<PathBuf> {
        self.service_account_path
            .clone()
            .ok_or(PalletError::MissingServiceAccount)
    }

    /// 検出エンドポイントURL（APIキー付き）
    pub fn detection_url(&self) -> Result<String> {
        let key = self.get_api_key()?;
        Ok(format!(
            "https://detect.roboflow.com/{}?api_key={}",
            self.detection_model, key
        ))
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn set_spreadsheet_key(&mut self, key: String) -> Result<()> {
        self.spreadsheet_key = Some(key);
        self.save()
    }

    pub fn set_folder_name(&mut self, name: String) -> Result<()> {
        self.drive_folder_name = name;
        self.save()
    }

    pub fn set_service_account(&mut self, path: PathBuf) -> Result<()> {
        self.service_account_path = Some(path);
        self.save()
    }
}
