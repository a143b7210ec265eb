use thiserror::Error;

#[derive(Error, Debug)]
pub enum PalletError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("検出APIキーが設定されていません。`pallet-count config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("スプレッドシートキーが設定されていません。`pallet-count config --set-spreadsheet-key KEY` で設定してください")]
    MissingSpreadsheetKey,

    #[error("サービスアカウントJSONが設定されていません。`pallet-count config --set-service-account PATH` で設定してください")]
    MissingServiceAccount,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("検出API呼び出しエラー: {0}")]
    Detection(String),

    #[error("認証エラー: {0}")]
    Auth(String),

    #[error("Driveアップロードエラー: {0}")]
    Drive(String),

    #[error("スプレッドシート書き込みエラー: {0}")]
    Sheets(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PalletError>;
