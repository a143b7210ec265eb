//! 永続化モジュール（Google Drive / Sheets）
//!
//! 確認操作で1回だけ呼ばれる。認証 → フォルダfind-or-create →
//! 画像2枚アップロード → 行追記の順に、各ステップ1回ずつの
//! ブロッキング呼び出し。途中で失敗したステップ以降は実行されず、
//! 完了済みのステップはロールバックしない。

pub mod auth;
pub mod drive;
pub mod sheets;

use crate::config::Config;
use crate::detector::ViewName;
use crate::error::Result;
use crate::session::Submission;

/// 画像が無いビューのリンク欄に入れる値
pub const MISSING_IMAGE_LINK: &str = "(画像なし)";

/// 保存結果
#[derive(Debug, Clone)]
pub struct SavedRecord {
    pub folder_id: String,
    pub front_link: String,
    pub side_link: String,
    pub row: Vec<serde_json::Value>,
}

/// 記録内容をDriveとSheetsへ保存する
pub async fn save_submission(
    config: &Config,
    submission: &Submission,
    verbose: bool,
) -> Result<SavedRecord> {
    let sa_path = config.get_service_account_path()?;
    let spreadsheet_key = config.get_spreadsheet_key()?;

    let key = auth::ServiceAccountKey::load(&sa_path)?;
    let client = reqwest::Client::new();

    if verbose {
        println!("  認証: {}", key.client_email);
    }
    let token = auth::fetch_access_token(&client, &key).await?;

    let folder_id =
        drive::find_or_create_folder(&client, &token, &config.drive_folder_name).await?;
    if verbose {
        println!("  フォルダID: {}", folder_id);
    }

    let front_link = match &submission.front_image {
        Some(path) => {
            drive::upload_image(&client, &token, &folder_id, path, ViewName::Front).await?
        }
        None => MISSING_IMAGE_LINK.to_string(),
    };
    let side_link = match &submission.side_image {
        Some(path) => {
            drive::upload_image(&client, &token, &folder_id, path, ViewName::Side).await?
        }
        None => MISSING_IMAGE_LINK.to_string(),
    };

    let row = sheets::build_row(submission, &front_link, &side_link);
    sheets::append_row(&client, &token, &spreadsheet_key, &row).await?;

    Ok(SavedRecord {
        folder_id,
        front_link,
        side_link,
        row,
    })
}
