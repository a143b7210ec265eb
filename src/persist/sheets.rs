//! Google Sheets連携
//!
//! 記録先シートの先頭シートに1行追記する。

use crate::error::{PalletError, Result};
use crate::session::Submission;
use serde_json::{json, Value};

/// 追記する行を組み立てる。
/// 列順: 時刻, 車両番号, 管理票番号, 確認数, 正面リンク, 側面リンク, 計算合計
pub fn build_row(submission: &Submission, front_link: &str, side_link: &str) -> Vec<Value> {
    vec![
        json!(submission.timestamp),
        json!(submission.truck_text),
        json!(submission.document_text),
        json!(submission.confirmed_count),
        json!(front_link),
        json!(side_link),
        json!(submission.total_pallets),
    ]
}

/// 行を追記する
pub async fn append_row(
    client: &reqwest::Client,
    token: &str,
    spreadsheet_key: &str,
    row: &[Value],
) -> Result<()> {
    // A1始まりの範囲指定で先頭シートに追記される
    let url = format!(
        "https://sheets.googleapis.com/v4/spreadsheets/{}/values/A1:append",
        spreadsheet_key
    );
    let body = json!({ "values": [row] });

    let response = client
        .post(&url)
        .bearer_auth(token)
        .query(&[("valueInputOption", "USER_ENTERED")])
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(PalletError::Sheets(format!(
            "status {}: {}",
            status, text
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_row_order() {
        let submission = Submission {
            truck_text: "80-1234".into(),
            document_text: "5678".into(),
            layer_count: 3,
            front_count: 4,
            side_count: 2,
            total_pallets: 12,
            confirmed_count: 12,
            timestamp: "2026-08-26 09:30:00".into(),
            ..Default::default()
        };

        let row = build_row(&submission, "front-link", "side-link");
        assert_eq!(row.len(), 7);
        assert_eq!(row[0], json!("2026-08-26 09:30:00"));
        assert_eq!(row[1], json!("80-1234"));
        assert_eq!(row[2], json!("5678"));
        assert_eq!(row[3], json!(12));
        assert_eq!(row[4], json!("front-link"));
        assert_eq!(row[5], json!("side-link"));
        assert_eq!(row[6], json!(12));
    }
}
