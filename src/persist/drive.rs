//! Google Drive連携
//!
//! 保存先フォルダのfind-or-createと、一時JPEGの
//! multipart/relatedアップロードを行う。

use crate::detector::ViewName;
use crate::error::{PalletError, Result};
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::path::Path;

const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

/// フォルダ検索クエリ。名前に含まれる `'` と `\` はエスケープする。
pub fn folder_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "mimeType='{}' and name='{}' and trashed=false",
        FOLDER_MIME, escaped
    )
}

/// 保存先フォルダを探し、無ければ作成してIDを返す。
///
/// 検索→作成の間に他セッションが同名フォルダを作ると重複しうるが、
/// 1セッション1操作者の前提なのでここでは対処しない。
pub async fn find_or_create_folder(
    client: &reqwest::Client,
    token: &str,
    name: &str,
) -> Result<String> {
    let response = client
        .get(FILES_URL)
        .bearer_auth(token)
        .query(&[
            ("q", folder_query(name).as_str()),
            ("spaces", "drive"),
            ("fields", "files(id, name)"),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PalletError::Drive(format!(
            "フォルダ検索 status {}: {}",
            status, body
        )));
    }

    let list: FileList = response.json().await?;
    if let Some(existing) = list.files.into_iter().next() {
        return Ok(existing.id);
    }

    let metadata = serde_json::json!({
        "name": name,
        "mimeType": FOLDER_MIME,
    });
    let response = client
        .post(FILES_URL)
        .bearer_auth(token)
        .query(&[("fields", "id")])
        .json(&metadata)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PalletError::Drive(format!(
            "フォルダ作成 status {}: {}",
            status, body
        )));
    }

    let created: DriveFile = response.json().await?;
    Ok(created.id)
}

/// アップロードファイル名: `<view>_pallet_<YYYYMMDDHHMMSS>.jpg`
pub fn upload_file_name(view: ViewName, now: &DateTime<Local>) -> String {
    format!("{}_pallet_{}.jpg", view.stem(), now.format("%Y%m%d%H%M%S"))
}

/// Drive v3のmultipart/relatedボディを組み立てる
pub fn multipart_related_body(metadata: &str, media: &[u8], boundary: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(media.len() + metadata.len() + 256);
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{}\r\n",
            boundary, metadata
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("--{}\r\nContent-Type: image/jpeg\r\n\r\n", boundary).as_bytes(),
    );
    body.extend_from_slice(media);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

/// 共有リンク形式
pub fn share_link(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view?usp=sharing", file_id)
}

/// 画像をフォルダへアップロードし、共有リンクを返す
pub async fn upload_image(
    client: &reqwest::Client,
    token: &str,
    folder_id: &str,
    image_path: &Path,
    view: ViewName,
) -> Result<String> {
    let media = std::fs::read(image_path)?;
    let file_name = upload_file_name(view, &Local::now());
    let metadata = serde_json::json!({
        "name": file_name,
        "parents": [folder_id],
    })
    .to_string();

    let boundary = "pallet_count_upload";
    let body = multipart_related_body(&metadata, &media, boundary);

    let response = client
        .post(UPLOAD_URL)
        .bearer_auth(token)
        .query(&[("uploadType", "multipart"), ("fields", "id")])
        .header(
            "Content-Type",
            format!("multipart/related; boundary={}", boundary),
        )
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(PalletError::Drive(format!(
            "{}アップロード status {}: {}",
            view.label(),
            status,
            text
        )));
    }

    let uploaded: DriveFile = response.json().await?;
    Ok(share_link(&uploaded.id))
}
