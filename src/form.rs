//! 対話式入力セッション
//!
//! 車両番号・管理票番号・撮影画像・段数・確認数を端末プロンプトで
//! 集め、検出→集計→確認→保存の順に1セッション分を処理する。

use crate::config::Config;
use crate::detector::{self, ViewName};
use crate::error::{PalletError, Result};
use crate::persist;
use crate::session::{self, Session};
use chrono::Local;
use dialoguer::Input;
use std::path::PathBuf;

fn prompt_text(prompt: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| PalletError::Prompt(e.to_string()))?;
    Ok(input)
}

fn prompt_with_default(prompt: &str, default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| PalletError::Prompt(e.to_string()))?;
    Ok(input)
}

/// 数値入力。非数値は警告を出して0に落とす。
fn prompt_count_or_zero(prompt: &str, default: u32) -> Result<u32> {
    let text = prompt_with_default(prompt, &default.to_string())?;
    match session::parse_count(&text) {
        Some(n) => Ok(n),
        None => {
            println!("⚠ 数値として解釈できないため 0 として扱います");
            Ok(0)
        }
    }
}

/// 1ビュー分の撮影と検出。画像・検出のエラーはここで表示して
/// (なし, 0) に落とし、セッションは続行する。
async fn capture_view(
    client: &reqwest::Client,
    config: &Config,
    preset: Option<PathBuf>,
    view: ViewName,
) -> Result<(Option<PathBuf>, u32)> {
    let path = match preset {
        Some(p) => Some(p),
        None => {
            let text = prompt_text(&format!(
                "{}画像のパス（空Enterでスキップ）",
                view.label()
            ))?;
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(PathBuf::from(trimmed))
            }
        }
    };

    let Some(path) = path else {
        println!("  → {}撮影をスキップ\n", view.label());
        return Ok((None, 0));
    };

    match detector::prepare_capture(&path, view) {
        Ok(temp_path) => {
            let result = detector::detect_or_zero(client, config, &temp_path, view).await;
            println!("  ✔ {}検出: {}パレット\n", view.label(), result.detected_count);
            Ok((Some(temp_path), result.detected_count))
        }
        Err(e) => {
            eprintln!("⚠ {}画像の読み込みエラー: {}\n", view.label(), e);
            Ok((None, 0))
        }
    }
}

/// 対話セッションを実行する
pub async fn run_session(
    config: &Config,
    front: Option<PathBuf>,
    side: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let mut session = Session::new();
    let client = reqwest::Client::new();

    // 1. 入力
    println!("[1/4] 車両・管理票の入力");
    session.submission.truck_text = prompt_text("車両番号")?;
    session.submission.document_text =
        prompt_text("パレット管理票番号（PTは付けない、例: 1234）")?;
    println!();

    // 2. 撮影・検出
    println!("[2/4] パレット撮影・検出");
    let (front_image, front_count) =
        capture_view(&client, config, front, ViewName::Front).await?;
    let (side_image, side_count) = capture_view(&client, config, side, ViewName::Side).await?;
    session.submission.front_image = front_image;
    session.submission.side_image = side_image;
    session.submission.front_count = front_count;
    session.submission.side_count = side_count;

    // 3. 集計（合計に使うのは正面検出数のみ。側面は参考値として表示する）
    println!("[3/4] 集計");
    session.submission.layer_count = prompt_count_or_zero("段数", 1)?;
    session.submission.total_pallets =
        session::compute_total(session.submission.front_count, session.submission.layer_count);
    println!(
        "  正面: {}  側面: {}  段数: {}",
        session.submission.front_count,
        session.submission.side_count,
        session.submission.layer_count
    );
    println!("  合計パレット数: {}\n", session.submission.total_pallets);

    session.submission.confirmed_count =
        prompt_count_or_zero("確認パレット数", session.submission.total_pallets)?;
    session.submission.timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    println!();

    // 4. 保存
    println!("[4/4] 保存");
    let answer = prompt_with_default("保存しますか？ (y/n)", "y")?;
    if !answer.trim().eq_ignore_ascii_case("y") {
        println!("保存せずに終了します");
        return Ok(());
    }

    // ガードはネットワーク呼び出しの前に立てる
    if !session.try_begin_save() {
        println!("⚠ このセッションでは既に送信済みです");
        return Ok(());
    }

    match persist::save_submission(config, &session.submission, verbose).await {
        Ok(record) => {
            println!("✅ DriveとSheetsへ保存しました");
            println!("  正面: {}", record.front_link);
            println!("  側面: {}", record.side_link);
        }
        Err(e) => {
            // ガードは戻さない（同一セッション内の再送は不可）
            eprintln!("⚠ 保存に失敗しました: {}", e);
        }
    }

    Ok(())
}
