use clap::Parser;
use pallet_count_rust::{cli, config, detector, form};

use cli::{Cli, Commands};
use config::Config;
use pallet_count_rust::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Run { front, side } => {
            println!("📦 pallet-count - パレット集計\n");
            form::run_session(&config, front, side, cli.verbose).await?;
        }

        Commands::Detect { image, view } => {
            println!("📦 pallet-count - 検出\n");

            let temp_path = detector::prepare_capture(&image, view)?;
            if cli.verbose {
                println!("  一時画像: {}", temp_path.display());
            }

            let result = detector::detect_or_zero(
                &reqwest::Client::new(),
                &config,
                &temp_path,
                view,
            )
            .await;
            println!("✔ {}検出: {}パレット", view.label(), result.detected_count);
        }

        Commands::Config {
            set_api_key,
            set_spreadsheet_key,
            set_folder_name,
            set_service_account,
            show,
        } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ 検出APIキーを設定しました");
            }

            if let Some(key) = set_spreadsheet_key {
                config.set_spreadsheet_key(key)?;
                println!("✔ スプレッドシートキーを設定しました");
            }

            if let Some(name) = set_folder_name {
                config.set_folder_name(name)?;
                println!("✔ フォルダ名を設定しました");
            }

            if let Some(path) = set_service_account {
                config.set_service_account(path)?;
                println!("✔ サービスアカウントを設定しました");
            }

            if show {
                println!("設定:");
                println!("  検出モデル: {}", config.detection_model);
                println!("  保存先フォルダ: {}", config.drive_folder_name);
                println!(
                    "  スプレッドシートキー: {}",
                    if config.spreadsheet_key.is_some() { "設定済み" } else { "未設定" }
                );
                println!(
                    "  検出APIキー: {}",
                    if config.api_key.is_some() { "設定済み" } else { "未設定" }
                );
                println!(
                    "  サービスアカウント: {}",
                    config
                        .service_account_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".to_string())
                );
            }
        }
    }

    Ok(())
}
