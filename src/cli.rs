use crate::detector::ViewName;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pallet-count")]
#[command(about = "パレット検出・集計ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話セッションを実行（入力→検出→集計→保存）
    Run {
        /// 正面画像のパス（省略時はプロンプトで入力）
        #[arg(long)]
        front: Option<PathBuf>,

        /// 側面画像のパス（省略時はプロンプトで入力）
        #[arg(long)]
        side: Option<PathBuf>,
    },

    /// 画像1枚を検出して数を表示
    Detect {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// ビュー (front/side)
        #[arg(short = 'w', long, default_value = "front")]
        view: ViewName,
    },

    /// 設定を表示/編集
    Config {
        /// 検出APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 記録先スプレッドシートキーを設定
        #[arg(long)]
        set_spreadsheet_key: Option<String>,

        /// Drive保存先フォルダ名を設定
        #[arg(long)]
        set_folder_name: Option<String>,

        /// サービスアカウントJSONのパスを設定
        #[arg(long)]
        set_service_account: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
