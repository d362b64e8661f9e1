use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meeting-qr")]
#[command(about = "会議室予約QRコード一括読取・会議終了ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// QRコード画像を読み取り、該当する予約を削除（会議終了）
    Scan {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 確認なしで実行
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// QRコードを読み取って内容を表示するだけ（削除しない）
    Decode {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 基準URLを設定（例: http://localhost:8080）
        #[arg(long)]
        set_base_url: Option<String>,

        /// APIトークンを設定
        #[arg(long)]
        set_token: Option<String>,

        /// APIトークンを削除
        #[arg(long, conflicts_with = "set_token")]
        clear_token: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
