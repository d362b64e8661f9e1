//! エラー型定義
//!
//! - ScanError: ファイル単位のエラー（バッチは止めない）
//! - BatchError: 状態遷移の誤用

use crate::types::ScanStatus;
use thiserror::Error;

/// ファイル単位のエラー
///
/// すべてそのファイルの終端状態（error）に変換され、バッチ全体には伝播しない。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("file must be an image")]
    InvalidFileType,

    #[error("file too large (max {})", size_limit(.max_bytes))]
    FileTooLarge { max_bytes: u64 },

    #[error("QR code not detected.")]
    DecodeNotFound,

    #[error("QR code not valid")]
    PayloadInvalid,

    #[error("{}", dispatch_message(.message))]
    DispatchFailed { message: Option<String> },

    #[error("failed to load image")]
    ImageLoadFailed(String),
}

/// サーバーがメッセージを返さなかった場合の汎用メッセージ
pub const DISPATCH_FAILED_MESSAGE: &str = "failed to delete booking";

const MIB: u64 = 1024 * 1024;

/// 上限の表示（MiB単位で割り切れるときだけ MB 表記）
fn size_limit(bytes: &u64) -> String {
    if *bytes > 0 && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

fn dispatch_message(message: &Option<String>) -> &str {
    match message.as_deref() {
        Some(m) if !m.is_empty() => m,
        _ => DISPATCH_FAILED_MESSAGE,
    }
}

impl ScanError {
    /// 画面表示用メッセージ
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// ログ・レポート用の分類名
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::InvalidFileType => "invalid_file_type",
            ScanError::FileTooLarge { .. } => "file_too_large",
            ScanError::DecodeNotFound => "decode_not_found",
            ScanError::PayloadInvalid => "payload_invalid",
            ScanError::DispatchFailed { .. } => "dispatch_failed",
            ScanError::ImageLoadFailed(_) => "image_load_failed",
        }
    }
}

/// バッチ状態機械のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("処理中のファイルがあるため操作できません")]
    Busy,

    #[error("インデックスが範囲外です: {index} (件数: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("不正な状態遷移: {from} -> {to}")]
    InvalidTransition { from: ScanStatus, to: ScanStatus },

    #[error("処理中ではありません: {0}")]
    NotProcessing(usize),

    #[error("デコード結果は記録済みです: {0}")]
    PayloadAlreadyRecorded(usize),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, BatchError>;
