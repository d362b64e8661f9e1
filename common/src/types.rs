//! 読取結果の型定義
//!
//! CLIと状態機械で共有される型:
//! - ScanItem: ファイル1件分の処理状態
//! - BatchRun: 1回のファイル選択に対する集計
//! - RunSummary: 全件終了時のまとめ

use serde::{Deserialize, Serialize};
use std::fmt;

/// ファイル1件の処理状態
///
/// 前方向にしか進まない。success / error は終端。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    #[default]
    Pending,
    Processing,
    Success,
    Error,
}

impl ScanStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ScanStatus::Success | ScanStatus::Error)
    }

    /// 遷移可能か
    ///
    /// pending → processing / error（ガードで弾かれた場合）
    /// processing → success / error
    pub fn can_advance_to(self, next: ScanStatus) -> bool {
        matches!(
            (self, next),
            (ScanStatus::Pending, ScanStatus::Processing)
                | (ScanStatus::Pending, ScanStatus::Error)
                | (ScanStatus::Processing, ScanStatus::Success)
                | (ScanStatus::Processing, ScanStatus::Error)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScanStatus::Pending => "pending",
            ScanStatus::Processing => "processing",
            ScanStatus::Success => "success",
            ScanStatus::Error => "error",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ファイル1件分の読取結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanItem {
    /// 表示用ファイル名（一意とは限らない）
    pub file_name: String,

    pub status: ScanStatus,

    #[serde(default)]
    pub message: String,

    /// QRコードから読み取った生テキスト
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded_payload: Option<String>,

    #[serde(default)]
    pub is_valid_payload: bool,
}

impl ScanItem {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// デコードはできたが形式が不正なペイロード（診断表示用）
    pub fn invalid_payload(&self) -> Option<&str> {
        match (&self.decoded_payload, self.is_valid_payload) {
            (Some(payload), false) => Some(payload.as_str()),
            _ => None,
        }
    }
}

/// バッチ全体の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

/// 全件終了時のまとめ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub status: RunStatus,
    pub succeeded: usize,
    pub failed: usize,
    pub message: String,
}

impl RunSummary {
    /// 終端状態の件数から集計
    ///
    /// 1件でも成功があれば success、0件なら error。
    pub fn from_items(items: &[ScanItem]) -> Self {
        let succeeded = items
            .iter()
            .filter(|i| i.status == ScanStatus::Success)
            .count();
        let failed = items
            .iter()
            .filter(|i| i.status == ScanStatus::Error)
            .count();

        let status = if succeeded > 0 {
            RunStatus::Success
        } else {
            RunStatus::Error
        };

        Self {
            status,
            succeeded,
            failed,
            message: format!("{} succeeded, {} failed", succeeded, failed),
        }
    }
}

/// 1回のファイル選択に対する集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRun {
    pub total: usize,
    pub processed: usize,
    pub items: Vec<ScanItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
}

impl BatchRun {
    /// 進捗率（0.0〜1.0、total=0 のときは 0）
    pub fn progress_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0 && self.items.is_empty()
    }

    pub fn has_processing(&self) -> bool {
        self.items.iter().any(|i| i.status == ScanStatus::Processing)
    }
}
