//! バッチ状態機械
//!
//! BatchRun の唯一の所有者。表示側はスナップショットを読むだけで、
//! 変更は submit / begin / record_payload / finish / reset の遷移に限る。

use crate::error::{BatchError, Result, ScanError};
use crate::payload::is_valid_payload;
use crate::types::{BatchRun, RunSummary, ScanItem, ScanStatus};

/// 処理開始時のメッセージ
pub const PROCESSING_MESSAGE: &str = "processing...";

/// 削除成功時のメッセージ
pub const SUCCESS_MESSAGE: &str = "meeting ended.";

#[derive(Debug, Default)]
pub struct BatchController {
    run: BatchRun,
}

impl BatchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の状態（読み取り専用）
    pub fn run(&self) -> &BatchRun {
        &self.run
    }

    /// 現在の状態のコピー
    pub fn snapshot(&self) -> BatchRun {
        self.run.clone()
    }

    /// 新しいファイル選択を受け付ける
    ///
    /// 以前の結果は破棄される。処理中のファイルがある間は不可。
    pub fn submit<I, S>(&mut self, file_names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.run.has_processing() {
            return Err(BatchError::Busy);
        }

        let items: Vec<ScanItem> = file_names.into_iter().map(ScanItem::new).collect();
        self.run = BatchRun {
            total: items.len(),
            processed: 0,
            items,
            summary: None,
        };
        Ok(())
    }

    /// pending → processing
    ///
    /// 同時に処理中にできるのは1件だけ。
    pub fn begin(&mut self, index: usize) -> Result<()> {
        if self.run.has_processing() {
            return Err(BatchError::Busy);
        }

        let item = self.item_mut(index)?;
        advance(item, ScanStatus::Processing)?;
        item.message = PROCESSING_MESSAGE.to_string();
        Ok(())
    }

    /// デコード結果を記録（1回のみ）
    ///
    /// 形式判定もここで行い、以後 is_valid_payload は変わらない。
    pub fn record_payload(&mut self, index: usize, payload: impl Into<String>) -> Result<bool> {
        let item = self.item_mut(index)?;
        if item.status != ScanStatus::Processing {
            return Err(BatchError::NotProcessing(index));
        }
        if item.decoded_payload.is_some() {
            return Err(BatchError::PayloadAlreadyRecorded(index));
        }

        let payload = payload.into();
        item.is_valid_payload = is_valid_payload(&payload);
        item.decoded_payload = Some(payload);
        Ok(item.is_valid_payload)
    }

    /// 終端状態へ遷移
    ///
    /// 全件が終端に達したらまとめを返す。
    pub fn finish(
        &mut self,
        index: usize,
        outcome: std::result::Result<(), ScanError>,
    ) -> Result<Option<RunSummary>> {
        let item = self.item_mut(index)?;
        match outcome {
            Ok(()) => {
                advance(item, ScanStatus::Success)?;
                item.message = SUCCESS_MESSAGE.to_string();
            }
            Err(err) => {
                advance(item, ScanStatus::Error)?;
                item.message = err.user_message();
            }
        }

        self.run.processed += 1;
        debug_assert!(self.run.processed <= self.run.total);

        if self.run.processed == self.run.total {
            let summary = RunSummary::from_items(&self.run.items);
            self.run.summary = Some(summary.clone());
            return Ok(Some(summary));
        }
        Ok(None)
    }

    /// 初期状態へ戻す
    ///
    /// 処理中のファイルがある間は不可。何度呼んでも結果は同じ。
    pub fn reset(&mut self) -> Result<()> {
        if self.run.has_processing() {
            return Err(BatchError::Busy);
        }
        self.run = BatchRun::default();
        Ok(())
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut ScanItem> {
        let len = self.run.items.len();
        self.run
            .items
            .get_mut(index)
            .ok_or(BatchError::IndexOutOfRange { index, len })
    }
}

fn advance(item: &mut ScanItem, next: ScanStatus) -> Result<()> {
    if !item.status.can_advance_to(next) {
        return Err(BatchError::InvalidTransition {
            from: item.status,
            to: next,
        });
    }
    item.status = next;
    Ok(())
}
