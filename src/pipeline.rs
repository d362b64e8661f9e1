//! 一括読取パイプライン
//!
//! 選択されたファイルを1件ずつ順番に処理する:
//! 1. 種別チェック（image/*）
//! 2. サイズチェック
//! 3. QRデコード
//! 4. ペイロード判定
//! 5. 予約削除（DELETE）
//!
//! 各ファイルは次のファイルを始める前に必ず終端状態になる。
//! ファイル単位のエラーはそのファイルの結果になるだけで、バッチは止めない。

use crate::decoder::QrDecoder;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::progress::{NoopProgress, ProgressEvent, ProgressSink};
use crate::scanner::ScanFile;
use meeting_qr_common::{BatchController, BatchRun, ScanError};
use tracing::{debug, info};

type Outcome = std::result::Result<(), ScanError>;

/// デコード前のチェック（種別→サイズの順）
pub fn check_file(file: &ScanFile, max_file_size: u64) -> Outcome {
    if !file.is_image() {
        return Err(ScanError::InvalidFileType);
    }
    if file.size > max_file_size {
        return Err(ScanError::FileTooLarge {
            max_bytes: max_file_size,
        });
    }
    Ok(())
}

pub struct Pipeline<D: Dispatcher> {
    controller: BatchController,
    decoder: QrDecoder,
    dispatcher: D,
    max_file_size: u64,
    progress: Box<dyn ProgressSink>,
}

impl<D: Dispatcher> Pipeline<D> {
    pub fn new(dispatcher: D, max_file_size: u64) -> Self {
        Self {
            controller: BatchController::new(),
            decoder: QrDecoder::new(),
            dispatcher,
            max_file_size,
            progress: Box::new(NoopProgress),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// 現在の状態
    pub fn state(&self) -> &BatchRun {
        self.controller.run()
    }

    /// 結果を破棄して初期状態へ（処理中は不可）
    pub fn reset(&mut self) -> Result<()> {
        self.controller.reset()?;
        Ok(())
    }

    /// ファイル一式を処理して最終状態を返す
    pub async fn run(&mut self, files: &[ScanFile]) -> Result<BatchRun> {
        self.controller
            .submit(files.iter().map(|f| f.file_name.clone()))?;
        self.progress.on_event(&ProgressEvent::Started { total: files.len() });
        info!(total = files.len(), "バッチ開始");

        for (index, file) in files.iter().enumerate() {
            self.progress.on_event(&ProgressEvent::ItemStarted {
                index,
                file_name: file.file_name.clone(),
            });

            let outcome = self.process(index, file).await?;
            if let Err(e) = &outcome {
                debug!(file = %file.file_name, kind = e.kind(), error = ?e, "ファイル処理失敗");
            }
            let summary = self.controller.finish(index, outcome)?;

            let run = self.controller.run();
            self.progress.on_event(&ProgressEvent::ItemFinished {
                index,
                item: run.items[index].clone(),
                processed: run.processed,
                total: run.total,
            });

            if let Some(summary) = summary {
                info!(
                    succeeded = summary.succeeded,
                    failed = summary.failed,
                    "バッチ完了"
                );
                self.progress.on_event(&ProgressEvent::Finished { summary });
            }
        }

        Ok(self.controller.snapshot())
    }

    async fn process(&mut self, index: usize, file: &ScanFile) -> Result<Outcome> {
        if let Err(e) = check_file(file, self.max_file_size) {
            return Ok(Err(e));
        }

        self.controller.begin(index)?;

        let payload = match self.decoder.decode_file(&file.path).await {
            Ok(payload) => payload,
            Err(e) => return Ok(Err(e)),
        };

        if !self.controller.record_payload(index, payload.as_str())? {
            return Ok(Err(ScanError::PayloadInvalid));
        }

        Ok(self.dispatcher.delete_booking(&payload).await)
    }
}
