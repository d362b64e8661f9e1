//! 進捗通知
//!
//! パイプラインは状態が変わるたびにイベントを送る。
//! CLIではindicatifのプログレスバーで表示する。

use indicatif::{ProgressBar, ProgressStyle};
use meeting_qr_common::{RunSummary, ScanItem, ScanStatus};

/// パイプラインから送られるイベント
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// バッチ開始
    Started { total: usize },
    /// ファイルの処理開始
    ItemStarted { index: usize, file_name: String },
    /// ファイルが終端状態に到達
    ItemFinished {
        index: usize,
        item: ScanItem,
        processed: usize,
        total: usize,
    },
    /// 全件終了
    Finished { summary: RunSummary },
}

pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: &ProgressEvent);
}

/// 何もしない
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn on_event(&self, _event: &ProgressEvent) {}
}

/// ターミナル用プログレスバー
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .map(|s| s.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn on_event(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { total } => {
                self.bar.set_length(*total as u64);
                self.bar.set_position(0);
            }
            ProgressEvent::ItemStarted { file_name, .. } => {
                self.bar.set_message(file_name.clone());
            }
            ProgressEvent::ItemFinished { item, processed, .. } => {
                self.bar.set_position(*processed as u64);
                let mark = if item.status == ScanStatus::Success { "✔" } else { "✖" };
                self.bar
                    .println(format!("  {} {} - {}", mark, item.file_name, item.message));
            }
            ProgressEvent::Finished { summary } => {
                self.bar.finish_with_message(summary.message.clone());
            }
        }
    }
}
