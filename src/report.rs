//! 読取結果レポート（JSON）

use crate::error::Result;
use meeting_qr_common::BatchRun;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub started_at: String,
    pub finished_at: String,
    #[serde(flatten)]
    pub run: BatchRun,
}

impl ScanReport {
    pub fn new(started_at: String, run: BatchRun) -> Self {
        Self {
            started_at,
            finished_at: now(),
            run,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// 現在時刻（RFC 3339）
pub fn now() -> String {
    chrono::Local::now().to_rfc3339()
}
