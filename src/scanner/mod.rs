mod media;

pub use media::{is_image_media_type, media_type_for};

use crate::error::{MeetingQrError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// 読取対象ファイル1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFile {
    pub path: PathBuf,
    pub file_name: String,
    /// バイト数
    pub size: u64,
    /// 宣言上のメディアタイプ（拡張子から判定）
    pub media_type: String,
}

impl ScanFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .map_err(|_| MeetingQrError::FileNotFound(path.display().to_string()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size: metadata.len(),
            media_type: media_type_for(path).to_string(),
        })
    }

    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }
}

/// 引数のパスから読取対象を集める
///
/// - ファイル: 引数の順のまま（画像以外も含める。後段でエラーとして報告する）
/// - フォルダ: 直下（recursive なら配下すべて）をパス順で。隠しファイルは除外
pub fn collect_files(paths: &[PathBuf], recursive: bool) -> Result<Vec<ScanFile>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(MeetingQrError::FileNotFound(path.display().to_string()));
        }

        if path.is_dir() {
            let (found, skipped) = scan_folder(path, recursive)?;
            if skipped > 0 {
                warn!(folder = %path.display(), skipped, "読み取れないエントリがありました");
            }
            files.extend(found);
        } else {
            files.push(ScanFile::from_path(path)?);
        }
    }

    Ok(files)
}

/// フォルダ内のファイルと、読み取れずに飛ばしたエントリ数
fn scan_folder(folder: &Path, recursive: bool) -> Result<(Vec<ScanFile>, usize)> {
    let mut walker = WalkDir::new(folder).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = ?e.path(), error = %e, "エントリを読み取れないためスキップ");
                skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        files.push(ScanFile::from_path(entry.path())?);
    }

    // パス順でソート
    files.sort_by(|a, b| a.path.cmp(&b.path));

    Ok((files, skipped))
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
