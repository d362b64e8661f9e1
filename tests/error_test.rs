//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use meeting_qr::common::{BatchError, ScanError};
use meeting_qr::error::MeetingQrError;
use meeting_qr::scanner;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しないパスを指定した場合
#[test]
fn test_collect_nonexistent_path() {
    let result = scanner::collect_files(&[PathBuf::from("/nonexistent/path/12345")], false);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, MeetingQrError::FileNotFound(_)));
}

/// 空のフォルダを指定した場合
#[test]
fn test_collect_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::collect_files(&[dir.path().to_path_buf()], false);

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像以外もそのまま対象に含める（後段でエラー表示するため）
#[test]
fn test_collect_folder_keeps_non_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let files = scanner::collect_files(&[dir.path().to_path_buf()], false).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| !f.is_image()));
    assert_eq!(scanner::media_type_for(Path::new("data.json")), "application/json");
}

/// MeetingQrErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        MeetingQrError::Config("テスト設定エラー".to_string()),
        MeetingQrError::FileNotFound("qr.png".to_string()),
        MeetingQrError::NoInputFiles,
        MeetingQrError::InvalidUrl("::".to_string()),
        MeetingQrError::Batch(BatchError::Busy),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// ファイル単位エラーの表示メッセージ
#[test]
fn test_scan_error_messages() {
    let cases = [
        (ScanError::InvalidFileType, "file must be an image"),
        (
            ScanError::FileTooLarge { max_bytes: 5 * 1024 * 1024 },
            "file too large (max 5MB)",
        ),
        (ScanError::DecodeNotFound, "QR code not detected."),
        (ScanError::PayloadInvalid, "QR code not valid"),
        (ScanError::DispatchFailed { message: None }, "failed to delete booking"),
    ];

    for (err, expected) in cases {
        assert_eq!(err.user_message(), expected);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: MeetingQrError = io_err.into();

    assert!(matches!(err, MeetingQrError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: MeetingQrError = json_err.into();

    assert!(matches!(err, MeetingQrError::JsonParse(_)));
}

/// common::BatchErrorからの変換
#[test]
fn test_batch_error_conversion() {
    let err: MeetingQrError = BatchError::Busy.into();

    assert!(matches!(err, MeetingQrError::Batch(BatchError::Busy)));
    let display = format!("{}", err);
    assert!(display.contains("処理中"));
}
