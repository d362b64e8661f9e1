use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeetingQrError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("読み取る画像が指定されていません")]
    NoInputFiles,

    #[error("不正なURL: {0}")]
    InvalidUrl(String),

    #[error("HTTPクライアント初期化エラー: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("バッチ状態エラー: {0}")]
    Batch(#[from] meeting_qr_common::BatchError),
}

pub type Result<T> = std::result::Result<T, MeetingQrError>;
