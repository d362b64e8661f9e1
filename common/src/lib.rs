//! Meeting QR Common Library
//!
//! CLIと状態機械で共有される型とユーティリティ（I/Oなし）

pub mod types;
pub mod error;
pub mod payload;
pub mod batch;

pub use types::{BatchRun, RunStatus, RunSummary, ScanItem, ScanStatus};
pub use error::{BatchError, ScanError, DISPATCH_FAILED_MESSAGE};
pub use payload::{booking_token, is_origin_relative, is_valid_payload, DELETE_PATH_MARKER};
pub use batch::{BatchController, PROCESSING_MESSAGE, SUCCESS_MESSAGE};
