pub mod cli;
pub mod config;
pub mod decoder;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod scanner;

pub use meeting_qr_common as common;
