// ==========================================
// 外呼日志校验器 - 来源错误
// ==========================================
// 拉取侧失败，不会转换为 ValidationResult
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("No outreach log files found matching '{prefix}' in {location}")]
    NoLogFiles { prefix: String, location: String },

    #[error("Log object not found: {0}")]
    NotFound(String),

    #[error("Failed to read {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Log object {key} is not valid UTF-8: {message}")]
    Decode { key: String, message: String },

    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

pub type SourceResult<T> = Result<T, SourceError>;
