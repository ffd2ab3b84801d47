// ==========================================
// 外呼日志校验器 - 审计错误
// ==========================================

use crate::config::ConfigError;
use crate::source::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Invalid validator configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type AuditResult<T> = Result<T, AuditError>;
