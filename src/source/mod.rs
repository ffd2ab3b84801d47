// ==========================================
// 外呼日志校验器 - 日志来源
// ==========================================
// 调用方协作者: 校验前列举并拉取日志对象
// 拉取 I/O 与校验器完全解耦
// ==========================================

pub mod error;
pub mod local_dir;

pub use error::{SourceError, SourceResult};
pub use local_dir::LocalDirSource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogObject {
    pub key: String,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedLog {
    pub key: String,
    pub content: String,
}

// ==========================================
// LogSource Trait
// ==========================================
// 用途: 从类存储桶的位置列举/拉取外呼日志对象
// 实现者: LocalDirSource（测试使用内存 mock）
#[async_trait]
pub trait LogSource: Send + Sync {
    /// 用于日志事件和错误信息的位置描述
    fn location(&self) -> String;

    async fn list(&self) -> SourceResult<Vec<LogObject>>;

    /// 完整对象内容，按 UTF-8 解码
    async fn fetch(&self, key: &str) -> SourceResult<FetchedLog>;
}

fn is_log_key(key: &str, prefix: &str) -> bool {
    key.contains(prefix) && key.ends_with(".csv")
}

/// 按修改时间取最新的匹配对象（时间相同时比较 key）
pub fn select_latest(objects: &[LogObject], prefix: &str, location: &str) -> SourceResult<LogObject> {
    objects
        .iter()
        .filter(|o| is_log_key(&o.key, prefix))
        .max_by(|a, b| {
            a.last_modified
                .cmp(&b.last_modified)
                .then_with(|| a.key.cmp(&b.key))
        })
        .cloned()
        .ok_or_else(|| SourceError::NoLogFiles {
            prefix: prefix.to_string(),
            location: location.to_string(),
        })
}

/// `since` 及之后修改的匹配对象，按时间升序
pub fn select_since(objects: &[LogObject], prefix: &str, since: DateTime<Utc>) -> Vec<LogObject> {
    let mut selected: Vec<LogObject> = objects
        .iter()
        .filter(|o| is_log_key(&o.key, prefix) && o.last_modified >= since)
        .cloned()
        .collect();
    selected.sort_by(|a, b| {
        a.last_modified
            .cmp(&b.last_modified)
            .then_with(|| a.key.cmp(&b.key))
    });
    selected
}
