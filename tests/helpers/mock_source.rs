// ==========================================
// Mock 日志来源 - 集成测试用
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use outreach_log_validator::source::{FetchedLog, LogObject, LogSource, SourceError, SourceResult};
use std::collections::HashMap;
use std::io;

/// 内存存储桶，未登记内容的对象拉取时失败
#[derive(Default)]
pub struct MockLogSource {
    objects: Vec<LogObject>,
    bodies: HashMap<String, String>,
    list_fails: bool,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, key: &str, modified: DateTime<Utc>, content: &str) -> Self {
        self.objects.push(LogObject {
            key: key.to_string(),
            last_modified: modified,
        });
        self.bodies.insert(key.to_string(), content.to_string());
        self
    }

    /// 可列举但不可读取
    pub fn with_broken_object(mut self, key: &str, modified: DateTime<Utc>) -> Self {
        self.objects.push(LogObject {
            key: key.to_string(),
            last_modified: modified,
        });
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.list_fails = true;
        self
    }
}

#[async_trait]
impl LogSource for MockLogSource {
    fn location(&self) -> String {
        "mock://outreach-bucket".to_string()
    }

    async fn list(&self) -> SourceResult<Vec<LogObject>> {
        if self.list_fails {
            return Err(SourceError::Io {
                key: self.location(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "bucket unreachable"),
            });
        }
        Ok(self.objects.clone())
    }

    async fn fetch(&self, key: &str) -> SourceResult<FetchedLog> {
        match self.bodies.get(key) {
            Some(content) => Ok(FetchedLog {
                key: key.to_string(),
                content: content.clone(),
            }),
            None => Err(SourceError::Io {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::TimedOut, "read timed out"),
            }),
        }
    }
}

/// 2025-06-<day> 23:00 UTC
pub fn june(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, 23, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}
