// ==========================================
// 外呼日志校验器 - 本地目录来源
// ==========================================
// 以平铺目录代替投递存储桶
// key 为相对根目录的文件名
// ==========================================

use crate::source::error::{SourceError, SourceResult};
use crate::source::{FetchedLog, LogObject, LogSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

pub struct LocalDirSource {
    root: PathBuf,
}

impl LocalDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> SourceResult<PathBuf> {
        let relative = Path::new(key);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if key.is_empty() || !plain {
            return Err(SourceError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }

    fn io_error(key: &str, source: std::io::Error) -> SourceError {
        if source.kind() == ErrorKind::NotFound {
            SourceError::NotFound(key.to_string())
        } else {
            SourceError::Io {
                key: key.to_string(),
                source,
            }
        }
    }
}

#[async_trait]
impl LogSource for LocalDirSource {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    async fn list(&self) -> SourceResult<Vec<LogObject>> {
        let location = self.location();
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| Self::io_error(&location, e))?;

        let mut objects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Self::io_error(&location, e))?
        {
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| Self::io_error(&location, e))?;
            if !metadata.is_file() {
                continue;
            }
            let Some(key) = entry.file_name().to_str().map(str::to_string) else {
                debug!(path = %entry.path().display(), "跳过非 UTF-8 文件名");
                continue;
            };
            let modified = metadata
                .modified()
                .map_err(|e| Self::io_error(&key, e))?;
            objects.push(LogObject {
                key,
                last_modified: DateTime::<Utc>::from(modified),
            });
        }

        info!(location = %location, objects = objects.len(), "日志来源列举完成");
        Ok(objects)
    }

    async fn fetch(&self, key: &str) -> SourceResult<FetchedLog> {
        let path = self.resolve(key)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| Self::io_error(key, e))?;
        let content = String::from_utf8(bytes).map_err(|e| SourceError::Decode {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        debug!(key, bytes = content.len(), "日志对象拉取完成");
        Ok(FetchedLog {
            key: key.to_string(),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_list_and_fetch() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("KAI_Kredos_outreach_log_20250610180000.csv"), "H\r\n").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let source = LocalDirSource::new(dir.path());
        let objects = source.list().await.unwrap();
        assert_eq!(objects.len(), 1);

        let fetched = source.fetch(&objects[0].key).await.unwrap();
        assert_eq!(fetched.content, "H\r\n");
    }

    #[tokio::test]
    async fn test_fetch_missing() {
        let dir = tempdir().unwrap();
        let source = LocalDirSource::new(dir.path());
        let err = source.fetch("missing.csv").await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_rejects_traversal() {
        let dir = tempdir().unwrap();
        let source = LocalDirSource::new(dir.path());
        let err = source.fetch("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, SourceError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_fetch_non_utf8() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bad.csv"), [0xff, 0xfe, 0x00]).unwrap();
        let source = LocalDirSource::new(dir.path());
        let err = source.fetch("bad.csv").await.unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_list_missing_dir() {
        let source = LocalDirSource::new("/nonexistent/outreach/logs");
        assert!(source.list().await.is_err());
    }
}
