// ==========================================
// 外呼日志校验器 - 审计服务
// ==========================================
// 基于 LogSource 先拉取后校验
// 拉取失败保持为错误，只校验已拉取的内容
// ==========================================

pub mod error;

pub use error::{AuditError, AuditResult};

use crate::config::ValidatorConfig;
use crate::domain::outreach::ValidationResult;
use crate::source::{select_latest, select_since, LogObject, LogSource, SourceError};
use crate::validator::OutreachLogValidator;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// 批量运行中单个对象的结果
#[derive(Debug)]
pub struct AuditedFile {
    pub key: String,
    pub outcome: Result<ValidationResult, SourceError>,
}

impl AuditedFile {
    pub fn is_compliant(&self) -> bool {
        matches!(&self.outcome, Ok(result) if result.is_compliant())
    }
}

#[derive(Debug)]
pub struct AuditRun {
    pub run_id: Uuid,
    pub files: Vec<AuditedFile>,
}

impl AuditRun {
    pub fn compliant_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_compliant()).count()
    }

    pub fn fetch_failures(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_err()).count()
    }

    pub fn all_compliant(&self) -> bool {
        self.files.iter().all(AuditedFile::is_compliant)
    }
}

// ==========================================
// OutreachLogAudit
// ==========================================
pub struct OutreachLogAudit<S: LogSource> {
    source: S,
    validator: OutreachLogValidator,
}

impl<S: LogSource> OutreachLogAudit<S> {
    pub fn new(source: S, config: ValidatorConfig) -> AuditResult<Self> {
        Ok(Self {
            source,
            validator: OutreachLogValidator::new(config)?,
        })
    }

    pub fn with_validator(source: S, validator: OutreachLogValidator) -> Self {
        Self { source, validator }
    }

    pub fn validator(&self) -> &OutreachLogValidator {
        &self.validator
    }

    fn prefix(&self) -> &str {
        &self.validator.config().file_name_prefix
    }

    /// 校验来源中最新的日志对象
    pub async fn validate_latest(&self) -> AuditResult<ValidationResult> {
        let run_id = Uuid::new_v4();
        async {
            let objects = self.source.list().await?;
            let latest = select_latest(&objects, self.prefix(), &self.source.location())?;
            info!(key = %latest.key, last_modified = %latest.last_modified, "已选定最新日志");

            let fetched = self.source.fetch(&latest.key).await?;
            Ok::<_, AuditError>(
                self.validator
                    .validate_outreach_log(&fetched.key, &fetched.content),
            )
        }
        .instrument(info_span!("audit_latest", %run_id))
        .await
    }

    /// 并发校验 `since` 及之后修改的全部日志对象
    pub async fn validate_since(&self, since: DateTime<Utc>) -> AuditResult<AuditRun> {
        let run_id = Uuid::new_v4();
        async {
            let objects = self.source.list().await?;
            let selected = select_since(&objects, self.prefix(), since);
            info!(since = %since, selected = selected.len(), "开始批量审计");

            let files = join_all(selected.iter().map(|object| self.audit_one(object))).await;
            let run = AuditRun { run_id, files };

            info!(
                files = run.files.len(),
                compliant = run.compliant_count(),
                fetch_failures = run.fetch_failures(),
                "批量审计完成"
            );
            Ok::<_, AuditError>(run)
        }
        .instrument(info_span!("audit_batch", %run_id))
        .await
    }

    async fn audit_one(&self, object: &LogObject) -> AuditedFile {
        let outcome = match self.source.fetch(&object.key).await {
            Ok(fetched) => Ok(self
                .validator
                .validate_outreach_log(&fetched.key, &fetched.content)),
            Err(e) => {
                warn!(key = %object.key, error = %e, "拉取失败");
                Err(e)
            }
        };
        AuditedFile {
            key: object.key.clone(),
            outcome,
        }
    }
}
