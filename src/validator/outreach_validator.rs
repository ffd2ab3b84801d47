// ==========================================
// 外呼日志校验器 - 校验流水线
// ==========================================
// 对单个文件按固定顺序执行全部检查，互不短路
// 所有结果汇入同一个 ValidationResult
// ==========================================

use crate::calendar::HolidayCalendar;
use crate::config::{ConfigResult, OutreachSchema, ValidatorConfig};
use crate::domain::outreach::ValidationResult;
use crate::validator::check::{LogFile, OutreachLogCheck};
use crate::validator::dq_validator::DataQualityCheck;
use crate::validator::file_name::{FileNameCheck, GenerationTimeCheck};
use crate::validator::header_mapper::HeaderCheck;
use crate::validator::line_endings::LineEndingCheck;
use crate::validator::row_cleaner::FragmentDetector;
use crate::validator::structure::{BlackoutDayCheck, MinimumStructureCheck, TrailingBlankRowCheck};
use tracing::{debug, info, instrument};

pub struct OutreachLogValidator {
    config: ValidatorConfig,
    schema: OutreachSchema,
    checks: Vec<Box<dyn OutreachLogCheck>>,
}

impl OutreachLogValidator {
    /// 构建检查流水线，仅在配置无效时失败
    pub fn new(config: ValidatorConfig) -> ConfigResult<Self> {
        config.validate()?;
        let schema = config.resolved_schema();
        let fragments = FragmentDetector::from_config(&config);
        let columns = schema.column_count();

        let checks: Vec<Box<dyn OutreachLogCheck>> = vec![
            Box::new(LineEndingCheck::new(columns, fragments.clone())),
            Box::new(TrailingBlankRowCheck),
            Box::new(BlackoutDayCheck::new(HolidayCalendar::new(
                config.extra_holidays.clone(),
            ))),
            Box::new(FileNameCheck::new(&config.file_name_prefix)?),
            Box::new(GenerationTimeCheck::new(
                schema.expected_generation_hour,
                config.generation_tolerance_minutes,
                config.strictness,
            )),
            Box::new(MinimumStructureCheck::new(columns)),
            Box::new(HeaderCheck::new(config.strictness)),
            Box::new(DataQualityCheck::new(
                schema.clone(),
                config.phone_policy,
                fragments,
            )),
        ];

        info!(
            schema = %schema.name,
            columns,
            strictness = %config.strictness,
            "外呼日志校验器就绪"
        );
        Ok(Self {
            config,
            schema,
            checks,
        })
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn schema(&self) -> &OutreachSchema {
        &self.schema
    }

    #[instrument(skip(self, content), fields(schema = %self.schema.name, bytes = content.len()))]
    pub fn validate_outreach_log(&self, file_name: &str, content: &str) -> ValidationResult {
        let file = LogFile::parse(file_name, content, &self.schema);
        let mut result = ValidationResult::new(file_name);

        for check in &self.checks {
            let before = result.errors.len();
            check.run(&file, &mut result);
            debug!(
                check = check.name(),
                new_errors = result.errors.len() - before,
                "检查完成"
            );
        }

        info!(
            compliant = result.is_compliant(),
            errors = result.errors.len(),
            failed = ?result.failed_flags(),
            "校验汇总"
        );
        result
    }
}
