// ==========================================
// 外呼日志校验器 - 样例日志生成器
// ==========================================
// 按表头模式写出合规的外呼日志文件:
// 表头、记录、一个仅含分隔符的空行，全部以 CRLF 结尾
// 停发日只写表头和空行
// ==========================================

use crate::calendar::HolidayCalendar;
use crate::config::{FieldFormat, OutreachSchema, ValidatorConfig};
use chrono::NaiveDateTime;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generated content is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLog {
    pub file_name: String,
    pub content: String,
    pub records: usize,
}

pub struct OutreachLogGenerator {
    schema: OutreachSchema,
    prefix: String,
    calendar: HolidayCalendar,
}

impl OutreachLogGenerator {
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            schema: config.resolved_schema(),
            prefix: config.file_name_prefix.clone(),
            calendar: HolidayCalendar::new(config.extra_holidays.clone()),
        }
    }

    pub fn file_name(&self, generated_at: NaiveDateTime) -> String {
        format!("{}{}.csv", self.prefix, generated_at.format("%Y%m%d%H%M%S"))
    }

    /// 满足模式全部规则的字段值
    pub fn sample_records(&self, generated_at: NaiveDateTime, count: usize) -> Vec<Vec<String>> {
        (0..count)
            .map(|i| {
                let mut row: Vec<String> = self
                    .schema
                    .fields
                    .iter()
                    .map(|rule| match &rule.format {
                        FieldFormat::Free => format!("{}-{:04}", rule.name, i + 1),
                        FieldFormat::Enumerated(values) => {
                            values.get(i % values.len().max(1)).cloned().unwrap_or_default()
                        }
                        FieldFormat::Timestamp(pattern) => {
                            let at = generated_at
                                .date()
                                .and_hms_opt(self.schema.expected_generation_hour, (i % 60) as u32, 0)
                                .unwrap_or(generated_at);
                            at.format(pattern).to_string()
                        }
                        FieldFormat::Phone => format!("555{:07}", i + 1),
                    })
                    .collect();

                for cross in &self.schema.cross_field_rules {
                    let when = self.column(&cross.when_field);
                    let blank = self.column(&cross.blank_field);
                    if let (Some(w), Some(b)) = (when, blank) {
                        if row[w] == cross.equals {
                            row[b].clear();
                        }
                    }
                }
                row
            })
            .collect()
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.schema.fields.iter().position(|f| f.name == name)
    }

    pub fn render(&self, records: &[Vec<String>]) -> GeneratorResult<String> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(Vec::new());

        writer.write_record(self.schema.required_headers())?;
        for record in records {
            writer.write_record(record)?;
        }
        writer.write_record(vec![""; self.schema.column_count()])?;

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }

    /// 生成 `generated_at` 对应的完整文件；周日与假日无数据行
    pub fn generate(&self, generated_at: NaiveDateTime, count: usize) -> GeneratorResult<GeneratedLog> {
        let count = if self.calendar.is_holiday_or_sunday(generated_at.date()) {
            0
        } else {
            count
        };
        let records = self.sample_records(generated_at, count);
        Ok(GeneratedLog {
            file_name: self.file_name(generated_at),
            content: self.render(&records)?,
            records: count,
        })
    }

    pub fn write_to_dir(
        &self,
        dir: &Path,
        generated_at: NaiveDateTime,
        count: usize,
    ) -> GeneratorResult<PathBuf> {
        let log = self.generate(generated_at, count)?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&log.file_name);
        std::fs::write(&path, log.content.as_bytes())?;
        info!(path = %path.display(), records = log.records, "样例日志已写出");
        Ok(path)
    }
}
