// ==========================================
// 外呼日志校验器 - 数据质量校验器实现
// ==========================================
// 逐行扫描表头之后的内容:
// 空行和消息片段跳过，列数不符的行告警后跳过，
// 完整记录执行字段规则与跨字段规则
// ==========================================

use crate::config::{FieldFormat, FieldRule, OutreachSchema};
use crate::domain::outreach::{FieldIssue, ValidationResult};
use crate::domain::types::{ComplianceFlag, FieldIssueType, PhonePolicy};
use crate::validator::check::{LogFile, OutreachLogCheck};
use crate::validator::header_mapper::HeaderMapping;
use crate::validator::row_cleaner::{is_blank_row, split_fields, FragmentDetector};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// 汇总事件用的行级计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordStats {
    pub records: usize,
    pub blank: usize,
    pub fragments: usize,
    pub skipped: usize,
}

pub struct DataQualityCheck {
    schema: OutreachSchema,
    phone_policy: PhonePolicy,
    fragments: FragmentDetector,
}

impl DataQualityCheck {
    pub fn new(schema: OutreachSchema, phone_policy: PhonePolicy, fragments: FragmentDetector) -> Self {
        Self {
            schema,
            phone_policy,
            fragments,
        }
    }

    fn value_of<'a>(
        &self,
        mapping: &HeaderMapping,
        fields: &[&'a str],
        name: &str,
    ) -> Option<&'a str> {
        mapping
            .column(name)
            .and_then(|col| fields.get(col).copied())
    }

    /// 校验单个字段，违反规则时返回问题
    fn check_field(
        &self,
        rule: &FieldRule,
        value: Option<&str>,
        line: usize,
        raw_line: &str,
        result: &mut ValidationResult,
    ) -> Option<FieldIssue> {
        if let Some(issue_type) = FieldIssueType::classify_missing(value) {
            if !rule.required {
                return None;
            }
            let value = value.unwrap_or("");
            result.fail(
                self.schema.null_flag,
                format!(
                    "Line {}: Null/empty value in {} ({}) - \"{}\"",
                    line, rule.name, issue_type, value
                ),
            );
            return Some(issue(line, value, raw_line, issue_type));
        }

        let value = value.unwrap_or("").trim();
        let (flag, expected) = match &rule.format {
            FieldFormat::Free => return None,
            FieldFormat::Enumerated(values) => {
                if values.iter().any(|v| v == value) {
                    return None;
                }
                (
                    ComplianceFlag::ValidFormats,
                    format!("one of: {}", values.join(", ")),
                )
            }
            FieldFormat::Timestamp(pattern) => {
                if matches_timestamp(value, pattern) {
                    return None;
                }
                (ComplianceFlag::DataTypeConsistency, pattern.clone())
            }
            FieldFormat::Phone => {
                if self.phone_policy.accepts(value) {
                    return None;
                }
                let expected = match self.phone_policy {
                    PhonePolicy::TenDigits => "10 digits",
                    PhonePolicy::AllowCountryCode => "10 digits, optional leading 1",
                };
                (ComplianceFlag::ValidFormats, expected.to_string())
            }
        };

        result.fail(
            flag,
            format!(
                "Line {}: Invalid {} format - \"{}\" (expected {})",
                line, rule.name, value, expected
            ),
        );
        Some(issue(line, value, raw_line, FieldIssueType::InvalidFormat))
    }
}

/// 带时间字段的格式按日期时间解析，仅含日期的格式按日期解析
fn matches_timestamp(value: &str, pattern: &str) -> bool {
    NaiveDateTime::parse_from_str(value, pattern).is_ok()
        || NaiveDate::parse_from_str(value, pattern).is_ok()
}

fn issue(line: usize, value: &str, raw_line: &str, issue_type: FieldIssueType) -> FieldIssue {
    FieldIssue {
        line,
        value: value.to_string(),
        raw_line: raw_line.to_string(),
        issue_type,
    }
}

impl OutreachLogCheck for DataQualityCheck {
    fn name(&self) -> &'static str {
        "data_quality"
    }

    fn run(&self, file: &LogFile<'_>, result: &mut ValidationResult) {
        let column_count = self.schema.column_count();
        let mapping = &file.header;
        let mut stats = RecordStats::default();
        let mut issues_by_field: BTreeMap<&str, usize> = BTreeMap::new();

        for (idx, raw) in file.lines.iter().enumerate().skip(1) {
            let line_no = idx + 1;
            let line = raw.trim();

            if is_blank_row(line) {
                stats.blank += 1;
                continue;
            }

            let fields = split_fields(line);
            if fields.len() != column_count {
                if self.fragments.is_fragment(line) {
                    stats.fragments += 1;
                    debug!(line = line_no, raw_line = line, "跳过消息片段");
                } else {
                    stats.skipped += 1;
                    warn!(
                        line = line_no,
                        fields = fields.len(),
                        expected = column_count,
                        "列数不符，按片段跳过"
                    );
                }
                continue;
            }
            stats.records += 1;

            for rule in &self.schema.fields {
                if mapping.column(&rule.name).is_none() {
                    continue;
                }
                let value = self.value_of(mapping, &fields, &rule.name);
                if let Some(found) = self.check_field(rule, value, line_no, raw, result) {
                    debug!(
                        line = found.line,
                        field = %rule.name,
                        issue = %found.issue_type,
                        value = %found.value,
                        raw_line = %found.raw_line,
                        "字段问题"
                    );
                    *issues_by_field.entry(rule.name.as_str()).or_default() += 1;
                }
            }

            for cross in &self.schema.cross_field_rules {
                let trigger = self.value_of(mapping, &fields, &cross.when_field);
                if trigger != Some(cross.equals.as_str()) {
                    continue;
                }
                let other = self
                    .value_of(mapping, &fields, &cross.blank_field)
                    .unwrap_or("");
                if !other.is_empty() {
                    debug!(line = line_no, raw_line = %raw, "跨字段规则违规");
                    result.fail(
                        ComplianceFlag::DataTypeConsistency,
                        format!(
                            "Line {}: Non-empty {} for {} - \"{}\"",
                            line_no, cross.blank_field, cross.label, other
                        ),
                    );
                    *issues_by_field.entry(cross.blank_field.as_str()).or_default() += 1;
                }
            }
        }

        if stats.records > 0 {
            for name in mapping.missing() {
                result.fail(
                    ComplianceFlag::RequiredFields,
                    format!("Required field {} missing: no matching header column", name),
                );
            }
        }

        for (field, count) in &issues_by_field {
            info!(field = %field, count, "字段问题统计");
        }
        info!(
            records = stats.records,
            blank = stats.blank,
            fragments = stats.fragments,
            skipped = stats.skipped,
            "数据质量校验完成"
        );
    }
}
