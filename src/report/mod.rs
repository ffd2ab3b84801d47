// ==========================================
// 外呼日志校验器 - 报告渲染
// ==========================================
// 文本报告: 合规状态、错误分类统计、健康评级、前几条问题与建议
// JSON 报告: 原样输出结果
// ==========================================

use crate::audit::AuditRun;
use crate::domain::outreach::ValidationResult;
use serde::Serialize;
use std::fmt::{self, Write};

const TOP_ISSUES: usize = 10;

// ==========================================
// 错误分类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    LineEndings,
    MissingHeaders,
    HeaderMapping,
    NullValues,
    InvalidFormats,
    MissingFields,
    Other,
}

impl ErrorCategory {
    pub fn of(message: &str) -> Self {
        if message.contains("CR+LF") {
            ErrorCategory::LineEndings
        } else if message.contains("Missing required header") {
            ErrorCategory::MissingHeaders
        } else if message.contains("Header mapping")
            || message.contains("Header case inconsistency")
            || message.contains("Not all headers")
        {
            ErrorCategory::HeaderMapping
        } else if message.contains("Null/empty value") {
            ErrorCategory::NullValues
        } else if message.contains("Invalid") && message.contains("format") {
            ErrorCategory::InvalidFormats
        } else if message.contains("Required field") && message.contains("missing") {
            ErrorCategory::MissingFields
        } else {
            ErrorCategory::Other
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ErrorBreakdown {
    pub total: usize,
    pub line_endings: usize,
    pub missing_headers: usize,
    pub header_mapping: usize,
    pub null_values: usize,
    pub invalid_formats: usize,
    pub missing_fields: usize,
    pub other: usize,
}

impl ErrorBreakdown {
    pub fn from_errors(errors: &[String]) -> Self {
        let mut breakdown = ErrorBreakdown {
            total: errors.len(),
            ..Default::default()
        };
        for message in errors {
            let slot = match ErrorCategory::of(message) {
                ErrorCategory::LineEndings => &mut breakdown.line_endings,
                ErrorCategory::MissingHeaders => &mut breakdown.missing_headers,
                ErrorCategory::HeaderMapping => &mut breakdown.header_mapping,
                ErrorCategory::NullValues => &mut breakdown.null_values,
                ErrorCategory::InvalidFormats => &mut breakdown.invalid_formats,
                ErrorCategory::MissingFields => &mut breakdown.missing_fields,
                ErrorCategory::Other => &mut breakdown.other,
            };
            *slot += 1;
        }
        breakdown
    }

    pub fn data_quality_issues(&self) -> usize {
        self.null_values + self.invalid_formats + self.missing_fields
    }
}

// ==========================================
// 健康评级
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthRating {
    Excellent,
    Good,
    Poor,
    Critical,
}

impl HealthRating {
    pub fn from_error_count(count: usize) -> Self {
        match count {
            0 => HealthRating::Excellent,
            1..=99 => HealthRating::Good,
            100..=999 => HealthRating::Poor,
            _ => HealthRating::Critical,
        }
    }
}

impl fmt::Display for HealthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthRating::Excellent => "EXCELLENT",
            HealthRating::Good => "GOOD",
            HealthRating::Poor => "POOR",
            HealthRating::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

fn pass_fail(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

fn is_critical(message: &str) -> bool {
    message.contains("Missing required header")
        || message.contains("Header mapping")
        || message.contains("extension")
        || message.contains("blank row")
}

// ==========================================
// 文本渲染
// ==========================================
pub fn render_text(result: &ValidationResult) -> String {
    let mut out = String::new();
    // 写入 String 不会失败
    let _ = write_report(&mut out, result);
    out
}

fn write_report(out: &mut String, result: &ValidationResult) -> fmt::Result {
    let fc = &result.format_compliance;
    let dq = &result.data_quality;
    let breakdown = ErrorBreakdown::from_errors(&result.errors);

    writeln!(out, "Outreach log report: {}", result.file_name)?;
    writeln!(out)?;
    writeln!(out, "COMPLIANCE STATUS")?;
    writeln!(out, "  Line Endings (CR+LF): {}", pass_fail(fc.line_endings))?;
    writeln!(out, "  File Name Pattern:    {}", pass_fail(fc.name_convention))?;
    writeln!(out, "  File Structure:       {}", pass_fail(fc.file_structure))?;
    writeln!(out, "  Headers Valid:        {}", pass_fail(fc.headers))?;
    writeln!(out, "  No Null Values:       {}", pass_fail(dq.no_null_values))?;
    writeln!(out, "  Valid Formats:        {}", pass_fail(dq.valid_formats))?;
    writeln!(out, "  Data Consistency:     {}", pass_fail(dq.data_type_consistency))?;
    writeln!(out, "  Required Fields:      {}", pass_fail(dq.required_fields))?;
    writeln!(out)?;

    writeln!(out, "ERROR BREAKDOWN")?;
    writeln!(out, "  Total Issues Found: {:>8}", breakdown.total)?;
    writeln!(out, "  Line Ending Issues: {:>8}", breakdown.line_endings)?;
    writeln!(out, "  Missing Headers:    {:>8}", breakdown.missing_headers)?;
    writeln!(out, "  Header Mapping:     {:>8}", breakdown.header_mapping)?;
    writeln!(out, "  Null/Empty Values:  {:>8}", breakdown.null_values)?;
    writeln!(out, "  Invalid Formats:    {:>8}", breakdown.invalid_formats)?;
    writeln!(out, "  Missing Fields:     {:>8}", breakdown.missing_fields)?;
    writeln!(out, "  Other Issues:       {:>8}", breakdown.other)?;
    writeln!(out)?;

    let critical: Vec<&String> = result.errors.iter().filter(|e| is_critical(e)).collect();
    if !critical.is_empty() {
        writeln!(out, "CRITICAL ISSUES (top {})", TOP_ISSUES)?;
        for (i, e) in critical.iter().take(TOP_ISSUES).enumerate() {
            writeln!(out, "  {}. {}", i + 1, e)?;
        }
        writeln!(out)?;
    }

    if breakdown.data_quality_issues() > 0 {
        writeln!(out, "DATA QUALITY ISSUES (top {})", TOP_ISSUES)?;
        let data_issues = result.errors.iter().filter(|e| {
            matches!(
                ErrorCategory::of(e),
                ErrorCategory::NullValues | ErrorCategory::InvalidFormats | ErrorCategory::MissingFields
            )
        });
        for (i, e) in data_issues.take(TOP_ISSUES).enumerate() {
            writeln!(out, "  {}. {}", i + 1, e)?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "Overall File Health: {}",
        HealthRating::from_error_count(breakdown.total)
    )?;
    writeln!(out, "Compliant: {}", if result.is_compliant() { "yes" } else { "no" })?;

    let recommendations = recommendations(&breakdown);
    if !recommendations.is_empty() {
        writeln!(out)?;
        writeln!(out, "RECOMMENDATIONS")?;
        for r in recommendations {
            writeln!(out, "  - {}", r)?;
        }
    }
    Ok(())
}

pub fn recommendations(breakdown: &ErrorBreakdown) -> Vec<&'static str> {
    let mut out = Vec::new();
    if breakdown.line_endings > 0 {
        out.push("Fix line ending format - emit CR+LF record delimiters");
    }
    if breakdown.missing_headers > 0 {
        out.push("Add the missing required headers");
    }
    if breakdown.header_mapping > 0 {
        out.push("Standardize header naming convention");
    }
    if breakdown.invalid_formats > 0 {
        out.push("Implement field format validation (phone numbers, dates, enumerations)");
    }
    if breakdown.null_values > 0 || breakdown.missing_fields > 0 {
        out.push("Add data completeness checks");
    }
    out
}

/// 每个文件一行，外加汇总行
pub fn render_batch_text(run: &AuditRun) -> String {
    let mut out = String::new();
    let _ = write_batch(&mut out, run);
    out
}

fn write_batch(out: &mut String, run: &AuditRun) -> fmt::Result {
    writeln!(out, "Audit run {}", run.run_id)?;
    for file in &run.files {
        match &file.outcome {
            Ok(result) => writeln!(
                out,
                "  {} {} ({} issues, health {})",
                if result.is_compliant() { "PASS" } else { "FAIL" },
                file.key,
                result.errors.len(),
                HealthRating::from_error_count(result.errors.len())
            )?,
            Err(e) => writeln!(out, "  ERROR {} ({})", file.key, e)?,
        }
    }
    writeln!(
        out,
        "{} files, {} compliant, {} fetch failures",
        run.files.len(),
        run.compliant_count(),
        run.fetch_failures()
    )
}

// ==========================================
// JSON 渲染
// ==========================================
pub fn render_json(result: &ValidationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn render_batch_json(run: &AuditRun) -> serde_json::Result<String> {
    let entries: Vec<BatchEntry<'_>> = run
        .files
        .iter()
        .map(|f| BatchEntry {
            key: &f.key,
            result: f.outcome.as_ref().ok(),
            error: f.outcome.as_ref().err().map(|e| e.to_string()),
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({
        "runId": run.run_id,
        "files": entries,
    }))
}
