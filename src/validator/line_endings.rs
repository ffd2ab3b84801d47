// ==========================================
// 外呼日志校验器 - 行结束符检查
// ==========================================
// 记录以 CRLF 分隔；消息正文中的单独 LF 属正常情况，不单独报告
// ==========================================

use crate::domain::outreach::ValidationResult;
use crate::domain::types::ComplianceFlag;
use crate::validator::check::{LogFile, OutreachLogCheck};
use crate::validator::row_cleaner::{field_count, FragmentDetector};
use serde::Serialize;
use tracing::{debug, info};

/// 完整记录（列数齐全的行）的结束符统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineEndingStats {
    /// 以 CRLF 分隔、属于记录或已知片段的段数
    pub valid_segments: usize,
    pub complete_records: usize,
    pub crlf: usize,
    pub lf_only: usize,
    pub cr_only: usize,
    pub unterminated: usize,
    pub ends_with_crlf: bool,
}

impl LineEndingStats {
    pub fn crlf_percentage(&self) -> f64 {
        if self.complete_records == 0 {
            return 100.0;
        }
        self.crlf as f64 * 100.0 / self.complete_records as f64
    }
}

pub fn analyze(content: &str, column_count: usize, fragments: &FragmentDetector) -> LineEndingStats {
    let mut stats = LineEndingStats {
        ends_with_crlf: content.ends_with("\r\n"),
        ..LineEndingStats::default()
    };

    stats.valid_segments = content
        .split("\r\n")
        .filter(|seg| !seg.trim().is_empty())
        .filter(|seg| field_count(seg) == column_count || fragments.is_fragment(seg))
        .count();

    for piece in content.split_inclusive('\n') {
        let body = piece.trim_end_matches(['\r', '\n']);
        if body.trim().is_empty() || field_count(body) != column_count {
            continue;
        }
        stats.complete_records += 1;
        if piece.ends_with("\r\n") {
            stats.crlf += 1;
        } else if piece.ends_with('\n') {
            stats.lf_only += 1;
        } else if piece.ends_with('\r') {
            stats.cr_only += 1;
        } else {
            stats.unterminated += 1;
        }
    }

    stats
}

// ==========================================
// LineEndingCheck
// ==========================================
pub struct LineEndingCheck {
    column_count: usize,
    fragments: FragmentDetector,
}

impl LineEndingCheck {
    pub fn new(column_count: usize, fragments: FragmentDetector) -> Self {
        Self {
            column_count,
            fragments,
        }
    }
}

impl OutreachLogCheck for LineEndingCheck {
    fn name(&self) -> &'static str {
        "line_endings"
    }

    fn run(&self, file: &LogFile<'_>, result: &mut ValidationResult) {
        let stats = analyze(file.content, self.column_count, &self.fragments);

        info!(
            file = file.file_name,
            valid_segments = stats.valid_segments,
            complete_records = stats.complete_records,
            crlf = stats.crlf,
            lf_only = stats.lf_only,
            cr_only = stats.cr_only,
            unterminated = stats.unterminated,
            "行结束符分析"
        );

        if stats.valid_segments == 0 {
            result.fail(
                ComplianceFlag::LineEndings,
                "File contains no CR+LF delimited records",
            );
        }
        if !stats.ends_with_crlf {
            result.fail(ComplianceFlag::LineEndings, "File does not end with CR+LF");
        }
        if stats.crlf < stats.complete_records {
            debug!(
                percentage = stats.crlf_percentage(),
                "存在未以 CR+LF 结尾的完整记录"
            );
            result.fail(
                ComplianceFlag::LineEndings,
                format!(
                    "Only {:.1}% of complete records end with CR+LF ({} LF only, {} CR only, {} unterminated)",
                    stats.crlf_percentage(),
                    stats.lf_only,
                    stats.cr_only,
                    stats.unterminated
                ),
            );
        }
    }
}
