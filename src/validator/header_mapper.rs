// ==========================================
// 外呼日志校验器 - 表头映射器
// ==========================================
// 定位每个必需表头（不区分大小写，允许别名）并记录所在列
// 数据质量检查按此映射取列，表头重排或使用别名时仍校验正确的列
// ==========================================

use crate::config::OutreachSchema;
use crate::domain::outreach::ValidationResult;
use crate::domain::types::{ComplianceFlag, Strictness};
use crate::validator::check::{LogFile, OutreachLogCheck};
use tracing::debug;

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub required: String,
    pub column: Option<usize>,
    /// 文件中的原始表头文本
    pub found: Option<String>,
}

impl HeaderMatch {
    pub fn is_exact(&self) -> bool {
        self.found.as_deref() == Some(self.required.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    pub headers: Vec<String>,
    pub matches: Vec<HeaderMatch>,
}

impl HeaderMapping {
    pub fn resolve(schema: &OutreachSchema, header_line: &str) -> Self {
        let headers: Vec<String> = header_line
            .trim_start_matches(BOM)
            .split(',')
            .map(|h| h.trim().to_string())
            .collect();

        let matches = schema
            .fields
            .iter()
            .map(|rule| {
                let column = rule.accepted_names().find_map(|name| {
                    headers
                        .iter()
                        .position(|h| h.eq_ignore_ascii_case(name))
                });
                HeaderMatch {
                    required: rule.name.clone(),
                    column,
                    found: column.map(|i| headers[i].clone()),
                }
            })
            .collect();

        Self { headers, matches }
    }

    /// 必需字段所在列（找到表头时）
    pub fn column(&self, required: &str) -> Option<usize> {
        self.matches
            .iter()
            .find(|m| m.required == required)
            .and_then(|m| m.column)
    }

    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.matches
            .iter()
            .filter(|m| m.column.is_none())
            .map(|m| m.required.as_str())
    }
}

// ==========================================
// HeaderCheck
// ==========================================
pub struct HeaderCheck {
    strictness: Strictness,
}

impl HeaderCheck {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    fn drift(&self, result: &mut ValidationResult, message: String) {
        match self.strictness {
            Strictness::Lenient => result.advise(message),
            Strictness::Strict => result.fail(ComplianceFlag::Headers, message),
        }
    }
}

impl OutreachLogCheck for HeaderCheck {
    fn name(&self) -> &'static str {
        "headers"
    }

    fn run(&self, file: &LogFile<'_>, result: &mut ValidationResult) {
        let mapping = &file.header;
        debug!(headers = ?mapping.headers, "表头行");

        for m in &mapping.matches {
            let Some(found) = m.found.as_deref() else {
                result.fail(
                    ComplianceFlag::Headers,
                    format!("Missing required header: {}", m.required),
                );
                continue;
            };
            if m.is_exact() {
                continue;
            }
            if found.eq_ignore_ascii_case(&m.required) {
                self.drift(
                    result,
                    format!(
                        "Header case inconsistency: expected '{}', found '{}'",
                        m.required, found
                    ),
                );
            } else {
                self.drift(
                    result,
                    format!("Header mapping: expected '{}', found '{}'", m.required, found),
                );
            }
        }

        let all_upper = mapping
            .headers
            .iter()
            .all(|h| *h == h.to_uppercase());
        if !all_upper {
            self.drift(result, "Not all headers are in uppercase".to_string());
        }
    }
}
