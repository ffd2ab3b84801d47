// ==========================================
// 外呼日志校验器 - 结果模型
// ==========================================
// ValidationResult: 一次校验调用的唯一输出
// FieldIssue: 单条记录的问题，返回前折叠进 errors
// ==========================================

use crate::domain::types::{ComplianceFlag, FieldIssueType};
use serde::{Deserialize, Serialize};

// ==========================================
// FormatCompliance - 文件级标志
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatCompliance {
    pub line_endings: bool,
    pub name_convention: bool,
    pub file_structure: bool,
    pub headers: bool,
}

impl Default for FormatCompliance {
    fn default() -> Self {
        Self {
            line_endings: true,
            name_convention: true,
            file_structure: true,
            headers: true,
        }
    }
}

// ==========================================
// DataQuality - 记录级标志
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    pub no_null_values: bool,
    pub valid_formats: bool,
    pub data_type_consistency: bool,
    pub required_fields: bool,
}

impl Default for DataQuality {
    fn default() -> Self {
        Self {
            no_null_values: true,
            valid_formats: true,
            data_type_consistency: true,
            required_fields: true,
        }
    }
}

// ==========================================
// ValidationResult
// ==========================================
// 标志初始为 true，只能经由 `fail` 清除
// `errors` 保持发现顺序，不去重
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub file_name: String,
    pub format_compliance: FormatCompliance,
    pub data_quality: DataQuality,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            format_compliance: FormatCompliance::default(),
            data_quality: DataQuality::default(),
            errors: Vec::new(),
        }
    }

    /// 清除 `flag` 并记录违规
    pub fn fail(&mut self, flag: ComplianceFlag, message: impl Into<String>) {
        self.clear_flag(flag);
        self.errors.push(message.into());
    }

    /// 记录提示信息，不改动任何标志
    pub fn advise(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn flag(&self, flag: ComplianceFlag) -> bool {
        match flag {
            ComplianceFlag::LineEndings => self.format_compliance.line_endings,
            ComplianceFlag::NameConvention => self.format_compliance.name_convention,
            ComplianceFlag::FileStructure => self.format_compliance.file_structure,
            ComplianceFlag::Headers => self.format_compliance.headers,
            ComplianceFlag::NoNullValues => self.data_quality.no_null_values,
            ComplianceFlag::ValidFormats => self.data_quality.valid_formats,
            ComplianceFlag::DataTypeConsistency => self.data_quality.data_type_consistency,
            ComplianceFlag::RequiredFields => self.data_quality.required_fields,
        }
    }

    fn clear_flag(&mut self, flag: ComplianceFlag) {
        match flag {
            ComplianceFlag::LineEndings => self.format_compliance.line_endings = false,
            ComplianceFlag::NameConvention => self.format_compliance.name_convention = false,
            ComplianceFlag::FileStructure => self.format_compliance.file_structure = false,
            ComplianceFlag::Headers => self.format_compliance.headers = false,
            ComplianceFlag::NoNullValues => self.data_quality.no_null_values = false,
            ComplianceFlag::ValidFormats => self.data_quality.valid_formats = false,
            ComplianceFlag::DataTypeConsistency => {
                self.data_quality.data_type_consistency = false
            }
            ComplianceFlag::RequiredFields => self.data_quality.required_fields = false,
        }
    }

    /// 两组标志全部仍为 true 时合规
    ///
    /// `errors` 中的提示信息不影响结果
    pub fn is_compliant(&self) -> bool {
        ComplianceFlag::ALL.iter().all(|f| self.flag(*f))
    }

    pub fn failed_flags(&self) -> Vec<ComplianceFlag> {
        ComplianceFlag::ALL
            .iter()
            .copied()
            .filter(|f| !self.flag(*f))
            .collect()
    }
}

// ==========================================
// FieldIssue - 某条记录中的一个问题字段
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// 从 1 开始，表头为第 1 行
    pub line: usize,
    pub value: String,
    pub raw_line: String,
    pub issue_type: FieldIssueType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_is_compliant() {
        let result = ValidationResult::new("KAI_Kredos_outreach_log_20250610180000.csv");
        assert!(result.is_compliant());
        assert!(result.errors.is_empty());
        assert!(result.failed_flags().is_empty());
    }

    #[test]
    fn test_fail_is_monotonic() {
        let mut result = ValidationResult::new("f.csv");
        result.fail(ComplianceFlag::Headers, "Missing required header: STATUS");
        result.advise("Not all headers are in uppercase");
        assert!(!result.format_compliance.headers);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.failed_flags(), vec![ComplianceFlag::Headers]);

        // 之后的提示不会恢复标志
        result.advise("Header mapping: expected 'STATUS', found 'status'");
        assert!(!result.flag(ComplianceFlag::Headers));
    }

    #[test]
    fn test_duplicate_errors_are_kept() {
        let mut result = ValidationResult::new("f.csv");
        result.fail(ComplianceFlag::NoNullValues, "Line 2: Null/empty value in STATUS (empty) - \"\"");
        result.fail(ComplianceFlag::NoNullValues, "Line 2: Null/empty value in STATUS (empty) - \"\"");
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let mut result = ValidationResult::new("f.csv");
        result.fail(ComplianceFlag::LineEndings, "File does not end with CR+LF");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["fileName"], "f.csv");
        assert_eq!(json["formatCompliance"]["lineEndings"], false);
        assert_eq!(json["dataQuality"]["noNullValues"], true);
    }
}
