// ==========================================
// 外呼日志校验器 - 领域类型
// ==========================================
// 配置、校验器与报告共用的策略和分类枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 表头模式
// ==========================================
// 两个上游以不同表头集合产出外呼日志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SchemaVariant {
    /// ACCOUNT_NUMBER, PHONE_NUMBER, MESSAGE_TEXT, SEND_DATE, STATUS, CARRIER
    #[default]
    A,
    /// ACCOUNTNUMBER, FINANCIALACCOUNT, TEMPLATENAME, TEMPLATEMEMO,
    /// TIMESTAMPCST-CDT, CHANNEL, EVENTNAME, SMSCOPY
    B,
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVariant::A => write!(f, "A"),
            SchemaVariant::B => write!(f, "B"),
        }
    }
}

impl FromStr for SchemaVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(SchemaVariant::A),
            "B" => Ok(SchemaVariant::B),
            other => Err(format!("unknown schema variant '{}' (expected A or B)", other)),
        }
    }
}

// ==========================================
// 严格程度
// ==========================================
// Lenient: 表头偏差与生成时间偏差仅作提示
// Strict: 同样的问题还会清除对应合规标志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strictness::Lenient => write!(f, "LENIENT"),
            Strictness::Strict => write!(f, "STRICT"),
        }
    }
}

// ==========================================
// 电话号码策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhonePolicy {
    /// 去除非数字字符后恰为 10 位
    TenDigits,
    /// 10 位，或以美国国家码 "1" 开头的 11 位
    #[default]
    AllowCountryCode,
}

impl PhonePolicy {
    pub fn accepts(&self, value: &str) -> bool {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
        match self {
            PhonePolicy::TenDigits => digits.len() == 10,
            PhonePolicy::AllowCountryCode => {
                digits.len() == 10 || (digits.len() == 11 && digits.starts_with('1'))
            }
        }
    }
}

// ==========================================
// 合规标志
// ==========================================
// ValidationResult 的八个标志，供规则以数据形式引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplianceFlag {
    // formatCompliance
    LineEndings,
    NameConvention,
    FileStructure,
    Headers,
    // dataQuality
    NoNullValues,
    ValidFormats,
    DataTypeConsistency,
    RequiredFields,
}

impl ComplianceFlag {
    pub const ALL: [ComplianceFlag; 8] = [
        ComplianceFlag::LineEndings,
        ComplianceFlag::NameConvention,
        ComplianceFlag::FileStructure,
        ComplianceFlag::Headers,
        ComplianceFlag::NoNullValues,
        ComplianceFlag::ValidFormats,
        ComplianceFlag::DataTypeConsistency,
        ComplianceFlag::RequiredFields,
    ];

    pub fn is_format_flag(&self) -> bool {
        matches!(
            self,
            ComplianceFlag::LineEndings
                | ComplianceFlag::NameConvention
                | ComplianceFlag::FileStructure
                | ComplianceFlag::Headers
        )
    }
}

impl fmt::Display for ComplianceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComplianceFlag::LineEndings => "lineEndings",
            ComplianceFlag::NameConvention => "nameConvention",
            ComplianceFlag::FileStructure => "fileStructure",
            ComplianceFlag::Headers => "headers",
            ComplianceFlag::NoNullValues => "noNullValues",
            ComplianceFlag::ValidFormats => "validFormats",
            ComplianceFlag::DataTypeConsistency => "dataTypeConsistency",
            ComplianceFlag::RequiredFields => "requiredFields",
        };
        write!(f, "{}", name)
    }
}

// ==========================================
// 字段问题类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldIssueType {
    Null,
    Undefined,
    Empty,
    InvalidFormat,
}

impl FieldIssueType {
    /// 缺失值分类，`None` 表示值存在
    pub fn classify_missing(value: Option<&str>) -> Option<FieldIssueType> {
        match value {
            None => Some(FieldIssueType::Undefined),
            Some(v) => {
                let trimmed = v.trim();
                if trimmed.is_empty() {
                    Some(FieldIssueType::Empty)
                } else if trimmed.eq_ignore_ascii_case("null") {
                    Some(FieldIssueType::Null)
                } else if trimmed.eq_ignore_ascii_case("undefined") {
                    Some(FieldIssueType::Undefined)
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for FieldIssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssueType::Null => write!(f, "null"),
            FieldIssueType::Undefined => write!(f, "undefined"),
            FieldIssueType::Empty => write!(f, "empty"),
            FieldIssueType::InvalidFormat => write!(f, "invalid_format"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_variant_from_str() {
        assert_eq!("a".parse::<SchemaVariant>().unwrap(), SchemaVariant::A);
        assert_eq!(" B ".parse::<SchemaVariant>().unwrap(), SchemaVariant::B);
        assert!("C".parse::<SchemaVariant>().is_err());
    }

    #[test]
    fn test_phone_policy() {
        let lenient = PhonePolicy::AllowCountryCode;
        assert!(lenient.accepts("1234567890"));
        assert!(lenient.accepts("(123) 456-7890"));
        assert!(lenient.accepts("+11234567890"));
        assert!(!lenient.accepts("+21234567890"));
        assert!(!lenient.accepts("123-45"));

        let strict = PhonePolicy::TenDigits;
        assert!(strict.accepts("1234567890"));
        assert!(!strict.accepts("+11234567890"));
    }

    #[test]
    fn test_classify_missing() {
        assert_eq!(FieldIssueType::classify_missing(Some("  ")), Some(FieldIssueType::Empty));
        assert_eq!(FieldIssueType::classify_missing(Some("NULL")), Some(FieldIssueType::Null));
        assert_eq!(
            FieldIssueType::classify_missing(Some("undefined")),
            Some(FieldIssueType::Undefined)
        );
        assert_eq!(FieldIssueType::classify_missing(None), Some(FieldIssueType::Undefined));
        assert_eq!(FieldIssueType::classify_missing(Some("ACC1")), None);
    }

    #[test]
    fn test_flag_groups() {
        let format_flags = ComplianceFlag::ALL.iter().filter(|f| f.is_format_flag()).count();
        assert_eq!(format_flags, 4);
        assert_eq!(ComplianceFlag::NoNullValues.to_string(), "noNullValues");
    }
}
