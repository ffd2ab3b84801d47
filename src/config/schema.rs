// ==========================================
// 外呼日志校验器 - 表头模式
// ==========================================
// 各上游的表头集合、别名与字段规则，以数据形式表达
// ==========================================

use crate::domain::types::{ComplianceFlag, SchemaVariant};
use serde::{Deserialize, Serialize};

/// 字段非空时需满足的值格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    Free,
    Enumerated(Vec<String>),
    /// chrono 格式串，如 `%m/%d/%Y %H:%M`；仅含日期的格式按日期解析
    Timestamp(String),
    Phone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default = "default_format")]
    pub format: FieldFormat,
}

fn default_required() -> bool {
    true
}

fn default_format() -> FieldFormat {
    FieldFormat::Free
}

impl FieldRule {
    fn new(name: &str, format: FieldFormat) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            required: true,
            format,
        }
    }

    fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// 规范名称及其声明的别名
    pub fn accepted_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(|a| a.as_str()))
    }
}

/// 当 `when_field == equals` 时，`blank_field` 必须为空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossFieldRule {
    pub when_field: String,
    pub equals: String,
    pub blank_field: String,
    /// 用于消息: "Non-empty SMSCOPY for email activity"
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachSchema {
    pub name: String,
    pub fields: Vec<FieldRule>,
    #[serde(default)]
    pub cross_field_rules: Vec<CrossFieldRule>,
    /// 上游预期生成文件的整点（America/Chicago）
    pub expected_generation_hour: u32,
    /// 必填字段为空时清除的标志
    #[serde(default = "default_null_flag")]
    pub null_flag: ComplianceFlag,
}

fn default_null_flag() -> ComplianceFlag {
    ComplianceFlag::NoNullValues
}

impl OutreachSchema {
    pub fn for_variant(variant: SchemaVariant) -> Self {
        match variant {
            SchemaVariant::A => Self::schema_a(),
            SchemaVariant::B => Self::schema_b(),
        }
    }

    /// 六列上游
    pub fn schema_a() -> Self {
        Self {
            name: "A".to_string(),
            fields: vec![
                FieldRule::new("ACCOUNT_NUMBER", FieldFormat::Free).alias("ACCOUNTNUMBER"),
                FieldRule::new("PHONE_NUMBER", FieldFormat::Phone).alias("PHONENUMBER"),
                FieldRule::new("MESSAGE_TEXT", FieldFormat::Free),
                FieldRule::new(
                    "SEND_DATE",
                    FieldFormat::Timestamp("%Y-%m-%d %H:%M:%S".to_string()),
                )
                .alias("TIMESTAMPCST-CDT"),
                FieldRule::new(
                    "STATUS",
                    FieldFormat::Enumerated(vec![
                        "DELIVERED".to_string(),
                        "PENDING".to_string(),
                        "FAILED".to_string(),
                    ]),
                ),
                FieldRule::new("CARRIER", FieldFormat::Free).alias("CHANNEL"),
            ],
            cross_field_rules: Vec::new(),
            expected_generation_hour: 18,
            null_flag: ComplianceFlag::NoNullValues,
        }
    }

    /// 八列上游
    pub fn schema_b() -> Self {
        Self {
            name: "B".to_string(),
            fields: vec![
                FieldRule::new("ACCOUNTNUMBER", FieldFormat::Free),
                FieldRule::new("FINANCIALACCOUNT", FieldFormat::Free),
                FieldRule::new("TEMPLATENAME", FieldFormat::Free),
                FieldRule::new("TEMPLATEMEMO", FieldFormat::Free),
                FieldRule::new(
                    "TIMESTAMPCST-CDT",
                    FieldFormat::Timestamp("%m/%d/%Y %H:%M".to_string()),
                ),
                FieldRule::new(
                    "CHANNEL",
                    FieldFormat::Enumerated(vec![
                        "smsActivities".to_string(),
                        "emailActivities".to_string(),
                    ]),
                ),
                FieldRule::new(
                    "EVENTNAME",
                    FieldFormat::Enumerated(vec![
                        "SMS Delivered".to_string(),
                        "Email Delivered".to_string(),
                    ]),
                ),
                // 邮件行为空
                FieldRule::new("SMSCOPY", FieldFormat::Free).optional(),
            ],
            cross_field_rules: vec![CrossFieldRule {
                when_field: "CHANNEL".to_string(),
                equals: "emailActivities".to_string(),
                blank_field: "SMSCOPY".to_string(),
                label: "email activity".to_string(),
            }],
            expected_generation_hour: 18,
            null_flag: ComplianceFlag::NoNullValues,
        }
    }

    pub fn column_count(&self) -> usize {
        self.fields.len()
    }

    pub fn required_headers(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// 合规上游写出的表头行
    pub fn header_line(&self) -> String {
        self.required_headers().join(",")
    }
}
