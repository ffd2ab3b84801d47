// ==========================================
// 外呼日志校验器 - 校验器配置
// ==========================================
// 构造 OutreachLogValidator 时传入的不可变值
// 来源（后者覆盖前者）: 默认值 -> JSON 文件 -> 环境变量
// ==========================================

use crate::calendar::HolidayEntry;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::{FieldFormat, OutreachSchema};
use crate::domain::types::{PhonePolicy, SchemaVariant, Strictness};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod config_keys {
    /// 覆盖配置中的表头模式（A 或 B）
    pub const ENV_SCHEMA: &str = "OUTREACH_LOG_SCHEMA";
    pub const CONFIG_DIR_NAME: &str = "outreach-log-validator";
    pub const CONFIG_FILE_NAME: &str = "config.json";
}

/// 内置模式名称或完整的自定义模式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaSelection {
    Variant(SchemaVariant),
    Custom(OutreachSchema),
}

impl Default for SchemaSelection {
    fn default() -> Self {
        SchemaSelection::Variant(SchemaVariant::default())
    }
}

impl SchemaSelection {
    pub fn resolve(&self) -> OutreachSchema {
        match self {
            SchemaSelection::Variant(v) => OutreachSchema::for_variant(*v),
            SchemaSelection::Custom(schema) => schema.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub schema: SchemaSelection,
    pub strictness: Strictness,
    pub phone_policy: PhonePolicy,
    pub file_name_prefix: String,
    pub generation_tolerance_minutes: i64,
    /// 包含其中任一短语的行视为消息续行
    pub opt_out_phrases: Vec<String>,
    /// 以其中任一短语开头的行视为消息续行
    pub payment_prompt_phrases: Vec<String>,
    /// 追加到内置美国联邦假日表
    pub extra_holidays: Vec<HolidayEntry>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            schema: SchemaSelection::default(),
            strictness: Strictness::Lenient,
            phone_policy: PhonePolicy::AllowCountryCode,
            file_name_prefix: "KAI_Kredos_outreach_log_".to_string(),
            generation_tolerance_minutes: 30,
            opt_out_phrases: vec!["Text STOP".to_string(), "Reply STOP".to_string()],
            payment_prompt_phrases: vec![
                "To make a payment".to_string(),
                "Make a payment".to_string(),
                "Pay now".to_string(),
            ],
            extra_holidays: Vec::new(),
        }
    }
}

impl ValidatorConfig {
    pub fn for_variant(variant: SchemaVariant) -> Self {
        Self {
            schema: SchemaSelection::Variant(variant),
            ..Self::default()
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn with_phone_policy(mut self, policy: PhonePolicy) -> Self {
        self.phone_policy = policy;
        self
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: ValidatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&raw)?;
        info!(path = %path.display(), "配置已加载");
        Ok(config)
    }

    /// 优先显式路径，其次用户配置文件（若存在），否则用默认值；
    /// 最后应用环境变量覆盖
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(p) => Self::load(&p)?,
                None => {
                    debug!("未找到配置文件，使用默认配置");
                    Self::default()
                }
            },
        };

        let env_schema = std::env::var(config_keys::ENV_SCHEMA).ok();
        config.apply_schema_override(env_schema.as_deref())?;
        Ok(config)
    }

    pub fn apply_schema_override(&mut self, value: Option<&str>) -> ConfigResult<()> {
        if let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) {
            let variant = raw
                .parse::<SchemaVariant>()
                .map_err(|message| ConfigError::ConfigValueError {
                    key: config_keys::ENV_SCHEMA.to_string(),
                    value: raw.to_string(),
                    message,
                })?;
            debug!(schema = %variant, "表头模式被环境变量覆盖");
            self.schema = SchemaSelection::Variant(variant);
        }
        Ok(())
    }

    pub fn resolved_schema(&self) -> OutreachSchema {
        self.schema.resolve()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let schema = self.resolved_schema();

        if schema.fields.is_empty() {
            return Err(value_error("schema.fields", "[]", "schema needs at least one field"));
        }
        if schema.expected_generation_hour > 23 {
            return Err(value_error(
                "schema.expected_generation_hour",
                &schema.expected_generation_hour.to_string(),
                "hour must be in 0..=23",
            ));
        }
        for field in &schema.fields {
            match &field.format {
                FieldFormat::Timestamp(pattern) if pattern.trim().is_empty() => {
                    return Err(value_error(&field.name, "", "timestamp pattern is empty"));
                }
                FieldFormat::Enumerated(values) if values.is_empty() => {
                    return Err(value_error(&field.name, "[]", "enumeration has no values"));
                }
                _ => {}
            }
        }
        for rule in &schema.cross_field_rules {
            for name in [&rule.when_field, &rule.blank_field] {
                if schema.field(name).is_none() {
                    return Err(value_error(
                        "schema.cross_field_rules",
                        name,
                        "cross-field rule refers to an unknown field",
                    ));
                }
            }
        }
        if self.file_name_prefix.trim().is_empty() {
            return Err(value_error("file_name_prefix", "", "prefix must not be empty"));
        }
        if self.generation_tolerance_minutes < 0 {
            return Err(value_error(
                "generation_tolerance_minutes",
                &self.generation_tolerance_minutes.to_string(),
                "tolerance must not be negative",
            ));
        }
        for holiday in &self.extra_holidays {
            if chrono::NaiveDate::from_ymd_opt(holiday.year.unwrap_or(2024), holiday.month, holiday.day)
                .is_none()
            {
                return Err(value_error(
                    "extra_holidays",
                    &format!("{}-{}", holiday.month, holiday.day),
                    "not a calendar date",
                ));
            }
        }
        Ok(())
    }
}

fn value_error(key: &str, value: &str, message: &str) -> ConfigError {
    ConfigError::ConfigValueError {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

/// `<config dir>/outreach-log-validator/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(config_keys::CONFIG_DIR_NAME)
            .join(config_keys::CONFIG_FILE_NAME)
    })
}
