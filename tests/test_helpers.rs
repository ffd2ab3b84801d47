// ==========================================
// 测试辅助函数
// ==========================================
// 校验器构造与临时目录日志文件
// ==========================================

#![allow(dead_code)]

use outreach_log_validator::config::ValidatorConfig;
use outreach_log_validator::domain::{PhonePolicy, SchemaVariant, Strictness, ValidationResult};
use outreach_log_validator::validator::OutreachLogValidator;
use std::path::{Path, PathBuf};

/// 周二，处于 18:00 CT 生成窗口内
pub const WEEKDAY_NAME: &str = "KAI_Kredos_outreach_log_20250610180000.csv";
/// 周日 2024-12-22
pub const SUNDAY_NAME: &str = "KAI_Kredos_outreach_log_20241222120000.csv";
/// 2025 年感恩节
pub const HOLIDAY_NAME: &str = "KAI_Kredos_outreach_log_20251127180000.csv";

pub fn validator(variant: SchemaVariant) -> OutreachLogValidator {
    OutreachLogValidator::new(ValidatorConfig::for_variant(variant))
        .expect("default config is valid")
}

pub fn strict_validator(variant: SchemaVariant) -> OutreachLogValidator {
    OutreachLogValidator::new(
        ValidatorConfig::for_variant(variant).with_strictness(Strictness::Strict),
    )
    .expect("strict config is valid")
}

pub fn ten_digit_validator() -> OutreachLogValidator {
    OutreachLogValidator::new(
        ValidatorConfig::default().with_phone_policy(PhonePolicy::TenDigits),
    )
    .expect("config is valid")
}

pub fn has_error(result: &ValidationResult, needle: &str) -> bool {
    result.errors.iter().any(|e| e.contains(needle))
}

pub fn write_log(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write log file");
    path
}
