// ==========================================
// 外呼日志校验器 - 文件名检查
// ==========================================
// FileNameCheck: 遗留后缀与 <前缀><14 位数字>.csv 模式
// GenerationTimeCheck: 文件名时间戳与预期整点比较（America/Chicago）
// ==========================================

use crate::calendar::{chicago_to_utc, zone_abbreviation};
use crate::config::{ConfigError, ConfigResult};
use crate::domain::outreach::ValidationResult;
use crate::domain::types::{ComplianceFlag, Strictness};
use crate::validator::check::{LogFile, OutreachLogCheck};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

static TIMESTAMP_DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})(\d{2})(\d{2})(\d{2})(\d{2})").expect("valid regex")
});

fn compile(pattern: &str) -> ConfigResult<Regex> {
    Regex::new(pattern).map_err(|e| ConfigError::ConfigValueError {
        key: "file_name_prefix".to_string(),
        value: pattern.to_string(),
        message: e.to_string(),
    })
}

// ==========================================
// FileNameCheck
// ==========================================
pub struct FileNameCheck {
    prefix: String,
    pattern: Regex,
}

impl FileNameCheck {
    pub fn new(prefix: &str) -> ConfigResult<Self> {
        let pattern = compile(&format!(r"^{}\d{{14}}\.csv$", regex::escape(prefix)))?;
        Ok(Self {
            prefix: prefix.to_string(),
            pattern,
        })
    }
}

impl OutreachLogCheck for FileNameCheck {
    fn name(&self) -> &'static str {
        "file_name"
    }

    fn run(&self, file: &LogFile<'_>, result: &mut ValidationResult) {
        let lower = file.file_name.to_ascii_lowercase();
        if lower.ends_with(".crlf") {
            result.fail(
                ComplianceFlag::NameConvention,
                "File extension should not be .crlf",
            );
        }
        if lower.ends_with(".pgp") {
            result.fail(
                ComplianceFlag::NameConvention,
                "File extension should be .csv, not .pgp",
            );
        }
        if !self.pattern.is_match(file.base_name()) {
            debug!(base_name = file.base_name(), "文件名不符合模式");
            result.fail(
                ComplianceFlag::NameConvention,
                format!(
                    "File name does not match the required pattern {}yyyyMMddHHmmss.csv",
                    self.prefix
                ),
            );
        }
    }
}

// ==========================================
// GenerationTimeCheck
// ==========================================
pub struct GenerationTimeCheck {
    expected_hour: u32,
    tolerance_minutes: i64,
    strictness: Strictness,
}

impl GenerationTimeCheck {
    pub fn new(expected_hour: u32, tolerance_minutes: i64, strictness: Strictness) -> Self {
        Self {
            expected_hour,
            tolerance_minutes,
            strictness,
        }
    }
}

/// 取第一段形如时间戳的数字 `yyyyMMddHHmm`，按本地时间解析
pub fn generation_time(base_name: &str) -> Option<NaiveDateTime> {
    let caps = TIMESTAMP_DIGITS.captures(base_name)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, num(2)?, num(3)?)?.and_hms_opt(num(4)?, num(5)?, 0)
}

impl OutreachLogCheck for GenerationTimeCheck {
    fn name(&self) -> &'static str {
        "generation_time"
    }

    fn run(&self, file: &LogFile<'_>, result: &mut ValidationResult) {
        let Some(local) = generation_time(file.base_name()) else {
            debug!(file = file.file_name, "文件名中无生成时间");
            return;
        };
        let Some(expected) = local.date().and_hms_opt(self.expected_hour, 0, 0) else {
            return;
        };

        let drift = (chicago_to_utc(local) - chicago_to_utc(expected))
            .num_minutes()
            .abs();
        if drift <= self.tolerance_minutes {
            return;
        }

        info!(
            file = file.file_name,
            zone = zone_abbreviation(local),
            drift_minutes = drift,
            tolerance_minutes = self.tolerance_minutes,
            "生成时间偏差"
        );
        let message = format!(
            "File time {} CT is not close to expected time {:02}:00 CT",
            local.format("%H:%M"),
            self.expected_hour
        );
        match self.strictness {
            Strictness::Lenient => result.advise(message),
            Strictness::Strict => result.fail(ComplianceFlag::NameConvention, message),
        }
    }
}
