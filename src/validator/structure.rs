// ==========================================
// 外呼日志校验器 - 结构检查
// ==========================================
// TrailingBlankRowCheck: 文件以一个空行结尾
// BlackoutDayCheck: 周日/假日文件不含数据行
// MinimumStructureCheck: 表头加至少一行完整列数的行
// ==========================================

use crate::calendar::{date_from_file_name, HolidayCalendar};
use crate::domain::outreach::ValidationResult;
use crate::domain::types::ComplianceFlag;
use crate::validator::check::{LogFile, OutreachLogCheck};
use crate::validator::row_cleaner::{field_count, is_blank_row};
use chrono::Datelike;
use tracing::{debug, info};

// ==========================================
// TrailingBlankRowCheck
// ==========================================
pub struct TrailingBlankRowCheck;

impl OutreachLogCheck for TrailingBlankRowCheck {
    fn name(&self) -> &'static str {
        "trailing_blank_row"
    }

    fn run(&self, file: &LogFile<'_>, result: &mut ValidationResult) {
        let ends_blank = file.lines.last().map(|l| l.is_empty()).unwrap_or(false);
        if file.lines.len() < 2 || !ends_blank {
            result.fail(
                ComplianceFlag::FileStructure,
                "File does not end with a single blank row after the header",
            );
        }
    }
}

// ==========================================
// BlackoutDayCheck
// ==========================================
pub struct BlackoutDayCheck {
    calendar: HolidayCalendar,
}

impl BlackoutDayCheck {
    pub fn new(calendar: HolidayCalendar) -> Self {
        Self { calendar }
    }
}

impl OutreachLogCheck for BlackoutDayCheck {
    fn name(&self) -> &'static str {
        "blackout_day"
    }

    fn run(&self, file: &LogFile<'_>, result: &mut ValidationResult) {
        let Some(date) = date_from_file_name(file.base_name()) else {
            debug!(file = file.file_name, "文件名中无日期，跳过停发日检查");
            return;
        };
        if !self.calendar.is_holiday_or_sunday(date) {
            return;
        }

        let data_rows = file
            .lines
            .iter()
            .skip(1)
            .filter(|l| !is_blank_row(l))
            .count();
        info!(
            file = file.file_name,
            date = %date,
            weekday = %date.weekday(),
            data_rows,
            "停发日文件"
        );

        if data_rows > 0 {
            result.fail(
                ComplianceFlag::FileStructure,
                "File for Sunday/holiday should only contain header and a blank row, but data rows were found",
            );
        }
    }
}

// ==========================================
// MinimumStructureCheck
// ==========================================
pub struct MinimumStructureCheck {
    column_count: usize,
}

impl MinimumStructureCheck {
    pub fn new(column_count: usize) -> Self {
        Self { column_count }
    }
}

impl OutreachLogCheck for MinimumStructureCheck {
    fn name(&self) -> &'static str {
        "minimum_structure"
    }

    fn run(&self, file: &LogFile<'_>, result: &mut ValidationResult) {
        if file.lines.len() < 2 {
            result.fail(
                ComplianceFlag::FileStructure,
                "File must contain at least headers and one data row",
            );
            return;
        }

        let full_width = file
            .lines
            .iter()
            .filter(|l| field_count(l.trim()) == self.column_count)
            .count();
        if full_width == 0 {
            result.fail(
                ComplianceFlag::FileStructure,
                "File contains no valid data rows",
            );
        }
    }
}
