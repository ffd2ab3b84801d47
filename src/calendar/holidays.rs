// ==========================================
// 外呼日志校验器 - 停发日日历
// ==========================================
// 停发日: 周日或配置的美国假日
// 日期只取自文件名中的数字，不涉及时区
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub month: u32,
    pub day: u32,
    /// 每年同月同日
    #[serde(default)]
    pub every_year: bool,
    /// 仅在 `every_year` 为 false 时使用
    #[serde(default)]
    pub year: Option<i32>,
}

impl HolidayEntry {
    pub const fn annual(month: u32, day: u32) -> Self {
        Self {
            month,
            day,
            every_year: true,
            year: None,
        }
    }

    pub const fn pinned(year: i32, month: u32, day: u32) -> Self {
        Self {
            month,
            day,
            every_year: false,
            year: Some(year),
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        if date.month() != self.month || date.day() != self.day {
            return false;
        }
        self.every_year || self.year == Some(date.year())
    }
}

/// 阵亡将士纪念日、劳动节、感恩节日期逐年变化，按年份固定
pub const US_FEDERAL_HOLIDAYS: [HolidayEntry; 18] = [
    HolidayEntry::annual(1, 1),   // 元旦
    HolidayEntry::annual(7, 4),   // 独立日
    HolidayEntry::annual(12, 25), // 圣诞节
    // 阵亡将士纪念日
    HolidayEntry::pinned(2024, 5, 27),
    HolidayEntry::pinned(2025, 5, 26),
    HolidayEntry::pinned(2026, 5, 25),
    HolidayEntry::pinned(2027, 5, 31),
    HolidayEntry::pinned(2028, 5, 29),
    // 劳动节
    HolidayEntry::pinned(2024, 9, 2),
    HolidayEntry::pinned(2025, 9, 1),
    HolidayEntry::pinned(2026, 9, 7),
    HolidayEntry::pinned(2027, 9, 6),
    HolidayEntry::pinned(2028, 9, 4),
    // 感恩节
    HolidayEntry::pinned(2024, 11, 28),
    HolidayEntry::pinned(2025, 11, 27),
    HolidayEntry::pinned(2026, 11, 26),
    HolidayEntry::pinned(2027, 11, 25),
    HolidayEntry::pinned(2028, 11, 23),
];

/// 内置表加配置追加项，构造后只读
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    extra: Vec<HolidayEntry>,
}

impl HolidayCalendar {
    pub fn new(extra: Vec<HolidayEntry>) -> Self {
        Self { extra }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        US_FEDERAL_HOLIDAYS
            .iter()
            .chain(self.extra.iter())
            .any(|h| h.matches(date))
    }

    pub fn is_holiday_or_sunday(&self, date: NaiveDate) -> bool {
        date.weekday() == Weekday::Sun || self.is_holiday(date)
    }
}

/// 周日或内置美国联邦假日
pub fn is_holiday_or_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun || US_FEDERAL_HOLIDAYS.iter().any(|h| h.matches(date))
}

static EIGHT_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{8}").expect("valid regex"));

/// 名称中第一段 8 位数字按 YYYYMMDD 解析
pub fn date_from_file_name(file_name: &str) -> Option<NaiveDate> {
    let digits = EIGHT_DIGITS.find(file_name)?.as_str();
    let year = digits[0..4].parse().ok()?;
    let month = digits[4..6].parse().ok()?;
    let day = digits[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
