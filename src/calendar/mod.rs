// ==========================================
// 外呼日志校验器 - 日历工具
// ==========================================

pub mod central_time;
pub mod holidays;

pub use central_time::{chicago_to_utc, is_daylight_saving, zone_abbreviation};
pub use holidays::{
    date_from_file_name, is_holiday_or_sunday, HolidayCalendar, HolidayEntry, US_FEDERAL_HOLIDAYS,
};
