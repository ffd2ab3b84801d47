// ==========================================
// 外呼日志校验器 - America/Chicago 本地时间
// ==========================================
// 2007 年起: 3 月第二个周日 02:00 至 11 月第一个周日 02:00（本地）为 CDT (UTC-5)
// 1987-2006: 4 月第一个周日至 10 月最后一个周日；其余时间为 CST (UTC-6)
// ==========================================

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc, Weekday};

const TRANSITION_HOUR: u32 = 2;

/// 2007 年起实行现行规则，此前按 1987-2006 规则
const CURRENT_RULE_SINCE: i32 = 2007;

fn transition(year: i32, month: u32, nth: u8) -> Option<NaiveDateTime> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Sun, nth)
        .and_then(|d| d.and_hms_opt(TRANSITION_HOUR, 0, 0))
}

fn last_sunday(year: i32, month: u32) -> Option<NaiveDateTime> {
    transition(year, month, 5).or_else(|| transition(year, month, 4))
}

/// 夏令时区间 [开始, 结束)，本地时间
fn dst_window(year: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    if year >= CURRENT_RULE_SINCE {
        Some((transition(year, 3, 2)?, transition(year, 11, 1)?))
    } else {
        Some((transition(year, 4, 1)?, last_sunday(year, 10)?))
    }
}

/// 芝加哥本地时间是否处于夏令时
///
/// 回拨时段的重复时刻按 CDT 处理，春季跳过的时刻也按 CDT 处理。
/// 1987 年以前的年份沿用 1987-2006 规则。
pub fn is_daylight_saving(local: NaiveDateTime) -> bool {
    match dst_window(local.year()) {
        Some((start, end)) => local >= start && local < end,
        None => false,
    }
}

pub fn utc_offset_hours(local: NaiveDateTime) -> i64 {
    if is_daylight_saving(local) {
        -5
    } else {
        -6
    }
}

pub fn zone_abbreviation(local: NaiveDateTime) -> &'static str {
    if is_daylight_saving(local) {
        "CDT"
    } else {
        "CST"
    }
}

/// 将 `local` 视为 America/Chicago 本地时间换算为 UTC
pub fn chicago_to_utc(local: NaiveDateTime) -> DateTime<Utc> {
    let utc = local - Duration::hours(utc_offset_hours(local));
    DateTime::<Utc>::from_naive_utc_and_offset(utc, Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_summer_is_cdt() {
        let local = at(2025, 6, 10, 18, 0);
        assert!(is_daylight_saving(local));
        assert_eq!(zone_abbreviation(local), "CDT");
        assert_eq!(chicago_to_utc(local), at(2025, 6, 10, 23, 0).and_utc());
    }

    #[test]
    fn test_winter_is_cst() {
        let local = at(2024, 12, 20, 18, 0);
        assert!(!is_daylight_saving(local));
        assert_eq!(chicago_to_utc(local), at(2024, 12, 21, 0, 0).and_utc());
    }

    #[test]
    fn test_transition_boundaries_2025() {
        // 2025 年夏令时: 03-09 开始，11-02 结束
        assert!(!is_daylight_saving(at(2025, 3, 9, 1, 59)));
        assert!(is_daylight_saving(at(2025, 3, 9, 3, 0)));
        assert!(is_daylight_saving(at(2025, 11, 2, 1, 30)));
        assert!(!is_daylight_saving(at(2025, 11, 2, 2, 0)));
    }

    #[test]
    fn test_rule_before_2007() {
        // 2006 年: 4 月第一个周日 (4-02) 至 10 月最后一个周日 (10-29)
        assert!(!is_daylight_saving(at(2006, 3, 20, 18, 0)));
        assert!(!is_daylight_saving(at(2006, 4, 2, 1, 59)));
        assert!(is_daylight_saving(at(2006, 4, 2, 3, 0)));
        assert!(is_daylight_saving(at(2006, 10, 29, 1, 30)));
        assert!(!is_daylight_saving(at(2006, 10, 31, 18, 0)));
        assert_eq!(chicago_to_utc(at(2006, 10, 31, 18, 0)), at(2006, 11, 1, 0, 0).and_utc());
    }
}
