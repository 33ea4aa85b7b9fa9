//! 学年与学期推算
//!
//! 学年从 8 月开始：8 月及以后属于 `{y}-{y+1}`，之前属于 `{y-1}-{y}`。
//! 学期同理：8 月起为 "1"，之前为 "2"。

use chrono::{Datelike, NaiveDate, Utc};

use crate::errors::{PortalError, Result};

/// 学年起始月份（1 起计）
const ACADEMIC_YEAR_START_MONTH: u32 = 8;

pub fn academic_year(date: NaiveDate) -> String {
    let year = date.year();
    if date.month() >= ACADEMIC_YEAR_START_MONTH {
        format!("{}-{}", year, year + 1)
    } else {
        format!("{}-{}", year - 1, year)
    }
}

pub fn semester(date: NaiveDate) -> &'static str {
    if date.month() >= ACADEMIC_YEAR_START_MONTH {
        "1"
    } else {
        "2"
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn current_academic_year() -> String {
    academic_year(today())
}

pub fn current_semester() -> &'static str {
    semester(today())
}

/// 解析 YYYY-MM-DD 日期
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| PortalError::date_parse(format!("Invalid date '{value}': {e}")))
}

/// 可选日期，缺省或空字符串时取当天
pub fn date_or_today(value: Option<&str>) -> Result<NaiveDate> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_date(v),
        None => Ok(today()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_academic_year_boundary() {
        assert_eq!(academic_year(date(2024, 7, 31)), "2023-2024");
        assert_eq!(academic_year(date(2024, 8, 1)), "2024-2025");
        assert_eq!(academic_year(date(2025, 1, 15)), "2024-2025");
        assert_eq!(academic_year(date(2024, 12, 31)), "2024-2025");
    }

    #[test]
    fn test_semester_boundary() {
        assert_eq!(semester(date(2024, 7, 31)), "2");
        assert_eq!(semester(date(2024, 8, 1)), "1");
        assert_eq!(semester(date(2025, 3, 10)), "2");
        assert_eq!(semester(date(2024, 11, 2)), "1");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-09-02").expect("date"), date(2024, 9, 2));
        assert!(parse_date("02/09/2024").is_err());
        assert!(date_or_today(Some("  ")).is_ok());
        assert_eq!(
            date_or_today(Some("2023-05-06")).expect("date"),
            date(2023, 5, 6)
        );
    }
}
