//! 仪表盘统计：平均分与出勤率

use crate::models::attendance::entities::AttendanceStatus;
use crate::models::dashboard::responses::AttendanceSummary;

/// 保留 `decimals` 位小数
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// 算术平均，空集合为 0
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 展示用平均分（两位小数）
pub fn display_average(values: &[f64]) -> f64 {
    round_to(average(values), 2)
}

/// 出勤率 = present / total × 100，total 为 0 时为 0
pub fn attendance_rate(present: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    present as f64 / total as f64 * 100.0
}

/// 按状态统计考勤
pub fn attendance_summary<I>(statuses: I) -> AttendanceSummary
where
    I: IntoIterator<Item = AttendanceStatus>,
{
    let mut summary = AttendanceSummary::default();
    for status in statuses {
        match status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Absent => summary.absent += 1,
            AttendanceStatus::Late => summary.late += 1,
        }
        summary.total += 1;
    }
    summary.rate = round_to(attendance_rate(summary.present, summary.total), 1);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(display_average(&[]), 0.0);
    }

    #[test]
    fn test_average_mean() {
        assert_eq!(average(&[10.0, 14.0, 18.0]), 14.0);
        assert_eq!(display_average(&[12.0, 13.0, 15.0]), 13.33);
    }

    #[test]
    fn test_attendance_rate() {
        assert_eq!(attendance_rate(0, 0), 0.0);
        assert_eq!(attendance_rate(3, 4), 75.0);
        assert_eq!(round_to(attendance_rate(2, 3), 1), 66.7);
    }

    #[test]
    fn test_attendance_summary_counts() {
        use AttendanceStatus::*;
        let summary = attendance_summary([Present, Absent, Late, Present, Present]);
        assert_eq!(summary.present, 3);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.rate, 60.0);

        assert_eq!(
            attendance_summary(Vec::<AttendanceStatus>::new()),
            AttendanceSummary::default()
        );
    }
}
