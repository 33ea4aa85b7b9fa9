use super::entities::AttendanceStatus;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CreateAttendanceRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub status: AttendanceStatus,
    /// 缺省为当天
    pub date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceQueryParams {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
}

// 存储层插入参数
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub course_id: i64,
    pub date: String,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub recorded_by: i64,
}

// 考勤列表查询（用于存储层），按日期倒序
#[derive(Debug, Clone, Default)]
pub struct AttendanceListQuery {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub teacher_id: Option<i64>,
}
