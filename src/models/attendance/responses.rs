use super::entities::AttendanceRecord;
use crate::models::dashboard::responses::AttendanceSummary;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListResponse {
    pub items: Vec<AttendanceRecord>,
    pub summary: AttendanceSummary,
}
