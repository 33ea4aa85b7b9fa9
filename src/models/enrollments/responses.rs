use super::entities::EnrolledStudent;
use serde::Serialize;
use ts_rs::TS;

// 班级学生列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct ClassStudentListResponse {
    pub class_id: i64,
    pub items: Vec<EnrolledStudent>,
}
