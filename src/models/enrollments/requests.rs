use serde::Deserialize;
use ts_rs::TS;

/// 将学生注册到班级（当前学年）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub student_id: i64,
    pub class_id: i64,
}
