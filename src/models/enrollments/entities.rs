use crate::models::users::entities::User;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学生在某学年注册到某班级
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub academic_year: String,
    pub enrollment_date: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrolledStudent {
    pub enrollment: Enrollment,
    pub student: User,
}
