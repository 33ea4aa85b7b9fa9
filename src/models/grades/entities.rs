use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 成绩（满分 20）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub grade_value: f64,
    /// 如 devoir、examen、interrogation
    pub grade_type: String,
    /// YYYY-MM-DD
    pub date_assigned: String,
    pub semester: String,
    pub comments: Option<String>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 成绩及所属科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub grade: Grade,
    pub subject_name: String,
    pub coefficient: f64,
}

pub const GRADE_MIN: f64 = 0.0;
pub const GRADE_MAX: f64 = 20.0;
