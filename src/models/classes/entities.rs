use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    pub id: i64,
    // 班级名称
    pub name: String,
    // 年级（目录中的 sous-niveau，如 6ème）
    pub level: String,
    // 学年，如 2024-2025
    pub academic_year: String,
    // 负责教师，可为空
    pub teacher_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
