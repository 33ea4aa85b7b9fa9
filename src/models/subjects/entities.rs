use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    /// 唯一编码，由年级与科目名生成，如 6EME-MATHEMATIQUES
    pub code: String,
    pub name: String,
    pub coefficient: f64,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 查找或创建科目时使用
#[derive(Debug, Clone)]
pub struct NewSubject {
    pub code: String,
    pub name: String,
    pub coefficient: f64,
    pub description: Option<String>,
}
