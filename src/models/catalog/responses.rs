use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::subjects::entities::Subject;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct NiveauListResponse {
    pub items: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct SousNiveauListResponse {
    pub niveau: String,
    pub items: Vec<String>,
}

/// 目录中的一门科目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct MatiereItem {
    pub matiere: String,
    pub coefficient: f64,
    pub code: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct MatiereListResponse {
    pub niveau: String,
    pub sous_niveau: String,
    pub items: Vec<MatiereItem>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct SousNiveauQuery {
    pub niveau: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct MatiereQuery {
    pub niveau: String,
    pub sous_niveau: String,
}
