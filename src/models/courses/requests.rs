use serde::Deserialize;
use ts_rs::TS;

/// 添加课程：niveau / sous-niveau / matière 必须是目录中的组合
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub niveau: String,
    pub sous_niveau: String,
    pub matiere: String,
    pub class_id: i64,
    /// 仅管理员使用，且必须填写
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseQueryParams {
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

// 存储层插入参数
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub class_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub academic_year: String,
    pub semester: String,
}

// 课程列表查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub class_ids: Option<Vec<i64>>,
    pub teacher_id: Option<i64>,
}
