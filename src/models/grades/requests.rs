use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub grade_value: f64,
    pub grade_type: String,
    /// 缺省为当天
    pub date_assigned: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeQueryParams {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
}

// 存储层插入参数
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub student_id: i64,
    pub course_id: i64,
    pub grade_value: f64,
    pub grade_type: String,
    pub date_assigned: String,
    pub semester: String,
    pub comments: Option<String>,
    pub created_by: i64,
}

// 成绩列表查询（用于存储层），按 date_assigned 倒序
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    /// 只查询该教师任课的课程
    pub teacher_id: Option<i64>,
    pub limit: Option<u64>,
}
