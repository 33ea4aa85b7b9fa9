use serde::Deserialize;
use ts_rs::TS;

// 班级查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassQueryParams {
    pub level: Option<String>,
    pub teacher_id: Option<i64>,
}

// 创建班级请求
//
// # teacher_id 字段说明
// - **教师创建**：忽略，始终使用当前登录教师的 ID
// - **管理员创建**：可选，指定负责教师；不填写则班级暂无负责教师
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub level: String,
    pub teacher_id: Option<i64>,
    /// 存储层使用，由服务层根据当前日期计算
    #[serde(skip)]
    #[ts(skip)]
    pub academic_year: String,
}

// 更新班级请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub level: Option<String>,
}

// 班级列表查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ClassListQuery {
    pub level: Option<String>,
    pub teacher_id: Option<i64>,
    /// 只返回该学生注册的班级
    pub student_id: Option<i64>,
}
