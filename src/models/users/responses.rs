use super::entities::User;
use crate::models::classes::entities::Class;
use crate::models::courses::entities::CourseDetail;
use serde::Serialize;
use ts_rs::TS;

// 用户响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
}

// 用户目录响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub total: i64,
}

/// 教师名下的一个班级及其课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct TeachingClass {
    pub class: Class,
    pub courses: Vec<CourseDetail>,
}

/// 教师任课情况
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct TeachingResponse {
    pub teacher: User,
    pub classes: Vec<TeachingClass>,
}
