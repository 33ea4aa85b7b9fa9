use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{
    classes::entities::Class,
    courses::entities::CourseDetail,
    grades::entities::GradeDetail,
    users::entities::User,
};

/// 考勤统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AttendanceSummary {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub total: i64,
    /// 出勤率（百分比，保留一位小数）
    pub rate: f64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentCourse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: CourseDetail,
    /// 该学生在本课程的平均分，没有成绩时为 0
    pub average: f64,
    pub grade_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboard {
    pub profile: User,
    pub classes: Vec<Class>,
    pub courses: Vec<StudentCourse>,
    pub overall_average: f64,
    pub recent_grades: Vec<GradeDetail>,
    pub attendance: AttendanceSummary,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherClass {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: Class,
    pub student_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherDashboard {
    pub profile: User,
    pub classes: Vec<TeacherClass>,
    pub courses: Vec<CourseDetail>,
    pub total_students: i64,
    pub average: f64,
    pub attendance_rate: f64,
    pub recent_grades: Vec<GradeDetail>,
}

/// 按年级汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct LevelOverview {
    pub level: String,
    pub niveau: Option<String>,
    pub class_count: i64,
    pub student_count: i64,
    pub average: f64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AdminDashboard {
    pub student_count: i64,
    pub teacher_count: i64,
    pub class_count: i64,
    pub average: f64,
    pub attendance_rate: f64,
    pub recent_users: Vec<User>,
    pub levels: Vec<LevelOverview>,
}
