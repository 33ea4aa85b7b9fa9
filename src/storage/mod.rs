use std::sync::Arc;

use crate::models::{
    attendance::{
        entities::AttendanceRecord,
        requests::{AttendanceListQuery, NewAttendance},
    },
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
    },
    courses::{
        entities::{Course, CourseDetail},
        requests::{CourseListQuery, NewCourse},
    },
    enrollments::entities::{EnrolledStudent, Enrollment},
    grades::{
        entities::{Grade, GradeDetail},
        requests::{GradeListQuery, NewGrade},
    },
    subjects::entities::{NewSubject, Subject},
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户资料
    // 创建用户（password 字段已是哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 全部用户，按创建时间倒序
    async fn list_all_users(&self) -> Result<Vec<User>>;
    // 最近注册的用户
    async fn list_recent_users(&self, limit: u64) -> Result<Vec<User>>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;

    /// 班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 按级别、教师或注册学生筛选
    async fn list_classes(&self, query: ClassListQuery) -> Result<Vec<Class>>;
    async fn update_class(&self, class_id: i64, update: UpdateClassRequest)
    -> Result<Option<Class>>;
    // 删除班级（课程与注册记录级联删除）
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 取消班级的教师分配
    async fn unassign_class_teacher(&self, class_id: i64) -> Result<Option<Class>>;
    async fn count_classes(&self) -> Result<u64>;

    /// 科目
    // 按 code 查找，不存在时创建
    async fn get_or_create_subject(&self, subject: NewSubject) -> Result<Subject>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;

    /// 课程
    async fn create_course(&self, course: NewCourse) -> Result<Course>;
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 课程及其科目信息
    async fn list_courses(&self, query: CourseListQuery) -> Result<Vec<CourseDetail>>;
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 成绩
    async fn create_grade(&self, grade: NewGrade) -> Result<Grade>;
    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>>;
    // 按 date_assigned 倒序，附带科目名称与系数
    async fn list_grades(&self, query: GradeListQuery) -> Result<Vec<GradeDetail>>;
    async fn delete_grade(&self, grade_id: i64) -> Result<bool>;

    /// 考勤
    async fn create_attendance(&self, record: NewAttendance) -> Result<AttendanceRecord>;
    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<Vec<AttendanceRecord>>;

    /// 学生注册
    async fn enroll_student(
        &self,
        student_id: i64,
        class_id: i64,
        academic_year: &str,
    ) -> Result<Enrollment>;
    async fn get_enrollment_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>>;
    async fn delete_enrollment(&self, enrollment_id: i64) -> Result<bool>;
    // 班级内的学生及其资料
    async fn list_class_students(&self, class_id: i64) -> Result<Vec<EnrolledStudent>>;
    // 注册记录；class_ids 为 None 时返回全部
    async fn list_enrollments(&self, class_ids: Option<Vec<i64>>) -> Result<Vec<Enrollment>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
