pub mod attendance;
pub mod auth;
pub mod catalog;
pub mod classes;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod subjects;
pub mod users;

pub use common::ApiResponse;

use serde::Serialize;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 认证与用户；3xxx 班级；4xxx 课程与科目；
/// 5xxx 成绩与考勤；6xxx 注册；7xxx 文件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,
    PermissionDenied = 1403,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNotFound = 2002,
    UserEmailInvalid = 2003,
    UserEmailAlreadyExists = 2004,
    UserPasswordInvalid = 2005,
    UserNameInvalid = 2006,
    UserUpdateFailed = 2007,
    UserDeleteFailed = 2008,
    CanNotDeleteCurrentUser = 2009,
    UserRoleInvalid = 2010,

    ClassNotFound = 3000,
    ClassCreationFailed = 3001,
    ClassUpdateFailed = 3002,
    ClassDeleteFailed = 3003,
    ClassPermissionDenied = 3004,
    ClassLevelInvalid = 3005,

    CourseNotFound = 4000,
    CourseCreationFailed = 4001,
    CourseDeleteFailed = 4002,
    CoursePermissionDenied = 4003,
    CatalogEntryNotFound = 4004,

    GradeNotFound = 5000,
    GradeCreationFailed = 5001,
    GradeValueInvalid = 5002,
    GradeDeleteFailed = 5003,
    AttendanceCreationFailed = 5100,

    EnrollmentNotFound = 6000,
    EnrollmentFailed = 6001,
    AlreadyEnrolled = 6002,

    FileNotFound = 7000,
    FileUploadFailed = 7001,
    FileTypeNotAllowed = 7002,
    FileSizeExceeded = 7003,
    MultifileUploadNotAllowed = 7004,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 1001);
        assert_eq!(ErrorCode::PermissionDenied as i32, 1403);
        assert_eq!(ErrorCode::GradeValueInvalid as i32, 5002);
    }
}
