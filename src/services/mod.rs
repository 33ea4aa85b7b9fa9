pub mod attendance;
pub mod auth;
pub mod catalog;
pub mod classes;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod grades;
pub mod profile;
pub mod users;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use classes::ClassService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use enrollments::EnrollmentService;
pub use grades::GradeService;
pub use profile::ProfileService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};

use crate::errors::PortalError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// 存储层错误转换为响应
///
/// 错误文本先经过 [`PortalError::classified`] 归类：行级安全 403，唯一约束 409，
/// 外键约束 400，其余 500 并带上原始消息。
pub(crate) fn storage_error_response(err: PortalError, fallback: ErrorCode) -> HttpResponse {
    match err.classified() {
        PortalError::PolicyViolation(msg) => {
            tracing::warn!("Policy violation: {}", msg);
            HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::PermissionDenied,
                "Permission denied: you are not allowed to perform this action",
            ))
        }
        PortalError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg))
        }
        PortalError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        }
        PortalError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        other => {
            tracing::error!("{}", other);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(fallback, other.message()))
        }
    }
}

/// 当前登录用户，未登录时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_storage_error_status_mapping() {
        let cases = [
            (
                "new row violates row-level security policy for table \"grades\"",
                StatusCode::FORBIDDEN,
            ),
            ("UNIQUE constraint failed: users.email", StatusCode::CONFLICT),
            ("FOREIGN KEY constraint failed", StatusCode::BAD_REQUEST),
            ("disk I/O error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (message, status) in cases {
            let response = storage_error_response(
                PortalError::database_operation(message),
                ErrorCode::InternalServerError,
            );
            assert_eq!(response.status(), status, "{message}");
        }
    }

    #[test]
    fn test_not_found_passthrough() {
        let response = storage_error_response(
            PortalError::not_found("Class not found"),
            ErrorCode::ClassUpdateFailed,
        );
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
