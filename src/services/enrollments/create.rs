use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::errors::PortalError;
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::load_class;
use crate::services::{bad_request, not_found, storage_error_response};
use crate::utils::academic::current_academic_year;

/// 将学生注册到班级，学年取当前学年
pub async fn enroll_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment: CreateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(enrollment.student_id).await {
        Ok(Some(user)) if user.role == UserRole::Student => {}
        Ok(Some(_)) => {
            return Ok(bad_request(
                ErrorCode::UserRoleInvalid,
                "Only students can be enrolled in a class",
            ));
        }
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "Student not found")),
        Err(e) => return Ok(storage_error_response(e, ErrorCode::EnrollmentFailed)),
    }
    if let Err(response) = load_class(&storage, enrollment.class_id).await {
        return Ok(response);
    }

    let academic_year = current_academic_year();
    match storage
        .enroll_student(enrollment.student_id, enrollment.class_id, &academic_year)
        .await
    {
        Ok(created) => {
            info!(
                "Student {} enrolled in class {} for {}",
                created.student_id, created.class_id, created.academic_year
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                created,
                "Student enrolled successfully",
            )))
        }
        Err(e) => match e.classified() {
            PortalError::Conflict(_) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AlreadyEnrolled,
                "Student is already enrolled in this class for the current academic year",
            ))),
            other => Ok(storage_error_response(other, ErrorCode::EnrollmentFailed)),
        },
    }
}
