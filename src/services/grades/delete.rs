use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::{load_course, owns_course};
use crate::services::{current_user, forbidden, not_found, storage_error_response};

/// 删除成绩：课程的任课教师或管理员
pub async fn delete_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let grade = match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => return Ok(storage_error_response(e, ErrorCode::InternalServerError)),
    };
    let course = match load_course(&storage, grade.course_id).await {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };
    if !owns_course(&user, &course) {
        return Ok(forbidden(
            ErrorCode::CoursePermissionDenied,
            "You do not have permission to delete this grade",
        ));
    }

    match storage.delete_grade(grade_id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(storage_error_response(e, ErrorCode::GradeDeleteFailed)),
    }
}
