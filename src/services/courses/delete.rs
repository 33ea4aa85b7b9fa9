use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, load_course, owns_course};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error_response};

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let course = match load_course(&storage, course_id).await {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };
    if !owns_course(&user, &course) {
        return Ok(forbidden(
            ErrorCode::CoursePermissionDenied,
            "You do not have permission to delete this course",
        ));
    }

    match storage.delete_course(course_id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(storage_error_response(e, ErrorCode::CourseDeleteFailed)),
    }
}
