use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::enrollments::responses::ClassStudentListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::{check_class_manage_permission, load_class};
use crate::services::{current_user, storage_error_response};

pub async fn list_class_students(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let class = match load_class(&storage, class_id).await {
        Ok(class) => class,
        Err(response) => return Ok(response),
    };
    if let Err(response) = check_class_manage_permission(&user, &class) {
        return Ok(response);
    }

    match storage.list_class_students(class_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassStudentListResponse { class_id, items },
            "Class students retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(e, ErrorCode::InternalServerError)),
    }
}
