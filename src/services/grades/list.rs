use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, list_scope};
use crate::models::grades::requests::{GradeListQuery, GradeQueryParams};
use crate::models::grades::responses::GradeListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, storage_error_response};

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    // 权限过滤
    let (student_id, teacher_id) = list_scope(&user, query.student_id);
    let list_query = GradeListQuery {
        student_id,
        course_id: query.course_id,
        teacher_id,
        limit: None,
    };

    match storage.list_grades(list_query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeListResponse { items },
            "Grade list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(e, ErrorCode::InternalServerError)),
    }
}
