use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::{AttendanceListQuery, AttendanceQueryParams};
use crate::models::attendance::responses::AttendanceListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::grades::list_scope;
use crate::services::{current_user, storage_error_response};
use crate::utils::stats::attendance_summary;

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let (student_id, teacher_id) = list_scope(&user, query.student_id);
    let list_query = AttendanceListQuery {
        student_id,
        course_id: query.course_id,
        teacher_id,
    };

    match storage.list_attendance(list_query).await {
        Ok(items) => {
            let summary = attendance_summary(items.iter().map(|r| r.status));
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AttendanceListResponse { items, summary },
                "Attendance list retrieved successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(e, ErrorCode::InternalServerError)),
    }
}
