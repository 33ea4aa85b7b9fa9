use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::{CreateAttendanceRequest, NewAttendance};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::grades::check_recording_target;
use crate::services::{bad_request, current_user, storage_error_response};
use crate::utils::academic::date_or_today;
use crate::utils::validate::normalize_optional;

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    record: CreateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let date = match date_or_today(record.date.as_deref()) {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(ErrorCode::AttendanceCreationFailed, e.message())),
    };

    if let Err(response) =
        check_recording_target(&storage, &user, record.student_id, record.course_id).await
    {
        return Ok(response);
    }

    let new_record = NewAttendance {
        student_id: record.student_id,
        course_id: record.course_id,
        date: date.format("%Y-%m-%d").to_string(),
        status: record.status,
        notes: normalize_optional(record.notes),
        recorded_by: user.id,
    };

    match storage.create_attendance(new_record).await {
        Ok(record) => Ok(HttpResponse::Created().json(ApiResponse::success(
            record,
            "Attendance recorded successfully",
        ))),
        Err(e) => Ok(storage_error_response(e, ErrorCode::AttendanceCreationFailed)),
    }
}
