use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, check_recording_target, validate_grade_value};
use crate::models::grades::requests::{CreateGradeRequest, NewGrade};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, storage_error_response};
use crate::utils::academic::{date_or_today, semester};
use crate::utils::validate::{normalize_optional, validate_required};

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_data: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let grade_value = match validate_grade_value(grade_data.grade_value) {
        Ok(value) => value,
        Err(msg) => return Ok(bad_request(ErrorCode::GradeValueInvalid, msg)),
    };
    let grade_type = match validate_required("grade_type", &grade_data.grade_type) {
        Ok(value) => value,
        Err(msg) => return Ok(bad_request(ErrorCode::GradeCreationFailed, msg)),
    };
    let date = match date_or_today(grade_data.date_assigned.as_deref()) {
        Ok(date) => date,
        Err(e) => return Ok(bad_request(ErrorCode::GradeCreationFailed, e.message())),
    };

    if let Err(response) =
        check_recording_target(&storage, &user, grade_data.student_id, grade_data.course_id).await
    {
        return Ok(response);
    }

    let new_grade = NewGrade {
        student_id: grade_data.student_id,
        course_id: grade_data.course_id,
        grade_value,
        grade_type,
        date_assigned: date.format("%Y-%m-%d").to_string(),
        semester: semester(date).to_string(),
        comments: normalize_optional(grade_data.comments),
        created_by: user.id,
    };

    match storage.create_grade(new_grade).await {
        Ok(grade) => {
            info!(
                "Grade {} recorded for student {} in course {} by {}",
                grade.id, grade.student_id, grade.course_id, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade recorded successfully")))
        }
        Err(e) => Ok(storage_error_response(e, ErrorCode::GradeCreationFailed)),
    }
}
