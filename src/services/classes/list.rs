use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::classes::requests::{ClassListQuery, ClassQueryParams};
use crate::models::classes::responses::ClassListResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, storage_error_response};

/// 管理员：全部或按级别/教师筛选；教师：自己的班级；学生：所在班级
pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let level = query.level.filter(|l| !l.trim().is_empty());
    let list_query = match user.role {
        UserRole::Admin => ClassListQuery {
            level,
            teacher_id: query.teacher_id,
            student_id: None,
        },
        UserRole::Teacher => ClassListQuery {
            level,
            teacher_id: Some(user.id),
            student_id: None,
        },
        UserRole::Student => ClassListQuery {
            level,
            teacher_id: None,
            student_id: Some(user.id),
        },
    };

    let storage = service.get_storage(request);
    match storage.list_classes(list_query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassListResponse { items },
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(e, ErrorCode::InternalServerError)),
    }
}
