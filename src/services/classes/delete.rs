use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, check_class_manage_permission, load_class};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, not_found, storage_error_response};

/// 删除班级，课程与注册记录由数据库级联删除
pub async fn delete_class(
    service: &ClassService,
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

    match storage.delete_class(class_id).await {
        Ok(true) => {
            tracing::info!("Class {} deleted by {}", class_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(storage_error_response(e, ErrorCode::ClassDeleteFailed)),
    }
}

pub async fn unassign_teacher(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.unassign_class_teacher(class_id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Teacher unassigned from class",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(storage_error_response(e, ErrorCode::ClassUpdateFailed)),
    }
}
