use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, check_class_manage_permission, load_class, validate_level};
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, not_found, storage_error_response};
use crate::utils::validate::validate_required;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut update_data: UpdateClassRequest,
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

    if let Some(name) = update_data.name.take() {
        match validate_required("name", &name) {
            Ok(name) => update_data.name = Some(name),
            Err(msg) => return Ok(bad_request(ErrorCode::ClassUpdateFailed, msg)),
        }
    }
    if let Some(level) = update_data.level.take() {
        match validate_level(&level) {
            Ok(level) => update_data.level = Some(level),
            Err(response) => return Ok(response),
        }
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(storage_error_response(e, ErrorCode::ClassUpdateFailed)),
    }
}
