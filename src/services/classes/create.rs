use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{ClassService, validate_level};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, forbidden, not_found, storage_error_response};
use crate::storage::Storage;
use crate::utils::academic::current_academic_year;
use crate::utils::validate::validate_required;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    class_data.name = match validate_required("name", &class_data.name) {
        Ok(name) => name,
        Err(msg) => return Ok(bad_request(ErrorCode::ClassCreationFailed, msg)),
    };
    class_data.level = match validate_level(&class_data.level) {
        Ok(level) => level,
        Err(response) => return Ok(response),
    };

    // 教师只能为自己创建；管理员可指定任一教师或不指定
    class_data.teacher_id = match resolve_teacher(&user, class_data.teacher_id, &storage).await {
        Ok(teacher_id) => teacher_id,
        Err(response) => return Ok(response),
    };
    class_data.academic_year = current_academic_year();

    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} ({}) created by {}", class.id, class.name, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(storage_error_response(e, ErrorCode::ClassCreationFailed)),
    }
}

async fn resolve_teacher(
    user: &User,
    requested: Option<i64>,
    storage: &Arc<dyn Storage>,
) -> Result<Option<i64>, HttpResponse> {
    match user.role {
        UserRole::Teacher => match requested {
            None => Ok(Some(user.id)),
            Some(id) if id == user.id => Ok(Some(id)),
            Some(_) => Err(forbidden(
                ErrorCode::ClassPermissionDenied,
                "You do not have permission to create a class for another teacher",
            )),
        },
        UserRole::Admin => {
            let Some(teacher_id) = requested else {
                return Ok(None);
            };
            match storage.get_user_by_id(teacher_id).await {
                Ok(Some(teacher)) if teacher.role == UserRole::Teacher => Ok(Some(teacher_id)),
                Ok(Some(_)) => Err(bad_request(
                    ErrorCode::UserRoleInvalid,
                    "Classes can only be assigned to teachers",
                )),
                Ok(None) => Err(not_found(ErrorCode::UserNotFound, "Teacher not found")),
                Err(e) => Err(storage_error_response(e, ErrorCode::ClassCreationFailed)),
            }
        }
        UserRole::Student => Err(forbidden(
            ErrorCode::ClassPermissionDenied,
            "You do not have permission to create a class",
        )),
    }
}
