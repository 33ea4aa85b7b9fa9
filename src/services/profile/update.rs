use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, not_found, storage_error_response};
use crate::utils::academic::parse_date;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_required};

use super::ProfileService;

/// 编辑个人资料；角色与状态不能通过此接口修改
pub async fn handle_update_profile(
    service: &ProfileService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current_user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let mut update = UpdateUserRequest::default();

    if let Some(first_name) = update_data.first_name {
        match validate_required("first_name", &first_name) {
            Ok(v) => update.first_name = Some(v),
            Err(msg) => return Ok(bad_request(ErrorCode::UserNameInvalid, msg)),
        }
    }
    if let Some(last_name) = update_data.last_name {
        match validate_required("last_name", &last_name) {
            Ok(v) => update.last_name = Some(v),
            Err(msg) => return Ok(bad_request(ErrorCode::UserNameInvalid, msg)),
        }
    }

    if let Some(email) = update_data.email {
        let email = email.trim().to_lowercase();
        if let Err(msg) = validate_email(&email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        if let Ok(Some(existing)) = storage.get_user_by_email(&email).await
            && existing.id != current_user.id
        {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            )));
        }
        update.email = Some(email);
    }

    if let Some(ref password) = update_data.password {
        if let Err(msg) = validate_password_simple(password) {
            return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
        }
        match hash_password(password) {
            Ok(hash) => update.password = Some(hash),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Password hashing failed: {e}"),
                    )),
                );
            }
        }
    }

    // 可选字段：空字符串表示清除
    update.phone = update_data.phone.map(|v| v.trim().to_string());
    update.address = update_data.address.map(|v| v.trim().to_string());
    if let Some(date_of_birth) = update_data.date_of_birth {
        let date_of_birth = date_of_birth.trim().to_string();
        if !date_of_birth.is_empty() && parse_date(&date_of_birth).is_err() {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                "date_of_birth must be formatted as YYYY-MM-DD",
            ));
        }
        update.date_of_birth = Some(date_of_birth);
    }

    match storage.update_user(current_user.id, update).await {
        Ok(Some(user)) => {
            service.evict_cached_user(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(storage_error_response(e, ErrorCode::UserUpdateFailed)),
    }
}
