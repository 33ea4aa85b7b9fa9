use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::RegisterRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, storage_error_response};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_required};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 字段校验
    let email = register_request.email.trim().to_lowercase();
    if let Err(msg) = validate_email(&email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }
    let first_name = match validate_required("first_name", &register_request.first_name) {
        Ok(v) => v,
        Err(msg) => return Ok(bad_request(ErrorCode::UserNameInvalid, msg)),
    };
    let last_name = match validate_required("last_name", &register_request.last_name) {
        Ok(v) => v,
        Err(msg) => return Ok(bad_request(ErrorCode::UserNameInvalid, msg)),
    };
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    // 管理员账号只能由管理员授予
    if register_request.role == UserRole::Admin {
        return Ok(bad_request(
            ErrorCode::UserRoleInvalid,
            "Self-registration is only available for students and teachers",
        ));
    }

    // 2. 邮箱唯一
    if let Err(response) = check_email_exists(&storage, &email).await {
        return Ok(response);
    }

    // 3. 哈希密码并创建资料
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    let create_request = CreateUserRequest {
        email,
        password: password_hash,
        first_name,
        last_name,
        role: register_request.role,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            tracing::info!("Registered user {} as {}", user.id, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "Registration successful",
            )))
        }
        Err(e) => Ok(storage_error_response(e, ErrorCode::RegisterFailed)),
    }
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(storage_error_response(e, ErrorCode::RegisterFailed)),
    }
}
