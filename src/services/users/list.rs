use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::UserListParams, responses::UserListResponse},
};
use crate::services::{bad_request, storage_error_response};
use crate::utils::directory::{RoleFilter, filter_directory};

/// 一次取出全部资料，在内存中按角色和关键字筛选
pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let role = match RoleFilter::parse(query.role.as_deref()) {
        Ok(role) => role,
        Err(msg) => return Ok(bad_request(ErrorCode::UserRoleInvalid, msg)),
    };
    let search = query.search.unwrap_or_default();

    let storage = service.get_storage(request);
    match storage.list_all_users().await {
        Ok(users) => {
            let items = filter_directory(users, &role, &search);
            let total = items.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserListResponse { items, total },
                "User list retrieved successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(e, ErrorCode::InternalServerError)),
    }
}
