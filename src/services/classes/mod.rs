pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::entities::Class;
use crate::models::classes::requests::{ClassQueryParams, CreateClassRequest, UpdateClassRequest};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{forbidden, not_found, storage_error_response};
use crate::storage::Storage;
use crate::utils::catalog;
use crate::utils::validate::validate_required;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 按角色列出班级
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    pub async fn get_class(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, update_data).await
    }

    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }

    // 取消教师分配（仅管理员）
    pub async fn unassign_teacher(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::unassign_teacher(self, request, class_id).await
    }
}

/// 读取班级，不存在时返回 404 响应
pub(crate) async fn load_class(
    storage: &Arc<dyn Storage>,
    class_id: i64,
) -> Result<Class, HttpResponse> {
    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => Ok(class),
        Ok(None) => Err(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Err(storage_error_response(e, ErrorCode::InternalServerError)),
    }
}

/// 管理员或班级所属教师可以修改班级
pub(crate) fn check_class_manage_permission(user: &User, class: &Class) -> Result<(), HttpResponse> {
    match user.role {
        UserRole::Admin => Ok(()),
        UserRole::Teacher if class.teacher_id == Some(user.id) => Ok(()),
        _ => Err(forbidden(
            ErrorCode::ClassPermissionDenied,
            "You do not have permission to manage this class",
        )),
    }
}

/// 班级级别必须是目录中的 sous-niveau
pub(crate) fn validate_level(level: &str) -> Result<String, HttpResponse> {
    let level = validate_required("level", level).map_err(|msg| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ClassLevelInvalid, msg))
    })?;
    if !catalog::is_known_sous_niveau(&level) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ClassLevelInvalid,
            format!("Unknown class level: {level}"),
        )));
    }
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;
    use actix_web::http::StatusCode;

    fn user(id: i64, role: UserRole) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            email: format!("u{id}@saint-jean.fr"),
            password_hash: String::new(),
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            role,
            status: UserStatus::Active,
            phone: None,
            address: None,
            date_of_birth: None,
            profile_picture_url: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn class(teacher_id: Option<i64>) -> Class {
        Class {
            id: 1,
            name: "6ème A".to_string(),
            level: "6ème".to_string(),
            academic_year: "2024-2025".to_string(),
            teacher_id,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_manage_permission() {
        assert!(check_class_manage_permission(&user(1, UserRole::Admin), &class(None)).is_ok());
        assert!(check_class_manage_permission(&user(2, UserRole::Teacher), &class(Some(2))).is_ok());
        let denied =
            check_class_manage_permission(&user(3, UserRole::Teacher), &class(Some(2))).unwrap_err();
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
        assert!(check_class_manage_permission(&user(4, UserRole::Student), &class(Some(4))).is_err());
    }

    #[test]
    fn test_validate_level() {
        assert_eq!(validate_level(" CM2 ").ok(), Some("CM2".to_string()));
        assert!(validate_level("Master 1").is_err());
        assert!(validate_level("  ").is_err());
    }
}
