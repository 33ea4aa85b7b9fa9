use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::requests::ClassListQuery,
    courses::requests::CourseListQuery,
    users::{entities::UserRole, requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::{bad_request, not_found, storage_error_response};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_password_simple, validate_required};

/// 教师仍负责班级或课程时不能改为其他角色
pub(crate) async fn check_teacher_demotion(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    new_role: &UserRole,
) -> Result<(), HttpResponse> {
    if *new_role == UserRole::Teacher {
        return Ok(());
    }
    let current = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => return Err(storage_error_response(e, ErrorCode::UserUpdateFailed)),
    };
    if current.role != UserRole::Teacher {
        return Ok(());
    }

    let classes = storage
        .list_classes(ClassListQuery {
            teacher_id: Some(user_id),
            ..Default::default()
        })
        .await
        .map_err(|e| storage_error_response(e, ErrorCode::UserUpdateFailed))?;
    let courses = storage
        .list_courses(CourseListQuery {
            teacher_id: Some(user_id),
            ..Default::default()
        })
        .await
        .map_err(|e| storage_error_response(e, ErrorCode::UserUpdateFailed))?;

    if !classes.is_empty() || !courses.is_empty() {
        return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserRoleInvalid,
            "Teacher still owns classes or courses; reassign them first",
        )));
    }
    Ok(())
}

/// 管理员更新用户（可修改角色与状态）
pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 管理员不能修改自己的角色或状态
    if RequireJWT::extract_user_id(request) == Some(user_id)
        && (update_data.role.is_some() || update_data.status.is_some())
    {
        return Ok(bad_request(
            ErrorCode::UserUpdateFailed,
            "Cannot change your own role or status",
        ));
    }

    if let Some(ref email) = update_data.email {
        let email = email.trim().to_lowercase();
        if let Err(msg) = validate_email(&email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        update_data.email = Some(email);
    }
    for name in [&mut update_data.first_name, &mut update_data.last_name] {
        if let Some(value) = name.take() {
            match validate_required("name", &value) {
                Ok(v) => *name = Some(v),
                Err(msg) => return Ok(bad_request(ErrorCode::UserNameInvalid, msg)),
            }
        }
    }

    if let Some(password) = update_data.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
        }
        match crate::utils::password::hash_password(&password) {
            Ok(hash) => update_data.password = Some(hash),
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

    let storage = service.get_storage(request);
    if let Some(ref role) = update_data.role
        && let Err(response) = check_teacher_demotion(&storage, user_id, role).await
    {
        return Ok(response);
    }

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            service.invalidate_user_cache(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "User information updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(storage_error_response(e, ErrorCode::UserUpdateFailed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::courses::requests::NewCourse;
    use crate::models::subjects::entities::NewSubject;
    use crate::storage::sea_orm_storage::test_support;
    use actix_web::http::StatusCode;

    #[tokio::test]
    async fn test_check_teacher_demotion() {
        let db = test_support::storage().await;
        let titulaire = test_support::user(&db, "titulaire@saint-jean.fr", UserRole::Teacher).await;
        let intervenant = test_support::user(&db, "maths@saint-jean.fr", UserRole::Teacher).await;
        let libre = test_support::user(&db, "libre@saint-jean.fr", UserRole::Teacher).await;
        let student = test_support::user(&db, "eleve@saint-jean.fr", UserRole::Student).await;
        let storage: Arc<dyn Storage> = Arc::new(db);

        let class = storage
            .create_class(CreateClassRequest {
                name: "5ème B".to_string(),
                level: "5ème".to_string(),
                teacher_id: Some(titulaire.id),
                academic_year: "2024-2025".to_string(),
            })
            .await
            .expect("class");
        let subject = storage
            .get_or_create_subject(NewSubject {
                code: "5EME-MATHEMATIQUES".to_string(),
                name: "Mathématiques".to_string(),
                coefficient: 4.0,
                description: None,
            })
            .await
            .expect("subject");
        storage
            .create_course(NewCourse {
                class_id: class.id,
                teacher_id: intervenant.id,
                subject_id: subject.id,
                academic_year: "2024-2025".to_string(),
                semester: "1".to_string(),
            })
            .await
            .expect("course");

        // 负责班级
        let owns_class = check_teacher_demotion(&storage, titulaire.id, &UserRole::Student)
            .await
            .expect_err("class teacher");
        assert_eq!(owns_class.status(), StatusCode::CONFLICT);

        // 只负责课程
        let owns_course = check_teacher_demotion(&storage, intervenant.id, &UserRole::Admin)
            .await
            .expect_err("course teacher");
        assert_eq!(owns_course.status(), StatusCode::CONFLICT);

        assert!(check_teacher_demotion(&storage, titulaire.id, &UserRole::Teacher).await.is_ok());
        assert!(check_teacher_demotion(&storage, libre.id, &UserRole::Student).await.is_ok());
        assert!(check_teacher_demotion(&storage, student.id, &UserRole::Teacher).await.is_ok());

        storage
            .unassign_class_teacher(class.id)
            .await
            .expect("unassign");
        assert!(check_teacher_demotion(&storage, titulaire.id, &UserRole::Student).await.is_ok());

        let missing = check_teacher_demotion(&storage, 9999, &UserRole::Student)
            .await
            .expect_err("unknown user");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
