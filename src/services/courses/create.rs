use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::courses::requests::{CreateCourseRequest, NewCourse};
use crate::models::subjects::entities::NewSubject;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::load_class;
use crate::services::{bad_request, current_user, forbidden, not_found, storage_error_response};
use crate::utils::academic::{current_academic_year, current_semester};
use crate::utils::catalog;

/// 添加课程
///
/// 目录组合必须存在，班级的 level 必须等于所选 sous-niveau。
/// 科目按编码查找，不存在时创建。
pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let niveau = course_data.niveau.trim();
    let sous_niveau = course_data.sous_niveau.trim();
    let matiere = course_data.matiere.trim();
    if niveau.is_empty() || sous_niveau.is_empty() || matiere.is_empty() {
        return Ok(bad_request(
            ErrorCode::CourseCreationFailed,
            "niveau, sous_niveau and matiere are required",
        ));
    }
    let Some(entry) = catalog::find(niveau, sous_niveau, matiere) else {
        return Ok(bad_request(
            ErrorCode::CatalogEntryNotFound,
            format!("Unknown course: {niveau} / {sous_niveau} / {matiere}"),
        ));
    };

    let class = match load_class(&storage, course_data.class_id).await {
        Ok(class) => class,
        Err(response) => return Ok(response),
    };
    if class.level != entry.sous_niveau {
        return Ok(bad_request(
            ErrorCode::ClassLevelInvalid,
            format!(
                "Class level {} does not match course level {}",
                class.level, entry.sous_niveau
            ),
        ));
    }

    let teacher_id = match user.role {
        UserRole::Teacher => user.id,
        UserRole::Admin => {
            let Some(teacher_id) = course_data.teacher_id else {
                return Ok(bad_request(
                    ErrorCode::CourseCreationFailed,
                    "teacher_id is required",
                ));
            };
            match storage.get_user_by_id(teacher_id).await {
                Ok(Some(teacher)) if teacher.role == UserRole::Teacher => teacher_id,
                Ok(Some(_)) => {
                    return Ok(bad_request(
                        ErrorCode::UserRoleInvalid,
                        "Courses can only be assigned to teachers",
                    ));
                }
                Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "Teacher not found")),
                Err(e) => return Ok(storage_error_response(e, ErrorCode::CourseCreationFailed)),
            }
        }
        UserRole::Student => {
            return Ok(forbidden(
                ErrorCode::CoursePermissionDenied,
                "You do not have permission to create a course",
            ));
        }
    };

    let subject = match storage
        .get_or_create_subject(NewSubject {
            code: entry.subject_code(),
            name: entry.matiere.to_string(),
            coefficient: entry.coefficient,
            description: Some(entry.subject_description()),
        })
        .await
    {
        Ok(subject) => subject,
        Err(e) => return Ok(storage_error_response(e, ErrorCode::CourseCreationFailed)),
    };

    let new_course = NewCourse {
        class_id: class.id,
        teacher_id,
        subject_id: subject.id,
        academic_year: current_academic_year(),
        semester: current_semester().to_string(),
    };

    match storage.create_course(new_course).await {
        Ok(course) => {
            info!(
                "Course {} ({}) added to class {} by {}",
                course.id, subject.code, class.id, user.id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(storage_error_response(e, ErrorCode::CourseCreationFailed)),
    }
}
