use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::UserService;
use crate::models::classes::requests::ClassListQuery;
use crate::models::courses::requests::CourseListQuery;
use crate::models::users::entities::UserRole;
use crate::models::users::responses::{TeachingClass, TeachingResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, not_found, storage_error_response};

/// 教师的班级，以及每个班级下的课程
pub async fn get_teaching(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => return Ok(storage_error_response(e, ErrorCode::InternalServerError)),
    };
    if teacher.role != UserRole::Teacher {
        return Ok(bad_request(
            ErrorCode::UserRoleInvalid,
            "User is not a teacher",
        ));
    }

    let classes = match storage
        .list_classes(ClassListQuery {
            teacher_id: Some(user_id),
            ..Default::default()
        })
        .await
    {
        Ok(classes) => classes,
        Err(e) => return Ok(storage_error_response(e, ErrorCode::InternalServerError)),
    };

    let class_ids: Vec<i64> = classes.iter().map(|c| c.id).collect();
    let courses = match storage
        .list_courses(CourseListQuery {
            class_ids: Some(class_ids),
            teacher_id: None,
        })
        .await
    {
        Ok(courses) => courses,
        Err(e) => return Ok(storage_error_response(e, ErrorCode::InternalServerError)),
    };

    let mut by_class: HashMap<i64, Vec<_>> = HashMap::new();
    for course in courses {
        by_class.entry(course.course.class_id).or_default().push(course);
    }

    let classes = classes
        .into_iter()
        .map(|class| TeachingClass {
            courses: by_class.remove(&class.id).unwrap_or_default(),
            class,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeachingResponse { teacher, classes },
        "Teaching assignments retrieved successfully",
    )))
}
