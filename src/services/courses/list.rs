use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::classes::requests::ClassListQuery;
use crate::models::courses::requests::{CourseListQuery, CourseQueryParams};
use crate::models::courses::responses::CourseListResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, storage_error_response};

/// 按班级或教师列出课程；不带参数时教师看自己的课程，学生看所在班级的课程
pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let mut list_query = CourseListQuery {
        class_ids: query.class_id.map(|id| vec![id]),
        teacher_id: query.teacher_id,
    };

    if list_query.class_ids.is_none() && list_query.teacher_id.is_none() {
        match user.role {
            UserRole::Admin => {}
            UserRole::Teacher => list_query.teacher_id = Some(user.id),
            UserRole::Student => {
                let classes = storage
                    .list_classes(ClassListQuery {
                        student_id: Some(user.id),
                        ..Default::default()
                    })
                    .await;
                match classes {
                    Ok(classes) => {
                        list_query.class_ids = Some(classes.iter().map(|c| c.id).collect())
                    }
                    Err(e) => {
                        return Ok(storage_error_response(e, ErrorCode::InternalServerError));
                    }
                }
            }
        }
    }

    match storage.list_courses(list_query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseListResponse { items },
            "Course list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(e, ErrorCode::InternalServerError)),
    }
}
