use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, load_class};
use crate::models::classes::requests::ClassListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, storage_error_response};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
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

    let allowed = match user.role {
        UserRole::Admin => true,
        UserRole::Teacher => class.teacher_id == Some(user.id),
        UserRole::Student => {
            let query = ClassListQuery {
                student_id: Some(user.id),
                ..Default::default()
            };
            match storage.list_classes(query).await {
                Ok(classes) => classes.iter().any(|c| c.id == class_id),
                Err(e) => return Ok(storage_error_response(e, ErrorCode::InternalServerError)),
            }
        }
    };

    if !allowed {
        return Ok(forbidden(
            ErrorCode::ClassPermissionDenied,
            "You do not have permission to view this class",
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class retrieved successfully")))
}
