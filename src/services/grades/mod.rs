pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::entities::Course;
use crate::models::grades::entities::{GRADE_MAX, GRADE_MIN};
use crate::models::grades::requests::{CreateGradeRequest, GradeQueryParams};
use crate::models::users::entities::{User, UserRole};
use crate::models::ErrorCode;
use crate::services::courses::{load_course, owns_course};
use crate::services::{bad_request, forbidden, not_found, storage_error_response};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        query: GradeQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, query).await
    }

    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        grade_data: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, grade_data).await
    }

    pub async fn delete_grade(
        &self,
        request: &HttpRequest,
        grade_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, request, grade_id).await
    }
}

pub(crate) fn validate_grade_value(value: f64) -> Result<f64, String> {
    if !value.is_finite() || !(GRADE_MIN..=GRADE_MAX).contains(&value) {
        return Err(format!("Grade value must be between {GRADE_MIN} and {GRADE_MAX}"));
    }
    Ok(value)
}

/// 录入成绩或考勤前的检查
///
/// 目标用户必须是学生；课程必须属于当前教师，管理员不受限制。
pub(crate) async fn check_recording_target(
    storage: &Arc<dyn Storage>,
    user: &User,
    student_id: i64,
    course_id: i64,
) -> Result<Course, HttpResponse> {
    if user.role == UserRole::Student {
        return Err(forbidden(
            ErrorCode::PermissionDenied,
            "Students cannot record grades or attendance",
        ));
    }

    match storage.get_user_by_id(student_id).await {
        Ok(Some(student)) if student.role == UserRole::Student => {}
        Ok(Some(_)) => {
            return Err(bad_request(
                ErrorCode::UserRoleInvalid,
                "The selected user is not a student",
            ));
        }
        Ok(None) => return Err(not_found(ErrorCode::UserNotFound, "Student not found")),
        Err(e) => return Err(storage_error_response(e, ErrorCode::InternalServerError)),
    }

    let course = load_course(storage, course_id).await?;
    if !owns_course(user, &course) {
        return Err(forbidden(
            ErrorCode::CoursePermissionDenied,
            "You do not teach this course",
        ));
    }
    Ok(course)
}

/// 列表范围：学生只看自己，教师只看自己任课的课程
///
/// 返回 (student_id, teacher_id) 过滤条件。
pub(crate) fn list_scope(user: &User, requested_student: Option<i64>) -> (Option<i64>, Option<i64>) {
    match user.role {
        UserRole::Student => (Some(user.id), None),
        UserRole::Teacher => (requested_student, Some(user.id)),
        UserRole::Admin => (requested_student, None),
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

    #[test]
    fn test_validate_grade_value_bounds() {
        assert!(validate_grade_value(0.0).is_ok());
        assert!(validate_grade_value(20.0).is_ok());
        assert!(validate_grade_value(13.5).is_ok());
        assert!(validate_grade_value(-0.5).is_err());
        assert!(validate_grade_value(20.25).is_err());
        assert!(validate_grade_value(f64::NAN).is_err());
    }

    #[tokio::test]
    async fn test_list_scope_by_role() {
        let storage = test_support::storage().await;
        let student = test_support::user(&storage, "eleve@saint-jean.fr", UserRole::Student).await;
        let teacher = test_support::user(&storage, "prof@saint-jean.fr", UserRole::Teacher).await;
        let admin = test_support::user(&storage, "admin@saint-jean.fr", UserRole::Admin).await;

        assert_eq!(list_scope(&student, Some(99)), (Some(student.id), None));
        assert_eq!(list_scope(&teacher, Some(5)), (Some(5), Some(teacher.id)));
        assert_eq!(list_scope(&admin, None), (None, None));
    }

    #[tokio::test]
    async fn test_check_recording_target() {
        let db = test_support::storage().await;
        let student = test_support::user(&db, "eleve@saint-jean.fr", UserRole::Student).await;
        let teacher = test_support::user(&db, "prof@saint-jean.fr", UserRole::Teacher).await;
        let other = test_support::user(&db, "autre@saint-jean.fr", UserRole::Teacher).await;
        let storage: Arc<dyn Storage> = Arc::new(db);

        let class = storage
            .create_class(CreateClassRequest {
                name: "6ème A".to_string(),
                level: "6ème".to_string(),
                teacher_id: Some(teacher.id),
                academic_year: "2024-2025".to_string(),
            })
            .await
            .expect("class");
        let subject = storage
            .get_or_create_subject(NewSubject {
                code: "6EME-FRANCAIS".to_string(),
                name: "Français".to_string(),
                coefficient: 4.0,
                description: None,
            })
            .await
            .expect("subject");
        let course = storage
            .create_course(NewCourse {
                class_id: class.id,
                teacher_id: teacher.id,
                subject_id: subject.id,
                academic_year: "2024-2025".to_string(),
                semester: "1".to_string(),
            })
            .await
            .expect("course");

        let ok = check_recording_target(&storage, &teacher, student.id, course.id).await;
        assert_eq!(ok.expect("allowed").id, course.id);

        let denied = check_recording_target(&storage, &other, student.id, course.id)
            .await
            .expect_err("not the course teacher");
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);

        let not_student = check_recording_target(&storage, &teacher, other.id, course.id)
            .await
            .expect_err("not a student");
        assert_eq!(not_student.status(), StatusCode::BAD_REQUEST);

        let by_student = check_recording_target(&storage, &student, student.id, course.id)
            .await
            .expect_err("students cannot record");
        assert_eq!(by_student.status(), StatusCode::FORBIDDEN);
    }
}
