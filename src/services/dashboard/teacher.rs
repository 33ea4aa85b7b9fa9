use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};

use super::{DashboardService, RECENT_LIMIT, or_default};
use crate::models::ApiResponse;
use crate::models::attendance::requests::AttendanceListQuery;
use crate::models::classes::entities::Class;
use crate::models::classes::requests::ClassListQuery;
use crate::models::courses::requests::CourseListQuery;
use crate::models::dashboard::responses::{TeacherClass, TeacherDashboard};
use crate::models::enrollments::entities::Enrollment;
use crate::models::grades::requests::GradeListQuery;
use crate::services::current_user;
use crate::utils::stats::{attendance_summary, display_average};

pub async fn teacher_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let profile = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);
    let teacher_id = Some(profile.id);

    let (classes, courses, grades, attendance) = tokio::join!(
        storage.list_classes(ClassListQuery {
            teacher_id,
            ..Default::default()
        }),
        storage.list_courses(CourseListQuery {
            class_ids: None,
            teacher_id,
        }),
        storage.list_grades(GradeListQuery {
            teacher_id,
            ..Default::default()
        }),
        storage.list_attendance(AttendanceListQuery {
            teacher_id,
            ..Default::default()
        }),
    );
    let classes = or_default(classes, "classes");
    let courses = or_default(courses, "courses");
    let grades = or_default(grades, "grades");
    let attendance = or_default(attendance, "attendance");

    let enrollments = if classes.is_empty() {
        Vec::new()
    } else {
        let class_ids = classes.iter().map(|c| c.id).collect();
        or_default(storage.list_enrollments(Some(class_ids)).await, "enrollments")
    };

    let values: Vec<f64> = grades.iter().map(|g| g.grade.grade_value).collect();
    let (classes, total_students) = class_student_counts(classes, &enrollments);
    let dashboard = TeacherDashboard {
        classes,
        courses,
        total_students,
        average: display_average(&values),
        attendance_rate: attendance_summary(attendance.iter().map(|r| r.status)).rate,
        recent_grades: grades.into_iter().take(RECENT_LIMIT).collect(),
        profile,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        dashboard,
        "Teacher dashboard retrieved successfully",
    )))
}

/// 每个班级的学生数，以及去重后的学生总数
pub(crate) fn class_student_counts(
    classes: Vec<Class>,
    enrollments: &[Enrollment],
) -> (Vec<TeacherClass>, i64) {
    let mut per_class: HashMap<i64, i64> = HashMap::new();
    let mut students = HashSet::new();
    for enrollment in enrollments {
        *per_class.entry(enrollment.class_id).or_default() += 1;
        students.insert(enrollment.student_id);
    }

    let classes = classes
        .into_iter()
        .map(|class| TeacherClass {
            student_count: per_class.get(&class.id).copied().unwrap_or(0),
            class,
        })
        .collect();
    (classes, students.len() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: i64) -> Class {
        Class {
            id,
            name: format!("Classe {id}"),
            level: "CM1".to_string(),
            academic_year: "2024-2025".to_string(),
            teacher_id: Some(9),
            created_at: chrono::Utc::now(),
        }
    }

    fn enrollment(student_id: i64, class_id: i64) -> Enrollment {
        Enrollment {
            id: student_id * 100 + class_id,
            student_id,
            class_id,
            academic_year: "2024-2025".to_string(),
            enrollment_date: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_class_student_counts_distinct_total() {
        let enrollments = vec![enrollment(1, 10), enrollment(2, 10), enrollment(1, 11)];
        let classes = vec![class(10), class(11), class(12)];
        let (classes, total) = class_student_counts(classes, &enrollments);

        assert_eq!(total, 2);
        let counts: Vec<i64> = classes.iter().map(|c| c.student_count).collect();
        assert_eq!(counts, vec![2, 1, 0]);
    }
}
