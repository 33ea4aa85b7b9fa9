use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DashboardService, RECENT_LIMIT, or_default};
use crate::models::ApiResponse;
use crate::models::attendance::requests::AttendanceListQuery;
use crate::models::classes::requests::ClassListQuery;
use crate::models::courses::entities::CourseDetail;
use crate::models::courses::requests::CourseListQuery;
use crate::models::dashboard::responses::{StudentCourse, StudentDashboard};
use crate::models::grades::entities::GradeDetail;
use crate::models::grades::requests::GradeListQuery;
use crate::services::current_user;
use crate::utils::stats::{attendance_summary, display_average};

pub async fn student_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let profile = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);
    let student_id = profile.id;

    let (classes, grades, attendance) = tokio::join!(
        storage.list_classes(ClassListQuery {
            student_id: Some(student_id),
            ..Default::default()
        }),
        storage.list_grades(GradeListQuery {
            student_id: Some(student_id),
            ..Default::default()
        }),
        storage.list_attendance(AttendanceListQuery {
            student_id: Some(student_id),
            ..Default::default()
        }),
    );
    let classes = or_default(classes, "classes");
    let grades = or_default(grades, "grades");
    let attendance = or_default(attendance, "attendance");

    // 课程依赖班级列表
    let courses = if classes.is_empty() {
        Vec::new()
    } else {
        let query = CourseListQuery {
            class_ids: Some(classes.iter().map(|c| c.id).collect()),
            teacher_id: None,
        };
        or_default(storage.list_courses(query).await, "courses")
    };

    let values: Vec<f64> = grades.iter().map(|g| g.grade.grade_value).collect();
    let dashboard = StudentDashboard {
        courses: course_averages(courses, &grades),
        overall_average: display_average(&values),
        attendance: attendance_summary(attendance.iter().map(|r| r.status)),
        recent_grades: grades.into_iter().take(RECENT_LIMIT).collect(),
        classes,
        profile,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        dashboard,
        "Student dashboard retrieved successfully",
    )))
}

/// 每门课程的平均分
pub(crate) fn course_averages(
    courses: Vec<CourseDetail>,
    grades: &[GradeDetail],
) -> Vec<StudentCourse> {
    courses
        .into_iter()
        .map(|course| {
            let values: Vec<f64> = grades
                .iter()
                .filter(|g| g.grade.course_id == course.course.id)
                .map(|g| g.grade.grade_value)
                .collect();
            StudentCourse {
                average: display_average(&values),
                grade_count: values.len() as i64,
                course,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::Course;
    use crate::models::grades::entities::Grade;

    fn course(id: i64) -> CourseDetail {
        CourseDetail {
            course: Course {
                id,
                class_id: 1,
                teacher_id: 2,
                subject_id: id,
                academic_year: "2024-2025".to_string(),
                semester: "1".to_string(),
                created_at: chrono::Utc::now(),
            },
            subject_code: format!("6EME-S{id}"),
            subject_name: format!("S{id}"),
            coefficient: 2.0,
        }
    }

    fn grade(course_id: i64, value: f64) -> GradeDetail {
        GradeDetail {
            grade: Grade {
                id: 0,
                student_id: 3,
                course_id,
                grade_value: value,
                grade_type: "devoir".to_string(),
                date_assigned: "2024-10-01".to_string(),
                semester: "1".to_string(),
                comments: None,
                created_by: 2,
                created_at: chrono::Utc::now(),
            },
            subject_name: String::new(),
            coefficient: 1.0,
        }
    }

    #[test]
    fn test_course_averages() {
        let grades = vec![grade(1, 12.0), grade(1, 15.0), grade(2, 9.5)];
        let result = course_averages(vec![course(1), course(2), course(3)], &grades);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].average, 13.5);
        assert_eq!(result[0].grade_count, 2);
        assert_eq!(result[1].average, 9.5);
        // 没有成绩的课程平均分为 0
        assert_eq!(result[2].average, 0.0);
        assert_eq!(result[2].grade_count, 0);
        assert_eq!(result[2].course.coefficient, 2.0);
    }
}
