use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{HashMap, HashSet};

use super::{DashboardService, RECENT_LIMIT, or_default};
use crate::models::ApiResponse;
use crate::models::attendance::requests::AttendanceListQuery;
use crate::models::classes::entities::Class;
use crate::models::classes::requests::ClassListQuery;
use crate::models::courses::entities::CourseDetail;
use crate::models::courses::requests::CourseListQuery;
use crate::models::dashboard::responses::{AdminDashboard, LevelOverview};
use crate::models::enrollments::entities::Enrollment;
use crate::models::grades::entities::GradeDetail;
use crate::models::grades::requests::GradeListQuery;
use crate::models::users::entities::UserRole;
use crate::utils::catalog;
use crate::utils::stats::{attendance_summary, display_average};

pub async fn admin_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (student_count, teacher_count, class_count, recent_users) = tokio::join!(
        storage.count_users_by_role(UserRole::Student),
        storage.count_users_by_role(UserRole::Teacher),
        storage.count_classes(),
        storage.list_recent_users(RECENT_LIMIT as u64),
    );
    let (classes, enrollments, courses, grades, attendance) = tokio::join!(
        storage.list_classes(ClassListQuery::default()),
        storage.list_enrollments(None),
        storage.list_courses(CourseListQuery::default()),
        storage.list_grades(GradeListQuery::default()),
        storage.list_attendance(AttendanceListQuery::default()),
    );

    let classes = or_default(classes, "classes");
    let enrollments = or_default(enrollments, "enrollments");
    let courses = or_default(courses, "courses");
    let grades = or_default(grades, "grades");
    let attendance = or_default(attendance, "attendance");

    let values: Vec<f64> = grades.iter().map(|g| g.grade.grade_value).collect();
    let dashboard = AdminDashboard {
        student_count: or_default(student_count, "student count") as i64,
        teacher_count: or_default(teacher_count, "teacher count") as i64,
        class_count: or_default(class_count, "class count") as i64,
        average: display_average(&values),
        attendance_rate: attendance_summary(attendance.iter().map(|r| r.status)).rate,
        recent_users: or_default(recent_users, "recent users"),
        levels: level_overview(&classes, &enrollments, &courses, &grades),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        dashboard,
        "Admin dashboard retrieved successfully",
    )))
}

/// 按年级汇总班级数、注册学生数与成绩平均分
///
/// 年级按目录顺序排列，目录外的年级按名称排在最后。
pub(crate) fn level_overview(
    classes: &[Class],
    enrollments: &[Enrollment],
    courses: &[CourseDetail],
    grades: &[GradeDetail],
) -> Vec<LevelOverview> {
    let class_level: HashMap<i64, &str> =
        classes.iter().map(|c| (c.id, c.level.as_str())).collect();
    let course_level: HashMap<i64, &str> = courses
        .iter()
        .filter_map(|c| {
            class_level
                .get(&c.course.class_id)
                .map(|level| (c.course.id, *level))
        })
        .collect();

    let mut levels: Vec<&str> = Vec::new();
    for class in classes {
        if !levels.contains(&class.level.as_str()) {
            levels.push(class.level.as_str());
        }
    }
    let order: Vec<&str> = catalog::niveaux()
        .into_iter()
        .flat_map(catalog::sous_niveaux)
        .collect();
    levels.sort_by_key(|level| {
        let position = order.iter().position(|known| known == level);
        (position.is_none(), position, level.to_string())
    });

    levels
        .into_iter()
        .map(|level| {
            let students: HashSet<i64> = enrollments
                .iter()
                .filter(|e| class_level.get(&e.class_id) == Some(&level))
                .map(|e| e.student_id)
                .collect();
            let values: Vec<f64> = grades
                .iter()
                .filter(|g| course_level.get(&g.grade.course_id) == Some(&level))
                .map(|g| g.grade.grade_value)
                .collect();
            LevelOverview {
                level: level.to_string(),
                niveau: catalog::niveau_of(level).map(String::from),
                class_count: classes.iter().filter(|c| c.level == level).count() as i64,
                student_count: students.len() as i64,
                average: display_average(&values),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::Course;
    use crate::models::grades::entities::Grade;

    fn class(id: i64, level: &str) -> Class {
        Class {
            id,
            name: format!("{level} {id}"),
            level: level.to_string(),
            academic_year: "2024-2025".to_string(),
            teacher_id: None,
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

    fn course(id: i64, class_id: i64) -> CourseDetail {
        CourseDetail {
            course: Course {
                id,
                class_id,
                teacher_id: 1,
                subject_id: 1,
                academic_year: "2024-2025".to_string(),
                semester: "1".to_string(),
                created_at: chrono::Utc::now(),
            },
            subject_code: "X".to_string(),
            subject_name: "X".to_string(),
            coefficient: 1.0,
        }
    }

    fn grade(course_id: i64, value: f64) -> GradeDetail {
        GradeDetail {
            grade: Grade {
                id: 0,
                student_id: 1,
                course_id,
                grade_value: value,
                grade_type: "examen".to_string(),
                date_assigned: "2025-01-10".to_string(),
                semester: "2".to_string(),
                comments: None,
                created_by: 1,
                created_at: chrono::Utc::now(),
            },
            subject_name: "X".to_string(),
            coefficient: 1.0,
        }
    }

    #[test]
    fn test_level_overview_groups_and_orders() {
        let classes = vec![class(1, "6ème"), class(2, "CP"), class(3, "6ème")];
        let enrollments = vec![enrollment(10, 1), enrollment(11, 3), enrollment(12, 2)];
        let courses = vec![course(100, 1), course(101, 3), course(102, 2)];
        let grades = vec![grade(100, 10.0), grade(101, 16.0), grade(102, 18.0)];

        let levels = level_overview(&classes, &enrollments, &courses, &grades);

        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].level, "CP");
        assert_eq!(levels[0].niveau.as_deref(), Some("Primaire"));
        assert_eq!(levels[0].class_count, 1);
        assert_eq!(levels[0].average, 18.0);

        assert_eq!(levels[1].level, "6ème");
        assert_eq!(levels[1].niveau.as_deref(), Some("Collège"));
        assert_eq!(levels[1].class_count, 2);
        assert_eq!(levels[1].student_count, 2);
        assert_eq!(levels[1].average, 13.0);
    }

    #[test]
    fn test_level_overview_empty() {
        assert!(level_overview(&[], &[], &[], &[]).is_empty());
    }
}
