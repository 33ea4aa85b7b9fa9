//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance, Relation};
use crate::entity::courses::Column as CourseColumn;
use crate::errors::{PortalError, Result};
use crate::models::attendance::{
    entities::AttendanceRecord,
    requests::{AttendanceListQuery, NewAttendance},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

impl SeaOrmStorage {
    pub async fn create_attendance_impl(&self, req: NewAttendance) -> Result<AttendanceRecord> {
        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            date: Set(req.date),
            status: Set(req.status.to_string()),
            notes: Set(req.notes),
            recorded_by: Set(req.recorded_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("记录考勤失败: {e}")))?;

        Ok(result.into_record())
    }

    /// 列出考勤记录，按日期倒序
    pub async fn list_attendance_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select
                .join(JoinType::InnerJoin, Relation::Course.def())
                .filter(CourseColumn::TeacherId.eq(teacher_id));
        }

        let records = select
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{storage, user};
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::courses::requests::NewCourse;
    use crate::models::subjects::entities::NewSubject;
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_record_and_list_attendance() {
        let storage = storage().await;
        let teacher = user(&storage, "prof@saint-jean.fr", UserRole::Teacher).await;
        let other = user(&storage, "autre@saint-jean.fr", UserRole::Teacher).await;
        let student = user(&storage, "eleve@saint-jean.fr", UserRole::Student).await;
        let class = storage
            .create_class_impl(CreateClassRequest {
                name: "CM1".to_string(),
                level: "CM1".to_string(),
                teacher_id: Some(teacher.id),
                academic_year: "2024-2025".to_string(),
            })
            .await
            .expect("class");
        let subject = storage
            .get_or_create_subject_impl(NewSubject {
                code: "CM1-FRANCAIS".to_string(),
                name: "Français".to_string(),
                coefficient: 1.0,
                description: None,
            })
            .await
            .expect("subject");
        let course = storage
            .create_course_impl(NewCourse {
                class_id: class.id,
                teacher_id: teacher.id,
                subject_id: subject.id,
                academic_year: "2024-2025".to_string(),
                semester: "1".to_string(),
            })
            .await
            .expect("course");

        for (date, status) in [
            ("2024-09-02", AttendanceStatus::Present),
            ("2024-09-03", AttendanceStatus::Late),
        ] {
            storage
                .create_attendance_impl(NewAttendance {
                    student_id: student.id,
                    course_id: course.id,
                    date: date.to_string(),
                    status,
                    notes: None,
                    recorded_by: teacher.id,
                })
                .await
                .expect("record");
        }

        let records = storage
            .list_attendance_impl(AttendanceListQuery {
                teacher_id: Some(teacher.id),
                ..Default::default()
            })
            .await
            .expect("list");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, AttendanceStatus::Late);

        let none = storage
            .list_attendance_impl(AttendanceListQuery {
                teacher_id: Some(other.id),
                ..Default::default()
            })
            .await
            .expect("list");
        assert!(none.is_empty());
    }
}
