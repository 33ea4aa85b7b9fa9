//! 学生注册存储操作

use super::SeaOrmStorage;
use crate::entity::student_classes::{ActiveModel, Column, Entity as StudentClasses};
use crate::entity::users::Entity as Users;
use crate::errors::{PortalError, Result};
use crate::models::enrollments::entities::{EnrolledStudent, Enrollment};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 注册学生到班级；同一学年重复注册由唯一索引拒绝
    pub async fn enroll_student_impl(
        &self,
        student_id: i64,
        class_id: i64,
        academic_year: &str,
    ) -> Result<Enrollment> {
        let model = ActiveModel {
            student_id: Set(student_id),
            class_id: Set(class_id),
            academic_year: Set(academic_year.to_string()),
            enrollment_date: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("注册学生失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    pub async fn get_enrollment_by_id_impl(
        &self,
        enrollment_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = StudentClasses::find_by_id(enrollment_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询注册记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn delete_enrollment_impl(&self, enrollment_id: i64) -> Result<bool> {
        let result = StudentClasses::delete_by_id(enrollment_id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除注册记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 班级学生名单，按姓、名排序
    pub async fn list_class_students_impl(&self, class_id: i64) -> Result<Vec<EnrolledStudent>> {
        let rows = StudentClasses::find()
            .filter(Column::ClassId.eq(class_id))
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询班级学生失败: {e}")))?;

        let mut students: Vec<EnrolledStudent> = rows
            .into_iter()
            .filter_map(|(enrollment, user)| {
                user.map(|u| EnrolledStudent {
                    enrollment: enrollment.into_enrollment(),
                    student: u.into_user(),
                })
            })
            .collect();
        students.sort_by(|a, b| {
            (&a.student.last_name, &a.student.first_name)
                .cmp(&(&b.student.last_name, &b.student.first_name))
        });

        Ok(students)
    }

    pub async fn list_enrollments_impl(
        &self,
        class_ids: Option<Vec<i64>>,
    ) -> Result<Vec<Enrollment>> {
        let mut select = StudentClasses::find();
        if let Some(class_ids) = class_ids {
            if class_ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::ClassId.is_in(class_ids));
        }

        let rows = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询注册记录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_enrollment()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{storage, user};
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_enroll_list_and_remove() {
        let storage = storage().await;
        let zoe = user(&storage, "zoe@saint-jean.fr", UserRole::Student).await;
        let adam = user(&storage, "adam@saint-jean.fr", UserRole::Student).await;
        let class = storage
            .create_class_impl(CreateClassRequest {
                name: "1ère S".to_string(),
                level: "1ère".to_string(),
                teacher_id: None,
                academic_year: "2024-2025".to_string(),
            })
            .await
            .expect("class");

        storage
            .enroll_student_impl(zoe.id, class.id, "2024-2025")
            .await
            .expect("enroll");
        let adam_enrollment = storage
            .enroll_student_impl(adam.id, class.id, "2024-2025")
            .await
            .expect("enroll");

        let err = storage
            .enroll_student_impl(adam.id, class.id, "2024-2025")
            .await
            .expect_err("duplicate enrollment");
        assert!(matches!(err.classified(), PortalError::Conflict(_)));

        let students = storage
            .list_class_students_impl(class.id)
            .await
            .expect("list");
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].student.id, adam.id);

        assert!(
            storage
                .delete_enrollment_impl(adam_enrollment.id)
                .await
                .expect("delete")
        );
        let remaining = storage
            .list_enrollments_impl(Some(vec![class.id]))
            .await
            .expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].student_id, zoe.id);
    }
}
