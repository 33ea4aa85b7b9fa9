//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::subjects::Entity as Subjects;
use crate::errors::{PortalError, Result};
use crate::models::courses::{
    entities::{Course, CourseDetail},
    requests::{CourseListQuery, NewCourse},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, req: NewCourse) -> Result<Course> {
        let model = ActiveModel {
            class_id: Set(req.class_id),
            teacher_id: Set(req.teacher_id),
            subject_id: Set(req.subject_id),
            academic_year: Set(req.academic_year),
            semester: Set(req.semester),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出课程及科目信息
    pub async fn list_courses_impl(&self, query: CourseListQuery) -> Result<Vec<CourseDetail>> {
        let mut select = Courses::find();

        if let Some(class_ids) = query.class_ids {
            if class_ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::ClassId.is_in(class_ids));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let rows = select
            .order_by_asc(Column::ClassId)
            .order_by_asc(Column::Id)
            .find_also_related(Subjects)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(course, subject)| course.into_course_detail(subject))
            .collect())
    }

    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{storage, user};
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::subjects::entities::NewSubject;
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_course_detail_carries_subject() {
        let storage = storage().await;
        let teacher = user(&storage, "prof@saint-jean.fr", UserRole::Teacher).await;
        let class = storage
            .create_class_impl(CreateClassRequest {
                name: "2nde 1".to_string(),
                level: "2nde".to_string(),
                teacher_id: Some(teacher.id),
                academic_year: "2024-2025".to_string(),
            })
            .await
            .expect("class");
        let subject = storage
            .get_or_create_subject_impl(NewSubject {
                code: "2NDE-PHYSIQUE-CHIMIE".to_string(),
                name: "Physique-Chimie".to_string(),
                coefficient: 3.0,
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

        let listed = storage
            .list_courses_impl(CourseListQuery {
                class_ids: Some(vec![class.id]),
                teacher_id: None,
            })
            .await
            .expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].course.id, course.id);
        assert_eq!(listed[0].subject_name, "Physique-Chimie");
        assert_eq!(listed[0].coefficient, 3.0);

        let none = storage
            .list_courses_impl(CourseListQuery {
                class_ids: Some(Vec::new()),
                teacher_id: None,
            })
            .await
            .expect("list");
        assert!(none.is_empty());

        // 删除班级级联删除课程
        storage.delete_class_impl(class.id).await.expect("delete");
        assert!(
            storage
                .get_course_by_id_impl(course.id)
                .await
                .expect("get")
                .is_none()
        );
    }
}
