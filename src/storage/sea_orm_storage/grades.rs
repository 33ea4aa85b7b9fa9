//! 成绩存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{PortalError, Result};
use crate::models::grades::{
    entities::{Grade, GradeDetail},
    requests::{GradeListQuery, NewGrade},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_grade_impl(&self, req: NewGrade) -> Result<Grade> {
        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            grade_value: Set(req.grade_value),
            grade_type: Set(req.grade_type),
            date_assigned: Set(req.date_assigned),
            semester: Set(req.semester),
            comments: Set(req.comments),
            created_by: Set(req.created_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建成绩失败: {e}")))?;

        Ok(result.into_grade())
    }

    pub async fn get_grade_by_id_impl(&self, grade_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 列出成绩（最新在前），附带科目名称与系数
    pub async fn list_grades_impl(&self, query: GradeListQuery) -> Result<Vec<GradeDetail>> {
        let mut select = Grades::find().find_also_related(Courses);

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        // 教师只看自己课程下的成绩
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(CourseColumn::TeacherId.eq(teacher_id));
        }

        select = select
            .order_by_desc(Column::DateAssigned)
            .order_by_desc(Column::Id);
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        let rows = select
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩列表失败: {e}")))?;

        // 批量查询科目
        let subject_ids: Vec<i64> = rows
            .iter()
            .filter_map(|(_, course)| course.as_ref().map(|c| c.subject_id))
            .collect();
        let subjects: HashMap<i64, _> = if subject_ids.is_empty() {
            HashMap::new()
        } else {
            Subjects::find()
                .filter(SubjectColumn::Id.is_in(subject_ids))
                .all(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("查询科目失败: {e}")))?
                .into_iter()
                .map(|s| (s.id, s))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(grade, course)| {
                let subject = course.and_then(|c| subjects.get(&c.subject_id));
                GradeDetail {
                    grade: grade.into_grade(),
                    subject_name: subject.map(|s| s.name.clone()).unwrap_or_default(),
                    coefficient: subject.map(|s| s.coefficient).unwrap_or(1.0),
                }
            })
            .collect())
    }

    pub async fn delete_grade_impl(&self, grade_id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(grade_id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{storage, user};
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::courses::requests::NewCourse;
    use crate::models::subjects::entities::NewSubject;
    use crate::models::users::entities::UserRole;

    async fn course_for(storage: &SeaOrmStorage, teacher_id: i64, code: &str) -> i64 {
        let class = storage
            .create_class_impl(CreateClassRequest {
                name: format!("Classe {code}"),
                level: "3ème".to_string(),
                teacher_id: Some(teacher_id),
                academic_year: "2024-2025".to_string(),
            })
            .await
            .expect("class");
        let subject = storage
            .get_or_create_subject_impl(NewSubject {
                code: code.to_string(),
                name: code.to_string(),
                coefficient: 2.0,
                description: None,
            })
            .await
            .expect("subject");
        storage
            .create_course_impl(NewCourse {
                class_id: class.id,
                teacher_id,
                subject_id: subject.id,
                academic_year: "2024-2025".to_string(),
                semester: "1".to_string(),
            })
            .await
            .expect("course")
            .id
    }

    fn grade(student_id: i64, course_id: i64, value: f64, date: &str, by: i64) -> NewGrade {
        NewGrade {
            student_id,
            course_id,
            grade_value: value,
            grade_type: "Contrôle".to_string(),
            date_assigned: date.to_string(),
            semester: "1".to_string(),
            comments: None,
            created_by: by,
        }
    }

    #[tokio::test]
    async fn test_list_grades_filters_and_orders() {
        let storage = storage().await;
        let t1 = user(&storage, "t1@saint-jean.fr", UserRole::Teacher).await;
        let t2 = user(&storage, "t2@saint-jean.fr", UserRole::Teacher).await;
        let student = user(&storage, "eleve@saint-jean.fr", UserRole::Student).await;
        let c1 = course_for(&storage, t1.id, "3EME-FRANCAIS").await;
        let c2 = course_for(&storage, t2.id, "3EME-ANGLAIS").await;

        storage
            .create_grade_impl(grade(student.id, c1, 12.0, "2024-10-01", t1.id))
            .await
            .expect("grade");
        storage
            .create_grade_impl(grade(student.id, c1, 15.5, "2024-11-01", t1.id))
            .await
            .expect("grade");
        storage
            .create_grade_impl(grade(student.id, c2, 9.0, "2024-10-15", t2.id))
            .await
            .expect("grade");

        let all = storage
            .list_grades_impl(GradeListQuery {
                student_id: Some(student.id),
                ..Default::default()
            })
            .await
            .expect("list");
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].grade.date_assigned, "2024-11-01");
        assert_eq!(all[0].subject_name, "3EME-FRANCAIS");

        let own = storage
            .list_grades_impl(GradeListQuery {
                teacher_id: Some(t2.id),
                ..Default::default()
            })
            .await
            .expect("list");
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].grade.grade_value, 9.0);

        let recent = storage
            .list_grades_impl(GradeListQuery {
                limit: Some(1),
                ..Default::default()
            })
            .await
            .expect("list");
        assert_eq!(recent.len(), 1);

        assert!(
            storage
                .delete_grade_impl(recent[0].grade.id)
                .await
                .expect("delete")
        );
        assert!(
            storage
                .get_grade_by_id_impl(recent[0].grade.id)
                .await
                .expect("get")
                .is_none()
        );
    }
}
