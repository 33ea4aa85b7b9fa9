//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes, Relation};
use crate::entity::student_classes::Column as StudentClassColumn;
use crate::errors::{PortalError, Result};
use crate::models::classes::{
    entities::Class,
    requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let model = ActiveModel {
            name: Set(req.name),
            level: Set(req.level),
            academic_year: Set(req.academic_year),
            teacher_id: Set(req.teacher_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出班级，按级别和名称排序
    pub async fn list_classes_impl(&self, query: ClassListQuery) -> Result<Vec<Class>> {
        let mut select = Classes::find();

        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        // 学生所在班级需要 join student_classes
        if let Some(student_id) = query.student_id {
            select = select
                .join(JoinType::InnerJoin, Relation::StudentClasses.def())
                .filter(StudentClassColumn::StudentId.eq(student_id))
                .distinct();
        }

        let classes = select
            .order_by_asc(Column::Level)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(class_id),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(level) = update.level {
            model.level = Set(level);
        }

        if model.is_changed() {
            model
                .update(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("更新班级失败: {e}")))?;
        }

        self.get_class_by_id_impl(class_id).await
    }

    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 取消教师分配（teacher_id 置空）
    pub async fn unassign_class_teacher_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::update_many()
            .col_expr(
                Column::TeacherId,
                sea_orm::sea_query::Expr::value(Option::<i64>::None),
            )
            .filter(Column::Id.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("取消教师分配失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_class_by_id_impl(class_id).await
    }

    pub async fn count_classes_impl(&self) -> Result<u64> {
        Classes::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计班级数量失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{storage, user};
    use super::*;
    use crate::models::users::entities::UserRole;

    fn new_class(name: &str, level: &str, teacher_id: Option<i64>) -> CreateClassRequest {
        CreateClassRequest {
            name: name.to_string(),
            level: level.to_string(),
            teacher_id,
            academic_year: "2024-2025".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_classes_by_teacher_and_level() {
        let storage = storage().await;
        let teacher = user(&storage, "prof@saint-jean.fr", UserRole::Teacher).await;
        storage
            .create_class_impl(new_class("6ème A", "6ème", Some(teacher.id)))
            .await
            .expect("create");
        storage
            .create_class_impl(new_class("CP B", "CP", None))
            .await
            .expect("create");

        let own = storage
            .list_classes_impl(ClassListQuery {
                teacher_id: Some(teacher.id),
                ..Default::default()
            })
            .await
            .expect("list");
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].name, "6ème A");

        let cp = storage
            .list_classes_impl(ClassListQuery {
                level: Some("CP".to_string()),
                ..Default::default()
            })
            .await
            .expect("list");
        assert_eq!(cp.len(), 1);
        assert!(cp[0].teacher_id.is_none());
        assert_eq!(storage.count_classes_impl().await.expect("count"), 2);
    }

    #[tokio::test]
    async fn test_unassign_teacher_and_update() {
        let storage = storage().await;
        let teacher = user(&storage, "prof2@saint-jean.fr", UserRole::Teacher).await;
        let class = storage
            .create_class_impl(new_class("5ème A", "5ème", Some(teacher.id)))
            .await
            .expect("create");

        let class = storage
            .unassign_class_teacher_impl(class.id)
            .await
            .expect("unassign")
            .expect("exists");
        assert!(class.teacher_id.is_none());

        let renamed = storage
            .update_class_impl(
                class.id,
                UpdateClassRequest {
                    name: Some("5ème B".to_string()),
                    level: None,
                },
            )
            .await
            .expect("update")
            .expect("exists");
        assert_eq!(renamed.name, "5ème B");
        assert_eq!(renamed.level, "5ème");

        assert!(storage.delete_class_impl(class.id).await.expect("delete"));
        assert!(
            storage
                .unassign_class_teacher_impl(class.id)
                .await
                .expect("unassign")
                .is_none()
        );
    }
}
