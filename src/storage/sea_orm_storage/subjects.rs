use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{PortalError, Result};
use crate::models::subjects::entities::{NewSubject, Subject};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    async fn find_subject_by_code(&self, code: &str) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 按 code 查找科目，不存在时创建
    pub async fn get_or_create_subject_impl(&self, req: NewSubject) -> Result<Subject> {
        if let Some(existing) = self.find_subject_by_code(&req.code).await? {
            return Ok(existing);
        }

        let code = req.code.clone();
        let model = ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            coefficient: Set(req.coefficient),
            description: Set(req.description),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(created) => Ok(created.into_subject()),
            Err(e) => {
                // 并发创建时唯一约束冲突，重新读取
                if let Some(existing) = self.find_subject_by_code(&code).await? {
                    return Ok(existing);
                }
                Err(PortalError::database_operation(format!("创建科目失败: {e}")))
            }
        }
    }

    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::storage;
    use super::*;

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let storage = storage().await;
        let req = NewSubject {
            code: "6EME-MATHEMATIQUES".to_string(),
            name: "Mathématiques".to_string(),
            coefficient: 4.0,
            description: None,
        };

        let first = storage
            .get_or_create_subject_impl(req.clone())
            .await
            .expect("create");
        let second = storage
            .get_or_create_subject_impl(req)
            .await
            .expect("reuse");
        assert_eq!(first.id, second.id);
        assert_eq!(storage.list_subjects_impl().await.expect("list").len(), 1);
    }
}
