use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{PortalError, Result};
use crate::models::users::{
    entities::{User, UserRole, UserStatus},
    requests::{CreateUserRequest, UpdateUserRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 全部用户（目录页在内存中筛选）
    pub async fn list_all_users_impl(&self) -> Result<Vec<User>> {
        let users = Users::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    pub async fn list_recent_users_impl(&self, limit: u64) -> Result<Vec<User>> {
        let users = Users::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询最近用户失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户资料，只写入提供的字段
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        // 可空字段：空字符串表示清除
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone).filter(|v| !v.is_empty()));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address).filter(|v| !v.is_empty()));
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(Some(date_of_birth).filter(|v| !v.is_empty()));
        }
        if let Some(url) = update.profile_picture_url {
            model.profile_picture_url = Set(Some(url));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计用户数量失败: {e}")))
    }

    pub async fn count_users_by_role_impl(&self, role: UserRole) -> Result<u64> {
        Users::find()
            .filter(Column::Role.eq(role.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计用户数量失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{storage, user};
    use super::*;

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let storage = storage().await;
        let created = user(&storage, "alice@saint-jean.fr", UserRole::Student).await;

        let by_email = storage
            .get_user_by_email_impl("alice@saint-jean.fr")
            .await
            .expect("query")
            .expect("user exists");
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.role, UserRole::Student);
        assert_eq!(by_email.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let storage = storage().await;
        user(&storage, "dup@saint-jean.fr", UserRole::Teacher).await;
        let err = storage
            .create_user_impl(CreateUserRequest {
                email: "dup@saint-jean.fr".to_string(),
                password: "hash".to_string(),
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                role: UserRole::Teacher,
            })
            .await
            .expect_err("unique email");
        assert!(matches!(err.classified(), PortalError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_and_count_by_role() {
        let storage = storage().await;
        let a = user(&storage, "a@saint-jean.fr", UserRole::Student).await;
        user(&storage, "b@saint-jean.fr", UserRole::Teacher).await;

        let updated = storage
            .update_user_impl(
                a.id,
                UpdateUserRequest {
                    phone: Some("0601020304".to_string()),
                    role: Some(UserRole::Teacher),
                    ..Default::default()
                },
            )
            .await
            .expect("update")
            .expect("exists");
        assert_eq!(updated.phone.as_deref(), Some("0601020304"));

        assert_eq!(storage.count_users_impl().await.expect("count"), 2);
        assert_eq!(
            storage
                .count_users_by_role_impl(UserRole::Teacher)
                .await
                .expect("count"),
            2
        );
        assert!(
            storage
                .update_user_impl(9999, UpdateUserRequest::default())
                .await
                .expect("update")
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_recent_users_newest_first() {
        let storage = storage().await;
        let first = user(&storage, "first@saint-jean.fr", UserRole::Student).await;
        let second = user(&storage, "second@saint-jean.fr", UserRole::Student).await;

        let recent = storage.list_recent_users_impl(1).await.expect("recent");
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, second.id);

        assert!(storage.delete_user_impl(first.id).await.expect("delete"));
        assert_eq!(storage.list_all_users_impl().await.expect("all").len(), 1);
    }
}
