//! 仪表盘聚合
//!
//! 每个仪表盘用 `tokio::join!` 并发读取所需数据后在内存中计算统计值。
//! 单个读取失败只记录警告并使用默认值，仪表盘仍然返回 200。

pub mod admin;
pub mod student;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::warn;

use crate::models::users::entities::UserRole;
use crate::services::current_user;
use crate::storage::Storage;

/// 最近成绩与最近用户的条数
pub(crate) const RECENT_LIMIT: usize = 5;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 按当前用户角色分发
    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = match current_user(request) {
            Ok(user) => user,
            Err(response) => return Ok(response),
        };
        match user.role {
            UserRole::Student => student::student_dashboard(self, request).await,
            UserRole::Teacher => teacher::teacher_dashboard(self, request).await,
            UserRole::Admin => admin::admin_dashboard(self, request).await,
        }
    }

    pub async fn student_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        student::student_dashboard(self, request).await
    }

    pub async fn teacher_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teacher::teacher_dashboard(self, request).await
    }

    pub async fn admin_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        admin::admin_dashboard(self, request).await
    }
}

/// 读取失败时记录警告并返回默认值
pub(crate) fn or_default<T: Default>(result: crate::errors::Result<T>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Dashboard: failed to load {}: {}", what, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PortalError;

    #[test]
    fn test_or_default_degrades() {
        let failed: crate::errors::Result<Vec<i64>> =
            Err(PortalError::database_operation("connection reset"));
        assert!(or_default(failed, "grades").is_empty());
        assert_eq!(or_default(Ok(7u64), "count"), 7);
    }
}
