pub mod avatar;
pub mod object;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::cache::{ObjectCache, user_cache_key};
use crate::middlewares::require_jwt::bearer_token;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::storage::Storage;

pub struct ProfileService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfileService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 资料变更后移除当前 token 的用户缓存，下次请求回源
    pub(crate) async fn evict_cached_user(&self, request: &HttpRequest) {
        if let Some(token) = bearer_token(request)
            && let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>()
        {
            cache.remove(&user_cache_key(token)).await;
        }
    }

    pub async fn update_profile(
        &self,
        update_request: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_profile(self, update_request, request).await
    }

    pub async fn upload_avatar(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        avatar::handle_upload_avatar(self, request, payload).await
    }

    // 公开读取对象存储中的文件
    pub async fn serve_object(&self, bucket: String, path: String) -> ActixResult<HttpResponse> {
        object::handle_serve_object(&bucket, &path).await
    }
}
