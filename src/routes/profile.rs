use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::services::ProfileService;

static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);

pub async fn update_profile(
    req: HttpRequest,
    update_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE
        .update_profile(update_data.into_inner(), &req)
        .await
}

pub async fn upload_avatar(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.upload_avatar(&req, payload).await
}

// 对象存储公开读取
pub async fn serve_object(path: web::Path<(String, String)>) -> ActixResult<HttpResponse> {
    let (bucket, object_path) = path.into_inner();
    PROFILE_SERVICE.serve_object(bucket, object_path).await
}

pub fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/profile")
            .wrap(middlewares::RequireJWT)
            .route("", web::put().to(update_profile))
            .route(
                "/avatar",
                web::post()
                    .to(upload_avatar)
                    .wrap(middlewares::RateLimit::avatar_upload()),
            ),
    );
}

pub fn configure_storage_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/storage/{bucket}/{path:.*}", web::get().to(serve_object));
}
