use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::catalog::responses::{MatiereQuery, SousNiveauQuery};
use crate::services::CatalogService;

static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);

pub async fn list_niveaux() -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_niveaux().await
}

pub async fn list_sous_niveaux(query: web::Query<SousNiveauQuery>) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_sous_niveaux(query.into_inner()).await
}

pub async fn list_matieres(query: web::Query<MatiereQuery>) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_matieres(query.into_inner()).await
}

pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_subjects(&req).await
}

pub fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/catalog")
            .wrap(middlewares::RequireJWT)
            .route("/niveaux", web::get().to(list_niveaux))
            .route("/sous-niveaux", web::get().to(list_sous_niveaux))
            .route("/matieres", web::get().to(list_matieres)),
    )
    .service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_subjects)),
    );
}
