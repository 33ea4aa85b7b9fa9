pub mod lookup;
pub mod subjects;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::catalog::responses::{MatiereQuery, SousNiveauQuery};
use crate::storage::Storage;

pub struct CatalogService {
    storage: Option<Arc<dyn Storage>>,
}

impl CatalogService {
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

    pub async fn list_niveaux(&self) -> ActixResult<HttpResponse> {
        Ok(lookup::list_niveaux())
    }

    pub async fn list_sous_niveaux(&self, query: SousNiveauQuery) -> ActixResult<HttpResponse> {
        Ok(lookup::list_sous_niveaux(query))
    }

    pub async fn list_matieres(&self, query: MatiereQuery) -> ActixResult<HttpResponse> {
        Ok(lookup::list_matieres(query))
    }

    // 已创建的科目
    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        subjects::list_subjects(self, request).await
    }
}
