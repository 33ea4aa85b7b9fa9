use actix_web::HttpResponse;

use crate::models::ApiResponse;
use crate::models::catalog::responses::{
    MatiereItem, MatiereListResponse, MatiereQuery, NiveauListResponse, SousNiveauListResponse,
    SousNiveauQuery,
};
use crate::utils::catalog;

pub fn list_niveaux() -> HttpResponse {
    let items = catalog::niveaux().into_iter().map(String::from).collect();
    HttpResponse::Ok().json(ApiResponse::success(
        NiveauListResponse { items },
        "Niveaux retrieved successfully",
    ))
}

/// 未知 niveau 返回空列表
pub fn list_sous_niveaux(query: SousNiveauQuery) -> HttpResponse {
    let niveau = query.niveau.trim().to_string();
    let items = catalog::sous_niveaux(&niveau)
        .into_iter()
        .map(String::from)
        .collect();
    HttpResponse::Ok().json(ApiResponse::success(
        SousNiveauListResponse { niveau, items },
        "Sous-niveaux retrieved successfully",
    ))
}

pub fn list_matieres(query: MatiereQuery) -> HttpResponse {
    let niveau = query.niveau.trim().to_string();
    let sous_niveau = query.sous_niveau.trim().to_string();
    let items = catalog::matieres(&niveau, &sous_niveau)
        .into_iter()
        .map(|entry| MatiereItem {
            matiere: entry.matiere.to_string(),
            coefficient: entry.coefficient,
            code: entry.subject_code(),
        })
        .collect();
    HttpResponse::Ok().json(ApiResponse::success(
        MatiereListResponse {
            niveau,
            sous_niveau,
            items,
        },
        "Matières retrieved successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_list_sous_niveaux_unknown_is_empty() {
        let response = list_sous_niveaux(SousNiveauQuery {
            niveau: "Université".to_string(),
        });
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body()).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["data"]["items"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_list_matieres_carries_codes() {
        let response = list_matieres(MatiereQuery {
            niveau: "Collège".to_string(),
            sous_niveau: "6ème".to_string(),
        });
        let body = to_bytes(response.into_body()).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        let items = json["data"]["items"].as_array().expect("items");
        assert!(!items.is_empty());
        assert!(items.iter().all(|item| {
            item["code"].as_str().is_some_and(|code| code.starts_with("6EME-"))
        }));
    }
}
