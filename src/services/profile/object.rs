use actix_web::{HttpResponse, Result as ActixResult, http::header};
use std::path::{Component, Path, PathBuf};

use crate::config::AppConfig;
use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::image_mime_type;

/// 拼接 bucket 内路径，拒绝 `..`、绝对路径等越界写法
pub fn resolve_object_path(root: &Path, bucket: &str, path: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for part in [bucket, path] {
        for component in Path::new(part).components() {
            match component {
                Component::Normal(segment) => resolved.push(segment),
                Component::CurDir => {}
                _ => return None,
            }
        }
    }
    if resolved == root.join(bucket) {
        return None;
    }
    Some(resolved)
}

pub async fn handle_serve_object(bucket: &str, path: &str) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let root = Path::new(&config.storage.dir);

    let Some(file_path) = resolve_object_path(root, bucket, path) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Invalid object path",
        )));
    };

    match std::fs::read(&file_path) {
        Ok(data) => {
            let extension = file_path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default();
            Ok(HttpResponse::Ok()
                .insert_header((header::CONTENT_TYPE, image_mime_type(extension)))
                .insert_header((header::CACHE_CONTROL, "public, max-age=300"))
                .body(data))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::FileNotFound, "File not found"))),
        Err(e) => {
            tracing::error!("{}", PortalError::from(e));
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_object_path() {
        let root = Path::new("storage");
        assert_eq!(
            resolve_object_path(root, "profiles", "avatars/3.png"),
            Some(PathBuf::from("storage/profiles/avatars/3.png"))
        );
        assert!(resolve_object_path(root, "profiles", "../../etc/passwd").is_none());
        assert!(resolve_object_path(root, "..", "config.toml").is_none());
        assert!(resolve_object_path(root, "profiles", "/etc/passwd").is_none());
        assert!(resolve_object_path(root, "profiles", "").is_none());
    }
}
