use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use super::ProfileService;
use crate::config::AppConfig;
use crate::errors::PortalError;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode, files::responses::AvatarUploadResponse};
use crate::services::{bad_request, current_user, storage_error_response};
use crate::utils::file_magic::image_mime_type;
use crate::utils::validate_magic_bytes;

pub const AVATAR_BUCKET: &str = "profiles";
const AVATAR_PREFIX: &str = "avatars";

/// 头像在 bucket 内的相对路径：avatars/{user_id}.{ext}
pub fn avatar_object_path(user_id: i64, extension: &str) -> String {
    format!("{AVATAR_PREFIX}/{user_id}{extension}")
}

fn upload_failed(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
        ErrorCode::FileUploadFailed,
        message,
    ))
}

fn malformed_payload(err: impl std::fmt::Display) -> HttpResponse {
    tracing::warn!("Malformed avatar upload: {}", err);
    bad_request(
        ErrorCode::FileUploadFailed,
        format!("Invalid multipart payload: {err}"),
    )
}

/// 读取唯一的 `file` 字段：(扩展名, 内容)；格式错误的 multipart 返回 400
async fn read_avatar_field(
    payload: &mut Multipart,
    allowed_extensions: &[String],
    max_size: usize,
) -> Result<Option<(String, Vec<u8>)>, HttpResponse> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(malformed_payload(e)),
        };

        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if upload.is_some() {
            return Err(bad_request(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if !allowed_extensions
            .iter()
            .any(|t| t.to_lowercase() == extension)
        {
            return Err(bad_request(
                ErrorCode::FileTypeNotAllowed,
                "Only image files are allowed",
            ));
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(malformed_payload)?;
            if data.len() + chunk.len() > max_size {
                return Err(bad_request(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                ));
            }
            data.extend_from_slice(&chunk);
        }

        if !validate_magic_bytes(&data, &extension) {
            return Err(bad_request(
                ErrorCode::FileTypeNotAllowed,
                "File content does not match its extension",
            ));
        }
        upload = Some((extension, data));
    }

    Ok(upload)
}

pub async fn handle_upload_avatar(
    service: &ProfileService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let config = AppConfig::get();
    let upload = match read_avatar_field(
        &mut payload,
        &config.storage.allowed_extensions,
        config.storage.max_size,
    )
    .await
    {
        Ok(upload) => upload,
        Err(response) => return Ok(response),
    };

    let Some((extension, data)) = upload else {
        return Ok(bad_request(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ));
    };

    let bucket_dir = Path::new(&config.storage.dir)
        .join(AVATAR_BUCKET)
        .join(AVATAR_PREFIX);
    let object_path = avatar_object_path(user.id, &extension);
    let target = Path::new(&config.storage.dir)
        .join(AVATAR_BUCKET)
        .join(&object_path);

    if let Err(e) = write_avatar(&bucket_dir, &target, user.id, &data) {
        tracing::error!("{}", e);
        return Ok(upload_failed("Failed to store avatar"));
    }

    let public_url = config.public_object_url(AVATAR_BUCKET, &object_path);
    let storage = service.get_storage(request);
    let update = UpdateUserRequest {
        profile_picture_url: Some(public_url.clone()),
        ..Default::default()
    };
    if let Err(e) = storage.update_user(user.id, update).await {
        return Ok(storage_error_response(e, ErrorCode::FileUploadFailed));
    }
    service.evict_cached_user(request).await;

    let response = AvatarUploadResponse {
        path: object_path,
        public_url,
        size: data.len() as i64,
        content_type: image_mime_type(&extension).to_string(),
        uploaded_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Avatar uploaded successfully")))
}

/// 覆盖写入：先写临时文件再重命名，并删除其他扩展名的旧头像
fn write_avatar(
    bucket_dir: &Path,
    target: &Path,
    user_id: i64,
    data: &[u8],
) -> Result<(), PortalError> {
    fs::create_dir_all(bucket_dir)?;

    let tmp = bucket_dir.join(format!(".{}.tmp", Uuid::new_v4()));
    fs::write(&tmp, data)?;
    if let Err(e) = fs::rename(&tmp, target) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    let stem = user_id.to_string();
    for entry in fs::read_dir(bucket_dir)?.flatten() {
        let path = entry.path();
        if path.as_path() != target && path.file_stem().and_then(|s| s.to_str()) == Some(stem.as_str()) {
            let _ = fs::remove_file(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::http::header::{self, HeaderMap, HeaderValue};
    use actix_web::web::Bytes;

    #[test]
    fn test_avatar_object_path() {
        assert_eq!(avatar_object_path(12, ".png"), "avatars/12.png");
    }

    #[test]
    fn test_write_avatar_replaces_previous_extension() {
        let dir = std::env::temp_dir().join(format!("portal-avatar-{}", Uuid::new_v4()));
        let old = dir.join("7.jpg");
        let new = dir.join("7.png");

        write_avatar(&dir, &old, 7, b"old").expect("first write");
        write_avatar(&dir, &new, 7, b"new").expect("second write");

        assert!(!old.exists());
        assert_eq!(fs::read(&new).expect("read"), b"new");
        let _ = fs::remove_dir_all(&dir);
    }

    fn multipart(content_type: &str, body: &'static [u8]) -> Multipart {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(content_type).expect("content type"),
        );
        let stream = futures_util::stream::once(async move {
            Ok::<_, actix_web::error::PayloadError>(Bytes::from_static(body))
        });
        Multipart::new(&headers, stream)
    }

    fn allowed() -> Vec<String> {
        vec![".png".to_string(), ".jpg".to_string()]
    }

    #[actix_web::test]
    async fn test_read_avatar_field_rejects_malformed_payload() {
        let mut payload = multipart("multipart/form-data", b"garbage");
        let response = read_avatar_field(&mut payload, &allowed(), 1024)
            .await
            .expect_err("missing boundary");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body()).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["code"], ErrorCode::FileUploadFailed as i32);
    }

    #[actix_web::test]
    async fn test_read_avatar_field_rejects_truncated_part() {
        let mut payload = multipart(
            "multipart/form-data; boundary=abc",
            b"--abc\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.png\"\r\n\r\n\x89PNG",
        );
        let response = read_avatar_field(&mut payload, &allowed(), 1024)
            .await
            .expect_err("stream ends inside the part");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_read_avatar_field_empty_form_has_no_file() {
        let mut payload = multipart("multipart/form-data; boundary=abc", b"--abc--\r\n");
        let upload = read_avatar_field(&mut payload, &allowed(), 1024)
            .await
            .expect("well-formed payload");
        assert!(upload.is_none());
    }
}
