use serde::Serialize;
use ts_rs::TS;

/// 头像上传结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct AvatarUploadResponse {
    /// bucket 内的相对路径，如 avatars/12.png
    pub path: String,
    /// 公开访问地址
    pub public_url: String,
    /// 文件大小(字节)
    pub size: i64,
    pub content_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
