//! 拡張子からメディアタイプを判定

use std::path::Path;

const MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("pdf", "application/pdf"),
    ("json", "application/json"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
];

const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// 宣言上のメディアタイプ（拡張子の大文字小文字は区別しない）
pub fn media_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension() else {
        return UNKNOWN_MEDIA_TYPE;
    };
    let ext = ext.to_string_lossy().to_lowercase();

    MEDIA_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, media_type)| *media_type)
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}
