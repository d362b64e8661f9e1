//! QRペイロード判定
//!
//! 会議終了用QRコードには予約削除URLが入っている:
//! `http://<host>/api/bookings/delete/<token>`
//!
//! 判定は単純な部分文字列一致のみ（署名などの検証はしない）。

use regex::Regex;

/// 予約削除URLの目印
pub const DELETE_PATH_MARKER: &str = "/api/bookings/delete/";

/// 予約削除URLとして有効か
///
/// # Examples
/// ```
/// use meeting_qr_common::is_valid_payload;
///
/// assert!(is_valid_payload("http://localhost:8080/api/bookings/delete/abc"));
/// assert!(!is_valid_payload("https://example.com/hello"));
/// ```
pub fn is_valid_payload(payload: &str) -> bool {
    payload.contains(DELETE_PATH_MARKER)
}

/// 削除URLから予約トークンを取り出す（表示・ログ用）
pub fn booking_token(payload: &str) -> Option<&str> {
    lazy_static::lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(r"/api/bookings/delete/([^/?#\s]+)").unwrap();
    }

    TOKEN_RE
        .captures(payload)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// オリジン相対URL（`/api/...`）か
pub fn is_origin_relative(payload: &str) -> bool {
    payload.starts_with('/') && !payload.starts_with("//")
}
