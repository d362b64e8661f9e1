//! 予約削除リクエスト送信
//!
//! QRコードの削除URLへ `DELETE` を1回だけ送る。
//! 失敗はすべて ScanError::DispatchFailed に変換する。

use crate::config::Config;
use crate::error::{MeetingQrError, Result};
use async_trait::async_trait;
use meeting_qr_common::{is_origin_relative, ScanError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// 削除リクエストの送信先
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// ペイロードのURLへ DELETE を送る
    async fn delete_booking(&self, payload: &str) -> std::result::Result<(), ScanError>;
}

/// エラーレスポンス `{ "message"?: string }`
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// reqwestによる実装
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    base_url: Option<Url>,
    api_token: Option<String>,
}

impl HttpDispatcher {
    pub fn new(base_url: Option<&str>, api_token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url
            .map(|u| Url::parse(u).map_err(|e| MeetingQrError::InvalidUrl(format!("{}: {}", u, e))))
            .transpose()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            api_token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.base_url().as_deref(),
            config.api_token(),
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    /// リクエスト先URL
    ///
    /// 絶対URLはそのまま、`/api/...` は基準URLで解決する。
    pub fn resolve(&self, payload: &str) -> Option<String> {
        if is_origin_relative(payload) {
            let base = self.base_url.as_ref()?;
            return base.join(payload).ok().map(String::from);
        }
        Url::parse(payload).ok().map(|_| payload.to_string())
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn delete_booking(&self, payload: &str) -> std::result::Result<(), ScanError> {
        let fingerprint = fingerprint(payload);

        let Some(url) = self.resolve(payload) else {
            warn!(%fingerprint, "削除URLを解決できません");
            return Err(ScanError::DispatchFailed { message: None });
        };

        let mut request = self
            .client
            .delete(&url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.api_token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = match request.send().await {
            Ok(res) => res,
            Err(e) => {
                warn!(%fingerprint, error = %e, "削除リクエスト送信失敗");
                return Err(ScanError::DispatchFailed { message: None });
            }
        };

        let status = response.status();
        if status.is_success() {
            info!(%fingerprint, status = status.as_u16(), "予約を削除");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        warn!(%fingerprint, status = status.as_u16(), "予約削除に失敗");

        Err(ScanError::DispatchFailed {
            message: body.message,
        })
    }
}

/// ログ用の短い指紋（トークンを平文で残さない）
pub fn fingerprint(payload: &str) -> String {
    let digest = Sha256::digest(payload.as_bytes());
    hex::encode(&digest[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher(base: Option<&str>) -> HttpDispatcher {
        HttpDispatcher::new(base, None, None).unwrap()
    }

    #[test]
    fn test_resolve_absolute_unchanged() {
        let d = dispatcher(Some("http://localhost:8080"));
        let payload = "https://rooms.example.com/api/bookings/delete/abc";
        assert_eq!(d.resolve(payload).as_deref(), Some(payload));
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let d = dispatcher(Some("http://localhost:8080"));
        assert_eq!(
            d.resolve("/api/bookings/delete/abc").as_deref(),
            Some("http://localhost:8080/api/bookings/delete/abc")
        );
    }

    #[test]
    fn test_resolve_relative_without_base() {
        let d = dispatcher(None);
        assert!(d.resolve("/api/bookings/delete/abc").is_none());
    }

    #[test]
    fn test_resolve_garbage() {
        let d = dispatcher(Some("http://localhost:8080"));
        assert!(d.resolve("not a url /api/bookings/delete/x").is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpDispatcher::new(Some("::not-a-url"), None, None);
        assert!(matches!(result, Err(MeetingQrError::InvalidUrl(_))));
    }

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let a = fingerprint("http://localhost:8080/api/bookings/delete/secret");
        let b = fingerprint("http://localhost:8080/api/bookings/delete/secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert!(!a.contains("secret"));
    }
}
