use crate::error::{MeetingQrError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 5 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// オリジン相対のQRペイロードを解決する基準URL
    pub base_url: Option<String>,
    /// Bearerトークン（管理者ログインで取得したもの）
    pub api_token: Option<String>,
    pub max_file_size: u64,
    /// 未指定ならHTTPクライアントの既定値
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.into()),
            api_token: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MeetingQrError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("meeting-qr").join("config.json"))
    }

    /// 基準URL（環境変数を優先）
    pub fn base_url(&self) -> Option<String> {
        match std::env::var("MEETING_QR_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => Some(url),
            _ => self.base_url.clone(),
        }
    }

    /// APIトークン（環境変数を優先）
    pub fn api_token(&self) -> Option<String> {
        match std::env::var("MEETING_QR_TOKEN") {
            Ok(token) if !token.trim().is_empty() => Some(token),
            _ => self.api_token.clone(),
        }
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        url::Url::parse(&url).map_err(|e| MeetingQrError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.base_url = Some(url);
        self.save()
    }

    pub fn set_api_token(&mut self, token: Option<String>) -> Result<()> {
        self.api_token = token;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_file_size, 5 * 1024 * 1024);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert!(config.api_token.is_none());
        assert!(config.timeout_seconds.is_none());
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            base_url: Some("https://rooms.example.com".into()),
            api_token: Some("secret".into()),
            max_file_size: 1024,
            timeout_seconds: Some(10),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_url.as_deref(), Some("https://rooms.example.com"));
        assert_eq!(loaded.api_token.as_deref(), Some("secret"));
        assert_eq!(loaded.max_file_size, 1024);
        assert_eq!(loaded.timeout_seconds, Some(10));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "timeout_seconds": 30 }"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timeout_seconds, Some(30));
        assert_eq!(loaded.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ broken").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(MeetingQrError::JsonParse(_))
        ));
    }
}
