//! グローバル設定とデプロイ先コンテキスト

use crate::error::{ConfigError, Result};
use crate::{TOKEN_ENV, config_file_path};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

const DEFAULT_DIAL_TIMEOUT_SECS: u64 = 10;

/// Houstonを運用しているクラスタへの接続先
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// ベースドメイン（例: "astro.example.com"）
    pub domain: String,

    /// Houston API トークン
    #[serde(default)]
    pub token: String,

    /// 既定のワークスペースID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
}

impl Context {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// イメージのプッシュ先レジストリ
    pub fn registry_host(&self) -> String {
        format!("registry.{}", self.domain)
    }

    /// Houston GraphQL エンドポイント
    pub fn houston_url(&self) -> String {
        format!("https://houston.{}/v1", self.domain)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoustonConfig {
    /// 接続・TLSハンドシェイクのタイムアウト（秒）
    pub dial_timeout: u64,
}

impl Default for HoustonConfig {
    fn default() -> Self {
        Self {
            dial_timeout: DEFAULT_DIAL_TIMEOUT_SECS,
        }
    }
}

/// HTTPクライアントに渡す接続設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub dial_timeout: Duration,
    pub skip_verify_tls: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            dial_timeout: Duration::from_secs(DEFAULT_DIAL_TIMEOUT_SECS),
            skip_verify_tls: false,
        }
    }
}

/// config.yaml の内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 現在のコンテキスト名
    pub context: Option<String>,
    pub contexts: BTreeMap<String, Context>,
    pub houston: HoustonConfig,
    pub skip_verify_tls: bool,
    pub show_warnings: bool,
    pub verbosity: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context: None,
            contexts: BTreeMap::new(),
            houston: HoustonConfig::default(),
            skip_verify_tls: false,
            show_warnings: true,
            verbosity: "warn".to_string(),
        }
    }
}

impl Config {
    /// 既定の場所から設定を読み込む
    pub fn load() -> Result<Self> {
        let path = config_file_path()?;
        Self::load_from(&path)
    }

    /// 指定したパスから設定を読み込む
    ///
    /// ファイルが存在しない、または空の場合はデフォルト値を返す
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 現在のコンテキストを取得
    ///
    /// 環境変数 AIRSHIP_TOKEN が設定されていれば保存済みトークンより優先する
    pub fn current_context(&self) -> Result<Context> {
        let name = self.context.as_deref().ok_or(ConfigError::NoCurrentContext)?;
        let mut context = self
            .contexts
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::ContextNotFound(name.to_string()))?;

        if let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.is_empty()
        {
            context.token = token;
        }

        Ok(context)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            dial_timeout: Duration::from_secs(self.houston.dial_timeout),
            skip_verify_tls: self.skip_verify_tls,
        }
    }
}
