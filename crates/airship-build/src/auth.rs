//! レジストリ認証処理
//!
//! デプロイトークンが渡されればそれを使い、無ければ Docker の config.json
//! （auths / credential helper）から認証情報を探します。

use crate::error::{BuildError, BuildResult};
use base64::Engine;
use bollard::auth::DockerCredentials;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// トークン認証でユーザー名が空のときに使う名前
const TOKEN_USERNAME: &str = "user";
const DEFAULT_REGISTRY: &str = "docker.io";

/// Docker config.json の構造
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DockerConfig {
    #[serde(default)]
    auths: HashMap<String, AuthEntry>,
    /// credential helper 名 (例: "osxkeychain", "desktop")
    #[serde(default)]
    creds_store: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthEntry {
    /// Base64エンコードされた "username:password"
    auth: Option<String>,
}

/// credential helper からのレスポンス
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CredentialResponse {
    username: String,
    secret: String,
}

/// レジストリ認証を管理
#[derive(Debug)]
pub struct RegistryAuth {
    config_path: PathBuf,
}

impl Default for RegistryAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryAuth {
    /// デフォルトで $DOCKER_CONFIG/config.json または ~/.docker/config.json を使用
    pub fn new() -> Self {
        let config_path = std::env::var("DOCKER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|h| h.join(".docker"))
                    .unwrap_or_else(|| PathBuf::from(".docker"))
            })
            .join("config.json");

        Self { config_path }
    }

    pub fn with_config_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// プッシュ用の認証情報を決定
    ///
    /// `token` が空でなければトークン認証、空なら config.json を参照する
    pub fn credentials_for(
        &self,
        image: &str,
        username: &str,
        token: &str,
    ) -> BuildResult<Option<DockerCredentials>> {
        if token.is_empty() {
            return self.get_credentials(image);
        }

        let registry = self.extract_registry(image);
        let username = if username.is_empty() {
            TOKEN_USERNAME
        } else {
            username
        };

        tracing::debug!("Using token credentials for {}", registry);
        Ok(Some(DockerCredentials {
            username: Some(username.to_string()),
            password: Some(token.to_string()),
            serveraddress: Some(registry),
            ..Default::default()
        }))
    }

    /// イメージ名からレジストリの認証情報を config.json から取得
    ///
    /// * `Ok(None)` - 認証情報が不要または見つからない場合
    pub fn get_credentials(&self, image: &str) -> BuildResult<Option<DockerCredentials>> {
        let registry = self.extract_registry(image);

        if !self.config_path.exists() {
            tracing::debug!("Docker config.json not found at {:?}", self.config_path);
            return Ok(None);
        }

        let config = self.load_docker_config()?;

        if let Some(auth_entry) = config.auths.get(&registry)
            && let Some(auth_b64) = &auth_entry.auth
            && let Some(creds) = self.decode_auth(auth_b64, &registry)?
        {
            tracing::debug!("Found credentials in auths for {}", registry);
            return Ok(Some(creds));
        }

        if let Some(helper) = &config.creds_store {
            tracing::debug!("Trying credential helper: {}", helper);
            if let Ok(Some(creds)) = self.get_from_helper(helper, &registry) {
                return Ok(Some(creds));
            }
        }

        tracing::debug!("No credentials found for {}", registry);
        Ok(None)
    }

    /// イメージ名からレジストリを抽出
    ///
    /// # Examples
    /// - `registry.astro.example.com/dev/airflow:deploy-2` -> `registry.astro.example.com`
    /// - `astronomerinc/ap-airflow` -> `docker.io`
    /// - `localhost:5000/airflow` -> `localhost:5000`
    pub fn extract_registry(&self, image: &str) -> String {
        let parts: Vec<&str> = image.split('/').collect();

        if parts.len() >= 2 {
            let first = parts[0];

            // `.` か `:` を含む先頭要素はレジストリホスト
            if first.contains('.') || first.contains(':') {
                return first.to_string();
            }
        }

        DEFAULT_REGISTRY.to_string()
    }

    fn load_docker_config(&self) -> BuildResult<DockerConfig> {
        let content =
            std::fs::read_to_string(&self.config_path).map_err(|e| BuildError::AuthFailed {
                registry: self.config_path.display().to_string(),
                message: format!("Failed to read config.json: {}", e),
            })?;

        serde_json::from_str(&content).map_err(|e| BuildError::AuthFailed {
            registry: self.config_path.display().to_string(),
            message: format!("Failed to parse config.json: {}", e),
        })
    }

    fn decode_auth(
        &self,
        auth_b64: &str,
        registry: &str,
    ) -> BuildResult<Option<DockerCredentials>> {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(auth_b64)
            .map_err(|e| BuildError::AuthFailed {
                registry: registry.to_string(),
                message: format!("Failed to decode auth: {}", e),
            })?;

        let auth_str = String::from_utf8(decoded).map_err(|e| BuildError::AuthFailed {
            registry: registry.to_string(),
            message: format!("Invalid UTF-8 in auth: {}", e),
        })?;

        Ok(auth_str
            .split_once(':')
            .map(|(username, password)| DockerCredentials {
                username: Some(username.to_string()),
                password: Some(password.to_string()),
                serveraddress: Some(registry.to_string()),
                ..Default::default()
            }))
    }

    /// credential helper から認証情報を取得
    fn get_from_helper(
        &self,
        helper: &str,
        registry: &str,
    ) -> BuildResult<Option<DockerCredentials>> {
        let helper_cmd = format!("docker-credential-{}", helper);

        let mut child = Command::new(&helper_cmd)
            .arg("get")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BuildError::AuthFailed {
                registry: registry.to_string(),
                message: format!("Failed to run {}: {}", helper_cmd, e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(registry.as_bytes()).ok();
        }

        let output = child
            .wait_with_output()
            .map_err(|e| BuildError::AuthFailed {
                registry: registry.to_string(),
                message: format!("Credential helper failed: {}", e),
            })?;

        if !output.status.success() {
            tracing::debug!(
                "Credential helper returned error for {}: {}",
                registry,
                String::from_utf8_lossy(&output.stderr)
            );
            return Ok(None);
        }

        let response: CredentialResponse =
            serde_json::from_slice(&output.stdout).map_err(|e| BuildError::AuthFailed {
                registry: registry.to_string(),
                message: format!("Failed to parse credential helper response: {}", e),
            })?;

        Ok(Some(DockerCredentials {
            username: Some(response.username),
            password: Some(response.secret),
            serveraddress: Some(registry.to_string()),
            ..Default::default()
        }))
    }
}
