//! Houston API のレコード型

use serde::{Deserialize, Serialize};

/// Airflow Webserver の URL 種別
pub const AIRFLOW_URL_TYPE: &str = "airflow";
/// Flower (Celery monitor) の URL 種別
pub const FLOWER_URL_TYPE: &str = "flower";

const DEPLOY_TAG_PREFIX: &str = "deploy-";

/// GraphQL レスポンス全体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub data: Option<ResponseData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// `data` 以下のペイロード（問い合わせた項目だけが埋まる）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    #[serde(default)]
    pub deployment_config: Option<DeploymentConfig>,
    #[serde(default)]
    pub deployment: Option<Deployment>,
    #[serde(default)]
    pub workspace_deployments: Option<Vec<Deployment>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// デプロイメント種別ごとの設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    /// 利用可能な Airflow バージョン
    #[serde(default)]
    pub airflow_versions: Vec<String>,
}

impl DeploymentConfig {
    pub fn allows(&self, version: &str) -> bool {
        self.airflow_versions.iter().any(|v| v == version)
    }
}

/// Houston 上の Airflow デプロイメント
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub release_name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub executor: String,
    #[serde(default)]
    pub airflow_version: String,
    #[serde(default)]
    pub urls: Vec<DeploymentUrl>,
    #[serde(default)]
    pub deploy_info: DeployInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentUrl {
    #[serde(rename = "type")]
    pub url_type: String,
    pub url: String,
}

/// 現在デプロイされているイメージタグ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployInfo {
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default)]
    pub next_cli: Option<String>,
}

impl Deployment {
    /// 指定した種別の URL を返す（最初に一致したもの）
    pub fn url_for(&self, url_type: &str) -> Option<&str> {
        self.urls
            .iter()
            .find(|u| u.url_type == url_type)
            .map(|u| u.url.as_str())
    }

    /// 次回デプロイで使うイメージタグ
    ///
    /// Houston が `nextCli` を返していればそれを使い、
    /// なければ現在の `deploy-N` から `deploy-(N+1)` を計算する
    pub fn next_image_tag(&self) -> String {
        if let Some(next) = &self.deploy_info.next_cli
            && !next.is_empty()
        {
            return next.clone();
        }

        let current = self
            .deploy_info
            .current
            .as_deref()
            .and_then(|tag| tag.strip_prefix(DEPLOY_TAG_PREFIX))
            .and_then(|n| n.parse::<u64>().ok())
            .unwrap_or(0);

        format!("{}{}", DEPLOY_TAG_PREFIX, current + 1)
    }
}
