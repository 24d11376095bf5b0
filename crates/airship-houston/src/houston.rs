//! Houston GraphQL API client
//!
//! Houston の GraphQL エンドポイントに直接 POST する実装。
//! 接続タイムアウトと TLS 検証の有無は設定ファイルから受け取る。

use crate::client::DeploymentClient;
use crate::error::{HoustonError, Result};
use crate::types::{Deployment, DeploymentConfig, Response, ResponseData};
use airship_config::{ClientSettings, Context};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

const DEPLOYMENT_CONFIG_QUERY: &str = r#"
query DeploymentConfig {
  deploymentConfig {
    airflowVersions
  }
}"#;

const WORKSPACE_DEPLOYMENTS_QUERY: &str = r#"
query WorkspaceDeployments($workspaceUuid: Uuid!) {
  workspaceDeployments(workspaceUuid: $workspaceUuid) {
    id
    releaseName
    label
    executor
    airflowVersion
    deployInfo {
      current
      nextCli
    }
    urls {
      type
      url
    }
  }
}"#;

const DEPLOYMENT_QUERY: &str = r#"
query GetDeployment($id: String!) {
  deployment(where: { id: $id }) {
    id
    releaseName
    executor
    urls {
      type
      url
    }
  }
}"#;

/// Houston API client
pub struct HoustonClient {
    client: reqwest::Client,
    url: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

impl HoustonClient {
    /// エンドポイント URL とトークンを指定して作成
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        settings: ClientSettings,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.dial_timeout)
            .danger_accept_invalid_certs(settings.skip_verify_tls)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            token: token.into(),
        })
    }

    /// コンテキストのドメインから Houston の URL を組み立てて作成
    pub fn from_context(context: &Context, settings: ClientSettings) -> Result<Self> {
        Self::new(context.houston_url(), context.token.clone(), settings)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<V: Serialize>(&self, query: &str, variables: V) -> Result<ResponseData> {
        let body = GraphQlRequest { query, variables };

        let mut request = self.client.post(&self.url).json(&body);
        if !self.token.is_empty() {
            request = request.header(reqwest::header::AUTHORIZATION, &self.token);
        }

        tracing::debug!("POST {}", self.url);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HoustonError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let api_response: Response = serde_json::from_str(&text)?;

        if !api_response.errors.is_empty() {
            let error_msg = api_response
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(HoustonError::Api(error_msg));
        }

        api_response
            .data
            .ok_or_else(|| HoustonError::NotFound("empty response payload".to_string()))
    }
}

#[async_trait]
impl DeploymentClient for HoustonClient {
    async fn list_deployments(&self, workspace_id: &str) -> Result<Vec<Deployment>> {
        let data = self
            .request(
                WORKSPACE_DEPLOYMENTS_QUERY,
                json!({ "workspaceUuid": workspace_id }),
            )
            .await?;

        Ok(data.workspace_deployments.unwrap_or_default())
    }

    async fn get_deployment_config(&self) -> Result<DeploymentConfig> {
        let data = self.request(DEPLOYMENT_CONFIG_QUERY, json!({})).await?;

        data.deployment_config
            .ok_or_else(|| HoustonError::NotFound("deployment config".to_string()))
    }

    async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment> {
        let data = self
            .request(DEPLOYMENT_QUERY, json!({ "id": deployment_id }))
            .await?;

        data.deployment
            .ok_or_else(|| HoustonError::NotFound(format!("deployment {}", deployment_id)))
    }
}
