//! Deployment API abstraction

use crate::error::Result;
use crate::types::{Deployment, DeploymentConfig};
use async_trait::async_trait;

/// デプロイメント情報を取得するバックエンド
///
/// 本番では [`HoustonClient`](crate::HoustonClient) が実装し、
/// テストでは固定値を返すダブルに差し替える。
#[async_trait]
pub trait DeploymentClient: Send + Sync {
    /// ワークスペース内のデプロイメント一覧
    async fn list_deployments(&self, workspace_id: &str) -> Result<Vec<Deployment>>;

    /// デプロイメント設定（利用可能な Airflow バージョンなど）
    async fn get_deployment_config(&self) -> Result<DeploymentConfig>;

    /// 単一デプロイメント（ID・Executor・URL 一覧）
    async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment>;
}
