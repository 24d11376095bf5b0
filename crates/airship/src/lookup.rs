//! デプロイ先の解決

use crate::error::DeployError;
use airship_houston::{Deployment, DeploymentClient, DeploymentConfig};

/// リリース名が一致するデプロイメントが存在するか
pub fn deployment_name_exists(name: &str, deployments: &[Deployment]) -> bool {
    find_deployment(name, deployments).is_some()
}

/// リリース名が一致する最初のデプロイメント
pub fn find_deployment<'a>(name: &str, deployments: &'a [Deployment]) -> Option<&'a Deployment> {
    deployments.iter().find(|d| d.release_name == name)
}

/// デプロイ先を決定
///
/// 名前が指定されていればそのデプロイメント、
/// 指定がなくデプロイメントが 1 つだけならそれを使う
pub fn select_deployment<'a>(
    name: Option<&str>,
    deployments: &'a [Deployment],
) -> Result<&'a Deployment, DeployError> {
    if deployments.is_empty() {
        return Err(DeployError::NoDeployments);
    }

    match name {
        Some(name) => find_deployment(name, deployments)
            .ok_or_else(|| DeployError::DeploymentNotFound(name.to_string())),
        None if deployments.len() == 1 => Ok(&deployments[0]),
        None => Err(DeployError::DeploymentNotSelected(
            deployments.iter().map(|d| d.release_name.clone()).collect(),
        )),
    }
}

/// デプロイメント設定（利用可能な Airflow バージョン）を取得
pub async fn get_deployment_info(
    client: &dyn DeploymentClient,
) -> Result<DeploymentConfig, DeployError> {
    client
        .get_deployment_config()
        .await
        .map_err(DeployError::Lookup)
}
