//! デプロイ後に表示する Web UI の URL

use airship_houston::{AIRFLOW_URL_TYPE, DeploymentClient};

/// デプロイメントの指定した種別の URL
///
/// 取得に失敗した場合や該当する URL がない場合は空文字列を返す。
/// デプロイ自体は完了しているので、ここでの失敗はエラーにしない。
pub async fn get_deployment_url(
    deployment_id: &str,
    client: &dyn DeploymentClient,
    url_type: &str,
) -> String {
    match client.get_deployment(deployment_id).await {
        Ok(deployment) => deployment.url_for(url_type).unwrap_or_default().to_string(),
        Err(e) => {
            tracing::debug!("failed to fetch urls for {}: {}", deployment_id, e);
            String::new()
        }
    }
}

/// Airflow Webserver の URL
pub async fn get_airflow_ui_link(deployment_id: &str, client: &dyn DeploymentClient) -> String {
    get_deployment_url(deployment_id, client, AIRFLOW_URL_TYPE).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDeploymentClient, deployment, url};
    use airship_houston::FLOWER_URL_TYPE;

    fn client_with_urls() -> FakeDeploymentClient {
        let mut d = deployment("d1", "dev");
        d.urls = vec![
            url("airflow", "https://deployments.example.com/dev/airflow"),
            url("flower", "https://deployments.example.com/dev/flower"),
        ];
        FakeDeploymentClient {
            deployments: vec![d],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_airflow_ui_link() {
        let client = client_with_urls();
        assert_eq!(
            get_airflow_ui_link("d1", &client).await,
            "https://deployments.example.com/dev/airflow"
        );
        assert_eq!(
            get_deployment_url("d1", &client, FLOWER_URL_TYPE).await,
            "https://deployments.example.com/dev/flower"
        );
    }

    #[tokio::test]
    async fn test_absent_type_is_empty() {
        let client = client_with_urls();
        assert_eq!(get_deployment_url("d1", &client, "grafana").await, "");

        let bare = FakeDeploymentClient {
            deployments: vec![deployment("d2", "prod")],
            ..Default::default()
        };
        assert_eq!(get_airflow_ui_link("d2", &bare).await, "");
    }

    #[tokio::test]
    async fn test_errors_degrade_to_empty() {
        let client = FakeDeploymentClient {
            fail_get: true,
            ..client_with_urls()
        };
        assert_eq!(get_airflow_ui_link("d1", &client).await, "");

        // 存在しないデプロイメント
        assert_eq!(get_airflow_ui_link("missing", &client_with_urls()).await, "");
    }
}
