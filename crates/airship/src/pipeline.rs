//! ビルド・プッシュ・検証のパイプライン

use crate::error::DeployError;
use crate::lookup::get_deployment_info;
use crate::validate::{is_allowed_runtime_version, valid_image_repo};
use airship_build::{ImageBuildConfig, ImageHandlerFactory, read_base_image};
use airship_config::Context;
use airship_houston::{Deployment, DeploymentClient};
use colored::Colorize;
use std::path::Path;

/// デプロイ説明を記録するイメージラベル
pub const DEPLOY_DESCRIPTION_LABEL: &str = "io.airship.deploy.description";

/// デプロイ処理
///
/// バックエンドとイメージハンドラは生成時に受け取り、
/// パイプライン自体は状態を持たない。
pub struct DeployPipeline<'a> {
    client: &'a dyn DeploymentClient,
    image_handlers: &'a dyn ImageHandlerFactory,
    show_warnings: bool,
    no_cache: bool,
}

impl<'a> DeployPipeline<'a> {
    pub fn new(
        client: &'a dyn DeploymentClient,
        image_handlers: &'a dyn ImageHandlerFactory,
    ) -> Self {
        Self {
            client,
            image_handlers,
            show_warnings: true,
            no_cache: false,
        }
    }

    pub fn show_warnings(mut self, show: bool) -> Self {
        self.show_warnings = show;
        self
    }

    pub fn no_cache(mut self, no_cache: bool) -> Self {
        self.no_cache = no_cache;
        self
    }

    /// イメージをビルドしてデプロイ先レジストリへプッシュする
    ///
    /// 成功時はプッシュしたリモートイメージ名を返す。
    /// どの段階で失敗しても以降の処理は行わない。
    pub async fn build_push_docker_image(
        &self,
        context: &Context,
        image_name: &str,
        path: &Path,
        deployment: &Deployment,
        description: &str,
    ) -> Result<String, DeployError> {
        let deployment_config = get_deployment_info(self.client).await?;

        let base = read_base_image(&path.join("Dockerfile")).map_err(DeployError::Dockerfile)?;
        if !valid_image_repo(&base.repository) {
            return Err(DeployError::InvalidImageRepo {
                repository: base.repository,
            });
        }

        if !is_allowed_runtime_version(&base, &deployment_config) {
            tracing::warn!(
                "runtime version {} is not in {:?}",
                base.runtime_version(),
                deployment_config.airflow_versions
            );
            if self.show_warnings {
                println!(
                    "{}",
                    format!(
                        "⚠ Airflow {} はこのデプロイメントで利用可能なバージョンではありません",
                        base.runtime_version()
                    )
                    .yellow()
                );
                println!(
                    "  利用可能: {}",
                    deployment_config.airflow_versions.join(", ").dimmed()
                );
            }
        }

        let local_image = format!("{}/airflow:latest", image_name);
        let handler = self
            .image_handlers
            .init(&local_image)
            .await
            .map_err(DeployError::HandlerInit)?;

        let mut build_config = ImageBuildConfig::new(path);
        build_config.no_cache = self.no_cache;
        if !description.is_empty() {
            build_config
                .labels
                .insert(DEPLOY_DESCRIPTION_LABEL.to_string(), description.to_string());
        }

        tracing::info!("building {}", local_image);
        handler
            .build(&build_config)
            .await
            .map_err(DeployError::Build)?;

        let remote_image = format!(
            "{}/{}/airflow:{}",
            context.registry_host(),
            deployment.release_name,
            deployment.next_image_tag()
        );

        tracing::info!("pushing {}", remote_image);
        handler
            .push(&remote_image, "", &context.token)
            .await
            .map_err(DeployError::Push)?;

        Ok(remote_image)
    }
}
