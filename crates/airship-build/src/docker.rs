//! Docker Engine を使った [`ImageHandler`] 実装

use crate::builder::ImageBuilder;
use crate::context::ContextBuilder;
use crate::error::{BuildError, BuildResult};
use crate::handler::{ImageBuildConfig, ImageHandler, ImageHandlerFactory};
use crate::pusher::ImagePusher;
use async_trait::async_trait;
use bollard::Docker;

/// ローカルの Docker Engine でビルド・プッシュする
pub struct DockerImageHandler {
    docker: Docker,
    image: String,
}

impl DockerImageHandler {
    pub fn new(docker: Docker, image: impl Into<String>) -> Self {
        Self {
            docker,
            image: image.into(),
        }
    }
}

#[async_trait]
impl ImageHandler for DockerImageHandler {
    async fn build(&self, config: &ImageBuildConfig) -> BuildResult<()> {
        ContextBuilder::check(&config.path)?;
        let context_data = ContextBuilder::create_context(&config.path)?;

        ImageBuilder::new(self.docker.clone())
            .build_image(context_data, &self.image, &config.labels, config.no_cache)
            .await
    }

    async fn push(&self, repository: &str, username: &str, token: &str) -> BuildResult<()> {
        ImagePusher::new(self.docker.clone())
            .push(&self.image, repository, username, token)
            .await
            .map(|_| ())
    }
}

/// Docker Engine に接続して [`DockerImageHandler`] を作る
#[derive(Debug, Default, Clone, Copy)]
pub struct DockerHandlerFactory;

#[async_trait]
impl ImageHandlerFactory for DockerHandlerFactory {
    async fn init(&self, image: &str) -> BuildResult<Box<dyn ImageHandler>> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| BuildError::DaemonUnavailable(e.to_string()))?;

        // 接続テスト
        docker
            .ping()
            .await
            .map_err(|e| BuildError::DaemonUnavailable(e.to_string()))?;

        tracing::debug!("Connected to Docker for image {}", image);
        Ok(Box::new(DockerImageHandler::new(docker, image)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_checks_context_before_docker() {
        // 接続は遅延されるので、デーモンが無くてもハンドラは作れる
        let docker = Docker::connect_with_local_defaults().unwrap();
        let handler = DockerImageHandler::new(docker, "demo/airflow:latest");

        let temp_dir = tempfile::tempdir().unwrap();
        let result = handler.build(&ImageBuildConfig::new(temp_dir.path())).await;
        assert!(matches!(result, Err(BuildError::DockerfileNotFound(_))));

        let missing = temp_dir.path().join("missing");
        let result = handler.build(&ImageBuildConfig::new(&missing)).await;
        assert!(matches!(result, Err(BuildError::ContextNotFound(_))));
    }
}
