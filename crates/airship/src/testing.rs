//! テスト用のダブル
//!
//! 呼び出しを記録し、あらかじめ決めた結果を返す。

use airship_build::{BuildError, BuildResult, ImageBuildConfig, ImageHandler, ImageHandlerFactory};
use airship_houston::{
    Deployment, DeploymentClient, DeploymentConfig, DeploymentUrl, HoustonError,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub fn deployment(id: &str, release_name: &str) -> Deployment {
    Deployment {
        id: id.to_string(),
        release_name: release_name.to_string(),
        ..Default::default()
    }
}

pub fn url(url_type: &str, url: &str) -> DeploymentUrl {
    DeploymentUrl {
        url_type: url_type.to_string(),
        url: url.to_string(),
    }
}

/// 固定値を返す Houston の代わり
pub struct FakeDeploymentClient {
    pub deployments: Vec<Deployment>,
    pub airflow_versions: Vec<String>,
    pub fail_config: bool,
    pub fail_get: bool,
}

impl Default for FakeDeploymentClient {
    fn default() -> Self {
        Self {
            deployments: Vec::new(),
            airflow_versions: ["2.1.0", "2.0.2", "2.0.0", "1.10.15", "1.10.14"]
                .iter()
                .map(|v| v.to_string())
                .collect(),
            fail_config: false,
            fail_get: false,
        }
    }
}

#[async_trait]
impl DeploymentClient for FakeDeploymentClient {
    async fn list_deployments(&self, _workspace_id: &str) -> airship_houston::Result<Vec<Deployment>> {
        Ok(self.deployments.clone())
    }

    async fn get_deployment_config(&self) -> airship_houston::Result<DeploymentConfig> {
        if self.fail_config {
            return Err(HoustonError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(DeploymentConfig {
            airflow_versions: self.airflow_versions.clone(),
        })
    }

    async fn get_deployment(&self, deployment_id: &str) -> airship_houston::Result<Deployment> {
        if self.fail_get {
            return Err(HoustonError::Api("connection refused".to_string()));
        }
        self.deployments
            .iter()
            .find(|d| d.id == deployment_id)
            .cloned()
            .ok_or_else(|| HoustonError::NotFound(deployment_id.to_string()))
    }
}

/// ハンドラに対する呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init(String),
    Build(ImageBuildConfig),
    Push {
        repository: String,
        username: String,
        token: String,
    },
}

/// 呼び出しを記録するハンドラを返すファクトリ
#[derive(Default, Clone)]
pub struct RecordingFactory {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub fail_init: bool,
    pub build_error: Option<String>,
    pub push_error: Option<String>,
}

impl RecordingFactory {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn push_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Push { .. }))
            .count()
    }
}

struct RecordingHandler {
    calls: Arc<Mutex<Vec<Call>>>,
    build_error: Option<String>,
    push_error: Option<String>,
}

#[async_trait]
impl ImageHandlerFactory for RecordingFactory {
    async fn init(&self, image: &str) -> BuildResult<Box<dyn ImageHandler>> {
        if self.fail_init {
            return Err(BuildError::DaemonUnavailable(
                "Cannot connect to the Docker daemon".to_string(),
            ));
        }
        self.calls.lock().unwrap().push(Call::Init(image.to_string()));
        Ok(Box::new(RecordingHandler {
            calls: Arc::clone(&self.calls),
            build_error: self.build_error.clone(),
            push_error: self.push_error.clone(),
        }))
    }
}

#[async_trait]
impl ImageHandler for RecordingHandler {
    async fn build(&self, config: &ImageBuildConfig) -> BuildResult<()> {
        self.calls.lock().unwrap().push(Call::Build(config.clone()));
        match &self.build_error {
            Some(msg) => Err(BuildError::BuildFailed(msg.clone())),
            None => Ok(()),
        }
    }

    async fn push(&self, repository: &str, username: &str, token: &str) -> BuildResult<()> {
        self.calls.lock().unwrap().push(Call::Push {
            repository: repository.to_string(),
            username: username.to_string(),
            token: token.to_string(),
        });
        match &self.push_error {
            Some(msg) => Err(BuildError::PushFailed {
                message: msg.clone(),
            }),
            None => Ok(()),
        }
    }
}
