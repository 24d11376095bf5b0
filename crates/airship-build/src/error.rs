use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Dockerfile not found: {0}")]
    DockerfileNotFound(PathBuf),

    #[error("Build context directory not found: {0}")]
    ContextNotFound(PathBuf),

    #[error("Docker connection error: {0}")]
    DockerConnection(#[from] bollard::errors::Error),

    #[error("Docker daemon is not reachable: {0}")]
    DaemonUnavailable(String),

    #[error("Build failed: {0}")]
    BuildFailed(String),

    #[error("Push failed: {message}")]
    PushFailed { message: String },

    #[error("Invalid image tag: {tag}")]
    InvalidTag { tag: String },

    #[error("Registry authentication failed for {registry}: {message}")]
    AuthFailed { registry: String, message: String },

    #[error("Invalid build configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            BuildError::DockerfileNotFound(path) => {
                format!(
                    "Dockerfileが見つかりません: {}\n\
                     \n\
                     プロジェクトのルートにDockerfileを置いてください。",
                    path.display()
                )
            }
            BuildError::BuildFailed(msg) => {
                format!(
                    "ビルドに失敗しました: {}\n\
                     \n\
                     Dockerfileの内容を確認してください。",
                    msg
                )
            }
            BuildError::ContextNotFound(path) => {
                format!(
                    "ビルドコンテキストが見つかりません: {}",
                    path.display()
                )
            }
            BuildError::DaemonUnavailable(msg) => {
                format!(
                    "Dockerに接続できません: {}\n\
                     \n\
                     解決方法:\n\
                     • Dockerが起動しているか確認してください\n\
                     • docker ps コマンドが正常に動作するか確認してください",
                    msg
                )
            }
            BuildError::AuthFailed { registry, .. } => {
                format!(
                    "{}\n\
                     \n\
                     {} へのトークンが有効か確認してください。",
                    self, registry
                )
            }
            _ => format!("{}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
pub type BuildResult<T> = Result<T>;
