use crate::validate::VALID_IMAGE_REPO_PREFIXES;
use airship_build::BuildError;
use airship_houston::HoustonError;
use thiserror::Error;

/// デプロイ処理の失敗（どの段階で失敗したかを区別する）
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("デプロイメント情報の取得に失敗しました: {0}")]
    Lookup(#[source] HoustonError),

    #[error("ワークスペースにデプロイメントがありません")]
    NoDeployments,

    #[error("デプロイメント '{0}' が見つかりません")]
    DeploymentNotFound(String),

    #[error(
        "デプロイ先のデプロイメントを指定してください: airship deploy <RELEASE_NAME>\n\
         利用可能なデプロイメント: {}",
        .0.join(", ")
    )]
    DeploymentNotSelected(Vec<String>),

    #[error("Dockerfileを読み込めません: {0}")]
    Dockerfile(#[source] BuildError),

    #[error(
        "許可されていないイメージリポジトリです: {repository}\n\
         ベースイメージは {} のいずれかで始まる必要があります",
        VALID_IMAGE_REPO_PREFIXES.join(", ")
    )]
    InvalidImageRepo { repository: String },

    #[error("イメージハンドラを初期化できません: {0}")]
    HandlerInit(#[source] BuildError),

    #[error("イメージのビルドに失敗しました: {0}")]
    Build(#[source] BuildError),

    #[error("イメージのプッシュに失敗しました: {0}")]
    Push(#[source] BuildError),
}

impl DeployError {
    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            DeployError::HandlerInit(e) | DeployError::Build(e) | DeployError::Dockerfile(e) => {
                e.user_message()
            }
            DeployError::Push(e) => format!(
                "イメージのプッシュに失敗しました: {}\n\
                 \n\
                 イメージはローカルにビルド済みです。",
                e.user_message()
            ),
            DeployError::Lookup(e) if e.is_unauthorized() => format!(
                "{}\n\
                 \n\
                 トークンの有効期限が切れていないか確認してください。",
                self
            ),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_push_messages_differ() {
        let build = DeployError::Build(BuildError::BuildFailed("boom".to_string()));
        let push = DeployError::Push(BuildError::PushFailed {
            message: "boom".to_string(),
        });

        assert_ne!(build.to_string(), push.to_string());
        assert!(build.to_string().contains("ビルド"));
        assert!(push.to_string().contains("プッシュ"));
        assert!(push.to_string().contains("boom"));
    }

    #[test]
    fn test_not_selected_lists_deployments() {
        let err = DeployError::DeploymentNotSelected(vec!["dev".to_string(), "prod".to_string()]);
        assert!(err.to_string().contains("dev, prod"));
    }

    #[test]
    fn test_invalid_repo_lists_prefixes() {
        let err = DeployError::InvalidImageRepo {
            repository: "personal-repo/ap-airflow".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("personal-repo/ap-airflow"));
        assert!(msg.contains("quay.io/astronomer/"));
    }
}
