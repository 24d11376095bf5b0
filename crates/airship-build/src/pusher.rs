//! イメージプッシュ処理
//!
//! ローカルでビルドしたイメージにデプロイ先のタグを付け、レジストリにプッシュします。

use crate::auth::RegistryAuth;
use crate::error::{BuildError, BuildResult};
use bollard::Docker;
use bollard::models::PushImageInfo;
use colored::Colorize;
use futures_util::StreamExt;
use std::io::Write;

/// イメージプッシュを実行するハンドラ
pub struct ImagePusher {
    docker: Docker,
    auth: RegistryAuth,
}

impl ImagePusher {
    pub fn new(docker: Docker) -> Self {
        Self {
            docker,
            auth: RegistryAuth::new(),
        }
    }

    /// ローカルイメージを `repository`（タグ込み）としてプッシュ
    ///
    /// # Arguments
    /// * `local_image` - ビルド済みのローカルイメージ
    /// * `repository` - プッシュ先（例: `registry.example.com/dev/airflow:deploy-3`）
    ///
    /// # Returns
    /// プッシュ成功時は完全なイメージ名を返す
    pub async fn push(
        &self,
        local_image: &str,
        repository: &str,
        username: &str,
        token: &str,
    ) -> BuildResult<String> {
        let (remote_repo, tag) = split_image_tag(repository);
        let full_image = format!("{}:{}", remote_repo, tag);

        validate_tag(&tag)?;

        // デプロイ先のタグを付与
        #[allow(deprecated)]
        let tag_options = bollard::image::TagImageOptions {
            repo: remote_repo.as_str(),
            tag: tag.as_str(),
        };
        self.docker
            .tag_image(local_image, Some(tag_options))
            .await
            .map_err(|e| BuildError::PushFailed {
                message: format!("failed to tag {} as {}: {}", local_image, full_image, e),
            })?;

        let credentials = self.auth.credentials_for(&full_image, username, token)?;

        #[allow(deprecated)]
        let options = bollard::image::PushImageOptions::<String> { tag: tag.clone() };

        println!("  → {}", full_image.cyan());

        #[allow(deprecated)]
        let mut stream = self
            .docker
            .push_image(&remote_repo, Some(options), credentials);

        let mut last_status = String::new();
        let mut error_message: Option<String> = None;

        while let Some(result) = stream.next().await {
            match result {
                Ok(info) => {
                    if let Some(err) = info.error {
                        error_message = Some(err);
                    } else {
                        self.handle_progress(&info, &mut last_status);
                    }
                }
                Err(e) => {
                    return Err(BuildError::PushFailed {
                        message: e.to_string(),
                    });
                }
            }
        }

        println!();

        if let Some(err) = error_message {
            return Err(BuildError::PushFailed { message: err });
        }

        tracing::info!("Pushed {}", full_image);
        Ok(full_image)
    }

    /// プッシュ進捗を表示
    fn handle_progress(&self, info: &PushImageInfo, last_status: &mut String) {
        if let Some(status) = &info.status {
            let progress = info.progress.as_deref().unwrap_or("");

            match status.as_str() {
                "Pushing" => {
                    print!("\r  ↑ {} {}     ", status, progress);
                    std::io::stdout().flush().ok();
                }
                "Pushed" => {
                    println!("\r  {} Pushed                    ", "✓".green());
                }
                "Layer already exists" => {
                    println!("\r  {} Layer already exists      ", "✓".green());
                }
                "Preparing" | "Waiting" => {
                    // ノイズ軽減のため表示しない
                }
                _ => {
                    if status != last_status {
                        println!("\r  ℹ {}                    ", status);
                        *last_status = status.clone();
                    }
                }
            }
        }
    }
}

/// タグのバリデーション
fn validate_tag(tag: &str) -> BuildResult<()> {
    // Docker タグの制約:
    // - 128文字以下
    // - 英数字、ピリオド、ハイフン、アンダースコアのみ
    // - 先頭はピリオドまたはハイフンではない

    if tag.is_empty() {
        return Err(BuildError::InvalidTag {
            tag: "(empty)".to_string(),
        });
    }

    if tag.len() > 128 {
        return Err(BuildError::InvalidTag {
            tag: format!("Tag too long ({} characters, max 128)", tag.len()),
        });
    }

    if tag.starts_with('.') || tag.starts_with('-') {
        return Err(BuildError::InvalidTag {
            tag: tag.to_string(),
        });
    }

    if let Some(c) = tag
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '.' && *c != '-' && *c != '_')
    {
        return Err(BuildError::InvalidTag {
            tag: format!("Invalid character '{}' in tag: {}", c, tag),
        });
    }

    Ok(())
}

/// イメージ名とタグを分離
///
/// # Examples
/// - `quay.io/astronomer/ap-airflow:2.1.0` -> `("quay.io/astronomer/ap-airflow", "2.1.0")`
/// - `astronomerinc/ap-airflow` -> `("astronomerinc/ap-airflow", "latest")`
/// - `localhost:5000/airflow:dev` -> `("localhost:5000/airflow", "dev")`
pub fn split_image_tag(image: &str) -> (String, String) {
    if let Some(pos) = image.rfind(':') {
        let potential_tag = &image[pos + 1..];
        let potential_image = &image[..pos];

        // `localhost:5000/app` の `5000/app` はタグではない
        if !potential_tag.contains('/') && !potential_tag.chars().all(|c| c.is_ascii_digit()) {
            return (potential_image.to_string(), potential_tag.to_string());
        }
    }

    (image.to_string(), "latest".to_string())
}
