use crate::error::{BuildError, Result};
use crate::progress::BuildProgress;
use bollard::Docker;
use colored::Colorize;
use futures_util::stream::StreamExt;
use std::collections::{BTreeMap, HashMap};

pub struct ImageBuilder {
    docker: Docker,
}

impl ImageBuilder {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// イメージをビルド
    pub async fn build_image(
        &self,
        context_data: Vec<u8>,
        tag: &str,
        labels: &BTreeMap<String, String>,
        no_cache: bool,
    ) -> Result<()> {
        tracing::info!("Building image: {}", tag);

        let labels_refs: HashMap<&str, &str> = labels
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        #[allow(deprecated)]
        let options = bollard::image::BuildImageOptions {
            dockerfile: "Dockerfile",
            t: tag,
            labels: labels_refs,
            nocache: no_cache,
            rm: true,      // 中間コンテナを削除
            forcerm: true, // ビルド失敗時も中間コンテナを削除
            pull: true,    // ベースイメージを常にpull
            ..Default::default()
        };

        tracing::debug!("Build options: {:?}", options);

        use bytes::Bytes;
        use http_body_util::{Either, Full};
        let body = Full::new(Bytes::from(context_data));
        let mut stream = self
            .docker
            .build_image(options, None, Some(Either::Left(body)));

        let progress = BuildProgress::new(tag);

        while let Some(msg) = stream.next().await {
            let result = match msg {
                Ok(output) => Self::handle_build_output(output, &progress),
                Err(e) => Err(BuildError::DockerConnection(e)),
            };

            if let Err(e) = result {
                progress.finish_error(&e.to_string());
                return Err(e);
            }
        }

        progress.finish_success();
        tracing::info!("Successfully built: {}", tag);
        Ok(())
    }

    /// ビルド出力の処理
    fn handle_build_output(
        output: bollard::models::BuildInfo,
        progress: &BuildProgress,
    ) -> Result<()> {
        if let Some(stream) = output.stream {
            let line = stream.trim_end();
            if line.starts_with("Step ") {
                // ビルドステップはスピナーのメッセージに
                progress.set_message(line);
            } else if !line.is_empty() {
                progress.println(line);
            }
        }

        if let Some(error) = output.error {
            return Err(BuildError::BuildFailed(error));
        }

        if let Some(error_detail) = output.error_detail {
            let error_msg = error_detail
                .message
                .unwrap_or_else(|| "Unknown build error".to_string());
            return Err(BuildError::BuildFailed(error_msg));
        }

        if let Some(status) = output.status {
            // ステータスメッセージ（ベースイメージのpull等）
            progress.println(&status.cyan().to_string());
        }

        Ok(())
    }
}
