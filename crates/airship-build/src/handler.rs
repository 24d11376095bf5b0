//! イメージのビルド・プッシュを行う能力の抽象
//!
//! デプロイ処理はコンテナエンジンに直接依存せず、このトレイト越しに
//! ビルドとプッシュを依頼する。

use crate::error::BuildResult;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// ビルド設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageBuildConfig {
    /// ビルドコンテキスト（Dockerfile を含むディレクトリ）
    pub path: PathBuf,
    /// キャッシュを使用しない
    pub no_cache: bool,
    /// イメージに付与するラベル
    pub labels: BTreeMap<String, String>,
}

impl ImageBuildConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

/// 1 つのローカルイメージに対するビルドとプッシュ
#[async_trait]
pub trait ImageHandler: Send + Sync {
    /// ローカルでイメージをビルドする
    async fn build(&self, config: &ImageBuildConfig) -> BuildResult<()>;

    /// ビルド済みイメージを `repository`（タグ込み）としてプッシュする
    async fn push(&self, repository: &str, username: &str, token: &str) -> BuildResult<()>;
}

/// イメージ名から [`ImageHandler`] を生成する
///
/// コンテナエンジンに接続できない場合はここで失敗する。
#[async_trait]
pub trait ImageHandlerFactory: Send + Sync {
    async fn init(&self, image: &str) -> BuildResult<Box<dyn ImageHandler>>;
}
