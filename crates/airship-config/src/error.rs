use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error(
        "Airflowプロジェクトのディレクトリではありません: {0}\n\
        .airship/config.yaml を含むディレクトリで実行してください"
    )]
    NotProjectDir(PathBuf),

    #[error(
        "コンテキスト '{0}' が設定されていません。\n\
        config.yaml の contexts に domain と token を追加してください"
    )]
    ContextNotFound(String),

    #[error("現在のコンテキストが設定されていません (config.yaml の context キー)")]
    NoCurrentContext,

    #[error("設定ファイルの解析に失敗しました: {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("設定のシリアライズに失敗しました: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
