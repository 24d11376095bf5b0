//! Airship configuration
//!
//! グローバル設定ファイル (`config.yaml`) とプロジェクトディレクトリ
//! (`.airship/config.yaml`) の読み込みを提供します。

pub mod context;
pub mod error;
pub mod project;

pub use context::{ClientSettings, Config, Context, HoustonConfig};
pub use error::*;
pub use project::{Project, ProjectConfig, is_project_dir};

use std::path::PathBuf;

/// 設定ファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "AIRSHIP_CONFIG_PATH";

/// 保存済みトークンを上書きする環境変数（CI向け）
pub const TOKEN_ENV: &str = "AIRSHIP_TOKEN";

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Airshipの設定ディレクトリを取得
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("airship");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// グローバル設定ファイルのパスを取得
///
/// 優先順位:
/// 1. 環境変数 AIRSHIP_CONFIG_PATH
/// 2. ~/.config/airship/config.yaml
///
/// ファイルが存在しなくてもパスは返す（読み込み側でデフォルト値になる）
pub fn config_file_path() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV)
        && !config_path.is_empty()
    {
        return Ok(PathBuf::from(config_path));
    }

    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}
