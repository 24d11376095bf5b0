//! Airflowプロジェクトディレクトリ

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// プロジェクト設定を置くディレクトリ名
pub const PROJECT_DIR: &str = ".airship";
const PROJECT_CONFIG_FILE: &str = "config.yaml";
const FALLBACK_PROJECT_NAME: &str = "airflow-project";

/// `.airship/config.yaml` の内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project: ProjectSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSection {
    #[serde(default)]
    pub name: Option<String>,
}

/// ディレクトリがAirflowプロジェクトか判定
pub fn is_project_dir(path: &Path) -> bool {
    path.join(PROJECT_DIR).join(PROJECT_CONFIG_FILE).is_file()
}

/// 読み込み済みのプロジェクト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub root: PathBuf,
    /// イメージ名として使える形に正規化済みのプロジェクト名
    pub name: String,
}

impl Project {
    pub fn load(root: &Path) -> Result<Self> {
        if !is_project_dir(root) {
            return Err(ConfigError::NotProjectDir(root.to_path_buf()));
        }

        let config_path = root.join(PROJECT_DIR).join(PROJECT_CONFIG_FILE);
        let content = std::fs::read_to_string(&config_path)?;
        let config: ProjectConfig = if content.trim().is_empty() {
            ProjectConfig::default()
        } else {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?
        };

        let raw_name = config.project.name.unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        Ok(Self {
            root: root.to_path_buf(),
            name: sanitize_image_name(&raw_name),
        })
    }
}

/// Dockerのリポジトリ名に使えない文字を取り除く
///
/// 小文字英数字と `-` `_` `.` のみ残し、先頭の区切り文字は削除する
fn sanitize_image_name(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();
    let cleaned = cleaned.trim_start_matches(['-', '_', '.']);

    if cleaned.is_empty() {
        FALLBACK_PROJECT_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn init_project(root: &Path, config: &str) {
        fs::create_dir_all(root.join(PROJECT_DIR)).unwrap();
        fs::write(root.join(PROJECT_DIR).join(PROJECT_CONFIG_FILE), config).unwrap();
    }

    #[test]
    fn test_not_project_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(!is_project_dir(temp_dir.path()));

        let result = Project::load(temp_dir.path());
        assert!(matches!(result, Err(ConfigError::NotProjectDir(_))));
    }

    #[test]
    fn test_load_named_project() {
        let temp_dir = tempfile::tempdir().unwrap();
        init_project(temp_dir.path(), "project:\n  name: Sales ETL\n");

        let project = Project::load(temp_dir.path()).unwrap();
        assert_eq!(project.name, "salesetl");
        assert_eq!(project.root, temp_dir.path());
    }

    #[test]
    fn test_load_falls_back_to_dir_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("My_Dags");
        init_project(&root, "");

        let project = Project::load(&root).unwrap();
        assert_eq!(project.name, "my_dags");
    }

    #[test]
    fn test_sanitize_image_name() {
        assert_eq!(sanitize_image_name("airflow"), "airflow");
        assert_eq!(sanitize_image_name("_hidden.proj"), "hidden.proj");
        assert_eq!(sanitize_image_name("!!!"), "airflow-project");
    }
}
