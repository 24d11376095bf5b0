//! Dockerfile のベースイメージ解析

use crate::error::{BuildError, BuildResult};
use crate::pusher::split_image_tag;
use std::path::Path;

/// `FROM` で指定されたベースイメージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseImage {
    pub repository: String,
    pub tag: String,
}

impl BaseImage {
    /// タグのバージョン部分
    ///
    /// `2.1.0-buster-onbuild` -> `2.1.0`
    pub fn runtime_version(&self) -> &str {
        self.tag.split('-').next().unwrap_or_default()
    }
}

/// Dockerfile の内容から最初の `FROM` のイメージを取り出す
///
/// 行末の `\` による継続行は連結してから解釈する。
/// `--platform=...` などのフラグは読み飛ばし、ダイジェスト (`@sha256:...`) は除去する
pub fn parse_base_image(content: &str) -> Option<BaseImage> {
    instructions(content).iter().find_map(|line| {
        let mut tokens = line.split_whitespace();
        let instruction = tokens.next()?;
        if !instruction.eq_ignore_ascii_case("FROM") {
            return None;
        }

        let image = tokens.find(|t| !t.starts_with("--"))?;
        let image = image.split('@').next().unwrap_or(image);
        let (repository, tag) = split_image_tag(image);
        Some(BaseImage { repository, tag })
    })
}

/// 継続行を連結した命令の一覧（空行・コメントは除く）
fn instructions(content: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();

    for line in content.lines() {
        let line = line.trim();
        // 継続行の途中にある空行・コメントも読み飛ばす
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.strip_suffix('\\') {
            Some(head) => {
                current.push_str(head);
                current.push(' ');
            }
            None => {
                current.push_str(line);
                result.push(std::mem::take(&mut current));
            }
        }
    }

    if !current.trim().is_empty() {
        result.push(current);
    }

    result
}

/// Dockerfile を読み込んでベースイメージを取得
pub fn read_base_image(dockerfile: &Path) -> BuildResult<BaseImage> {
    if !dockerfile.is_file() {
        return Err(BuildError::DockerfileNotFound(dockerfile.to_path_buf()));
    }

    let content = std::fs::read_to_string(dockerfile)?;
    parse_base_image(&content).ok_or_else(|| {
        BuildError::InvalidConfig(format!(
            "FROM instruction not found in {}",
            dockerfile.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_simple_from() {
        let base = parse_base_image("FROM quay.io/astronomer/ap-airflow:2.1.0-buster-onbuild\n")
            .unwrap();
        assert_eq!(base.repository, "quay.io/astronomer/ap-airflow");
        assert_eq!(base.tag, "2.1.0-buster-onbuild");
        assert_eq!(base.runtime_version(), "2.1.0");
    }

    #[test]
    fn test_parse_skips_comments_args_and_flags() {
        let content = "# syntax=docker/dockerfile:1\n\
                       ARG BASE=ignored\n\
                       \n\
                       from --platform=linux/amd64 astronomerinc/ap-airflow:1.10.15 AS base\n\
                       FROM python:3.9\n";
        let base = parse_base_image(content).unwrap();
        assert_eq!(base.repository, "astronomerinc/ap-airflow");
        assert_eq!(base.tag, "1.10.15");
    }

    #[test]
    fn test_parse_without_tag_and_with_digest() {
        let base = parse_base_image("FROM astronomerinc/ap-airflow").unwrap();
        assert_eq!(base.tag, "latest");

        let base = parse_base_image("FROM localhost:5000/airflow@sha256:abcdef").unwrap();
        assert_eq!(base.repository, "localhost:5000/airflow");
        assert_eq!(base.tag, "latest");
    }

    #[test]
    fn test_parse_line_continuation() {
        let base = parse_base_image("FROM \\\n  quay.io/astronomer/ap-airflow:2.1.0\n").unwrap();
        assert_eq!(base.repository, "quay.io/astronomer/ap-airflow");
        assert_eq!(base.tag, "2.1.0");

        let content = "FROM --platform=linux/amd64 \\\n    \\\n\n  # base\n  astronomerinc/ap-airflow:2.0.2-onbuild\n";
        let base = parse_base_image(content).unwrap();
        assert_eq!(base.repository, "astronomerinc/ap-airflow");
        assert_eq!(base.runtime_version(), "2.0.2");
    }

    #[test]
    fn test_parse_from_without_image_keeps_scanning() {
        assert_eq!(parse_base_image("FROM --platform=linux/amd64\n"), None);

        let base =
            parse_base_image("FROM --platform=linux/amd64\nFROM astronomerinc/ap-airflow:2.1.0\n")
                .unwrap();
        assert_eq!(base.repository, "astronomerinc/ap-airflow");
    }

    #[test]
    fn test_parse_no_from() {
        assert_eq!(parse_base_image("RUN echo hi\n"), None);
        assert_eq!(parse_base_image(""), None);
    }

    #[test]
    fn test_read_base_image_missing_file() {
        let temp_dir = tempdir().unwrap();
        let result = read_base_image(&temp_dir.path().join("Dockerfile"));
        assert!(matches!(result, Err(BuildError::DockerfileNotFound(_))));
    }

    #[test]
    fn test_read_base_image() {
        let temp_dir = tempdir().unwrap();
        let dockerfile = temp_dir.path().join("Dockerfile");
        fs::write(&dockerfile, "FROM quay.io/astronomer/ap-airflow:2.0.2\n").unwrap();

        let base = read_base_image(&dockerfile).unwrap();
        assert_eq!(base.runtime_version(), "2.0.2");
    }
}
