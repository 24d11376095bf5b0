use crate::error::{BuildError, BuildResult};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::path::Path;
use tar::Builder;

const DOCKERIGNORE: &str = ".dockerignore";

pub struct ContextBuilder;

impl ContextBuilder {
    /// ビルドコンテキストと Dockerfile が存在するか確認
    pub fn check(context_path: &Path) -> BuildResult<()> {
        if !context_path.exists() {
            return Err(BuildError::ContextNotFound(context_path.to_path_buf()));
        }

        if !context_path.is_dir() {
            return Err(BuildError::InvalidConfig(format!(
                "Build context is not a directory: {}",
                context_path.display()
            )));
        }

        let dockerfile = context_path.join("Dockerfile");
        if !dockerfile.is_file() {
            return Err(BuildError::DockerfileNotFound(dockerfile));
        }

        Ok(())
    }

    /// ビルドコンテキストをtar.gzアーカイブとして作成
    ///
    /// `.dockerignore` に書かれたトップレベルのエントリは除外する
    pub fn create_context(context_path: &Path) -> BuildResult<Vec<u8>> {
        tracing::debug!("Creating build context from: {}", context_path.display());

        let ignored = Self::read_ignore_list(context_path)?;

        let mut archive_data = Vec::new();
        {
            let encoder = GzEncoder::new(&mut archive_data, Compression::default());
            let mut tar = Builder::new(encoder);

            for entry in std::fs::read_dir(context_path)? {
                let entry = entry?;
                let name = entry.file_name();
                let name_str = name.to_string_lossy();
                if ignored.iter().any(|i| i == name_str.as_ref()) {
                    tracing::debug!("Skipping ignored entry: {}", name_str);
                    continue;
                }

                let path = entry.path();
                if path.is_dir() {
                    tar.append_dir_all(&name, &path).map_err(BuildError::Io)?;
                } else {
                    tar.append_path_with_name(&path, &name)
                        .map_err(BuildError::Io)?;
                }
            }

            tar.into_inner()
                .and_then(|encoder| encoder.finish())
                .map_err(BuildError::Io)?;
        }

        tracing::debug!("Build context created: {} bytes", archive_data.len());

        Self::check_context_size(archive_data.len());

        Ok(archive_data)
    }

    /// `.dockerignore` からトップレベルの除外エントリを読み込む
    fn read_ignore_list(context_path: &Path) -> BuildResult<Vec<String>> {
        let path = context_path.join(DOCKERIGNORE);
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(content
            .lines()
            .map(|l| l.trim().trim_start_matches("./").trim_end_matches('/'))
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    /// コンテキストサイズのチェックと警告
    fn check_context_size(size: usize) {
        const MAX_CONTEXT_SIZE: usize = 500 * 1024 * 1024; // 500MB

        if size > MAX_CONTEXT_SIZE {
            tracing::warn!(
                "警告: ビルドコンテキストが大きすぎます（{}MB）\n\
                 .dockerignoreファイルで不要なファイルを除外することを推奨します。",
                size / 1024 / 1024
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn unpack(archive: Vec<u8>) -> tempfile::TempDir {
        let extract_dir = tempdir().unwrap();
        let decoder = flate2::read::GzDecoder::new(std::io::Cursor::new(archive));
        let mut tar = tar::Archive::new(decoder);
        tar.unpack(extract_dir.path()).unwrap();
        extract_dir
    }

    #[test]
    fn test_create_context() {
        let temp_dir = tempdir().unwrap();

        fs::write(temp_dir.path().join("Dockerfile"), "FROM alpine").unwrap();
        fs::write(temp_dir.path().join("requirements.txt"), "pandas").unwrap();
        let dags = temp_dir.path().join("dags");
        fs::create_dir(&dags).unwrap();
        fs::write(dags.join("example_dag.py"), "# dag").unwrap();

        let archive = ContextBuilder::create_context(temp_dir.path()).unwrap();
        assert!(!archive.is_empty());

        let extracted = unpack(archive);
        assert!(extracted.path().join("Dockerfile").exists());
        assert!(extracted.path().join("requirements.txt").exists());
        assert!(extracted.path().join("dags/example_dag.py").exists());
    }

    #[test]
    fn test_create_context_respects_dockerignore() {
        let temp_dir = tempdir().unwrap();

        fs::write(temp_dir.path().join("Dockerfile"), "FROM alpine").unwrap();
        fs::write(temp_dir.path().join(".dockerignore"), "# local\n.airship/\nlogs\n").unwrap();
        fs::create_dir(temp_dir.path().join(".airship")).unwrap();
        fs::write(temp_dir.path().join(".airship/config.yaml"), "").unwrap();
        fs::create_dir(temp_dir.path().join("logs")).unwrap();
        fs::write(temp_dir.path().join("logs/scheduler.log"), "x").unwrap();

        let extracted = unpack(ContextBuilder::create_context(temp_dir.path()).unwrap());
        assert!(extracted.path().join("Dockerfile").exists());
        assert!(!extracted.path().join(".airship").exists());
        assert!(!extracted.path().join("logs").exists());
    }

    #[test]
    fn test_check() {
        let temp_dir = tempdir().unwrap();

        let missing = temp_dir.path().join("missing");
        assert!(matches!(
            ContextBuilder::check(&missing),
            Err(BuildError::ContextNotFound(_))
        ));

        assert!(matches!(
            ContextBuilder::check(temp_dir.path()),
            Err(BuildError::DockerfileNotFound(_))
        ));

        fs::write(temp_dir.path().join("Dockerfile"), "FROM alpine").unwrap();
        assert!(ContextBuilder::check(temp_dir.path()).is_ok());
    }
}
