//! デプロイ前の検証

use airship_build::BaseImage;
use airship_houston::DeploymentConfig;

/// ベースイメージとして許可するリポジトリの接頭辞
pub const VALID_IMAGE_REPO_PREFIXES: [&str; 2] = ["quay.io/astronomer/", "astronomerinc/"];

/// 許可されたレジストリのイメージか判定
pub fn valid_image_repo(repository: &str) -> bool {
    VALID_IMAGE_REPO_PREFIXES
        .iter()
        .any(|prefix| repository.starts_with(prefix))
}

/// ベースイメージのバージョンがデプロイメントで利用可能か判定
pub fn is_allowed_runtime_version(base: &BaseImage, config: &DeploymentConfig) -> bool {
    config.allows(base.runtime_version())
}
