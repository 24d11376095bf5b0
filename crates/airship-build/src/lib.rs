//! Airship image build and push
//!
//! Airflow プロジェクトのイメージをビルドし、デプロイ先のレジストリへ
//! プッシュするための機能を提供します。
//!
//! - [`ImageHandler`] / [`ImageHandlerFactory`]: デプロイ処理が使う抽象
//! - [`DockerImageHandler`]: Docker Engine (bollard) による実装
//! - [`dockerfile`]: ベースイメージの解析

pub mod auth;
pub mod builder;
pub mod context;
pub mod docker;
pub mod dockerfile;
pub mod error;
pub mod handler;
pub mod progress;
pub mod pusher;

pub use auth::RegistryAuth;
pub use builder::ImageBuilder;
pub use context::ContextBuilder;
pub use docker::{DockerHandlerFactory, DockerImageHandler};
pub use dockerfile::{BaseImage, parse_base_image, read_base_image};
pub use error::{BuildError, BuildResult};
pub use handler::{ImageBuildConfig, ImageHandler, ImageHandlerFactory};
pub use progress::BuildProgress;
pub use pusher::{ImagePusher, split_image_tag};
