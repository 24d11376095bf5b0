//! Houston deployment API for Airship
//!
//! デプロイ処理が必要とする Houston API の範囲だけを型付きで提供します。
//!
//! - [`DeploymentClient`]: デプロイメント一覧・設定・URL を取得する抽象
//! - [`HoustonClient`]: GraphQL over HTTP による実装
//!
//! # Example
//!
//! ```ignore
//! use airship_houston::{DeploymentClient, HoustonClient};
//!
//! let client = HoustonClient::from_context(&context, config.client_settings())?;
//! let deployments = client.list_deployments("ws-123").await?;
//! ```

pub mod client;
pub mod error;
pub mod houston;
pub mod types;

pub use client::DeploymentClient;
pub use error::{HoustonError, Result};
pub use houston::HoustonClient;
pub use types::{
    AIRFLOW_URL_TYPE, DeployInfo, Deployment, DeploymentConfig, DeploymentUrl, FLOWER_URL_TYPE,
    Response, ResponseData,
};
