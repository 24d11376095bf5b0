mod commands;
mod error;
mod lookup;
mod pipeline;
#[cfg(test)]
mod testing;
mod ui_link;
mod utils;
mod validate;

use airship_config::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "airship")]
#[command(about = "Airflowプロジェクトをビルドしてデプロイする", long_about = None)]
struct Cli {
    /// ログレベル (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "AIRSHIP_VERBOSITY")]
    verbosity: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// イメージをビルドしてデプロイメントへプッシュ
    Deploy {
        /// デプロイ先のリリース名
        release_name: Option<String>,
        /// ワークスペースID
        #[arg(short, long, env = "AIRSHIP_WORKSPACE")]
        workspace: Option<String>,
        /// デプロイの説明（イメージラベルとして記録）
        #[arg(short, long, default_value = "")]
        description: String,
        /// キャッシュを使用せずにビルド
        #[arg(long)]
        no_cache: bool,
    },
    /// デプロイメントの操作
    #[command(subcommand)]
    Deployment(DeploymentCommands),
    /// バージョン情報を表示
    Version,
}

#[derive(Subcommand)]
enum DeploymentCommands {
    /// ワークスペースのデプロイメント一覧
    List {
        /// ワークスペースID
        #[arg(short, long, env = "AIRSHIP_WORKSPACE")]
        workspace: Option<String>,
    },
}

/// ログ出力を初期化（stderr）
///
/// RUST_LOG が設定されていればそれを使い、なければ --verbosity / 設定ファイルの値を使う
fn init_logging(verbosity: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(verbosity))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// グローバル設定を読み込み、ログ出力を初期化する
fn load_config(verbosity: Option<&str>) -> anyhow::Result<Config> {
    let config = Config::load()?;
    init_logging(verbosity.unwrap_or(&config.verbosity));
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let verbosity = cli.verbosity.as_deref();

    match cli.command {
        // Versionコマンドは設定ファイル不要
        Commands::Version => {
            init_logging(verbosity.unwrap_or("warn"));
            println!("airship {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Deploy {
            release_name,
            workspace,
            description,
            no_cache,
        } => {
            let config = load_config(verbosity)?;
            let project_root = std::env::current_dir()?;
            commands::deploy::handle(
                &config,
                &project_root,
                commands::deploy::DeployArgs {
                    release_name,
                    workspace,
                    description,
                    no_cache,
                },
            )
            .await?;
        }
        Commands::Deployment(DeploymentCommands::List { workspace }) => {
            let config = load_config(verbosity)?;
            commands::deployment::handle_list(&config, workspace).await?;
        }
    }

    Ok(())
}
