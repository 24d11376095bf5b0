use crate::utils;
use airship_config::Config;
use airship_houston::{DeploymentClient, HoustonClient};
use colored::Colorize;

pub async fn handle_list(config: &Config, workspace: Option<String>) -> anyhow::Result<()> {
    let context = config.current_context()?;
    let workspace = utils::determine_workspace(workspace, context.workspace.as_deref())?;
    let client = HoustonClient::from_context(&context, config.client_settings())?;
    tracing::debug!("houston endpoint: {}", client.url());

    println!("ワークスペース: {}", workspace.cyan());
    println!();

    let deployments = client.list_deployments(&workspace).await?;
    utils::print_deployments(&deployments);

    Ok(())
}
