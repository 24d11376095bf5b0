use crate::error::DeployError;
use crate::lookup::{deployment_name_exists, select_deployment};
use crate::pipeline::DeployPipeline;
use crate::ui_link::get_airflow_ui_link;
use crate::utils;
use airship_build::DockerHandlerFactory;
use airship_config::{Config, Project};
use airship_houston::{DeploymentClient, HoustonClient};
use colored::Colorize;
use std::path::Path;

pub struct DeployArgs {
    pub release_name: Option<String>,
    pub workspace: Option<String>,
    pub description: String,
    pub no_cache: bool,
}

pub async fn handle(config: &Config, project_root: &Path, args: DeployArgs) -> anyhow::Result<()> {
    let project = Project::load(project_root)?;

    println!("{}", "デプロイを開始します...".blue().bold());
    println!("プロジェクト: {}", project.name.cyan());

    let context = config.current_context()?;
    let workspace = utils::determine_workspace(args.workspace, context.workspace.as_deref())?;
    let client = HoustonClient::from_context(&context, config.client_settings())?;
    tracing::debug!("houston endpoint: {}", client.url());

    let deployments = client
        .list_deployments(&workspace)
        .await
        .map_err(|e| anyhow::anyhow!(DeployError::Lookup(e).user_message()))?;

    if let Some(name) = args.release_name.as_deref()
        && !deployment_name_exists(name, &deployments)
    {
        utils::print_deployments(&deployments);
        println!();
        return Err(anyhow::anyhow!(
            DeployError::DeploymentNotFound(name.to_string()).user_message()
        ));
    }

    let deployment = match select_deployment(args.release_name.as_deref(), &deployments) {
        Ok(d) => d,
        Err(e) => {
            if matches!(e, DeployError::DeploymentNotSelected(_)) {
                utils::print_deployments(&deployments);
                println!();
            }
            return Err(anyhow::anyhow!(e.user_message()));
        }
    };
    println!("デプロイメント: {}", deployment.release_name.cyan());
    println!();

    let factory = DockerHandlerFactory;
    let pipeline = DeployPipeline::new(&client, &factory)
        .show_warnings(config.show_warnings)
        .no_cache(args.no_cache);

    let remote_image = pipeline
        .build_push_docker_image(
            &context,
            &project.name,
            &project.root,
            deployment,
            &args.description,
        )
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!();
    println!("{}", "✓ デプロイが完了しました".green().bold());
    println!("  イメージ: {}", remote_image.cyan());

    let link = get_airflow_ui_link(&deployment.id, &client).await;
    if !link.is_empty() {
        println!("  Airflow UI: {}", link.cyan().underline());
    }

    Ok(())
}
