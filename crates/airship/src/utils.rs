use airship_houston::Deployment;
use colored::Colorize;

/// ワークスペースIDを決定する
///
/// フラグ (または AIRSHIP_WORKSPACE) を優先し、なければコンテキストの既定値を使う
pub fn determine_workspace(
    flag: Option<String>,
    context_workspace: Option<&str>,
) -> anyhow::Result<String> {
    flag.filter(|w| !w.is_empty())
        .or_else(|| context_workspace.map(str::to_string))
        .filter(|w| !w.is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "ワークスペースを指定してください: --workspace <ID> または AIRSHIP_WORKSPACE=<ID>"
            )
        })
}

/// デプロイメント一覧を表形式で表示
pub fn print_deployments(deployments: &[Deployment]) {
    if deployments.is_empty() {
        println!("{}", "デプロイメントはありません".dimmed());
        return;
    }

    println!(
        "{}",
        format!(
            "{:<30} {:<28} {:<18} {:<10}",
            "RELEASE NAME", "DEPLOYMENT ID", "EXECUTOR", "AIRFLOW"
        )
        .bold()
    );
    println!("{}", "─".repeat(90).dimmed());

    for d in deployments {
        println!(
            "{:<30} {:<28} {:<18} {:<10}",
            d.release_name.cyan(),
            d.id,
            d.executor,
            d.airflow_version.dimmed()
        );
    }
}
