use console::style;
use repo_viewer::github::Owner;
use repo_viewer::{DetailSnapshot, Repository, RepositoryDetail};

use crate::commands::shared::{github_client, network_failure, open_favorites};
use crate::config::Config;

pub(crate) async fn handle_show(
    owner: String,
    name: String,
    readme: bool,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let seed = Repository {
        name: Some(name),
        owner: Some(Owner {
            login: Some(owner),
            ..Owner::default()
        }),
        ..Repository::default()
    };
    let detail = RepositoryDetail::new(
        seed,
        github_client(config)?,
        open_favorites(database_url).await?,
    );

    if detail.refresh().await.is_err() {
        return Err(network_failure(detail.snapshot().error.as_ref()));
    }
    detail.refresh_favorite().await?;
    print_summary(&detail.snapshot());

    if readme {
        match detail.load_readme().await {
            Ok(text) => println!("\n{text}"),
            Err(err) => eprintln!(
                "{} README unavailable: {}",
                style("warning:").yellow().bold(),
                err.user_message()
            ),
        }
    }
    Ok(())
}

fn print_summary(snapshot: &DetailSnapshot) {
    let repo = &snapshot.repository;
    let star = if snapshot.is_favorite { " ★" } else { "" };
    println!(
        "{}{}",
        style(repo.full_name_or_default()).bold(),
        style(star).yellow()
    );
    if let Some(description) = &repo.description {
        println!("{description}");
    }
    println!();

    let fields = [
        ("ID", repo.id.map(|id| id.to_string())),
        ("Language", repo.language.clone()),
        ("Stars", repo.stargazers_count.map(|n| n.to_string())),
        ("Forks", repo.forks_count.map(|n| n.to_string())),
        ("Open issues", repo.open_issues_count.map(|n| n.to_string())),
        ("Default branch", repo.default_branch.clone()),
        (
            "License",
            repo.license.as_ref().and_then(|l| l.spdx_id.clone()),
        ),
        ("Topics", repo.topics.as_ref().map(|t| t.join(", "))),
        ("Updated", repo.updated_at.map(|t| t.to_rfc3339())),
        ("URL", repo.html_url.clone()),
    ];
    for (label, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            println!("  {:<15} {}", style(label).dim(), value);
        }
    }
}
