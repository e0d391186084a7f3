use clap::ValueEnum;
use repo_viewer::Repository;
use serde::Serialize;

/// Output format for repository listings.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display as JSON
    Json,
}

/// One repository row as shown in list views.
#[derive(Debug, Clone, Serialize, tabled::Tabled)]
pub(crate) struct RepositoryRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Repository")]
    pub full_name: String,
    #[tabled(rename = "Language")]
    pub language: String,
    #[tabled(rename = "Stars")]
    pub stars: i64,
    #[tabled(rename = "Forks")]
    pub forks: i64,
    #[tabled(rename = "Description")]
    pub description: String,
}

const DESCRIPTION_WIDTH: usize = 60;

impl From<&Repository> for RepositoryRow {
    fn from(repository: &Repository) -> Self {
        Self {
            id: repository.id.unwrap_or_default(),
            full_name: repository.full_name_or_default(),
            language: repository.language.clone().unwrap_or_else(|| "-".into()),
            stars: repository.stargazers_count.unwrap_or_default(),
            forks: repository.forks_count.unwrap_or_default(),
            description: truncate(
                repository.description.as_deref().unwrap_or(""),
                DESCRIPTION_WIDTH,
            ),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Print repositories as a table or JSON array.
pub(crate) fn print_repositories(
    repositories: &[Repository],
    format: OutputFormat,
) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<RepositoryRow> = repositories.iter().map(RepositoryRow::from).collect();
            let mut table = tabled::Table::new(rows);
            table.with(tabled::settings::Style::rounded());
            println!("{}", table);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(repositories)?);
        }
    }
    Ok(())
}
