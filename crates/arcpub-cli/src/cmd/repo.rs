use crate::output;
use anyhow::Context;
use arcpub_core::config::Config;
use arcpub_core::gitlab::GitLabClient;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum RepoSubcommand {
    /// List repositories owned by the configured token
    List,
    /// Delete a repository by its numeric id
    Delete {
        id: u64,
    },
}

pub fn run(config_path: &Path, subcommand: RepoSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let client = GitLabClient::from_config(&config.gitlab);

    match subcommand {
        RepoSubcommand::List => {
            let projects = client.list_projects()?;
            if json {
                output::print_json(&projects)?;
            } else {
                let rows = projects
                    .iter()
                    .map(|p| {
                        vec![
                            p.id.to_string(),
                            p.path_with_namespace.clone(),
                            p.web_url.clone(),
                        ]
                    })
                    .collect();
                output::print_table(&["ID", "PATH", "URL"], rows);
            }
        }
        RepoSubcommand::Delete { id } => {
            client.delete_project(id)?;
            println!("deleted repository {id}");
        }
    }
    Ok(())
}
