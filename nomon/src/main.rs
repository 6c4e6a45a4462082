use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nomon::data;
use nomon::prefs::PreferencesStore;
use nomon_core::catalog::{Catalog, NodeId};
use nomon_core::picker::RowState;
use nomon_core::project::ProjectStore;
use nomon_core::selection::SelectionStatus;

#[derive(Parser)]
#[command(name = "nomon", about = "AEC project hub: projects, documents, standards library")]
struct Cli {
    /// Directory holding the preferences file
    #[arg(long, default_value = ".nomon")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List projects with their stage, team size and applied bundles
    Projects,
    /// Print the standards library tree with applied-bundle states
    Library {
        /// Project whose applied bundles mark the tree
        #[arg(long, default_value_t = 1)]
        project: u64,
    },
    /// Show stored user preferences
    Prefs,
    /// Pin or unpin a project
    TogglePin { project: u64 },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = ProjectStore::seed(data::sample_projects());

    match cli.command {
        Command::Projects => {
            let prefs = PreferencesStore::open(&cli.data_dir);
            for project in store.projects() {
                let pin = if prefs.is_project_pinned(project.id) { "*" } else { " " };
                println!(
                    "{pin} [{}] {} | {} | stage {} | {} collaborators | {} bundles",
                    project.id,
                    project.name,
                    project.location,
                    project.current_stage,
                    project.collaborators.len(),
                    project.applied_bundles.len(),
                );
            }
        }
        Command::Library { project } => {
            let Some(project) = store.get(project) else {
                bail!("no project with id {project}");
            };
            let library = data::library_catalog();
            let applied = project.applied_bundle_ids();
            println!("Library (bundles applied to {}):", project.name);
            print_tree(&library, &applied, None, 1)?;
        }
        Command::Prefs => {
            let prefs = PreferencesStore::open(&cli.data_dir);
            println!("{}", serde_json::to_string_pretty(prefs.preferences())?);
        }
        Command::TogglePin { project } => {
            if store.get(project).is_none() {
                bail!("no project with id {project}");
            }
            let mut prefs = PreferencesStore::open(&cli.data_dir);
            let pinned = prefs.toggle_pin_project(project)?;
            println!(
                "project {project} {}",
                if pinned { "pinned" } else { "unpinned" }
            );
        }
    }
    Ok(())
}

fn print_tree(
    library: &Catalog,
    applied: &HashSet<NodeId>,
    parent: Option<&NodeId>,
    depth: usize,
) -> Result<()> {
    let mut session = nomon_core::picker::PickerSession::new();
    session.open();
    if let Some(id) = parent {
        session.navigate(library, id)?;
    }
    let view = session.view(library, applied)?;
    for row in &view.rows {
        let indent = "  ".repeat(depth);
        match &row.state {
            RowState::Folder { status } => {
                let mark = match status {
                    SelectionStatus::Empty => "[ ]",
                    SelectionStatus::Partial => "[~]",
                    SelectionStatus::Full => "[x]",
                };
                println!("{indent}{mark} {}/", row.name);
                print_tree(library, applied, Some(&row.id), depth + 1)?;
            }
            RowState::Leaf { checked } => {
                let mark = if *checked { "[x]" } else { "[ ]" };
                println!("{indent}{mark} {}", row.name);
            }
        }
    }
    Ok(())
}
