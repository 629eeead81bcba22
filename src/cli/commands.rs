//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::NavigatorService;
use crate::application::{parse_stage, ApplicationError, FsEntry, TreeDisplay};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

/// Run the parsed command line, returning the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| {
            CliError::from(ApplicationError::OperationFailed {
                context: "determine current directory".to_string(),
                source: Box::new(e),
            })
        })?,
    };

    match &cli.command {
        Some(Commands::Extract {
            root,
            stages,
            parallel,
            all,
        }) => {
            let mut settings = load_settings(&project_dir, *all)?;
            settings.search.parallel |= *parallel;
            cmd_extract(&ServiceContainer::new(settings), &resolve(&project_dir, root), stages)
        }
        Some(Commands::Match { root, stage, all }) => {
            let container = ServiceContainer::new(load_settings(&project_dir, *all)?);
            cmd_match(&container, &resolve(&project_dir, root), stage)
        }
        Some(Commands::First { root, stage, all }) => {
            let container = ServiceContainer::new(load_settings(&project_dir, *all)?);
            cmd_first(&container, &resolve(&project_dir, root), stage)
        }
        Some(Commands::Children { root, stage, all }) => {
            let container = ServiceContainer::new(load_settings(&project_dir, *all)?);
            cmd_children(&container, &resolve(&project_dir, root), stage.as_deref())
        }
        Some(Commands::Tree { root, all }) => {
            let container = ServiceContainer::new(load_settings(&project_dir, *all)?);
            cmd_tree(&container, &resolve(&project_dir, root))
        }
        Some(Commands::Config { command }) => cmd_config(&project_dir, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn load_settings(project_dir: &Path, include_hidden: bool) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(project_dir))?;
    settings.search.include_hidden |= include_hidden;
    if !settings.display.color {
        colored::control::set_override(false);
    }
    Ok(settings)
}

fn resolve(project_dir: &Path, root: &Path) -> PathBuf {
    if root.is_absolute() || root.to_string_lossy().starts_with(['~', '$']) {
        root.to_path_buf()
    } else {
        project_dir.join(root)
    }
}

fn print_entries(navigator: &NavigatorService, root: &FsEntry, entries: &[FsEntry]) -> i32 {
    if entries.is_empty() {
        output::warning("no matches");
        return exitcode::NOMATCH;
    }
    for entry in entries {
        output::entry(&navigator.display_path(root, entry), entry.kind);
    }
    exitcode::OK
}

#[instrument(level = "debug", skip(container))]
fn cmd_extract(container: &ServiceContainer, root: &Path, stages: &[String]) -> CliResult<i32> {
    let criteria = stages
        .iter()
        .map(|s| parse_stage(s))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("stages: {}", stages.iter().join(" | "));

    let navigator = container.navigator();
    let root = navigator.resolve_root(root)?;
    let found = navigator.extract(&root, criteria)?;
    Ok(print_entries(&navigator, &root, &found))
}

#[instrument(level = "debug", skip(container))]
fn cmd_match(container: &ServiceContainer, root: &Path, stage: &str) -> CliResult<i32> {
    let criteria = parse_stage(stage)?;
    let navigator = container.navigator();
    let root = navigator.resolve_root(root)?;
    let found = navigator.matches(&root, &criteria)?;
    Ok(print_entries(&navigator, &root, &found))
}

#[instrument(level = "debug", skip(container))]
fn cmd_first(container: &ServiceContainer, root: &Path, stage: &str) -> CliResult<i32> {
    let criteria = parse_stage(stage)?;
    let navigator = container.navigator();
    let root = navigator.resolve_root(root)?;
    let found = navigator.first(&root, &criteria)?;
    Ok(print_entries(&navigator, &root, &found.into_iter().collect::<Vec<_>>()))
}

#[instrument(level = "debug", skip(container))]
fn cmd_children(container: &ServiceContainer, root: &Path, stage: Option<&str>) -> CliResult<i32> {
    let criteria = parse_stage(stage.unwrap_or("*"))?;
    let navigator = container.navigator();
    let root = navigator.resolve_root(root)?;
    let found = navigator.children(&root, &criteria)?;
    Ok(print_entries(&navigator, &root, &found))
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer, root: &Path) -> CliResult<i32> {
    let navigator = container.navigator();
    let tree = navigator.tree(&navigator.resolve_root(root)?)?;
    output::info(&tree.to_tree_string());
    output::detail(&format!("{} entries, depth {}", tree.len(), tree.depth()));
    Ok(exitcode::OK)
}

fn cmd_config(project_dir: &Path, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(p) => output::action("global", &p.display()),
                None => output::warning("no global config directory on this platform"),
            }
            output::action("local", &local_config_path(project_dir).display());
        }
    }
    Ok(exitcode::OK)
}
