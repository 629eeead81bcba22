//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Staged structural search over directory trees
#[derive(Parser, Debug)]
#[command(name = "sitenav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Project directory for local config (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cascading search: every stage searches below the previous stage's matches
    ///
    /// Stage syntax: `*` or comma-separated `kind=file|dir|symlink`, `name=<regex>`,
    /// `ext=<extension>`, `hidden=true|false`.
    Extract {
        /// Search root
        #[arg(value_hint = ValueHint::DirPath)]
        root: PathBuf,
        /// Stages, applied in order
        stages: Vec<String>,
        /// Run stages on all cores
        #[arg(short, long)]
        parallel: bool,
        /// Include hidden entries
        #[arg(short = 'a', long)]
        all: bool,
    },

    /// Shallowest matches on every branch (single stage)
    Match {
        #[arg(value_hint = ValueHint::DirPath)]
        root: PathBuf,
        stage: String,
        #[arg(short = 'a', long)]
        all: bool,
    },

    /// First match in depth-first order
    First {
        #[arg(value_hint = ValueHint::DirPath)]
        root: PathBuf,
        stage: String,
        #[arg(short = 'a', long)]
        all: bool,
    },

    /// Immediate children matching a stage (default: all)
    Children {
        #[arg(value_hint = ValueHint::DirPath)]
        root: PathBuf,
        stage: Option<String>,
        #[arg(short = 'a', long)]
        all: bool,
    },

    /// Show the tree below a root
    Tree {
        #[arg(value_hint = ValueHint::DirPath)]
        root: PathBuf,
        #[arg(short = 'a', long)]
        all: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print config file locations
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_extract_collects_stages_in_order() {
        let cli = Cli::try_parse_from(["sitenav", "-dd", "extract", "/tmp", "kind=dir", "ext=rs"]).unwrap();
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Extract { stages, parallel, .. }) => {
                assert_eq!(stages, vec!["kind=dir", "ext=rs"]);
                assert!(!parallel);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
