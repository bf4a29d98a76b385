//
//  stash-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod branch;
mod commit;
mod completion;
mod config;
mod file;
mod pr;
mod repo;
mod restriction;
mod tag;

pub use branch::BranchCommand;
pub use commit::CommitCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use file::FileCommand;
pub use pr::PrCommand;
pub use repo::RepoCommand;
pub use restriction::RestrictionCommand;
pub use tag::TagCommand;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::{Stash, StashClient};
use crate::config::{Config, ServerConfig};
use crate::output::OutputWriter;

/// stash - Work with Atlassian Stash from the command line
#[derive(Parser, Debug)]
#[command(
    name = "stash",
    version,
    about = "Work with Atlassian Stash (Bitbucket Server) from the command line",
    long_about = "stash is a CLI for the Stash REST API.\n\n\
                  It brings repositories, branches, pull requests and branch permissions to your terminal.",
    after_help = "Use 'stash <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Base URL of the Stash server, e.g. https://stash.example.com/stash
    #[arg(long, global = true, env = "STASH_URL")]
    pub url: Option<String>,

    /// Username for HTTP Basic authentication
    #[arg(long, short = 'u', global = true, env = "STASH_USERNAME")]
    pub username: Option<String>,

    /// Password for HTTP Basic authentication
    #[arg(long, global = true, env = "STASH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this configuration file instead of the default location
    #[arg(long = "config", global = true, env = "STASH_CONFIG", value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Server settings given on the command line or in the environment.
    pub fn overrides(&self) -> ServerConfig {
        ServerConfig {
            url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Path of the configuration file in use.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config_file {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    /// Builds a client from the config file and these overrides.
    pub fn client(&self) -> Result<StashClient> {
        let config = Config::load_from(&self.config_path()?)?;
        let client = config
            .client_builder(&self.overrides())?
            .build()
            .context("Failed to create Stash client")?;
        Ok(client)
    }

    pub fn output(&self) -> OutputWriter {
        OutputWriter::from_flag(self.json)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Manage branches
    Branch(BranchCommand),

    /// List tags
    Tag(TagCommand),

    /// Manage pull requests
    Pr(PrCommand),

    /// Inspect commits
    Commit(CommitCommand),

    /// Manage branch restrictions
    Restriction(RestrictionCommand),

    /// Print the raw content of a file
    File(FileCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

impl Commands {
    /// Returns `true` for commands that talk to a Stash server.
    pub fn needs_server(&self) -> bool {
        !matches!(self, Commands::Config(_) | Commands::Completion(_) | Commands::Version)
    }

    /// Runs a server command against `stash`.
    ///
    /// Local commands (`config`, `completion`, `version`) are dispatched by the
    /// binary and are a no-op here.
    pub async fn run(&self, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        match self {
            Commands::Repo(cmd) => cmd.run(stash, output).await,
            Commands::Branch(cmd) => cmd.run(stash, output).await,
            Commands::Tag(cmd) => cmd.run(stash, output).await,
            Commands::Pr(cmd) => cmd.run(stash, output).await,
            Commands::Commit(cmd) => cmd.run(stash, output).await,
            Commands::Restriction(cmd) => cmd.run(stash, output).await,
            Commands::File(cmd) => cmd.run(stash).await,
            Commands::Config(_) | Commands::Completion(_) | Commands::Version => Ok(()),
        }
    }
}

/// A repository given as `PROJECT/SLUG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub project: String,
    pub slug: String,
}

impl FromStr for RepoSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((project, slug)) if !project.is_empty() && !slug.is_empty() && !slug.contains('/') => {
                Ok(Self {
                    project: project.to_string(),
                    slug: slug.to_string(),
                })
            }
            _ => Err(format!("expected PROJECT/SLUG, got '{}'", s)),
        }
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.slug)
    }
}
