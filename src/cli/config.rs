//
//  stash-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! This module provides commands for managing the configuration file:
//! showing where it lives, printing it with the password hidden, writing the
//! server settings given on the command line, and getting or setting single
//! keys.

use std::path::Path;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, VALID_KEYS};
use crate::output::write_json;

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show configuration file path
    Path,

    /// Print the configuration, with the password hidden
    Show,

    /// Write the server settings from --url, --username and --password
    Init(InitArgs),

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Replace server settings already in the file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key, e.g. server.url
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key, e.g. retry.max_attempts
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;

        match &self.command {
            ConfigSubcommand::Path => self.path(&path, global),
            ConfigSubcommand::Show => self.show(&path, global),
            ConfigSubcommand::Init(args) => self.init(args, &path, global),
            ConfigSubcommand::Get(args) => self.get(args, &path, global),
            ConfigSubcommand::Set(args) => self.set(args, &path, global),
        }
    }

    fn path(&self, path: &Path, global: &GlobalOptions) -> Result<()> {
        if global.json {
            write_json(&serde_json::json!({ "path": path }))
        } else {
            println!("{}", path.display());
            Ok(())
        }
    }

    fn show(&self, path: &Path, global: &GlobalOptions) -> Result<()> {
        let config = Config::load_from(path)?.redacted();
        if global.json {
            write_json(&config)
        } else {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }

    /// Write server settings
    fn init(&self, args: &InitArgs, path: &Path, global: &GlobalOptions) -> Result<()> {
        let overrides = global.overrides();
        let Some(url) = overrides.url.as_deref() else {
            bail!("--url (or STASH_URL) is required for 'config init'");
        };
        url::Url::parse(url).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", url, e))?;

        let mut config = Config::load_from(path)?;
        if config.server.url.is_some() && !args.force {
            bail!(
                "{} already has a server configured. Use --force to replace it.",
                path.display()
            );
        }

        config.server = config.server.merged(&overrides);
        config.save_to(path)?;

        if global.json {
            write_json(&serde_json::json!({ "success": true, "path": path }))
        } else {
            println!("{} Wrote {}", style("✓").green().bold(), path.display());
            Ok(())
        }
    }

    /// Get a configuration value
    fn get(&self, args: &GetArgs, path: &Path, global: &GlobalOptions) -> Result<()> {
        if !VALID_KEYS.contains(&args.key.as_str()) {
            bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                args.key,
                VALID_KEYS.join(", ")
            );
        }

        let value = Config::load_from(path)?.get(&args.key);
        if global.json {
            write_json(&serde_json::json!({ "key": args.key, "value": value }))
        } else {
            if let Some(v) = value {
                println!("{}", v);
            }
            Ok(())
        }
    }

    /// Set a configuration value
    fn set(&self, args: &SetArgs, path: &Path, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load_from(path)?;
        config.set(&args.key, &args.value)?;
        config.save_to(path)?;

        if global.json {
            write_json(&serde_json::json!({ "success": true, "key": args.key }))
        } else {
            println!("{} Set {}", style("✓").green().bold(), args.key);
            Ok(())
        }
    }
}
