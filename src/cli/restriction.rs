//
//  stash-client
//  cli/restriction.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branch restriction commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::RepoSpec;
use crate::api::server::BranchRestriction;
use crate::api::Stash;
use crate::output::{print_field, OutputFormat, OutputWriter, TableOutput, TableRow};

/// Manage branch restrictions
#[derive(Args, Debug)]
pub struct RestrictionCommand {
    #[command(subcommand)]
    pub command: RestrictionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RestrictionSubcommand {
    /// List branch restrictions
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Restrict pushes to a branch to a single user
    Create(CreateArgs),

    /// Remove a branch restriction
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Branch to restrict
    pub branch: String,

    /// User allowed to push
    pub user: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Restriction id, as shown by `restriction list`
    pub id: u64,
}

impl TableRow for BranchRestriction {
    const HEADERS: &'static [&'static str] = &["ID", "TYPE", "BRANCH", "USERS", "GROUPS"];

    fn row(&self, _color: bool) -> Vec<String> {
        let users: Vec<&str> = self.users.iter().map(|u| u.name.as_str()).collect();
        vec![
            self.id.to_string(),
            self.restriction_type.clone(),
            self.value.clone(),
            users.join(", "),
            self.groups.join(", "),
        ]
    }
}

impl TableOutput for BranchRestriction {
    fn print_table(&self, color: bool) {
        print_field("Restriction", &self.id.to_string(), color);
        print_field("Branch", &self.value, color);
    }
}

impl RestrictionCommand {
    pub async fn run(&self, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        match &self.command {
            RestrictionSubcommand::List(args) => {
                let restrictions = stash
                    .get_branch_restrictions(&args.repo.project, &args.repo.slug)
                    .await?;
                output.write_list(&restrictions, &format!("No branch restrictions in {}", args.repo))
            }
            RestrictionSubcommand::Create(args) => {
                let restriction = stash
                    .create_branch_restriction(&args.repo.project, &args.repo.slug, &args.branch, &args.user)
                    .await?;
                if output.format() == OutputFormat::Json {
                    return output.write(&restriction);
                }
                output.write_success(&format!(
                    "Restricted {} to {} (restriction {})",
                    args.branch, args.user, restriction.id
                ))
            }
            RestrictionSubcommand::Delete(args) => {
                stash
                    .delete_branch_restriction(&args.repo.project, &args.repo.slug, args.id)
                    .await?;
                output.write_success(&format!("Deleted branch restriction {}", args.id))
            }
        }
    }
}
