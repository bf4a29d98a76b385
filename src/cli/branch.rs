//
//  stash-client
//  cli/branch.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branch commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use super::RepoSpec;
use crate::api::server::Branch;
use crate::api::Stash;
use crate::output::{OutputWriter, TableRow};

/// Manage branches
#[derive(Args, Debug)]
pub struct BranchCommand {
    #[command(subcommand)]
    pub command: BranchSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BranchSubcommand {
    /// List branches
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Delete a branch
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Branch name, without refs/heads/
    pub branch: String,
}

impl TableRow for Branch {
    const HEADERS: &'static [&'static str] = &["BRANCH", "LATEST COMMIT", "DEFAULT"];

    fn row(&self, color: bool) -> Vec<String> {
        let default = match (self.is_default, color) {
            (true, true) => style("*").green().to_string(),
            (true, false) => "*".to_string(),
            (false, _) => String::new(),
        };
        vec![self.display_id.clone(), self.latest_changeset.clone(), default]
    }
}

impl BranchCommand {
    pub async fn run(&self, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        match &self.command {
            BranchSubcommand::List(args) => {
                let mut branches: Vec<Branch> = stash
                    .get_branches(&args.repo.project, &args.repo.slug)
                    .await?
                    .into_values()
                    .collect();
                branches.sort_by(|a, b| b.is_default.cmp(&a.is_default).then_with(|| a.display_id.cmp(&b.display_id)));
                output.write_list(&branches, &format!("No branches in {}", args.repo))
            }
            BranchSubcommand::Delete(args) => {
                let branch = args.branch.trim_start_matches("refs/heads/");
                stash
                    .delete_branch(&args.repo.project, &args.repo.slug, branch)
                    .await?;
                output.write_success(&format!("Deleted branch {} in {}", branch, args.repo))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{run, FakeStash};
    use super::*;

    #[tokio::test]
    async fn test_delete_strips_ref_prefix() {
        let stash = FakeStash::default();
        run(&stash, &["stash", "branch", "delete", "PROJ/trunk", "refs/heads/feature/x"])
            .await
            .unwrap();
        assert_eq!(stash.calls(), ["delete_branch PROJ/trunk feature/x"]);
    }

    #[tokio::test]
    async fn test_list() {
        let stash = FakeStash::default();
        run(&stash, &["stash", "branch", "ls", "PROJ/trunk"]).await.unwrap();
        assert_eq!(stash.calls(), ["get_branches PROJ/trunk"]);
    }

    #[test]
    fn test_default_branch_marker() {
        let branch = Branch {
            display_id: "master".to_string(),
            is_default: true,
            ..Default::default()
        };
        assert_eq!(branch.row(false), ["master", "", "*"]);
    }
}
