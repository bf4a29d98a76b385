//
//  stash-client
//  cli/commit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commit commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::RepoSpec;
use crate::api::server::Commit;
use crate::api::Stash;
use crate::output::{print_field, print_header, OutputWriter, TableOutput, TableRow};
use crate::util::{format_millis, truncate};

/// Inspect commits
#[derive(Args, Debug)]
pub struct CommitCommand {
    #[command(subcommand)]
    pub command: CommitSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CommitSubcommand {
    /// View a commit
    View(ViewArgs),

    /// List the commits between two revisions
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Commit hash
    pub hash: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Exclude commits reachable from this revision
    #[arg(long)]
    pub since: String,

    /// Include commits reachable from this revision
    #[arg(long)]
    pub until: String,
}

impl TableRow for Commit {
    const HEADERS: &'static [&'static str] = &["COMMIT", "AUTHOR", "DATE", "JIRA", "MESSAGE"];

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.display_id.clone(),
            self.author.name.clone(),
            format_millis(self.author_timestamp),
            self.jira_keys().join(", "),
            truncate(self.summary(), 60),
        ]
    }
}

impl TableOutput for Commit {
    fn print_table(&self, color: bool) {
        print_header(&format!("commit {}", self.id));
        println!();

        let author = match &self.author.display_name {
            Some(display) => format!("{} <{}>", display, self.author.email_address),
            None => format!("{} <{}>", self.author.name, self.author.email_address),
        };
        print_field("Author", &author, color);
        print_field("Date", &format_millis(self.author_timestamp), color);
        if !self.parents.is_empty() {
            let parents: Vec<&str> = self.parents.iter().map(|p| p.display_id.as_str()).collect();
            print_field("Parents", &parents.join(" "), color);
        }
        if !self.jira_keys().is_empty() {
            print_field("JIRA", &self.jira_keys().join(", "), color);
        }

        println!();
        println!("{}", self.message);
    }
}

impl CommitCommand {
    pub async fn run(&self, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        match &self.command {
            CommitSubcommand::View(args) => {
                let commit = stash
                    .get_commit(&args.repo.project, &args.repo.slug, &args.hash)
                    .await?;
                output.write(&commit)
            }
            CommitSubcommand::List(args) => {
                let commits = stash
                    .get_commits(&args.repo.project, &args.repo.slug, &args.since, &args.until)
                    .await?;
                output.write_list(&commits, &format!("No commits in {}..{}", args.since, args.until))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{run, FakeStash};
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_list_passes_range() {
        let stash = FakeStash::default();
        run(
            &stash,
            &["stash", "commit", "list", "PROJ/trunk", "--since", "abc", "--until", "def"],
        )
        .await
        .unwrap();
        assert_eq!(stash.calls(), ["get_commits PROJ/trunk abc..def"]);
    }

    #[tokio::test]
    async fn test_view_not_found() {
        let stash = FakeStash::default();
        let err = run(&stash, &["stash", "commit", "view", "PROJ/trunk", "abc"])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_row() {
        let commit = Commit {
            display_id: "6782bf9".to_string(),
            message: "Updating develop poms\n\nDetails".to_string(),
            attributes: HashMap::from([("jira-key".to_string(), serde_json::json!(["PROJ-1", "PROJ-2"]))]),
            ..Default::default()
        };
        let row = commit.row(false);
        assert_eq!(row[0], "6782bf9");
        assert_eq!(row[3], "PROJ-1, PROJ-2");
        assert_eq!(row[4], "Updating develop poms");
    }
}
