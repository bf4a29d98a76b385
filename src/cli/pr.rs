//
//  stash-client
//  cli/pr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request commands for the Stash CLI.
//!
//! Update and decline need the pull request's current version. When
//! `--version` is not given it is fetched first, which means a concurrent
//! change between the fetch and the write still fails with a conflict.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::RepoSpec;
use crate::api::server::{Comment, PullRequest};
use crate::api::Stash;
use crate::output::{format_status, print_field, print_header, OutputFormat, OutputWriter, TableOutput, TableRow};
use crate::util::{format_millis, format_relative_millis, truncate};

/// Manage pull requests
#[derive(Args, Debug)]
pub struct PrCommand {
    #[command(subcommand)]
    pub command: PrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrSubcommand {
    /// List pull requests
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a pull request
    View(ViewArgs),

    /// Create a pull request
    Create(CreateArgs),

    /// Update the title, description, target or reviewers of a pull request
    Update(UpdateArgs),

    /// Decline a pull request
    Decline(DeclineArgs),

    /// Comment on a pull request
    Comment(CommentArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Filter by state
    #[arg(long, short = 's', default_value = "OPEN", value_parser = ["OPEN", "MERGED", "DECLINED", "ALL"])]
    pub state: String,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Pull request id
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Title
    #[arg(long, short = 't')]
    pub title: String,

    /// Description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Source branch
    #[arg(long, short = 'f')]
    pub from: String,

    /// Target branch
    #[arg(long = "to", short = 'b')]
    pub to: String,

    /// Reviewer username (repeatable)
    #[arg(long = "reviewer", short = 'r')]
    pub reviewers: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Pull request id
    pub id: u64,

    /// Version being updated; fetched when omitted
    #[arg(long)]
    pub version: Option<u64>,

    /// New title; the current title is kept when omitted
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// New description; the current description is kept when omitted
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New target branch; the current target is kept when omitted
    #[arg(long = "to", short = 'b')]
    pub to: Option<String>,

    /// Reviewer username (repeatable); replaces the current reviewers
    #[arg(long = "reviewer", short = 'r')]
    pub reviewers: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DeclineArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Pull request id
    pub id: u64,

    /// Version being declined; fetched when omitted
    #[arg(long)]
    pub version: Option<u64>,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Pull request id
    pub id: u64,

    /// Comment text
    pub text: String,
}

impl TableRow for PullRequest {
    const HEADERS: &'static [&'static str] = &["ID", "TITLE", "AUTHOR", "BRANCHES", "STATE", "UPDATED"];

    fn row(&self, color: bool) -> Vec<String> {
        let author = self
            .author
            .as_ref()
            .map(|a| a.user.name.clone())
            .unwrap_or_default();
        vec![
            format!("#{}", self.id),
            truncate(&self.title, 50),
            author,
            format!("{} → {}", self.from_ref.display_id, self.to_ref.display_id),
            format_status(&self.state, color),
            format_relative_millis(self.updated_date),
        ]
    }
}

impl TableOutput for PullRequest {
    fn print_table(&self, color: bool) {
        print_header(&format!("#{} {}", self.id, self.title));
        println!();

        print_field("State", &format_status(&self.state, color), color);
        if let Some(author) = &self.author {
            print_field("Author", &author.user.display_name, color);
        }
        print_field(
            "Branches",
            &format!("{} → {}", self.from_ref.display_id, self.to_ref.display_id),
            color,
        );
        print_field("Version", &self.version.to_string(), color);
        print_field("Created", &format_millis(self.created_date), color);
        print_field("Updated", &format_millis(self.updated_date), color);

        if !self.reviewers.is_empty() {
            let reviewers: Vec<String> = self
                .reviewers
                .iter()
                .map(|r| {
                    if r.approved {
                        format!("{} (approved)", r.user.name)
                    } else {
                        r.user.name.clone()
                    }
                })
                .collect();
            print_field("Reviewers", &reviewers.join(", "), color);
        }

        if !self.description.is_empty() {
            println!();
            println!("{}", self.description);
        }
    }
}

impl TableOutput for Comment {
    fn print_table(&self, color: bool) {
        let author = self.author.as_ref().map(|a| a.name.as_str()).unwrap_or("");
        print_field("Comment", &format!("#{} by {}", self.id, author), color);
        println!("{}", self.text);
    }
}

impl PrCommand {
    pub async fn run(&self, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        match &self.command {
            PrSubcommand::List(args) => self.list(args, stash, output).await,
            PrSubcommand::View(args) => self.view(args, stash, output).await,
            PrSubcommand::Create(args) => self.create(args, stash, output).await,
            PrSubcommand::Update(args) => self.update(args, stash, output).await,
            PrSubcommand::Decline(args) => self.decline(args, stash, output).await,
            PrSubcommand::Comment(args) => self.comment(args, stash, output).await,
        }
    }

    /// List pull requests
    async fn list(&self, args: &ListArgs, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        let prs = stash
            .get_pull_requests(&args.repo.project, &args.repo.slug, &args.state)
            .await?;
        output.write_list(
            &prs,
            &format!("No {} pull requests in {}", args.state.to_lowercase(), args.repo),
        )
    }

    /// View a pull request
    async fn view(&self, args: &ViewArgs, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        let pr = stash
            .get_pull_request(&args.repo.project, &args.repo.slug, args.id)
            .await?;
        output.write(&pr)
    }

    /// Create a pull request
    async fn create(&self, args: &CreateArgs, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        let pr = stash
            .create_pull_request(
                &args.repo.project,
                &args.repo.slug,
                &args.title,
                &args.description,
                &args.from,
                &args.to,
                &args.reviewers,
            )
            .await?;

        if output.format() == OutputFormat::Json {
            return output.write(&pr);
        }
        output.write_success(&format!("Created pull request #{} in {}", pr.id, args.repo))
    }

    /// Update a pull request
    async fn update(&self, args: &UpdateArgs, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        let (project, slug) = (&args.repo.project, &args.repo.slug);

        let needs_current = args.version.is_none()
            || args.title.is_none()
            || args.description.is_none()
            || args.reviewers.is_empty();
        let current = if needs_current {
            Some(stash.get_pull_request(project, slug, args.id).await?)
        } else {
            None
        };

        let version = args
            .version
            .or_else(|| current.as_ref().map(|pr| pr.version))
            .unwrap_or_default();
        let title = args
            .title
            .clone()
            .or_else(|| current.as_ref().map(|pr| pr.title.clone()))
            .unwrap_or_default();
        let description = args
            .description
            .clone()
            .or_else(|| current.as_ref().map(|pr| pr.description.clone()))
            .unwrap_or_default();
        let reviewers = if args.reviewers.is_empty() {
            current
                .as_ref()
                .map(|pr| pr.reviewers.iter().map(|r| r.user.name.clone()).collect())
                .unwrap_or_default()
        } else {
            args.reviewers.clone()
        };
        let to = args.to.as_deref().unwrap_or("");

        let pr = stash
            .update_pull_request(project, slug, args.id, version, &title, &description, to, &reviewers)
            .await?;

        if output.format() == OutputFormat::Json {
            return output.write(&pr);
        }
        output.write_success(&format!("Updated pull request #{} (version {})", pr.id, pr.version))
    }

    /// Decline a pull request
    async fn decline(&self, args: &DeclineArgs, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        let (project, slug) = (&args.repo.project, &args.repo.slug);
        let version = match args.version {
            Some(version) => version,
            None => stash.get_pull_request(project, slug, args.id).await?.version,
        };

        stash.decline_pull_request(project, slug, args.id, version).await?;
        output.write_success(&format!("Declined pull request #{} in {}", args.id, args.repo))
    }

    /// Comment on a pull request
    async fn comment(&self, args: &CommentArgs, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        let comment = stash
            .create_comment(&args.repo.project, &args.repo.slug, args.id, &args.text)
            .await?;

        if output.format() == OutputFormat::Json {
            return output.write(&comment);
        }
        output.write_success(&format!("Added comment #{} to pull request #{}", comment.id, args.id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{run, FakeStash};
    use super::*;
    use crate::api::server::{Participant, User};
    use clap::Parser;

    fn fake() -> FakeStash {
        FakeStash {
            pull_request: Some(PullRequest {
                id: 777,
                version: 3,
                title: "Add retries".to_string(),
                description: "Retries transient failures".to_string(),
                reviewers: vec![Participant {
                    user: User {
                        name: "bob".to_string(),
                        ..Default::default()
                    },
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_default_state() {
        let stash = fake();
        run(&stash, &["stash", "pr", "list", "PROJ/trunk"]).await.unwrap();
        assert_eq!(stash.calls(), ["get_pull_requests PROJ/trunk OPEN"]);
    }

    #[test]
    fn test_list_rejects_unknown_state() {
        let parsed = super::super::Cli::try_parse_from(["stash", "pr", "list", "PROJ/trunk", "--state", "CLOSED"]);
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn test_create_passes_reviewers() {
        let stash = fake();
        run(
            &stash,
            &[
                "stash", "pr", "create", "proj/bar", "-t", "a title", "--from", "feature/file1", "--to", "develop",
                "-r", "bob", "-r", "bill",
            ],
        )
        .await
        .unwrap();
        assert_eq!(
            stash.calls(),
            ["create_pull_request proj/bar a title feature/file1->develop [bob,bill]"]
        );
    }

    #[tokio::test]
    async fn test_decline_fetches_version() {
        let stash = fake();
        run(&stash, &["stash", "pr", "decline", "PROJ/trunk", "777"]).await.unwrap();
        assert_eq!(
            stash.calls(),
            ["get_pull_request PROJ/trunk 777", "decline_pull_request PROJ/trunk 777 v3"]
        );
    }

    #[tokio::test]
    async fn test_decline_with_explicit_version() {
        let stash = fake();
        run(&stash, &["stash", "pr", "decline", "PROJ/trunk", "777", "--version", "1"])
            .await
            .unwrap();
        assert_eq!(stash.calls(), ["decline_pull_request PROJ/trunk 777 v1"]);
    }

    #[tokio::test]
    async fn test_update_keeps_current_fields() {
        let stash = fake();
        run(&stash, &["stash", "pr", "update", "PROJ/trunk", "777", "-t", "Add backoff"])
            .await
            .unwrap();
        assert_eq!(
            stash.calls(),
            [
                "get_pull_request PROJ/trunk 777",
                "update_pull_request PROJ/trunk 777 v3 Add backoff 'Retries transient failures' to='' [bob]",
            ]
        );
    }

    #[tokio::test]
    async fn test_update_fully_specified_skips_fetch() {
        let stash = fake();
        run(
            &stash,
            &[
                "stash", "pr", "update", "PROJ/trunk", "777", "--version", "4", "-t", "T", "-d", "D", "--to",
                "release", "-r", "carol",
            ],
        )
        .await
        .unwrap();
        assert_eq!(
            stash.calls(),
            ["update_pull_request PROJ/trunk 777 v4 T 'D' to='release' [carol]"]
        );
    }

    #[tokio::test]
    async fn test_update_missing_pull_request_fails() {
        let stash = fake();
        assert!(run(&stash, &["stash", "pr", "update", "PROJ/trunk", "1"]).await.is_err());
        assert_eq!(stash.calls(), ["get_pull_request PROJ/trunk 1"]);
    }

    #[tokio::test]
    async fn test_comment() {
        let stash = fake();
        run(&stash, &["stash", "pr", "comment", "PROJ/trunk", "777", "LGTM"]).await.unwrap();
        assert_eq!(stash.calls(), ["create_comment PROJ/trunk 777 LGTM"]);
    }
}
