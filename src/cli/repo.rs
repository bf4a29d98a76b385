//
//  stash-client
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository commands for the Stash CLI.
//!
//! - Listing every repository visible to the caller, optionally per project
//! - Viewing repository details and clone URLs
//! - Creating a git repository in a project
//! - Finding the repository a clone URL belongs to

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use super::RepoSpec;
use crate::api::server::{has_repository, Repository};
use crate::api::Stash;
use crate::output::{
    format_bool, format_status, print_field, print_header, OutputFormat, OutputWriter, TableOutput, TableRow,
};
use crate::util::truncate;

/// Manage repositories
#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View repository details
    View(ViewArgs),

    /// Create a new repository
    Create(CreateArgs),

    /// Find the repository a clone URL belongs to
    Find(FindArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list repositories in this project
    #[arg(long, short = 'p')]
    pub project: Option<String>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository to view (PROJECT/SLUG)
    pub repo: RepoSpec,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project key
    pub project: String,

    /// Repository name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Clone URL (ssh or http)
    pub url: String,
}

impl TableRow for Repository {
    const HEADERS: &'static [&'static str] = &["PROJECT", "SLUG", "STATE", "PUBLIC", "DESCRIPTION"];

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.project.key.clone(),
            self.slug.clone(),
            format_status(&self.state, color),
            format_bool(self.is_public, color),
            truncate(self.description.as_deref().unwrap_or(""), 50),
        ]
    }
}

impl TableOutput for Repository {
    fn print_table(&self, color: bool) {
        print_header(&format!("{}/{}", self.project.key, self.slug));
        println!();

        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            print_field("Description", desc, color);
        }
        print_field("Name", &self.name, color);
        print_field("Id", &self.id.to_string(), color);
        print_field("State", &format_status(&self.state, color), color);
        if let Some(message) = &self.status_message {
            print_field("Status", message, color);
        }
        print_field("Public", &format_bool(self.is_public, color), color);
        print_field("Forkable", &format_bool(self.forkable, color), color);

        println!();
        for link in &self.links.clone {
            print_field(&format!("Clone ({})", link.name), &link.href, color);
        }
        if let Some(web) = self.links.self_link.first() {
            print_field("Web URL", &web.href, color);
        }
    }
}

impl RepoCommand {
    pub async fn run(&self, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        match &self.command {
            RepoSubcommand::List(args) => self.list(args, stash, output).await,
            RepoSubcommand::View(args) => self.view(args, stash, output).await,
            RepoSubcommand::Create(args) => self.create(args, stash, output).await,
            RepoSubcommand::Find(args) => self.find(args, stash, output).await,
        }
    }

    /// List repositories
    async fn list(&self, args: &ListArgs, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        let mut repos: Vec<Repository> = stash
            .get_repositories()
            .await?
            .into_values()
            .filter(|r| {
                args.project
                    .as_deref()
                    .map_or(true, |p| r.project.key.eq_ignore_ascii_case(p))
            })
            .collect();
        repos.sort_by(|a, b| (&a.project.key, &a.slug).cmp(&(&b.project.key, &b.slug)));

        output.write_list(&repos, "No repositories found")
    }

    /// View repository details
    async fn view(&self, args: &ViewArgs, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        let repo = stash.get_repository(&args.repo.project, &args.repo.slug).await?;
        output.write(&repo)
    }

    /// Create a repository
    async fn create(&self, args: &CreateArgs, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        let repo = stash.create_repository(&args.project, &args.name).await?;
        if output.format() == OutputFormat::Json {
            return output.write(&repo);
        }

        output.write_success(&format!("Created repository {}/{}", args.project, repo.slug))?;
        let ssh = repo.ssh_url();
        if !ssh.is_empty() {
            output.write_info(&format!("Clone with: git clone {}", ssh));
        }
        Ok(())
    }

    /// Find a repository by clone URL
    async fn find(&self, args: &FindArgs, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        let repos = stash.get_repositories().await?;
        match has_repository(&repos, &args.url) {
            Some(repo) => output.write(repo),
            None => bail!("No repository has the clone URL {}", args.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{run, FakeStash};
    use crate::api::server::{CloneLink, ProjectRef, Repository, RepositoryLinks};

    fn fake() -> FakeStash {
        let repo = Repository {
            id: 1,
            slug: "trunk".to_string(),
            project: ProjectRef {
                key: "PROJ".to_string(),
                ..Default::default()
            },
            links: RepositoryLinks {
                clone: vec![CloneLink {
                    href: "ssh://git@stash.example.com:7999/proj/trunk.git".to_string(),
                    name: "ssh".to_string(),
                }],
                ..Default::default()
            },
            ..Default::default()
        };

        FakeStash {
            repositories: [(1, repo)].into_iter().collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_view_uses_project_and_slug() {
        let stash = fake();
        run(&stash, &["stash", "repo", "view", "PROJ/trunk"]).await.unwrap();
        assert_eq!(stash.calls(), ["get_repository PROJ/trunk"]);
    }

    #[tokio::test]
    async fn test_view_missing_repository_fails() {
        let stash = fake();
        let err = run(&stash, &["stash", "repo", "view", "PROJ/other"]).await.unwrap_err();
        assert!(err.to_string().contains("Not found"));
    }

    #[tokio::test]
    async fn test_find_by_clone_url() {
        let stash = fake();
        run(
            &stash,
            &["stash", "repo", "find", "ssh://git@stash.example.com:7999/proj/trunk.git"],
        )
        .await
        .unwrap();

        let err = run(&stash, &["stash", "repo", "find", "ssh://elsewhere/x.git"])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No repository"));
    }

    #[tokio::test]
    async fn test_create() {
        let stash = fake();
        run(&stash, &["stash", "repo", "create", "PROJ", "Trunk"]).await.unwrap();
        assert_eq!(stash.calls(), ["create_repository PROJ/Trunk"]);
    }

    #[tokio::test]
    async fn test_list_with_project_filter() {
        let stash = fake();
        run(&stash, &["stash", "repo", "ls", "--project", "proj"]).await.unwrap();
        assert_eq!(stash.calls(), ["get_repositories"]);
    }
}
