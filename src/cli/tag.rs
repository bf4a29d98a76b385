//
//  stash-client
//  cli/tag.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tag commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::RepoSpec;
use crate::api::server::Tag;
use crate::api::Stash;
use crate::output::{OutputWriter, TableRow};

/// List tags
#[derive(Args, Debug)]
pub struct TagCommand {
    #[command(subcommand)]
    pub command: TagSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TagSubcommand {
    /// List tags
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,
}

impl TableRow for Tag {
    const HEADERS: &'static [&'static str] = &["TAG", "COMMIT"];

    fn row(&self, _color: bool) -> Vec<String> {
        let commit = if self.latest_commit.is_empty() {
            &self.hash
        } else {
            &self.latest_commit
        };
        vec![self.display_id.clone(), commit.clone()]
    }
}

impl TagCommand {
    pub async fn run(&self, stash: &dyn Stash, output: &OutputWriter) -> Result<()> {
        match &self.command {
            TagSubcommand::List(args) => {
                let mut tags: Vec<Tag> = stash
                    .get_tags(&args.repo.project, &args.repo.slug)
                    .await?
                    .into_values()
                    .collect();
                tags.sort_by(|a, b| a.display_id.cmp(&b.display_id));
                output.write_list(&tags, &format!("No tags in {}", args.repo))
            }
        }
    }
}
