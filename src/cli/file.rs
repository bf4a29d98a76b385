//
//  stash-client
//  cli/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Raw file content

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use super::RepoSpec;
use crate::api::Stash;

/// Print the raw content of a file
#[derive(Args, Debug)]
pub struct FileCommand {
    /// Repository (PROJECT/SLUG)
    pub repo: RepoSpec,

    /// Path of the file inside the repository
    pub path: String,

    /// Branch to read from
    #[arg(long, short = 'b', default_value = "master")]
    pub branch: String,
}

impl FileCommand {
    pub async fn run(&self, stash: &dyn Stash) -> Result<()> {
        let content = self.fetch(stash).await?;
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(&content).context("Failed to write file content")?;
        handle.flush()?;
        Ok(())
    }

    async fn fetch(&self, stash: &dyn Stash) -> Result<Vec<u8>> {
        let content = stash
            .get_raw_file(&self.repo.project, &self.repo.slug, &self.branch, &self.path)
            .await?;
        Ok(content)
    }
}
