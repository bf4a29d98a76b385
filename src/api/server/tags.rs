//
//  stash-client
//  api/server/tags.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Stash tag listing.
//!
//! ```text
//! GET /rest/api/1.0/projects/{projectKey}/repos/{slug}/tags?start&limit
//! ```

use std::collections::HashMap;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::api::classify::ResponseSpec;
use crate::api::client::StashClient;
use crate::api::common::Result;
use crate::auth::AuthPolicy;

static LIST_TAGS: ResponseSpec = ResponseSpec::new(
    StatusCode::OK,
    &[
        (StatusCode::NOT_FOUND, "Not found"),
        (StatusCode::UNAUTHORIZED, "Unauthorized"),
    ],
);

/// A tag of a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Fully qualified ref name, e.g. `refs/tags/v1.0`.
    pub id: String,

    /// Short name, e.g. `v1.0`. Used as the key of tag maps.
    #[serde(rename = "displayId")]
    pub display_id: String,

    /// Hash of the annotated tag object; empty for lightweight tags.
    pub hash: String,

    /// Hash of the tagged commit.
    #[serde(rename = "latestCommit")]
    pub latest_commit: String,
}

impl StashClient {
    /// Lists the tags of a repository, keyed by display id.
    ///
    /// Credentials are sent only when complete, so tags of public repositories
    /// can be read anonymously.
    pub async fn get_tags(&self, project: &str, slug: &str) -> Result<HashMap<String, Tag>> {
        let url = self.repo_url(project, slug, &["tags"])?;
        self.get_paged(
            "list tags",
            url,
            AuthPolicy::IfPresent,
            &LIST_TAGS,
            HashMap::new(),
            |acc: &mut HashMap<String, Tag>, page: Vec<Tag>| {
                acc.extend(page.into_iter().map(|tag| (tag.display_id.clone(), tag)));
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_get_tags_anonymously() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/1.0/projects/PROJ/repos/trunk/tags")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("start".into(), "0".into()),
                Matcher::UrlEncoded("limit".into(), "25".into()),
            ]))
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(
                r#"{"size":2,"isLastPage":true,"start":0,"values":[
                    {"id":"refs/tags/v1.0","displayId":"v1.0","hash":"","latestCommit":"8d51122"},
                    {"id":"refs/tags/v1.1","displayId":"v1.1","hash":"0a943a2","latestCommit":"9e7a1c3"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = StashClient::new(&server.url(), "", "").unwrap();
        let tags = client.get_tags("PROJ", "trunk").await.unwrap();

        mock.assert_async().await;
        assert_eq!(tags.len(), 2);
        assert_eq!(tags["v1.0"].latest_commit, "8d51122");
        assert_eq!(tags["v1.1"].hash, "0a943a2");
    }

    #[tokio::test]
    async fn test_get_tags_empty_repository() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/api/1.0/projects/PROJ/repos/empty/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"size":0,"isLastPage":true,"start":0,"values":[]}"#)
            .create_async()
            .await;

        let client = StashClient::new(&server.url(), "u", "p").unwrap();
        assert!(client.get_tags("PROJ", "empty").await.unwrap().is_empty());
    }
}
