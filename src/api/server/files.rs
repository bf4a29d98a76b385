//
//  stash-client
//  api/server/files.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Raw file content.
//!
//! Raw content is served by the web UI's browse path rather than the REST API:
//!
//! ```text
//! GET /projects/{projectkey}/repos/{slug}/browse/{path}?at={branch}&raw
//! ```
//!
//! Project key and slug are lower-cased. The response body is returned as
//! bytes without any decoding.

use reqwest::{Method, StatusCode};

use crate::api::classify::ResponseSpec;
use crate::api::client::{ApiRequest, StashClient};
use crate::api::common::Result;

static GET_RAW_FILE: ResponseSpec = ResponseSpec::new(
    StatusCode::OK,
    &[
        (StatusCode::NOT_FOUND, "Not found"),
        (StatusCode::UNAUTHORIZED, "Unauthorized"),
    ],
);

impl StashClient {
    /// Fetches the raw content of `path` at `branch`.
    ///
    /// `path` is split on `/` and every component is escaped separately.
    pub async fn get_raw_file(&self, project: &str, slug: &str, branch: &str, path: &str) -> Result<Vec<u8>> {
        let project = project.to_lowercase();
        let slug = slug.to_lowercase();
        let mut url = self.endpoint(
            ["projects", project.as_str(), "repos", slug.as_str(), "browse"]
                .into_iter()
                .chain(path.split('/').filter(|part| !part.is_empty())),
        )?;
        url.query_pairs_mut().append_pair("at", branch).append_key_only("raw");

        let request = ApiRequest::new("get raw file", Method::GET, url, &GET_RAW_FILE).raw();
        self.execute(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::retry::RetryPolicy;
    use mockito::Matcher;
    use std::time::Duration;

    fn client(server: &mockito::Server) -> StashClient {
        StashClient::builder(&server.url())
            .credentials("u", "p")
            .retry(RetryPolicy::default().with_delays(Duration::ZERO, Duration::ZERO))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_raw_file() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/proj/repos/trunk/browse/docs/README.md")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("at".into(), "feature/docs".into()),
                Matcher::UrlEncoded("raw".into(), "".into()),
            ]))
            .match_header("authorization", "Basic dTpw")
            .match_header("accept", "*/*")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("# Trunk\n")
            .create_async()
            .await;

        let content = client(&server)
            .get_raw_file("PROJ", "Trunk", "feature/docs", "docs/README.md")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(content, b"# Trunk\n");
    }

    #[tokio::test]
    async fn test_get_raw_file_not_found_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/proj/repos/trunk/browse/missing.txt")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_header("content-type", "text/html")
            .with_body("<html>Not Found</html>")
            .expect(1)
            .create_async()
            .await;

        let err = client(&server)
            .get_raw_file("PROJ", "trunk", "master", "missing.txt")
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(err.is_repository_not_found());
    }
}
