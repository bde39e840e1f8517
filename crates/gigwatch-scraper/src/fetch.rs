// SPDX-FileCopyrightText: 2026 Gigwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP job source: fetches search-result pages and runs the extractor.

use std::time::Duration;

use async_trait::async_trait;
use gigwatch_config::model::BoardConfig;
use gigwatch_core::{GigwatchError, JobSource, RawPosting};
use tracing::debug;
use url::Url;

use crate::extract::extract_postings;

// Browser-like User-Agent; the board serves bot UAs a challenge page.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// [`JobSource`] backed by reqwest and the CSS extractor.
pub struct HttpJobSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpJobSource {
    /// Build an HTTP source from the board configuration.
    pub fn new(config: &BoardConfig) -> Result<Self, GigwatchError> {
        let base = Url::parse(&config.base_url).map_err(|e| GigwatchError::Scrape {
            message: format!("invalid board base url {:?}", config.base_url),
            source: Some(Box::new(e)),
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| GigwatchError::Scrape {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client, base })
    }

    async fn fetch_html(&self, url: &str) -> Result<String, GigwatchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GigwatchError::Scrape {
                message: format!("request to {url} failed"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GigwatchError::Scrape {
                message: format!("HTTP {status} for {url}"),
                source: None,
            });
        }

        response.text().await.map_err(|e| GigwatchError::Scrape {
            message: format!("failed to read body from {url}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch_postings(&self, url: &str) -> Result<Vec<RawPosting>, GigwatchError> {
        let html = self.fetch_html(url).await?;
        let postings = extract_postings(&html, &self.base);
        debug!(url, count = postings.len(), "listing page extracted");
        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server_url: &str) -> BoardConfig {
        BoardConfig {
            base_url: format!("{server_url}/jobs"),
            ..BoardConfig::default()
        }
    }

    const PAGE: &str = r#"
    <div class="project-item js-project">
      <a href="/job/remote-rust-work"><span class="project-title">Remote Rust work</span></a>
      <div class="skills">
        <a class="skill" href="/jobs?skills=rust"><h3>Rust</h3></a>
      </div>
    </div>
    "#;

    #[tokio::test]
    async fn fetch_postings_extracts_served_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let source = HttpJobSource::new(&config_for(&server.uri())).unwrap();
        let postings = source
            .fetch_postings(&format!("{}/jobs", server.uri()))
            .await
            .unwrap();

        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Remote Rust work");
        assert_eq!(postings[0].tags[0].slug.as_deref(), Some("rust"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_scrape_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = HttpJobSource::new(&config_for(&server.uri())).unwrap();
        let result = source.fetch_postings(&format!("{}/jobs", server.uri())).await;
        assert!(matches!(result, Err(GigwatchError::Scrape { .. })));
    }
}
