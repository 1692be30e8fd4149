//! GitHub REST client for posting pull request comments.
//!
//! Posting is an irreversible external effect. The client sends exactly one
//! request per call and carries no idempotency key, so callers post each
//! analysis at most once.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{AnalyzerConfig, GITHUB_TOKEN_VAR};
use crate::domain::{CommentTarget, PublishError};

const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Client for the "create an issue comment" endpoint.
pub struct CommentPublisher {
    http: reqwest::Client,
    token: Option<String>,
    api_url: String,
}

#[derive(Debug, Serialize)]
struct CreateComment<'a> {
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedComment {
    #[serde(default)]
    html_url: Option<String>,
}

impl CommentPublisher {
    /// Build a publisher from the run configuration.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, PublishError> {
        let http = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(PublishError::Transport)?;

        Ok(CommentPublisher {
            http,
            token: config.github_token.clone(),
            api_url: config.github_api_url.clone(),
        })
    }

    /// Post `body` as a comment on the target pull request.
    pub async fn post_comment(&self, target: &CommentTarget, body: &str) -> Result<(), PublishError> {
        if body.trim().is_empty() {
            return Err(PublishError::InvalidInput(
                "comment body is empty".to_string(),
            ));
        }
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(PublishError::MissingCredential {
                var: GITHUB_TOKEN_VAR,
            })?;

        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_url,
            target.owner(),
            target.name(),
            target.pr_number()
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .json(&CreateComment { body })
            .send()
            .await
            .map_err(PublishError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(PublishError::Transport)?;
        if !status.is_success() {
            return Err(PublishError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        // A 2xx without a parsable body still means the comment exists.
        let html_url = serde_json::from_str::<CreatedComment>(&text)
            .ok()
            .and_then(|c| c.html_url);
        info!(
            pr = %target,
            comment_url = html_url.as_deref().unwrap_or("unknown"),
            "comment created"
        );
        Ok(())
    }

    /// Validate raw repository/PR arguments and post.
    pub async fn post_comment_to(
        &self,
        repo: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<(), PublishError> {
        let target = CommentTarget::new(repo, pr_number)?;
        self.post_comment(&target, body).await
    }
}
