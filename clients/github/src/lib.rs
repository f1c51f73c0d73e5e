mod builder;
mod payload;
mod query;
mod retryer;

use anyhow::Context;
use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::header;
use reqwest::Client;
use retryer::{classify, Attempt};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use top_langs::api::{Error, Result, UserResponse};
use url::Url;

pub use builder::GithubClientBuilder;
pub use query::RepositorySource;

pub struct GithubClient {
    client: Client,
    graphql_url: Url,
    tokens: Vec<SecretString>,
    source: RepositorySource,
}

impl GithubClient {
    async fn attempt(&self, body: &serde_json::Value, token: Option<&SecretString>) -> anyhow::Result<Attempt> {
        let mut request = self.client.post(self.graphql_url.clone()).json(body);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("token {}", token.expose_secret()));
        }
        let response = request.send().await.context("GraphQL request failed")?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.context("Failed to read GraphQL response")?;
        debug!("GraphQL response status {}, {} bytes", status, bytes.len());
        classify(status, &headers, &bytes)
    }
}

#[async_trait]
impl top_langs::api::Client for GithubClient {
    async fn user_repositories(&self, login: &str) -> Result<UserResponse> {
        let body = json!({
            "query": query::user_languages_query(self.source),
            "variables": { "login": login },
        });

        let tokens: Vec<Option<&SecretString>> = if self.tokens.is_empty() {
            vec![None]
        } else {
            self.tokens.iter().map(Some).collect()
        };
        for (index, token) in tokens.iter().enumerate() {
            match self.attempt(&body, *token).await {
                Ok(Attempt::Done(response)) => return Ok(response.into()),
                Ok(Attempt::Retry(reason)) => warn!("Token #{} failed: {}", index + 1, reason),
                Err(err) => {
                    error!("Failed to query repositories of {}: {:#}", login, err);
                    return Err(Error::Other(err));
                }
            }
        }
        Err(Error::MaxRetries(tokens.len()))
    }
}
