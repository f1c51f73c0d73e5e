use crate::query::RepositorySource;
use crate::GithubClient;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::SecretString;
use top_langs::api::{Error, Result};
use url::Url;

const GITHUB_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "top-langs";
const ACCEPT: &str = "application/vnd.github.v3+json";

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
    tokens: Vec<SecretString>,
    source: RepositorySource,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        Self {
            client_builder: ClientBuilder::default(),
            github_url: GITHUB_URL.to_string(),
            headers,
            tokens: Vec::new(),
            source: RepositorySource::default(),
        }
    }
}

impl GithubClientBuilder {
    /// Tokens are tried in the given order, the next one only when the previous one got rate limited or rejected.
    pub fn with_tokens(mut self, tokens: Vec<SecretString>) -> GithubClientBuilder {
        self.tokens = tokens;
        self
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<GithubClientBuilder> {
        Ok(self.try_with_header(header::USER_AGENT, user_agent)?)
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().to_string();
        self
    }

    pub fn with_repository_source(mut self, source: RepositorySource) -> GithubClientBuilder {
        self.source = source;
        self
    }

    fn try_with_header(mut self, key: HeaderName, val: impl AsRef<str>) -> anyhow::Result<GithubClientBuilder> {
        let val = HeaderValue::from_str(val.as_ref())?;
        self.headers.insert(key, val);
        Ok(self)
    }

    pub fn build(self) -> Result<GithubClient> {
        let graphql_url = graphql_url(&self.github_url)?;
        let client = self
            .client_builder
            .default_headers(self.headers)
            .build()
            .map_err(anyhow::Error::from)?;
        Ok(GithubClient {
            client,
            graphql_url,
            tokens: self.tokens,
            source: self.source,
        })
    }
}

/// GraphQL endpoint under the API root, which may itself have a path (GitHub Enterprise `/api`).
fn graphql_url(github_url: &str) -> Result<Url> {
    let mut base = Url::parse(github_url).map_err(|_| Error::Error("Invalid GitHub API URL."))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("graphql").map_err(|_| Error::Error("Invalid GitHub API URL."))
}

#[test]
fn graphql_url_test() -> anyhow::Result<()> {
    assert_eq!(graphql_url("https://api.github.com")?.as_str(), "https://api.github.com/graphql");
    assert_eq!(graphql_url("https://api.github.com/")?.as_str(), "https://api.github.com/graphql");
    assert_eq!(
        graphql_url("https://github.example.com/api")?.as_str(),
        "https://github.example.com/api/graphql"
    );
    assert!(graphql_url("not a url").is_err());
    Ok(())
}
