use async_trait::async_trait;
use derive_more::Constructor;
use thiserror::Error;

pub const COULD_NOT_FETCH_USER: &str = "Could not fetch user";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Upstream query failed: {0}")]
    UpstreamQuery(String),
    #[error("Maximum retries exceeded after {0} attempts")]
    MaxRetries(usize),
    #[error("Error: {0}")]
    Error(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Bytes of a single language within one repository.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct LanguageEdge {
    pub name: String,
    pub color: Option<String>,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Repository {
    pub name: String,
    pub is_private: bool,
    pub languages: Vec<LanguageEdge>,
}

/// Repositories of a user, tagged by the connection they were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRepositories {
    Owned(Vec<Repository>),
    ContributedTo(Vec<Repository>),
}

impl UserRepositories {
    pub fn into_nodes(self) -> Vec<Repository> {
        match self {
            UserRepositories::Owned(nodes) | UserRepositories::ContributedTo(nodes) => nodes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Constructor)]
pub struct UpstreamError {
    pub kind: Option<String>,
    pub message: Option<String>,
}

/// What the data source answered for a single user query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserResponse {
    pub repositories: Option<UserRepositories>,
    pub errors: Vec<UpstreamError>,
}

impl UserResponse {
    pub fn with_repositories(repositories: UserRepositories) -> Self {
        UserResponse {
            repositories: Some(repositories),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(errors: Vec<UpstreamError>) -> Self {
        UserResponse {
            repositories: None,
            errors,
        }
    }

    /// Upstream errors win over any data that came along with them.
    pub fn into_repositories(self) -> Result<Vec<Repository>> {
        if let Some(first) = self.errors.into_iter().next() {
            let message = first.message.unwrap_or_else(|| COULD_NOT_FETCH_USER.to_string());
            return Err(Error::UpstreamQuery(message));
        }
        self.repositories
            .map(UserRepositories::into_nodes)
            .ok_or_else(|| Error::UpstreamQuery(COULD_NOT_FETCH_USER.to_string()))
    }
}

#[async_trait]
pub trait Client: Send + Sync {
    async fn user_repositories(&self, login: &str) -> Result<UserResponse>;
}
