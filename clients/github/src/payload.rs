use serde::Deserialize;
use top_langs::api::{LanguageEdge, Repository, UpstreamError, UserRepositories, UserResponse};

#[derive(Deserialize, Debug)]
pub struct QueryResponse {
    pub data: Option<Data>,
    pub errors: Option<Vec<QueryError>>,
}

#[derive(Deserialize, Debug)]
pub struct Data {
    pub user: Option<User>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub repositories: Option<RepositoryConnection>,
    pub repositories_contributed_to: Option<RepositoryConnection>,
}

#[derive(Deserialize, Debug)]
pub struct RepositoryConnection {
    #[serde(default)]
    pub nodes: Vec<Option<RepositoryNode>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub languages: Option<LanguageConnection>,
}

#[derive(Deserialize, Debug)]
pub struct LanguageConnection {
    #[serde(default)]
    pub edges: Vec<Language>,
}

#[derive(Deserialize, Debug)]
pub struct Language {
    pub size: u64,
    pub node: LanguageNode,
}

#[derive(Deserialize, Debug)]
pub struct LanguageNode {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct QueryError {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
}

/// Body of REST style failures, e.g. `{"message": "Bad credentials"}`.
#[derive(Deserialize, Debug)]
pub struct ApiMessage {
    pub message: Option<String>,
}

impl QueryResponse {
    pub fn first_error_kind(&self) -> Option<&str> {
        self.errors.as_ref()?.first()?.kind.as_deref()
    }
}

impl From<Language> for LanguageEdge {
    fn from(language: Language) -> Self {
        LanguageEdge::new(language.node.name, language.node.color, language.size)
    }
}

impl From<RepositoryNode> for Repository {
    fn from(node: RepositoryNode) -> Self {
        let languages = node
            .languages
            .map(|languages| languages.edges.into_iter().map(LanguageEdge::from).collect())
            .unwrap_or_default();
        Repository::new(node.name, node.is_private, languages)
    }
}

impl From<RepositoryConnection> for Vec<Repository> {
    fn from(connection: RepositoryConnection) -> Self {
        connection.nodes.into_iter().flatten().map(Repository::from).collect()
    }
}

impl From<User> for Option<UserRepositories> {
    fn from(user: User) -> Self {
        match (user.repositories, user.repositories_contributed_to) {
            (Some(owned), _) => Some(UserRepositories::Owned(owned.into())),
            (None, Some(contributed)) => Some(UserRepositories::ContributedTo(contributed.into())),
            (None, None) => None,
        }
    }
}

impl From<QueryError> for UpstreamError {
    fn from(error: QueryError) -> Self {
        UpstreamError::new(error.kind, error.message)
    }
}

impl From<QueryResponse> for UserResponse {
    fn from(response: QueryResponse) -> Self {
        UserResponse {
            repositories: response.data.and_then(|data| data.user).and_then(<Option<UserRepositories>>::from),
            errors: response
                .errors
                .unwrap_or_default()
                .into_iter()
                .map(UpstreamError::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> UserResponse {
        serde_json::from_str::<QueryResponse>(body).unwrap().into()
    }

    #[test]
    fn contributed_repositories_are_read() {
        let response = parse(
            r##"{"data": {"user": {"repositoriesContributedTo": {"nodes": [
                {"name": "a", "isPrivate": false, "languages": {"edges": [
                    {"size": 100, "node": {"name": "Go", "color": "#00ADD8"}}
                ]}},
                null,
                {"name": "b", "isPrivate": true, "languages": {"edges": [
                    {"size": 50, "node": {"name": "Go", "color": "#00ADD8"}},
                    {"size": 200, "node": {"name": "Rust", "color": null}}
                ]}}
            ]}}}}"##,
        );
        let go = |size| LanguageEdge::new("Go".to_string(), Some("#00ADD8".to_string()), size);
        assert_eq!(
            response.repositories,
            Some(UserRepositories::ContributedTo(vec![
                Repository::new("a".to_string(), false, vec![go(100)]),
                Repository::new(
                    "b".to_string(),
                    true,
                    vec![go(50), LanguageEdge::new("Rust".to_string(), None, 200)]
                ),
            ]))
        );
        assert!(response.errors.is_empty());
    }

    #[test]
    fn owned_repositories_are_preferred() {
        let response = parse(
            r#"{"data": {"user": {
                "repositories": {"nodes": [{"name": "mine", "isPrivate": false, "languages": {"edges": []}}]},
                "repositoriesContributedTo": {"nodes": [{"name": "theirs", "isPrivate": false, "languages": {"edges": []}}]}
            }}}"#,
        );
        assert_eq!(
            response.repositories,
            Some(UserRepositories::Owned(vec![Repository::new("mine".to_string(), false, vec![])]))
        );
    }

    #[test]
    fn missing_languages_are_empty() {
        let response = parse(r#"{"data": {"user": {"repositories": {"nodes": [{"name": "bare", "isPrivate": false}]}}}}"#);
        let repositories = response.into_repositories().unwrap();
        assert!(repositories[0].languages.is_empty());
    }

    #[test]
    fn errors_are_read() {
        let body = r#"{"data": {"user": null}, "errors": [
            {"type": "NOT_FOUND", "path": ["user"], "message": "Could not resolve to a User with the login of 'nobody'."}
        ]}"#;
        let raw = serde_json::from_str::<QueryResponse>(body).unwrap();
        assert_eq!(raw.first_error_kind(), Some("NOT_FOUND"));

        let response = UserResponse::from(raw);
        assert_eq!(response.repositories, None);
        assert_eq!(
            response.errors,
            vec![UpstreamError::new(
                Some("NOT_FOUND".to_string()),
                Some("Could not resolve to a User with the login of 'nobody'.".to_string())
            )]
        );
    }
}
