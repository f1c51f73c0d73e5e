mod args;

pub use args::Args;
use github_client::GithubClientBuilder;
use log::debug;
use secrecy::SecretString;
use top_langs::api::Result;
use top_langs::fetcher::TopLanguagesFetcher;
use top_langs::TopLanguages;

pub async fn fetch_top_languages(args: Args) -> Result<TopLanguages> {
    debug!("Querying {} with {} API tokens", args.api_url, args.api_token.len());
    let client = GithubClientBuilder::default()
        .with_github_url(args.api_url)
        .with_repository_source(args.repo_source)
        .with_tokens(args.api_token)
        .build()?;

    let fetcher = TopLanguagesFetcher::new(client);
    fetcher
        .fetch(&args.username, args.exclude_repo.as_slice(), !args.hide_private)
        .await
}

/// Reads `{prefix}1`, `{prefix}2`, ... from the environment up to the first missing one.
pub fn numbered_tokens(prefix: &str) -> Vec<SecretString> {
    (1..)
        .map_while(|n| std::env::var(format!("{}{}", prefix, n)).ok())
        .map(SecretString::new)
        .collect()
}

#[test]
fn numbered_tokens_stop_at_gap() {
    std::env::set_var("TOP_LANGS_TEST_PAT_1", "one");
    std::env::set_var("TOP_LANGS_TEST_PAT_2", "two");
    std::env::set_var("TOP_LANGS_TEST_PAT_4", "four");
    let tokens = numbered_tokens("TOP_LANGS_TEST_PAT_");
    let tokens: Vec<&str> = tokens
        .iter()
        .map(|t| secrecy::ExposeSecret::expose_secret(t).as_str())
        .collect();
    assert_eq!(tokens, vec!["one", "two"]);
}
