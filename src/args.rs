use clap::Parser;
use github_client::RepositorySource;
use secrecy::SecretString;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub login of the user
    #[clap(short, long, env = "GITHUB_USER")]
    pub username: String,

    /// Names of repositories to leave out
    #[clap(short, long, env, value_delimiter = ',')]
    pub exclude_repo: Vec<String>,

    /// Leave out private repositories
    #[clap(long, env)]
    pub hide_private: bool,

    /// API OAuth access tokens, tried in order when rate limited
    #[clap(long, env, value_delimiter = ',')]
    pub api_token: Vec<SecretString>,

    /// Repository API URL
    #[clap(long, env, default_value = "https://api.github.com")]
    pub api_url: String,

    /// Repositories to count, `owned` or `contributed`
    #[clap(long, env, default_value = "contributed")]
    pub repo_source: RepositorySource,

    /// Print the ranking as a JSON object
    #[clap(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn parses_lists_and_defaults() {
        let args = Args::parse_from([
            "top_langs",
            "--username",
            "octocat",
            "--exclude-repo",
            "dotfiles,homework",
            "--api-token",
            "first,second",
        ]);
        assert_eq!(args.username, "octocat");
        assert_eq!(args.exclude_repo, vec!["dotfiles", "homework"]);
        let tokens: Vec<&str> = args.api_token.iter().map(|t| t.expose_secret().as_str()).collect();
        assert_eq!(tokens, vec!["first", "second"]);
        assert!(!args.hide_private);
        assert_eq!(args.api_url, "https://api.github.com");
        assert_eq!(args.repo_source, RepositorySource::Contributed);
    }

    #[test]
    fn parses_repo_source() {
        let args = Args::parse_from(["top_langs", "-u", "octocat", "--repo-source", "owned", "--hide-private"]);
        assert_eq!(args.repo_source, RepositorySource::Owned);
        assert!(args.hide_private);
        assert!(Args::try_parse_from(["top_langs", "-u", "octocat", "--repo-source", "starred"]).is_err());
    }
}
