use strum_macros::{Display, EnumString};

pub const MAX_REPOSITORIES: u32 = 100;
pub const MAX_LANGUAGES: u32 = 10;

/// Which connection of the user the repositories are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RepositorySource {
    /// Non-fork repositories owned by the user.
    Owned,
    /// Repositories the user committed, opened issues or pull requests to, or created.
    #[default]
    Contributed,
}

#[derive(Debug, Clone, Copy, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionType {
    Commit,
    Issue,
    PullRequest,
    Repository,
}

const CONTRIBUTION_TYPES: [ContributionType; 4] = [
    ContributionType::Commit,
    ContributionType::Issue,
    ContributionType::PullRequest,
    ContributionType::Repository,
];

pub fn user_languages_query(source: RepositorySource) -> String {
    let connection = match source {
        RepositorySource::Owned => format!(
            "repositories(ownerAffiliations: OWNER, isFork: false, first: {})",
            MAX_REPOSITORIES
        ),
        RepositorySource::Contributed => {
            let types = CONTRIBUTION_TYPES
                .iter()
                .map(ContributionType::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "repositoriesContributedTo(contributionTypes: [{}], first: {})",
                types, MAX_REPOSITORIES
            )
        }
    };
    format!(
        r#"query userInfo($login: String!) {{
  user(login: $login) {{
    {} {{
      nodes {{
        name
        isPrivate
        languages(first: {}, orderBy: {{field: SIZE, direction: DESC}}) {{
          edges {{
            size
            node {{
              color
              name
            }}
          }}
        }}
      }}
    }}
  }}
}}"#,
        connection, MAX_LANGUAGES
    )
}
