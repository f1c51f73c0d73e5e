use crate::aggregator::{top_languages, TopLanguages};
use crate::api::{Client, Error, Result};
use log::{debug, info};

pub struct TopLanguagesFetcher<CLIENT>
where
    CLIENT: Client,
{
    client: CLIENT,
}

impl<CLIENT> TopLanguagesFetcher<CLIENT>
where
    CLIENT: Client,
{
    pub fn new(client: CLIENT) -> Self {
        TopLanguagesFetcher { client }
    }

    /// Ranks languages of repositories `username` is related to.
    ///
    /// # Arguments
    /// * `username` - GitHub login, must not be empty
    /// * `exclude` - Names of repositories to leave out
    /// * `include_private` - Whether private repositories count
    pub async fn fetch<S: AsRef<str>>(
        &self,
        username: &str,
        exclude: &[S],
        include_private: bool,
    ) -> Result<TopLanguages> {
        if username.is_empty() {
            return Err(Error::MissingParameter("username"));
        }

        info!("Fetching top languages of {}", username);
        let response = self.client.user_repositories(username).await?;
        let repositories = response.into_repositories()?;
        debug!("Received {} repositories of {}", repositories.len(), username);

        Ok(top_languages(repositories, exclude, include_private))
    }
}
