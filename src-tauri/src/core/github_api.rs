use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::config::ViewerConfig;
use super::models::{LanguageSet, Repository, UserProfile};

/// Read-only view of the GitHub REST endpoints a fetch cycle needs.
pub trait GithubSource: Send + Sync {
    fn fetch_profile(&self, username: &str) -> Result<UserProfile>;

    fn fetch_repositories(&self, username: &str, page: u32, per_page: u32)
        -> Result<Vec<Repository>>;

    fn fetch_languages(&self, languages_url: &str) -> Result<LanguageSet>;
}

#[derive(Debug, Deserialize)]
struct UserItem {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    location: Option<String>,
    #[serde(default)]
    followers: u64,
    #[serde(default)]
    following: u64,
    #[serde(default)]
    public_repos: u64,
    created_at: String,
    avatar_url: String,
    twitter_username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    name: String,
    description: Option<String>,
    #[serde(default)]
    topics: Option<Vec<String>>,
    #[serde(default)]
    stargazers_count: u64,
    languages_url: String,
}

#[derive(Clone, Debug)]
pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("build http client")?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("GitHub {} request failed", what))?
            .error_for_status()
            .with_context(|| format!("GitHub {} returned error", what))?;

        response
            .json::<T>()
            .with_context(|| format!("parse GitHub {} response", what))
    }
}

impl GithubSource for GithubClient {
    fn fetch_profile(&self, username: &str) -> Result<UserProfile> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(username));
        let item: UserItem = self.get_json(&url, "user")?;
        log::debug!("[github_api] fetched profile login={}", item.login);
        user_from_item(item)
    }

    fn fetch_repositories(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>> {
        let url = format!(
            "{}/{}/repos?page={}&per_page={}",
            self.base_url,
            urlencoding::encode(username),
            page.max(1),
            per_page.max(1)
        );
        let items: Vec<RepoItem> = self.get_json(&url, "repository list")?;
        log::debug!(
            "[github_api] fetched {} repositories for {} (page {})",
            items.len(),
            username,
            page
        );

        Ok(items
            .into_iter()
            .map(|item| Repository {
                name: item.name,
                description: item.description,
                topics: item.topics.unwrap_or_default(),
                star_count: item.stargazers_count,
                languages_url: item.languages_url,
            })
            .collect())
    }

    fn fetch_languages(&self, languages_url: &str) -> Result<LanguageSet> {
        let map: serde_json::Map<String, serde_json::Value> =
            self.get_json(languages_url, "languages")?;
        Ok(LanguageSet::new(map.into_iter().map(|(name, _)| name)))
    }
}

fn user_from_item(item: UserItem) -> Result<UserProfile> {
    let created_at = OffsetDateTime::parse(&item.created_at, &Rfc3339)
        .with_context(|| format!("parse created_at {:?}", item.created_at))?;

    Ok(UserProfile {
        login: item.login,
        name: non_blank(item.name),
        bio: non_blank(item.bio),
        location: non_blank(item.location),
        followers: item.followers,
        following: item.following,
        public_repo_count: item.public_repos,
        created_at,
        avatar_url: item.avatar_url,
        twitter_handle: non_blank(item.twitter_username),
    })
}

// The API reports cleared fields as either null or "".
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/github_api.rs"]
mod tests;
