use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex};
use std::time::Duration;

use anyhow::Result;
use time::macros::datetime;

use super::github_api::GithubSource;
use super::models::{LanguageSet, Repository, UserProfile};

pub fn profile(login: &str) -> UserProfile {
    UserProfile {
        login: login.to_string(),
        name: Some(format!("{} name", login)),
        bio: None,
        location: None,
        followers: 1,
        following: 2,
        public_repo_count: 3,
        created_at: datetime!(2011-01-25 18:44:36 UTC),
        avatar_url: format!("https://avatars.example.com/{}", login),
        twitter_handle: None,
    }
}

pub fn repo(name: &str) -> Repository {
    Repository {
        name: name.to_string(),
        description: Some(format!("{} description", name)),
        topics: Vec::new(),
        star_count: 0,
        languages_url: format!("https://api.example.com/repos/{}/languages", name),
    }
}

/// Blocks `fetch_profile` for one username until released.
pub struct ProfileGate {
    pub username: String,
    pub started: Mutex<mpsc::Sender<()>>,
    pub release: Mutex<mpsc::Receiver<()>>,
}

/// In-memory `GithubSource` that records every call.
#[derive(Default)]
pub struct FakeSource {
    pub profiles: HashMap<String, UserProfile>,
    pub repos: HashMap<String, Vec<Repository>>,
    pub languages: HashMap<String, Vec<String>>,
    pub failing_repo_lists: Vec<String>,
    pub language_delay: Option<Duration>,
    pub gate: Option<ProfileGate>,
    pub calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn with_user(mut self, login: &str, repos: Vec<Repository>) -> Self {
        self.profiles.insert(login.to_string(), profile(login));
        self.repos.insert(login.to_string(), repos);
        self
    }

    pub fn with_languages(mut self, repo_name: &str, langs: &[&str]) -> Self {
        self.languages.insert(
            format!("https://api.example.com/repos/{}/languages", repo_name),
            langs.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GithubSource for FakeSource {
    fn fetch_profile(&self, username: &str) -> Result<UserProfile> {
        self.record(format!("profile:{}", username));
        if let Some(gate) = &self.gate {
            if gate.username == username {
                let _ = gate.started.lock().unwrap().send(());
                let _ = gate.release.lock().unwrap().recv();
            }
        }
        self.profiles
            .get(username)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("GitHub user returned error: 404 Not Found"))
    }

    fn fetch_repositories(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>> {
        self.record(format!("repos:{}:{}:{}", username, page, per_page));
        if self.failing_repo_lists.iter().any(|u| u == username) {
            anyhow::bail!("GitHub repository list returned error: 500");
        }
        Ok(self.repos.get(username).cloned().unwrap_or_default())
    }

    fn fetch_languages(&self, languages_url: &str) -> Result<LanguageSet> {
        self.record(format!("languages:{}", languages_url));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.language_delay {
            std::thread::sleep(delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.languages.get(languages_url) {
            Some(names) => Ok(LanguageSet::new(names.iter().cloned())),
            None => anyhow::bail!("GitHub languages returned error: 500"),
        }
    }
}
