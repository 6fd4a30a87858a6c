use super::dotenv::DotenvSettings;

/// Repositories per page. Fixed; the widget layout assumes a 3x3 grid.
pub const ITEMS_PER_PAGE: u32 = 9;

pub const DEFAULT_API_BASE: &str = "https://api.github.com/users";
pub const DEFAULT_USER_AGENT: &str = "github-profile-viewer";
const DEFAULT_LANGUAGE_CONCURRENCY: usize = 4;
const MAX_LANGUAGE_CONCURRENCY: usize = 16;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 300;

pub const ENV_PREFIX: &str = "GITHUB_PROFILE_VIEWER_";
const ENV_API_BASE: &str = "GITHUB_PROFILE_VIEWER_API_BASE";
const ENV_LANGUAGE_CONCURRENCY: &str = "GITHUB_PROFILE_VIEWER_LANGUAGE_CONCURRENCY";
const ENV_TIMEOUT_SECS: &str = "GITHUB_PROFILE_VIEWER_TIMEOUT_SECS";
const ENV_USER_AGENT: &str = "GITHUB_PROFILE_VIEWER_USER_AGENT";
const ENV_PAGE_COUNT: &str = "GITHUB_PROFILE_VIEWER_PAGE_COUNT";

/// How the total page count is derived after a fetch cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageCountStrategy {
    /// `ceil(returned / per_page)` over the page that was just fetched.
    ReturnedCount,
    /// `ceil(public_repo_count / per_page)` from the user's profile.
    PublicRepos,
}

impl PageCountStrategy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "returned_count" | "returned" => Some(Self::ReturnedCount),
            "public_repos" => Some(Self::PublicRepos),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerConfig {
    pub api_base: String,
    pub language_concurrency: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_count: PageCountStrategy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            language_concurrency: DEFAULT_LANGUAGE_CONCURRENCY,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_count: PageCountStrategy::ReturnedCount,
        }
    }
}

impl ViewerConfig {
    /// Each setting comes from the environment, else the settings file, else the default.
    pub fn from_env() -> Self {
        let dotenv = DotenvSettings::load_default();
        Self::from_sources(|key| std::env::var(key).ok(), &dotenv)
    }

    pub fn from_sources<F>(env: F, dotenv: &DotenvSettings) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_file = keys_from_file(&env, dotenv);
        if let Some(path) = dotenv.source().filter(|_| !from_file.is_empty()) {
            log::info!(
                "[config] {} taken from {}",
                from_file.join(", "),
                path.display()
            );
        }
        Self::from_lookup(|key| env(key).or_else(|| dotenv.get(key).map(str::to_string)))
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base = lookup(ENV_API_BASE)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base);

        let language_concurrency = parse_usize(lookup(ENV_LANGUAGE_CONCURRENCY))
            .unwrap_or(defaults.language_concurrency)
            .clamp(1, MAX_LANGUAGE_CONCURRENCY);

        let request_timeout_secs = parse_u64(lookup(ENV_TIMEOUT_SECS))
            .unwrap_or(defaults.request_timeout_secs)
            .clamp(1, MAX_TIMEOUT_SECS);

        let user_agent = lookup(ENV_USER_AGENT)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.user_agent);

        let page_count = lookup(ENV_PAGE_COUNT)
            .and_then(|v| PageCountStrategy::parse(&v))
            .unwrap_or(defaults.page_count);

        Self {
            api_base,
            language_concurrency,
            request_timeout_secs,
            user_agent,
            page_count,
        }
    }
}

/// Settings-file keys that are not shadowed by a real environment variable.
pub fn keys_from_file<'a, F>(env: F, dotenv: &'a DotenvSettings) -> Vec<&'a str>
where
    F: Fn(&str) -> Option<String>,
{
    dotenv.keys().filter(|key| env(*key).is_none()).collect()
}

fn parse_usize(raw: Option<String>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok()
}

fn parse_u64(raw: Option<String>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok()
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
