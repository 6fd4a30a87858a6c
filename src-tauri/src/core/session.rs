use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};

use super::config::{ViewerConfig, ITEMS_PER_PAGE};
use super::filter::filter_cards;
use super::github_api::{GithubClient, GithubSource};
use super::languages::resolve_all;
use super::pagination::{compute_total_pages, render_pagination, PageState};
use super::render::{
    render_loading, render_profile, render_repository_list, RenderedCard, LOADING_REPOSITORIES,
    LOADING_USER,
};

#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("username is empty")]
    EmptyInput,
    #[error("page {requested} is outside 1..={total_pages}")]
    PageOutOfRange { requested: u32, total_pages: u32 },
    #[error("fetch cycle {generation} failed: {source:#}")]
    Fetch {
        generation: u64,
        source: anyhow::Error,
    },
}

/// Receives progress markup while a cycle is in flight.
pub trait CycleObserver {
    fn loading(&self, generation: u64, html: &str);
}

pub struct NoopObserver;

impl CycleObserver for NoopObserver {
    fn loading(&self, _generation: u64, _html: &str) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleView {
    pub generation: u64,
    pub profile_html: String,
    pub repositories_html: String,
    pub pagination_html: String,
    pub page: PageState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered(CycleView),
    /// A newer cycle was issued before this one finished; its results were dropped.
    Stale { generation: u64 },
}

#[derive(Debug, Default)]
struct SessionState {
    username: Option<String>,
    page: PageState,
    cards: Vec<RenderedCard>,
}

/// Input/pagination controller for one window. Every fetch cycle takes a new
/// generation and only the latest generation may touch the session state.
pub struct ViewerSession {
    source: Arc<dyn GithubSource>,
    config: ViewerConfig,
    generation: AtomicU64,
    state: Mutex<SessionState>,
}

impl ViewerSession {
    pub fn new(source: Arc<dyn GithubSource>, config: ViewerConfig) -> Self {
        Self {
            source,
            config,
            generation: AtomicU64::new(0),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn from_config(config: ViewerConfig) -> Result<Self> {
        let client = GithubClient::new(&config).context("create GitHub client")?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn page_state(&self) -> PageState {
        self.state().page
    }

    pub fn username(&self) -> Option<String> {
        self.state().username.clone()
    }

    /// Full fetch cycle for `username`: the current page when it repeats the last
    /// username, page 1 otherwise. Used both for a lookup and for Enter in the
    /// search field.
    pub fn lookup(
        &self,
        username: &str,
        observer: &dyn CycleObserver,
    ) -> Result<CycleOutcome, CycleError> {
        let username = username.trim();
        if username.is_empty() {
            log::info!("[session] please type a valid username; fetch cycle skipped");
            return Err(CycleError::EmptyInput);
        }

        // A different username starts over at page 1. Nothing is committed until the
        // cycle renders.
        let (generation, page) = {
            let state = self.state();
            let page = if state.username.as_deref() == Some(username) {
                state.page.current_page
            } else {
                1
            };
            (self.next_generation(), page)
        };
        self.run_cycle(generation, username, page, observer)
    }

    /// Page-change action: ignored unless `page` is within `[1, total_pages]`.
    pub fn request_page(
        &self,
        page: u32,
        observer: &dyn CycleObserver,
    ) -> Result<CycleOutcome, CycleError> {
        let (generation, username) = {
            let mut state = self.state();
            if !state.page.request_page(page) {
                log::debug!(
                    "[session] page {} rejected (total_pages={})",
                    page,
                    state.page.total_pages
                );
                return Err(CycleError::PageOutOfRange {
                    requested: page,
                    total_pages: state.page.total_pages,
                });
            }
            let Some(username) = state.username.clone() else {
                log::info!("[session] page changed to {} with no username; fetch cycle skipped", page);
                return Err(CycleError::EmptyInput);
            };
            (self.next_generation(), username)
        };

        self.run_cycle(generation, &username, page, observer)
    }

    /// Visibility of each card currently on screen.
    pub fn filter(&self, term: &str) -> Vec<bool> {
        filter_cards(&self.state().cards, term)
    }

    fn run_cycle(
        &self,
        generation: u64,
        username: &str,
        page: u32,
        observer: &dyn CycleObserver,
    ) -> Result<CycleOutcome, CycleError> {
        log::info!(
            "[session] cycle {} start username={} page={}",
            generation,
            username,
            page
        );

        observer.loading(generation, &render_loading(LOADING_USER));
        let profile = match self
            .source
            .fetch_profile(username)
            .with_context(|| format!("fetch profile of {}", username))
        {
            Ok(v) => v,
            Err(err) => return self.fail(generation, err),
        };

        observer.loading(generation, &render_loading(LOADING_REPOSITORIES));
        let repos = match self
            .source
            .fetch_repositories(username, page, ITEMS_PER_PAGE)
            .with_context(|| format!("fetch repositories of {} (page {})", username, page))
        {
            Ok(v) => v,
            Err(err) => return self.fail(generation, err),
        };

        if !self.is_current(generation) {
            return Ok(self.stale(generation));
        }

        let languages = resolve_all(
            self.source.as_ref(),
            &repos,
            self.config.language_concurrency,
        );
        let profile_html = render_profile(&profile);
        let view = render_repository_list(&repos, &languages);
        let total_pages = compute_total_pages(
            self.config.page_count,
            repos.len(),
            profile.public_repo_count,
            ITEMS_PER_PAGE,
        );

        let mut state = self.state();
        if !self.is_current(generation) {
            return Ok(self.stale(generation));
        }
        state.username = Some(username.to_string());
        state.page.total_pages = total_pages;
        state.page.current_page = page.clamp(1, total_pages);
        state.cards = view.cards;
        let page_state = state.page;
        drop(state);

        log::info!(
            "[session] cycle {} rendered {} repositories (page {}/{})",
            generation,
            repos.len(),
            page_state.current_page,
            page_state.total_pages
        );

        Ok(CycleOutcome::Rendered(CycleView {
            generation,
            profile_html,
            repositories_html: view.html,
            pagination_html: render_pagination(&page_state),
            page: page_state,
        }))
    }

    fn fail(&self, generation: u64, err: anyhow::Error) -> Result<CycleOutcome, CycleError> {
        let mut state = self.state();
        if !self.is_current(generation) {
            return Ok(self.stale(generation));
        }
        // The error panel replaces every card on screen.
        state.cards.clear();
        drop(state);

        log::warn!("[session] cycle {} failed: {:#}", generation, err);
        Err(CycleError::Fetch {
            generation,
            source: err,
        })
    }

    fn stale(&self, generation: u64) -> CycleOutcome {
        log::debug!(
            "[session] cycle {} superseded by {}; dropping results",
            generation,
            self.generation.load(Ordering::SeqCst)
        );
        CycleOutcome::Stale { generation }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/session.rs"]
mod tests;
