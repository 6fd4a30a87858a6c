use serde::Serialize;

use crate::core::render::render_fetch_error;
use crate::core::session::{CycleError, CycleOutcome};

#[cfg(feature = "desktop")]
use std::sync::Arc;

#[cfg(feature = "desktop")]
use tauri::{Emitter, State};

#[cfg(feature = "desktop")]
use crate::core::session::{CycleObserver, ViewerSession};

pub const LOADING_EVENT: &str = "viewer://loading";

/// What the page should do with the result of one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CycleDto {
    Rendered {
        generation: u64,
        profile_html: String,
        repositories_html: String,
        pagination_html: String,
        current_page: u32,
        total_pages: u32,
    },
    Failed {
        generation: u64,
        repositories_html: String,
        detail: String,
    },
    /// Nothing was fetched and nothing on screen changes.
    Skipped { reason: String },
    Stale { generation: u64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadingEventDto {
    pub generation: u64,
    pub html: String,
}

#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
fn to_cycle_dto(result: Result<CycleOutcome, CycleError>) -> CycleDto {
    match result {
        Ok(CycleOutcome::Rendered(view)) => CycleDto::Rendered {
            generation: view.generation,
            profile_html: view.profile_html,
            repositories_html: view.repositories_html,
            pagination_html: view.pagination_html,
            current_page: view.page.current_page,
            total_pages: view.page.total_pages,
        },
        Ok(CycleOutcome::Stale { generation }) => CycleDto::Stale { generation },
        Err(CycleError::EmptyInput) => CycleDto::Skipped {
            reason: "empty_input".to_string(),
        },
        Err(CycleError::PageOutOfRange { .. }) => CycleDto::Skipped {
            reason: "page_out_of_range".to_string(),
        },
        Err(CycleError::Fetch { generation, source }) => CycleDto::Failed {
            generation,
            repositories_html: render_fetch_error(),
            detail: format_fetch_error(&source),
        },
    }
}

/// Short hint for the page plus the root cause.
#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
fn format_fetch_error(err: &anyhow::Error) -> String {
    let full = format!("{:#}", err);
    let root = err.root_cause().to_string();
    let lower = full.to_lowercase();

    let status = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<reqwest::Error>())
        .and_then(|e| e.status())
        .map(|s| s.as_u16());

    let hint = match status {
        Some(404) => "GitHub user not found.",
        Some(403) | Some(429) => "GitHub API rate limit reached or access denied. Try again later.",
        Some(code) if code >= 500 => "GitHub is having trouble right now. Try again later.",
        _ if lower.contains("404") || lower.contains("not found") => "GitHub user not found.",
        _ if lower.contains("failed to resolve")
            || lower.contains("could not resolve")
            || lower.contains("dns") =>
        {
            "Could not resolve api.github.com (DNS). Check your network or proxy."
        }
        _ if lower.contains("timed out") || lower.contains("timeout") => {
            "Connecting to GitHub timed out. Check your network or proxy."
        }
        _ if lower.contains("connection refused") || lower.contains("connection reset") => {
            "Connection to GitHub was refused or reset. Check your network or proxy."
        }
        _ => return full,
    };

    format!("{}\n\ndetail: {}", hint, root)
}

#[cfg(feature = "desktop")]
struct EventObserver<R: tauri::Runtime> {
    app: tauri::AppHandle<R>,
}

#[cfg(feature = "desktop")]
impl<R: tauri::Runtime> CycleObserver for EventObserver<R> {
    fn loading(&self, generation: u64, html: &str) {
        let payload = LoadingEventDto {
            generation,
            html: html.to_string(),
        };
        if let Err(err) = self.app.emit(LOADING_EVENT, payload) {
            log::warn!("[commands] failed to emit {}: {}", LOADING_EVENT, err);
        }
    }
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn lookup_user(
    app: tauri::AppHandle,
    session: State<'_, Arc<ViewerSession>>,
    username: String,
) -> Result<CycleDto, String> {
    let session = session.inner().clone();
    tauri::async_runtime::spawn_blocking(move || {
        let observer = EventObserver { app };
        to_cycle_dto(session.lookup(&username, &observer))
    })
    .await
    .map_err(|err| err.to_string())
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub async fn request_page(
    app: tauri::AppHandle,
    session: State<'_, Arc<ViewerSession>>,
    page: u32,
) -> Result<CycleDto, String> {
    let session = session.inner().clone();
    tauri::async_runtime::spawn_blocking(move || {
        let observer = EventObserver { app };
        to_cycle_dto(session.request_page(page, &observer))
    })
    .await
    .map_err(|err| err.to_string())
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub fn filter_repositories(session: State<'_, Arc<ViewerSession>>, term: String) -> Vec<bool> {
    session.filter(&term)
}

#[cfg(test)]
#[path = "tests/commands.rs"]
mod tests;
