use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

use super::github_api::GithubSource;
use super::models::{LanguageSet, Repository};

/// Languages of one repository. A failed lookup is logged and yields an empty set so
/// the remaining cards still render.
pub fn resolve_languages(source: &dyn GithubSource, repo: &Repository) -> LanguageSet {
    match source.fetch_languages(&repo.languages_url) {
        Ok(set) => set,
        Err(err) => {
            log::warn!(
                "[languages] lookup failed repo={} url={} err={:#}",
                repo.name,
                repo.languages_url,
                err
            );
            LanguageSet::default()
        }
    }
}

/// Resolves every repository's languages with at most `concurrency` lookups in
/// flight. Output order matches `repos`; each `languages_url` is requested once.
pub fn resolve_all(
    source: &dyn GithubSource,
    repos: &[Repository],
    concurrency: usize,
) -> Vec<LanguageSet> {
    if repos.is_empty() {
        return Vec::new();
    }
    let workers = concurrency.clamp(1, repos.len());
    if workers == 1 {
        return repos
            .iter()
            .map(|repo| resolve_languages(source, repo))
            .collect();
    }

    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, LanguageSet)>();

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            scope.spawn(move || loop {
                let idx = next.fetch_add(1, Ordering::Relaxed);
                let Some(repo) = repos.get(idx) else {
                    break;
                };
                if tx.send((idx, resolve_languages(source, repo))).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut out = vec![LanguageSet::default(); repos.len()];
    for (idx, set) in rx {
        out[idx] = set;
    }
    out
}

#[cfg(test)]
#[path = "tests/languages.rs"]
mod tests;
