//! Markup for the profile panel, repository cards and status placeholders.
//!
//! Every function returns a complete fragment; callers replace the target container
//! with it instead of patching what is already there.

use anyhow::Result;
use time::macros::format_description;
use time::OffsetDateTime;

use super::models::{LanguageSet, Repository, UserProfile};

pub const NO_NAME: &str = "No Name";
pub const NO_BIO: &str = "No bio available";
pub const NO_LOCATION: &str = "Not specified";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_LANGUAGES: &str = "No languages";
pub const NO_TOPICS: &str = "No topics";
pub const NO_REPOSITORIES_HTML: &str = "<p>No repositories found.</p>";
pub const FETCH_ERROR_HTML: &str = "<p>Error fetching data. Please try again.</p>";
pub const LOADING_USER: &str = "Loading user data...";
pub const LOADING_REPOSITORIES: &str = "Loading repositories...";

/// One rendered card: the text a reader sees plus the card's markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedCard {
    pub title: String,
    pub description: String,
    pub html: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepositoryView {
    pub html: String,
    pub cards: Vec<RenderedCard>,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `Tue Jan 25 2011`, the same shape as a browser's `Date.toDateString()`.
pub fn format_join_date(at: OffsetDateTime) -> String {
    let format = format_description!("[weekday repr:short] [month repr:short] [day] [year]");
    at.format(&format)
        .unwrap_or_else(|_| at.date().to_string())
}

pub fn render_profile(user: &UserProfile) -> String {
    let name = user.name.as_deref().unwrap_or(NO_NAME);
    let bio = user.bio.as_deref().unwrap_or(NO_BIO);
    let location = user.location.as_deref().unwrap_or(NO_LOCATION);

    let twitter = match &user.twitter_handle {
        Some(handle) => format!(
            r#"<a href="https://twitter.com/{}" target="_blank" class="me-2" data-external>Twitter</a>"#,
            escape_html(&urlencoding::encode(handle))
        ),
        None => String::new(),
    };
    let github = format!(
        r#"<a href="https://github.com/{}" target="_blank" class="me-2" data-external>GitHub</a>"#,
        escape_html(&urlencoding::encode(&user.login))
    );

    format!(
        r#"<div class="profile-left">
    <img src="{avatar}" alt="Profile Image" class="img-fluid rounded-circle">
</div>
<div class="profile-right">
    <h2>{name}</h2>
    <p>{bio}</p>
    <p>Location: {location}</p>
    <p>Followers: {followers}</p>
    <p>Following: {following}</p>
    <p>Public Repositories: {repos}</p>
    <p>Joined Github: {joined}</p>
    <div class="social-media">{twitter}{github}</div>
</div>"#,
        avatar = escape_html(&user.avatar_url),
        name = escape_html(name),
        bio = escape_html(bio),
        location = escape_html(location),
        followers = user.followers,
        following = user.following,
        repos = user.public_repo_count,
        joined = format_join_date(user.created_at),
        twitter = twitter,
        github = github,
    )
}

fn badges(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        return fallback.to_string();
    }
    items
        .iter()
        .map(|item| format!(r#"<span class="badge bg-secondary">{}</span>"#, escape_html(item)))
        .collect()
}

/// Builds one card. Fails for records that cannot be shown (no name).
pub fn render_card(index: usize, repo: &Repository, languages: &LanguageSet) -> Result<RenderedCard> {
    let title = repo.name.trim();
    if title.is_empty() {
        anyhow::bail!("repository without a name (languages_url={})", repo.languages_url);
    }
    let description = repo
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);

    let html = format!(
        r#"<div class="col-md-6 mb-4">
    <div class="card" data-card-index="{index}">
        <div class="card-body">
            <h5 class="card-title">{title}</h5>
            <p class="card-text">{description}</p>
            <div class="languages-container">
                <p class="card-text">Languages:</p>
                {languages}
            </div>
            <div class="topics-container">
                <p class="card-text">Topics:</p>
                {topics}
            </div>
            <p class="card-text">Stars: {stars}</p>
        </div>
    </div>
</div>"#,
        index = index,
        title = escape_html(title),
        description = escape_html(description),
        languages = badges(languages.names(), NO_LANGUAGES),
        topics = badges(&repo.topics, NO_TOPICS),
        stars = repo.star_count,
    );

    Ok(RenderedCard {
        title: title.to_string(),
        description: description.to_string(),
        html,
    })
}

/// Cards in input order. `languages[i]` belongs to `repos[i]`; a card that fails to
/// build is skipped and logged.
pub fn render_repository_list(repos: &[Repository], languages: &[LanguageSet]) -> RepositoryView {
    if repos.is_empty() {
        return RepositoryView {
            html: NO_REPOSITORIES_HTML.to_string(),
            cards: Vec::new(),
        };
    }

    let empty = LanguageSet::default();
    let mut cards: Vec<RenderedCard> = Vec::with_capacity(repos.len());
    for (i, repo) in repos.iter().enumerate() {
        let langs = languages.get(i).unwrap_or(&empty);
        match render_card(cards.len(), repo, langs) {
            Ok(card) => cards.push(card),
            Err(err) => log::error!("[render] skipping card #{}: {:#}", i, err),
        }
    }

    if cards.is_empty() {
        return RepositoryView {
            html: NO_REPOSITORIES_HTML.to_string(),
            cards,
        };
    }

    let html = cards
        .iter()
        .map(|card| card.html.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    RepositoryView { html, cards }
}

pub fn render_loading(message: &str) -> String {
    format!(
        r#"<div class="spinner-border" role="status"><span class="visually-hidden">{}</span></div>"#,
        escape_html(message)
    )
}

pub fn render_fetch_error() -> String {
    FETCH_ERROR_HTML.to_string()
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
