use super::*;

#[test]
fn keeps_only_viewer_keys() {
    let settings = DotenvSettings::parse(
        r#"
# comment
GITHUB_PROFILE_VIEWER_USER_AGENT=tester
export GITHUB_PROFILE_VIEWER_PAGE_COUNT="public_repos"
GITHUB_PROFILE_VIEWER_API_BASE='http://localhost:8080/users'
GITHUB_TOKEN=secret
not a pair
=orphan
"#,
    );

    let keys: Vec<_> = settings.keys().collect();
    assert_eq!(
        keys,
        vec![
            "GITHUB_PROFILE_VIEWER_API_BASE",
            "GITHUB_PROFILE_VIEWER_PAGE_COUNT",
            "GITHUB_PROFILE_VIEWER_USER_AGENT",
        ]
    );
    assert_eq!(settings.get("GITHUB_PROFILE_VIEWER_PAGE_COUNT"), Some("public_repos"));
    assert_eq!(
        settings.get("GITHUB_PROFILE_VIEWER_API_BASE"),
        Some("http://localhost:8080/users")
    );
    assert_eq!(settings.get("GITHUB_TOKEN"), None);
    assert_eq!(settings.source(), None);
}

#[test]
fn later_lines_win_and_lone_quote_is_kept() {
    let settings = DotenvSettings::parse(
        "GITHUB_PROFILE_VIEWER_USER_AGENT=first\nGITHUB_PROFILE_VIEWER_USER_AGENT=\"\nGITHUB_PROFILE_VIEWER_TIMEOUT_SECS = 12 \n",
    );
    assert_eq!(settings.get("GITHUB_PROFILE_VIEWER_USER_AGENT"), Some("\""));
    assert_eq!(settings.get("GITHUB_PROFILE_VIEWER_TIMEOUT_SECS"), Some("12"));
}

#[test]
fn load_records_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "GITHUB_PROFILE_VIEWER_LANGUAGE_CONCURRENCY=2\n").unwrap();

    let settings = DotenvSettings::load(&path).unwrap();
    assert_eq!(settings.source(), Some(path.as_path()));
    assert_eq!(settings.get("GITHUB_PROFILE_VIEWER_LANGUAGE_CONCURRENCY"), Some("2"));
}

#[test]
fn missing_file_is_an_error_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.env");

    let err = DotenvSettings::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.env"));
}

#[test]
fn default_path_is_under_app_dir() {
    if let Some(path) = DotenvSettings::default_path() {
        assert!(path.ends_with(".github-profile-viewer/.env"));
    }
}
