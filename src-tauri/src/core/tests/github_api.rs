use mockito::Matcher;

use super::{GithubClient, GithubSource};
use crate::core::config::ViewerConfig;

fn client_for(server: &mockito::Server) -> GithubClient {
    let config = ViewerConfig {
        api_base: format!("{}/users", server.url()),
        ..ViewerConfig::default()
    };
    GithubClient::new(&config).unwrap()
}

fn json_user() -> String {
    r#"{
  "login": "octocat",
  "id": 583231,
  "name": "The Octocat",
  "bio": "",
  "location": null,
  "followers": 10,
  "following": 2,
  "public_repos": 8,
  "created_at": "2011-01-25T18:44:36Z",
  "avatar_url": "https://avatars.example.com/u/583231",
  "twitter_username": "octo"
}"#
    .to_string()
}

#[test]
fn maps_profile_fields() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/users/octocat")
        .match_header("user-agent", "github-profile-viewer")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json_user())
        .create();

    let user = client_for(&server).fetch_profile("octocat").unwrap();
    assert_eq!(user.login, "octocat");
    assert_eq!(user.name.as_deref(), Some("The Octocat"));
    assert_eq!(user.bio, None, "empty bio is treated as missing");
    assert_eq!(user.location, None);
    assert_eq!(user.followers, 10);
    assert_eq!(user.public_repo_count, 8);
    assert_eq!(user.created_at.year(), 2011);
    assert_eq!(user.twitter_handle.as_deref(), Some("octo"));
}

#[test]
fn profile_http_error_has_context() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/users/ghost")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create();

    let err = client_for(&server).fetch_profile("ghost").unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("GitHub user returned error"), "{msg}");
    assert!(msg.contains("404"), "{msg}");
}

#[test]
fn profile_with_bad_timestamp_fails() {
    let mut server = mockito::Server::new();
    let body = json_user().replace("2011-01-25T18:44:36Z", "yesterday");
    let _m = server
        .mock("GET", "/users/octocat")
        .with_status(200)
        .with_body(body)
        .create();

    let err = client_for(&server).fetch_profile("octocat").unwrap_err();
    assert!(format!("{:#}", err).contains("created_at"));
}

#[test]
fn repository_list_sends_page_and_size() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("per_page".into(), "9".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
  {"name": "hello", "description": "first", "topics": ["x", "y"], "stargazers_count": 5,
   "languages_url": "https://example.com/repos/octocat/hello/languages"},
  {"name": "bare", "description": null, "stargazers_count": 0,
   "languages_url": "https://example.com/repos/octocat/bare/languages"}
]"#,
        )
        .create();

    let repos = client_for(&server)
        .fetch_repositories("octocat", 2, 9)
        .unwrap();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "hello");
    assert_eq!(repos[0].topics, vec!["x", "y"]);
    assert_eq!(repos[0].star_count, 5);
    assert!(repos[1].topics.is_empty(), "missing topics is an empty list");
    assert_eq!(repos[1].description, None);
}

#[test]
fn repository_list_error_has_context() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("oops")
        .create();

    let err = client_for(&server)
        .fetch_repositories("octocat", 1, 9)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("GitHub repository list returned error"));
}

#[test]
fn languages_keep_response_key_order() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/repos/octocat/hello/languages")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Rust": 1000, "C": 10, "Assembly": 999}"#)
        .create();

    let url = format!("{}/repos/octocat/hello/languages", server.url());
    let langs = client_for(&server).fetch_languages(&url).unwrap();
    assert_eq!(langs.names(), &["Rust", "C", "Assembly"]);
}
