use time::OffsetDateTime;

/// Profile summary for one GitHub account, as returned by `/users/{username}`.
#[derive(Clone, Debug, PartialEq)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repo_count: u64,
    pub created_at: OffsetDateTime,
    pub avatar_url: String,
    pub twitter_handle: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub star_count: u64,
    pub languages_url: String,
}

/// Language names of one repository, in the key order of the languages response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguageSet(Vec<String>);

impl LanguageSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !out.contains(&name) {
                out.push(name);
            }
        }
        Self(out)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}
