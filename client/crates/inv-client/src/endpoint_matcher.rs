use reqwest::Url;

/// Segment-aware path-prefix matching for endpoint allow-lists.
///
/// Patterns are relative to the API base path, so with a base URL of
/// `https://host/api` the pattern `/auth` matches `https://host/api/auth/google`
/// but not `https://host/api/authors`.
#[derive(Debug, Clone)]
pub struct EndpointMatcher {
    base_path: String,
    patterns: Vec<String>,
}

impl EndpointMatcher {
    pub fn new<I, S>(base_url: &str, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base_path = Url::parse(base_url)
            .map(|url| url.path().trim_end_matches('/').to_string())
            .unwrap_or_default();

        Self {
            base_path,
            patterns: patterns
                .into_iter()
                .map(|p| p.into().trim_end_matches('/').to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, url: &Url) -> bool {
        let path = url.path();
        let relative = path.strip_prefix(self.base_path.as_str()).unwrap_or(path);

        self.patterns.iter().any(|pattern| {
            relative == pattern
                || relative
                    .strip_prefix(pattern.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}
