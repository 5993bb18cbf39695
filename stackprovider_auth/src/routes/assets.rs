use regex::Regex;
use std::sync::LazyLock;

const EXCLUDED_PREFIXES: [&str; 4] = [
    "/_next/static",
    "/_next/image",
    "/favicon.ico",
    "/manifest.json",
];

static ASSET_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(?:svg|png|jpg|jpeg|gif|webp|ico|css|js)$")
        .expect("static asset pattern is valid")
});

/// Paths that skip the session gate entirely
#[derive(Debug, Clone)]
pub struct StaticAssetFilter {
    prefixes: Vec<String>,
}

impl Default for StaticAssetFilter {
    fn default() -> Self {
        Self {
            prefixes: EXCLUDED_PREFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StaticAssetFilter {
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
            || ASSET_EXTENSION.is_match(path)
    }
}
