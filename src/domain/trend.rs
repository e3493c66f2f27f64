use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendKind {
    Video,
    SocialPost,
    Keyword,
}

impl TrendKind {
    /// Platform-native items carry durable ids worth remembering across runs;
    /// keyword trends are ephemeral and never enter the seen set.
    pub fn is_remembered(&self) -> bool {
        !matches!(self, TrendKind::Keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendItem {
    pub kind: TrendKind,
    pub source_id: String,
    pub title: String,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl TrendItem {
    pub fn new(kind: TrendKind, source_id: String, title: String) -> Self {
        Self {
            kind,
            source_id,
            title,
            url: None,
            thumbnail_url: None,
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail_url: Option<String>) -> Self {
        self.thumbnail_url = thumbnail_url;
        self
    }
}

/// Identities of the configurable trend adapters, in registration syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    RecentVideos,
    CategoryVideos,
    KeywordVideos,
    TrendingPage,
    SocialTrends,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::RecentVideos => "recent-videos",
            SourceKind::CategoryVideos => "category-videos",
            SourceKind::KeywordVideos => "keyword-videos",
            SourceKind::TrendingPage => "trending-page",
            SourceKind::SocialTrends => "social-trends",
        }
    }

    pub fn all() -> &'static [SourceKind] {
        &[
            SourceKind::RecentVideos,
            SourceKind::CategoryVideos,
            SourceKind::KeywordVideos,
            SourceKind::TrendingPage,
            SourceKind::SocialTrends,
        ]
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recent-videos" | "recent" => Ok(SourceKind::RecentVideos),
            "category-videos" | "categories" => Ok(SourceKind::CategoryVideos),
            "keyword-videos" | "keywords" => Ok(SourceKind::KeywordVideos),
            "trending-page" | "page" => Ok(SourceKind::TrendingPage),
            "social-trends" | "social" => Ok(SourceKind::SocialTrends),
            _ => Err(format!("Unknown source kind: {}", s)),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
