use crate::domain::{SourceKind, TrendItem};
use crate::errors::TrendResult;
use crate::sources::traits::{FetchContext, TrendSource};
use crate::sources::youtube::YouTubeApi;

/// Top video match per harvested trend keyword.
///
/// Input keywords are capped to bound API cost; with no keywords in the
/// context the adapter contributes nothing.
pub struct KeywordVideosSource {
    api: YouTubeApi,
    max_keywords: usize,
}

impl KeywordVideosSource {
    pub fn new(api: YouTubeApi, max_keywords: usize) -> Self {
        Self { api, max_keywords }
    }
}

impl TrendSource for KeywordVideosSource {
    fn kind(&self) -> SourceKind {
        SourceKind::KeywordVideos
    }

    fn fetch(&self, ctx: &FetchContext) -> TrendResult<Vec<TrendItem>> {
        let mut items = Vec::new();

        for keyword in ctx.keywords.iter().take(self.max_keywords) {
            items.extend(self.api.search_top(keyword, &ctx.region)?);
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let source = KeywordVideosSource::new(YouTubeApi::new("k"), 3);
        assert_eq!(source.kind(), SourceKind::KeywordVideos);
    }

    #[test]
    fn test_no_keywords_yields_empty_without_network() {
        let source = KeywordVideosSource::new(YouTubeApi::new("k"), 3);
        let ctx = FetchContext::new("KR".to_string(), 10);

        let items = source.fetch(&ctx).unwrap();
        assert!(items.is_empty());
    }
}
