use crate::config::Config;
use crate::domain::{SourceKind, TrendItem};
use crate::errors::TrendResult;
use crate::sources::traits::{FetchContext, TrendSource};
use crate::sources::{
    categories::CategoryVideosSource, keyword_search::KeywordVideosSource,
    recent::RecentVideosSource, trending_page::TrendingPageSource,
    twitter::SocialTrendsSource, youtube::YouTubeApi,
};

/// The enabled adapters for one run.
///
/// Video-producing sources keep their configured priority order; the
/// keyword-trend source is held separately because its output feeds both the
/// keyword-search adapter and the digest's trend section. Any adapter error
/// degrades to an empty contribution here and never reaches the caller.
pub struct SourceRegistry {
    video_sources: Vec<Box<dyn TrendSource>>,
    keyword_source: Option<Box<dyn TrendSource>>,
}

impl SourceRegistry {
    /// Build the adapters named by the configuration, in its order.
    /// A credential missing for an enabled source is a configuration error.
    pub fn from_config(config: &Config) -> TrendResult<Self> {
        let mut registry = Self {
            video_sources: Vec::new(),
            keyword_source: None,
        };

        for kind in &config.sources {
            match kind {
                SourceKind::RecentVideos => {
                    registry.register(Box::new(RecentVideosSource::new(YouTubeApi::new(
                        config.require_youtube_key()?,
                    ))));
                }
                SourceKind::CategoryVideos => {
                    registry.register(Box::new(CategoryVideosSource::new(YouTubeApi::new(
                        config.require_youtube_key()?,
                    ))));
                }
                SourceKind::KeywordVideos => {
                    registry.register(Box::new(KeywordVideosSource::new(
                        YouTubeApi::new(config.require_youtube_key()?),
                        config.keyword_limit,
                    )));
                }
                SourceKind::TrendingPage => {
                    registry.register(Box::new(TrendingPageSource::new(
                        config.require_trending_page_url()?,
                    )));
                }
                SourceKind::SocialTrends => {
                    registry.register_keyword(Box::new(SocialTrendsSource::new(
                        config.require_twitter_token()?,
                        config.keyword_limit,
                        config.retry,
                    )));
                }
            }
        }

        Ok(registry)
    }

    pub fn register(&mut self, source: Box<dyn TrendSource>) {
        self.video_sources.push(source);
    }

    pub fn register_keyword(&mut self, source: Box<dyn TrendSource>) {
        self.keyword_source = Some(source);
    }

    pub fn is_empty(&self) -> bool {
        self.video_sources.is_empty() && self.keyword_source.is_none()
    }

    /// Keyword trends, or empty if the source is disabled, failing or slow
    pub fn fetch_keywords(&self, ctx: &FetchContext) -> Vec<TrendItem> {
        let Some(source) = &self.keyword_source else {
            return Vec::new();
        };

        Self::fetch_soft(source.as_ref(), ctx)
    }

    /// One candidate batch per video source, in priority order.
    /// A failing source contributes an empty batch; sources past the run
    /// deadline are skipped entirely.
    pub fn fetch_videos(&self, ctx: &FetchContext) -> Vec<Vec<TrendItem>> {
        let mut batches = Vec::with_capacity(self.video_sources.len());

        for source in &self.video_sources {
            if ctx.expired() {
                tracing::warn!(source = source.kind().as_str(), "run deadline passed, skipping");
                batches.push(Vec::new());
                continue;
            }

            batches.push(Self::fetch_soft(source.as_ref(), ctx));
        }

        batches
    }

    fn fetch_soft(source: &dyn TrendSource, ctx: &FetchContext) -> Vec<TrendItem> {
        match source.fetch(ctx) {
            Ok(items) => {
                tracing::debug!(
                    source = source.kind().as_str(),
                    count = items.len(),
                    "fetched candidates"
                );
                items
            }
            Err(e) => {
                tracing::warn!(source = source.kind().as_str(), "fetch failed: {}", e);
                Vec::new()
            }
        }
    }
}
