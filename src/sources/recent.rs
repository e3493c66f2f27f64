use chrono::{SecondsFormat, Utc};

use crate::domain::{SourceKind, TrendItem};
use crate::errors::TrendResult;
use crate::sources::traits::{FetchContext, TrendSource};
use crate::sources::youtube::YouTubeApi;

/// How far back the recency window reaches
const WINDOW_HOURS: i64 = 24;

/// Most-viewed videos published within the last day
pub struct RecentVideosSource {
    api: YouTubeApi,
}

impl RecentVideosSource {
    pub fn new(api: YouTubeApi) -> Self {
        Self { api }
    }

    fn published_after() -> String {
        (Utc::now() - chrono::Duration::hours(WINDOW_HOURS))
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl TrendSource for RecentVideosSource {
    fn kind(&self) -> SourceKind {
        SourceKind::RecentVideos
    }

    fn fetch(&self, ctx: &FetchContext) -> TrendResult<Vec<TrendItem>> {
        self.api
            .search_recent(&ctx.region, &Self::published_after(), ctx.limit)
    }
}
