use crate::domain::{SourceKind, TrendItem};
use crate::errors::TrendResult;
use crate::sources::traits::{FetchContext, TrendSource};
use crate::sources::youtube::YouTubeApi;

/// Entertainment, music, sports, news/politics, gaming
const CATEGORY_IDS: [u32; 5] = [24, 10, 17, 25, 20];

/// The single most popular video per fixed topic category
pub struct CategoryVideosSource {
    api: YouTubeApi,
}

impl CategoryVideosSource {
    pub fn new(api: YouTubeApi) -> Self {
        Self { api }
    }
}

impl TrendSource for CategoryVideosSource {
    fn kind(&self) -> SourceKind {
        SourceKind::CategoryVideos
    }

    fn fetch(&self, ctx: &FetchContext) -> TrendResult<Vec<TrendItem>> {
        let mut items = Vec::with_capacity(CATEGORY_IDS.len());

        for category_id in CATEGORY_IDS {
            items.extend(self.api.most_popular(&ctx.region, category_id)?);
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let source = CategoryVideosSource::new(YouTubeApi::new("k"));
        assert_eq!(source.kind(), SourceKind::CategoryVideos);
    }

    #[test]
    fn test_category_ids_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for id in CATEGORY_IDS {
            assert!(seen.insert(id), "duplicate category id {}", id);
        }
    }
}
