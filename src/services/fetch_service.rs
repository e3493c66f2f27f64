use std::collections::HashSet;
use std::time::Instant;

use crate::config::Config;
use crate::domain::{SeenSet, TrendItem};
use crate::sources::{FetchContext, SourceRegistry};

/// Everything one run collected: the aggregated platform items and the
/// keyword-only trend list for the digest's trend section.
#[derive(Debug, Clone, Default)]
pub struct TrendBatch {
    pub videos: Vec<TrendItem>,
    pub keywords: Vec<TrendItem>,
}

impl TrendBatch {
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty() && self.keywords.is_empty()
    }
}

pub struct FetchService {
    registry: SourceRegistry,
}

impl FetchService {
    pub fn new(registry: SourceRegistry) -> Self {
        Self { registry }
    }

    /// Run every enabled adapter and aggregate the results.
    ///
    /// Keyword trends are harvested first so the keyword-search adapter can
    /// consume them; the seen set is mutated in place and the caller decides
    /// when to persist it.
    pub fn collect(&self, config: &Config, seen: &mut SeenSet) -> TrendBatch {
        let mut ctx = FetchContext::new(config.region.clone(), config.candidate_limit);
        ctx.deadline = Some(Instant::now() + config.run_deadline);

        let keywords = self.registry.fetch_keywords(&ctx);
        ctx.keywords = keywords.iter().map(|k| k.title.clone()).collect();

        let batches = self.registry.fetch_videos(&ctx);
        let videos = aggregate(batches, seen, config.digest_limit);

        TrendBatch { videos, keywords }
    }
}

/// Merge adapter batches into the bounded digest list.
///
/// Batches are consumed in adapter priority order. Platform-native items
/// already in the seen set are dropped; duplicates keep their first
/// occurrence; the result is capped at `limit`. The `source_id` of every
/// platform-native item that made the cut is registered in the seen set so
/// later runs exclude it. Keyword items pass through unremembered.
pub fn aggregate(
    batches: Vec<Vec<TrendItem>>,
    seen: &mut SeenSet,
    limit: usize,
) -> Vec<TrendItem> {
    let mut picked: Vec<TrendItem> = Vec::new();
    let mut in_digest: HashSet<String> = HashSet::new();

    'outer: for batch in batches {
        for item in batch {
            if picked.len() == limit {
                break 'outer;
            }
            if in_digest.contains(&item.source_id) {
                continue;
            }
            if item.kind.is_remembered() && seen.contains(&item.source_id) {
                continue;
            }

            in_digest.insert(item.source_id.clone());
            picked.push(item);
        }
    }

    for item in &picked {
        if item.kind.is_remembered() {
            seen.insert(item.source_id.clone());
        }
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrendKind;

    fn video(id: &str) -> TrendItem {
        TrendItem::new(TrendKind::Video, id.to_string(), format!("Video {}", id))
    }

    fn keyword(name: &str) -> TrendItem {
        TrendItem::new(TrendKind::Keyword, name.to_string(), name.to_string())
    }

    fn ids(items: &[TrendItem]) -> Vec<&str> {
        items.iter().map(|i| i.source_id.as_str()).collect()
    }

    #[test]
    fn test_first_occurrence_wins_across_batches() {
        let mut seen = SeenSet::new();
        let batches = vec![
            vec![video("v1"), video("v2")],
            vec![video("v2"), video("v3")],
        ];

        let result = aggregate(batches, &mut seen, 3);

        assert_eq!(ids(&result), vec!["v1", "v2", "v3"]);
    }

    #[test]
    fn test_limit_caps_result_size() {
        let mut seen = SeenSet::new();
        let batches = vec![
            vec![video("a"), video("b"), video("c")],
            vec![video("d"), video("e")],
        ];

        let result = aggregate(batches, &mut seen, 2);

        assert_eq!(ids(&result), vec!["a", "b"]);
    }

    #[test]
    fn test_seen_items_are_excluded_and_result_registered() {
        let mut seen = SeenSet::from_ids(vec!["v1".to_string()]);
        let batches = vec![vec![video("v1"), video("v2")]];

        let result = aggregate(batches, &mut seen, 5);

        assert_eq!(ids(&result), vec!["v2"]);
        assert!(seen.contains("v1"));
        assert!(seen.contains("v2"));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_keywords_bypass_seen_set() {
        let mut seen = SeenSet::from_ids(vec!["hot topic".to_string()]);
        let batches = vec![vec![keyword("hot topic")]];

        let result = aggregate(batches, &mut seen, 5);

        // keyword trends are neither excluded nor remembered
        assert_eq!(ids(&result), vec!["hot topic"]);
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_truncated_items_are_not_registered() {
        let mut seen = SeenSet::new();
        let batches = vec![vec![video("kept"), video("cut")]];

        aggregate(batches, &mut seen, 1);

        assert!(seen.contains("kept"));
        assert!(!seen.contains("cut"));
    }

    #[test]
    fn test_social_posts_are_remembered() {
        let mut seen = SeenSet::new();
        let post = TrendItem::new(
            TrendKind::SocialPost,
            "https://example.com/p/1".to_string(),
            "Post".to_string(),
        );

        aggregate(vec![vec![post]], &mut seen, 5);

        assert!(seen.contains("https://example.com/p/1"));
    }

    #[test]
    fn test_empty_batches() {
        let mut seen = SeenSet::new();
        assert!(aggregate(Vec::new(), &mut seen, 5).is_empty());
        assert!(aggregate(vec![Vec::new(), Vec::new()], &mut seen, 5).is_empty());
    }
}
