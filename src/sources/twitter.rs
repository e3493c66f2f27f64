use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{SourceKind, TrendItem, TrendKind};
use crate::errors::{TrendError, TrendResult};
use crate::retry::RetryPolicy;
use crate::sources::traits::{FetchContext, TrendSource};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1";

/// Worldwide trend listing (WOEID 1)
const WORLDWIDE_WOEID: u32 = 1;

/// Trending keywords from the social platform's trends endpoint.
///
/// The endpoint throttles aggressively, so fetches go through the bounded
/// retry policy before degrading to an empty contribution upstream.
pub struct SocialTrendsSource {
    client: Client,
    bearer_token: String,
    base_url: String,
    max_trends: usize,
    retry: RetryPolicy,
}

impl SocialTrendsSource {
    pub fn new(bearer_token: &str, max_trends: usize, retry: RetryPolicy) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            bearer_token: bearer_token.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_trends,
            retry,
        }
    }

    fn fetch_once(&self) -> TrendResult<String> {
        let response = self
            .client
            .get(format!("{}/trends/place.json", self.base_url))
            .query(&[("id", WORLDWIDE_WOEID.to_string())])
            .bearer_auth(&self.bearer_token)
            .send()?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TrendError::RateLimited("twitter".to_string()));
        }
        if !status.is_success() {
            return Err(TrendError::Api(format!(
                "twitter trends returned HTTP {}",
                status
            )));
        }

        Ok(response.text()?)
    }
}

#[derive(Debug, Deserialize)]
struct TrendsEnvelope {
    #[serde(default)]
    trends: Vec<RawTrend>,
}

#[derive(Debug, Deserialize)]
struct RawTrend {
    name: String,
    url: Option<String>,
}

fn search_link(name: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
    format!("https://twitter.com/search?q={}&src=trend_click", encoded)
}

fn parse_trends(body: &str, max_trends: usize) -> TrendResult<Vec<TrendItem>> {
    let envelopes: Vec<TrendsEnvelope> =
        serde_json::from_str(body).map_err(|e| TrendError::Parse(e.to_string()))?;

    let trends = envelopes.into_iter().next().map(|e| e.trends).unwrap_or_default();

    Ok(trends
        .into_iter()
        .take(max_trends)
        .map(|trend| {
            let link = trend
                .url
                .unwrap_or_else(|| search_link(&trend.name));
            TrendItem::new(TrendKind::Keyword, trend.name.clone(), trend.name)
                .with_url(Some(link))
        })
        .collect())
}

impl TrendSource for SocialTrendsSource {
    fn kind(&self) -> SourceKind {
        SourceKind::SocialTrends
    }

    fn fetch(&self, _ctx: &FetchContext) -> TrendResult<Vec<TrendItem>> {
        let body = self.retry.run(|| self.fetch_once())?;
        parse_trends(&body, self.max_trends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRENDS_BODY: &str = r##"[
        {
            "trends": [
                {"name": "#WorldCup", "url": "https://twitter.com/search?q=%23WorldCup", "tweet_volume": 120000},
                {"name": "space launch", "url": null, "tweet_volume": null},
                {"name": "Third", "url": "https://twitter.com/search?q=Third", "tweet_volume": 900},
                {"name": "Fourth", "url": "https://twitter.com/search?q=Fourth", "tweet_volume": 1}
            ],
            "as_of": "2026-08-06T09:00:00Z",
            "locations": [{"name": "Worldwide", "woeid": 1}]
        }
    ]"##;

    #[test]
    fn test_parse_takes_top_n_in_order() {
        let items = parse_trends(TRENDS_BODY, 3).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "#WorldCup");
        assert_eq!(items[1].title, "space launch");
        assert!(items.iter().all(|i| i.kind == TrendKind::Keyword));
    }

    #[test]
    fn test_parse_constructs_missing_search_links() {
        let items = parse_trends(TRENDS_BODY, 3).unwrap();

        assert_eq!(
            items[1].url.as_deref(),
            Some("https://twitter.com/search?q=space+launch&src=trend_click")
        );
        // the platform-provided link is preferred when present
        assert_eq!(
            items[0].url.as_deref(),
            Some("https://twitter.com/search?q=%23WorldCup")
        );
    }

    #[test]
    fn test_parse_empty_envelope() {
        assert!(parse_trends("[]", 3).unwrap().is_empty());
        assert!(parse_trends(r#"[{"trends": []}]"#, 3).unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        assert!(matches!(
            parse_trends(r#"{"errors": []}"#, 3),
            Err(TrendError::Parse(_))
        ));
    }

    #[test]
    fn test_search_link_percent_encodes() {
        assert_eq!(
            search_link("hot trend"),
            "https://twitter.com/search?q=hot+trend&src=trend_click"
        );
    }

    #[test]
    fn test_kind() {
        let source = SocialTrendsSource::new("token", 3, RetryPolicy::default());
        assert_eq!(source.kind(), SourceKind::SocialTrends);
    }
}
