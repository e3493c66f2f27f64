use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{TrendItem, TrendKind};
use crate::errors::{TrendError, TrendResult};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Typed client for the subset of the YouTube Data API v3 the adapters use:
/// `search.list` and `videos.list`.
#[derive(Clone)]
pub struct YouTubeApi {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeApi {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Videos published after `published_after` (RFC 3339), most viewed first
    pub fn search_recent(
        &self,
        region: &str,
        published_after: &str,
        limit: usize,
    ) -> TrendResult<Vec<TrendItem>> {
        let body = self.get(
            "search",
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("order", "viewCount"),
                ("publishedAfter", published_after),
                ("regionCode", region),
                ("maxResults", &limit.to_string()),
            ],
        )?;

        parse_search(&body)
    }

    /// Top search match for a free-text query
    pub fn search_top(&self, query: &str, region: &str) -> TrendResult<Vec<TrendItem>> {
        let body = self.get(
            "search",
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("order", "viewCount"),
                ("q", query),
                ("regionCode", region),
                ("maxResults", "1"),
            ],
        )?;

        parse_search(&body)
    }

    /// The single most popular video in one category chart
    pub fn most_popular(&self, region: &str, category_id: u32) -> TrendResult<Vec<TrendItem>> {
        let body = self.get(
            "videos",
            &[
                ("part", "snippet"),
                ("chart", "mostPopular"),
                ("regionCode", region),
                ("videoCategoryId", &category_id.to_string()),
                ("maxResults", "1"),
            ],
        )?;

        parse_videos(&body)
    }

    fn get(&self, resource: &str, params: &[(&str, &str)]) -> TrendResult<String> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, resource))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TrendError::RateLimited("youtube".to_string()));
        }
        if !status.is_success() {
            return Err(TrendError::Api(format!(
                "youtube {} returned HTTP {}",
                resource, status
            )));
        }

        Ok(response.text()?)
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: SearchResultId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchResultId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoResult>,
}

#[derive(Debug, Deserialize)]
struct VideoResult {
    id: String,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    #[serde(rename = "default")]
    fallback: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl Thumbnails {
    fn best(self) -> Option<String> {
        self.high.or(self.medium).or(self.fallback).map(|t| t.url)
    }
}

fn parse_search(body: &str) -> TrendResult<Vec<TrendItem>> {
    let response: SearchListResponse =
        serde_json::from_str(body).map_err(|e| TrendError::Parse(e.to_string()))?;

    Ok(response
        .items
        .into_iter()
        .filter_map(|result| {
            // Channel and playlist hits have no videoId
            let video_id = result.id.video_id?;
            Some(
                TrendItem::new(TrendKind::Video, video_id.clone(), result.snippet.title)
                    .with_url(Some(watch_url(&video_id)))
                    .with_thumbnail(result.snippet.thumbnails.best()),
            )
        })
        .collect())
}

fn parse_videos(body: &str) -> TrendResult<Vec<TrendItem>> {
    let response: VideoListResponse =
        serde_json::from_str(body).map_err(|e| TrendError::Parse(e.to_string()))?;

    Ok(response
        .items
        .into_iter()
        .map(|result| {
            TrendItem::new(TrendKind::Video, result.id.clone(), result.snippet.title)
                .with_url(Some(watch_url(&result.id)))
                .with_thumbnail(result.snippet.thumbnails.best())
        })
        .collect())
}
