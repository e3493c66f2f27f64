use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::domain::{SourceKind, TrendItem, TrendKind};
use crate::errors::{TrendError, TrendResult};
use crate::sources::traits::{FetchContext, TrendSource};

/// Scraped trending-listing page.
///
/// Expected markup: one element per entry matching `.trend-entry`, `article`
/// or `li.trend-item`, containing an `a[href]` (title text + link) and
/// optionally an `img` (thumbnail via `src` or `data-src`). Entries whose link
/// carries a recognizable video id become `Video` items keyed by that id; the
/// rest become `SocialPost` items keyed by their URL.
pub struct TrendingPageSource {
    client: Client,
    page_url: String,
}

impl TrendingPageSource {
    pub fn new(page_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            page_url: page_url.to_string(),
        }
    }

    fn video_id_from(url: &str) -> Option<String> {
        let watch_re = Regex::new(r"(?:watch\?v=|youtu\.be/)([\w-]{11})").unwrap();
        watch_re.captures(url).map(|caps| caps[1].to_string())
    }

    fn parse_entries(html: &str, max_entries: usize) -> Vec<TrendItem> {
        let document = Html::parse_document(html);
        let entry_selector =
            Selector::parse(".trend-entry, article, li.trend-item").unwrap();
        let link_selector = Selector::parse("a[href]").unwrap();
        let img_selector = Selector::parse("img").unwrap();

        let mut items = Vec::new();

        for entry in document.select(&entry_selector) {
            if items.len() == max_entries {
                break;
            }

            let Some(link) = entry.select(&link_selector).next() else {
                continue;
            };
            let Some(href) = link.value().attr("href") else {
                continue;
            };

            let title = link.text().collect::<String>();
            let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
            if title.is_empty() {
                continue;
            }

            let thumbnail = entry
                .select(&img_selector)
                .next()
                .and_then(|img| img.value().attr("src").or(img.value().attr("data-src")))
                .map(|src| src.to_string());

            let item = match Self::video_id_from(href) {
                Some(video_id) => TrendItem::new(TrendKind::Video, video_id, title),
                None => TrendItem::new(TrendKind::SocialPost, href.to_string(), title),
            };

            items.push(
                item.with_url(Some(href.to_string()))
                    .with_thumbnail(thumbnail),
            );
        }

        items
    }
}

impl TrendSource for TrendingPageSource {
    fn kind(&self) -> SourceKind {
        SourceKind::TrendingPage
    }

    fn fetch(&self, ctx: &FetchContext) -> TrendResult<Vec<TrendItem>> {
        let response = self.client.get(&self.page_url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrendError::Api(format!(
                "trending page returned HTTP {}",
                status
            )));
        }

        let html = response.text()?;
        Ok(Self::parse_entries(&html, ctx.limit))
    }
}
