use std::str::FromStr;
use std::time::Duration;

use crate::domain::SourceKind;
use crate::errors::{TrendError, TrendResult};
use crate::retry::RetryPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub youtube_api_key: Option<String>,
    pub twitter_bearer_token: Option<String>,
    pub telegram_token: String,
    pub chat_id: String,
    pub group_chat_id: Option<String>,
    pub test_mode: bool,
    pub region: String,
    pub digest_limit: usize,
    pub keyword_limit: usize,
    pub candidate_limit: usize,
    pub trending_page_url: Option<String>,
    pub seen_path: String,
    pub sources: Vec<SourceKind>,
    pub retry: RetryPolicy,
    pub run_deadline: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> TrendResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let telegram_token = std::env::var("TELEGRAM_TOKEN")
            .map_err(|_| TrendError::MissingEnvVar("TELEGRAM_TOKEN".to_string()))?;

        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .map_err(|_| TrendError::MissingEnvVar("TELEGRAM_CHAT_ID".to_string()))?;

        let group_chat_id = std::env::var("TELEGRAM_CHAT_ID_GROUP").ok();
        let youtube_api_key = std::env::var("YOUTUBE_API_KEY").ok();
        let twitter_bearer_token = std::env::var("TWITTER_BEARER_TOKEN").ok();
        let trending_page_url = std::env::var("TREND_PAGE_URL").ok();

        let test_mode = env_flag("TREND_TEST_MODE", true)?;
        let region = std::env::var("TREND_REGION").unwrap_or_else(|_| "KR".to_string());
        let digest_limit = env_parse("TREND_DIGEST_LIMIT", 5)?;
        let keyword_limit = env_parse("TREND_KEYWORD_LIMIT", 3)?;
        let candidate_limit = env_parse("TREND_CANDIDATE_LIMIT", 10)?;

        let sources = match std::env::var("TREND_SOURCES") {
            Ok(spec) => parse_sources(&spec)?,
            Err(_) => SourceKind::all().to_vec(),
        };

        let retry = RetryPolicy::new(
            env_parse("TREND_RETRY_ATTEMPTS", 3)?,
            Duration::from_millis(env_parse("TREND_RETRY_BASE_MS", 500)?),
        );

        let run_deadline = Duration::from_secs(env_parse("TREND_RUN_DEADLINE_SECS", 120)?);

        // Default seen_path is relative to executable directory
        let seen_path = std::env::var("TREND_SEEN_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("seen_trends.json").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./seen_trends.json".to_string())
        });

        Ok(Self {
            youtube_api_key,
            twitter_bearer_token,
            telegram_token,
            chat_id,
            group_chat_id,
            test_mode,
            region,
            digest_limit,
            keyword_limit,
            candidate_limit,
            trending_page_url,
            seen_path,
            sources,
            retry,
            run_deadline,
        })
    }

    /// Delivery fan-out: test mode restricts to the primary chat
    pub fn destinations(&self) -> Vec<String> {
        let mut destinations = vec![self.chat_id.clone()];
        if !self.test_mode {
            if let Some(group) = &self.group_chat_id {
                destinations.push(group.clone());
            }
        }
        destinations
    }

    pub fn require_youtube_key(&self) -> TrendResult<&str> {
        self.youtube_api_key
            .as_deref()
            .ok_or_else(|| TrendError::MissingEnvVar("YOUTUBE_API_KEY".to_string()))
    }

    pub fn require_twitter_token(&self) -> TrendResult<&str> {
        self.twitter_bearer_token
            .as_deref()
            .ok_or_else(|| TrendError::MissingEnvVar("TWITTER_BEARER_TOKEN".to_string()))
    }

    pub fn require_trending_page_url(&self) -> TrendResult<&str> {
        self.trending_page_url
            .as_deref()
            .ok_or_else(|| TrendError::MissingEnvVar("TREND_PAGE_URL".to_string()))
    }
}

/// Comma-separated source list; empty string disables every source
fn parse_sources(spec: &str) -> TrendResult<Vec<SourceKind>> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| SourceKind::from_str(s).map_err(TrendError::Config))
        .collect()
}

fn env_flag(name: &str, default: bool) -> TrendResult<bool> {
    match std::env::var(name) {
        Ok(value) => match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(TrendError::Config(format!(
                "{} must be a boolean, got '{}'",
                name, other
            ))),
        },
        Err(_) => Ok(default),
    }
}

fn env_parse<T>(name: &str, default: T) -> TrendResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|e| TrendError::Config(format!("{} is invalid: {}", name, e))),
        Err(_) => Ok(default),
    }
}
