//! Telegram Bot API bindings for Rust
//! Provides a blocking client to send text messages and photos to a chat

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_ROOT: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Telegram API error: {0}")]
    Api(String),
    #[error("Rate limited by Telegram")]
    RateLimited,
}

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Serialize)]
struct SendPhotoPayload<'a> {
    chat_id: &'a str,
    photo: &'a str,
    caption: &'a str,
    parse_mode: &'a str,
}

/// Envelope every Bot API method responds with
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

pub struct TelegramClient {
    base_url: String,
    client: Client,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self, TelegramError> {
        Self::with_api_root(API_ROOT, token)
    }

    /// Point the client at a different API root (useful against a local mock)
    pub fn with_api_root(api_root: &str, token: &str) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: format!("{}/bot{}", api_root.trim_end_matches('/'), token),
            client,
        })
    }

    /// Send a Markdown text message with link previews disabled
    pub fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TelegramError> {
        let payload = SendMessagePayload {
            chat_id,
            text,
            parse_mode: "Markdown",
            disable_web_page_preview: true,
        };

        self.call("sendMessage", &payload)
    }

    /// Send a photo by URL with a Markdown caption
    pub fn send_photo(
        &self,
        chat_id: &str,
        photo_url: &str,
        caption: &str,
    ) -> Result<(), TelegramError> {
        let payload = SendPhotoPayload {
            chat_id,
            photo: photo_url,
            caption,
            parse_mode: "Markdown",
        };

        self.call("sendPhoto", &payload)
    }

    fn call<P: Serialize>(&self, method: &str, payload: &P) -> Result<(), TelegramError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(payload)
            .send()?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TelegramError::RateLimited);
        }

        let status = response.status();
        let body: ApiResponse = match response.json() {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(TelegramError::Api(format!("HTTP {}", status)));
            }
            Err(e) => return Err(e.into()),
        };

        if !body.ok {
            return Err(TelegramError::Api(
                body.description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            ));
        }

        Ok(())
    }
}
