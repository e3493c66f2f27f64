use telegram::TelegramClient;

use crate::config::Config;
use crate::domain::Digest;
use crate::errors::TrendResult;

/// Send capability the notifier fans out over; implemented by the Telegram
/// client and stubbed in tests.
pub trait Messenger {
    fn send_text(&self, chat_id: &str, text: &str) -> TrendResult<()>;
    fn send_photo(&self, chat_id: &str, photo_url: &str, caption: &str) -> TrendResult<()>;
}

impl Messenger for TelegramClient {
    fn send_text(&self, chat_id: &str, text: &str) -> TrendResult<()> {
        Ok(self.send_message(chat_id, text)?)
    }

    fn send_photo(&self, chat_id: &str, photo_url: &str, caption: &str) -> TrendResult<()> {
        Ok(TelegramClient::send_photo(self, chat_id, photo_url, caption)?)
    }
}

#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failures: Vec<String>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct NotificationService<M: Messenger> {
    client: M,
    destinations: Vec<String>,
}

impl NotificationService<TelegramClient> {
    /// Constructing the messaging client is the only fatal failure of a run
    pub fn new(config: &Config) -> TrendResult<Self> {
        let client = TelegramClient::new(&config.telegram_token)?;
        Ok(Self::with_client(client, config.destinations()))
    }
}

impl<M: Messenger> NotificationService<M> {
    pub fn with_client(client: M, destinations: Vec<String>) -> Self {
        Self {
            client,
            destinations,
        }
    }

    /// Deliver the digest: text first to every destination, then each
    /// attachment to every destination. Every send is independent; a failure
    /// is logged and recorded but never stops the remaining sends.
    pub fn deliver(&self, digest: &Digest) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for destination in &self.destinations {
            self.attempt(
                &mut report,
                destination,
                self.client.send_text(destination, &digest.text),
            );
        }

        for attachment in &digest.attachments {
            for destination in &self.destinations {
                self.attempt(
                    &mut report,
                    destination,
                    self.client
                        .send_photo(destination, &attachment.image_url, &attachment.caption),
                );
            }
        }

        report
    }

    fn attempt(&self, report: &mut DeliveryReport, destination: &str, result: TrendResult<()>) {
        match result {
            Ok(()) => report.sent += 1,
            Err(e) => {
                tracing::warn!(destination, "delivery failed: {}", e);
                report.failures.push(format!("{}: {}", destination, e));
            }
        }
    }
}
