pub mod fetch_service;
pub mod notification_service;

pub use fetch_service::{aggregate, FetchService, TrendBatch};
pub use notification_service::{DeliveryReport, Messenger, NotificationService};
