use std::time::Instant;

use crate::domain::{SourceKind, TrendItem};
use crate::errors::TrendResult;

/// Per-run inputs shared by every adapter
#[derive(Debug, Clone)]
pub struct FetchContext {
    pub region: String,
    /// Per-source candidate cap
    pub limit: usize,
    /// Keywords harvested from the social-trend source, in rank order
    pub keywords: Vec<String>,
    /// Soft deadline for the whole run; sources are skipped once past it
    pub deadline: Option<Instant>,
}

impl FetchContext {
    pub fn new(region: String, limit: usize) -> Self {
        Self {
            region,
            limit,
            keywords: Vec::new(),
            deadline: None,
        }
    }

    pub fn expired(&self) -> bool {
        self.deadline
            .map(|deadline| Instant::now() >= deadline)
            .unwrap_or(false)
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TrendSource: Send + Sync {
    /// Identifies this adapter
    fn kind(&self) -> SourceKind;

    /// Fetch candidate items from the external source
    fn fetch(&self, ctx: &FetchContext) -> TrendResult<Vec<TrendItem>>;
}
