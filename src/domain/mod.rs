pub mod digest;
pub mod seen;
pub mod trend;

pub use digest::{Attachment, Digest};
pub use seen::SeenSet;
pub use trend::{SourceKind, TrendItem, TrendKind};
