use crate::domain::SeenSet;
use crate::errors::TrendResult;

#[cfg_attr(test, mockall::automock)]
pub trait SeenRepository: Send + Sync {
    /// Load the persisted seen ids. Missing or unreadable state is treated as
    /// empty, never as a failure.
    fn load(&self) -> SeenSet;

    /// Overwrite the persisted state with the given set. Best effort: the
    /// caller logs a failure and carries on.
    fn save(&self, seen: &SeenSet) -> TrendResult<()>;
}
