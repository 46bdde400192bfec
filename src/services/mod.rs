// Service exports
pub mod cache;
pub mod dashboard;

pub use cache::{SnapshotCache, CacheKey, CacheError, CacheStats};
pub use dashboard::{DashboardClient, DashboardError, NotificationDraft};
