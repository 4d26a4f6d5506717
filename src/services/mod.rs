// Service exports
pub mod cache;
pub mod directory;
pub mod postgres;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use directory::{DirectoryClient, DirectoryError};
pub use postgres::{MatchStore, StoreError};
