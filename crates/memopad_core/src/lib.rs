//! Core domain logic for Memopad.
//! This crate is the single source of truth for list/search/session invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memo::{Memo, MemoDraft, MemoId, MemoValidationError};
pub use repo::memo_repo::{MemoRepository, RepoError, RepoResult, SqliteMemoRepository};
pub use search::filter::filter_memos;
pub use store::memo_store::{EditSession, MemoStore, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
