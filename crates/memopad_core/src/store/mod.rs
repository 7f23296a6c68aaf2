//! Memo store and view model.
//!
//! # Responsibility
//! - Own the in-memory memo list and the edit-session state.
//! - Mediate all CRUD calls to the injected repository.
//!
//! # Invariants
//! - The list is mutated only after a repository call succeeds.
//! - At most one edit session is open at any time.

pub mod memo_store;
