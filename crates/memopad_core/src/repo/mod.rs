//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data-access contract the view model depends on.
//! - Isolate SQLite query details from list/session orchestration.
//!
//! # Invariants
//! - Repository writes must validate drafts before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod memo_repo;
