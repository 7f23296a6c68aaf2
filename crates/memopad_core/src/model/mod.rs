//! Domain model for memo records.
//!
//! # Responsibility
//! - Define the canonical memo shape shared by repository and view model.
//! - Validate user input before any persistence call is issued.
//!
//! # Invariants
//! - Every memo is identified by a stable `MemoId`.
//! - `title` is never empty after trimming; the draft validator enforces this
//!   before a record can reach the repository.

pub mod memo;
