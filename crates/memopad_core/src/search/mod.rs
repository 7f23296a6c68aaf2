//! Client-side memo search entry points.
//!
//! # Responsibility
//! - Derive the filtered view of the in-memory memo list.
//! - Keep result shaping inside core so front ends stay dumb renderers.

pub mod filter;
