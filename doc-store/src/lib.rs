//! In-memory vector store over a persisted chunk collection.
//!
//! Public API:
//! - [`DocStore::load`]: read the whole JSONL collection at startup and
//!   validate it eagerly (the process must not serve traffic without it).
//! - [`DocStore::top_k`]: exhaustive cosine scan over every stored chunk,
//!   returning scored copies that callers may mutate freely.
//!
//! The collection is loaded once and treated as immutable read-only state
//! for the process lifetime, so requests need no locking around it.

pub mod errors;
pub mod structs;

mod jsonl_reader;
mod store;

pub use store::DocStore;
