//! In-memory record store.
//!
//! Records live in a `BTreeMap` keyed by (`payment_id`, `status`) behind an
//! `Arc<RwLock<_>>`. Nothing is persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use paylookup::storage::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! ```

mod store;

pub use store::InMemoryStore;
