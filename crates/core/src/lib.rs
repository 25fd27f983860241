//! paylookup_core - domain types and storage contracts for the paylookup service.
//!
//! Everything in this crate is pure: no network, no clock reads outside of
//! explicit constructors. Backends and the HTTP layer live in `paylookup`.

pub mod payment;
pub mod storage;
