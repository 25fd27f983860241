//! Read-only payment lookup service.
//!
//! Serves payment records keyed by `(paymentId, status)` from DynamoDB or an
//! in-memory store. The binary wires these modules into an axum server; the
//! `xtask` crate reuses the storage and repository layers to provision and
//! seed the table.

pub mod app;
pub mod config;
pub mod handlers;
pub mod repository;
pub mod state;
pub mod storage;
