//! Core types, storage traits and the contact service for Rolodex.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ContactStore`] and [`blob::BlobStore`];
//! the HTTP layer talks only to [`service::ContactService`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod blob;
pub mod contact;
pub mod error;
pub mod lookup;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use lookup::Lookup;
