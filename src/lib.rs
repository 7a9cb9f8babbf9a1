//! # Gig Finder Library
//!
//! Obtains an Ents24 access token through the client-credentials exchange,
//! keeps it in a small on-disk cache until it is close to expiry,
//! and uses it to list upcoming gigs around a configured location.
//!
//! Modules:
//! - `config` — service configuration, loading and validation
//! - `cache` — persisted token record, store and validity check
//! - `sources` — auth endpoint, event-list endpoint and the token provider
//! - `parser` — mapping wire responses to tokens and gigs
//! - `model` — gig / venue / address / location types
//! - `sinks` — console output
//! - `observability` — prometheus counters, optional textfile dump

pub mod app;
pub mod config;
pub mod cache;
pub mod sources;
pub mod parser;
pub mod model;
pub mod observability;
pub mod sinks;
pub mod helpers;
pub mod utils;

#[cfg(test)]
mod tests;


pub use crate::config::sources::*;
pub use crate::sources::provider::AccessTokenProvider;
