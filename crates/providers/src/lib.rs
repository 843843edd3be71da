#![forbid(unsafe_code)]

//! Identity and progress backends for the Campus desktop app.
//!
//! [`provider`] defines the traits plus an in-memory double; [`sqlite`]
//! persists to a local database file; [`rest`] talks to the hosted API.

pub mod provider;
pub mod rest;
pub mod sqlite;

pub use provider::{
    Credentials, IdentityProvider, InMemoryProvider, ProgressStore, ProviderError, Providers,
};
