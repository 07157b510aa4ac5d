//! Repository implementations module.
//!
//! This module contains implementations of the repository traits:
//! - `local`: In-memory implementation for unit testing and local development
//!
//! A production document-store implementation plugs in behind the same
//! traits without touching the service layer.

pub mod local;

pub use local::LocalRepository;
