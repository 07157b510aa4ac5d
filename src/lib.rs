//! GreenQuest backend — gamified household waste management.
//!
//! Users register, earn points for waste collections and recycling
//! mini-games, redeem rewards, schedule doorstep pickups and appear on a
//! leaderboard; administrators assign points and manage the pickup queue.
//!
//! # Architecture
//!
//! The crate is the transport-agnostic core of the platform, layered as
//! routes → services → repository traits → storage backend:
//!
//! - [`routes`] — the operation surface: validated, token-authenticated
//!   async functions an HTTP adapter binds one-to-one to endpoints.
//! - [`services`] — business logic: the points & tier engine, the redemption
//!   transaction, the pickup state machine, auth and the mail port.
//! - [`db`] — repository traits plus the in-memory local backend; a
//!   production document store plugs in behind the same traits.
//! - [`models`] — persisted domain records.
//! - [`api`] — DTOs, payload validation and the caller-facing error
//!   taxonomy.
//! - [`config`] — TOML/environment configuration.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use greenquest::config::AppConfig;
//! use greenquest::db::repositories::LocalRepository;
//! use greenquest::routes::AppContext;
//!
//! # async fn example() -> Result<(), greenquest::api::ApiError> {
//! let ctx = AppContext::new(Arc::new(LocalRepository::new()), AppConfig::default());
//! ctx.bootstrap().await?; // creates the default admin account
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
