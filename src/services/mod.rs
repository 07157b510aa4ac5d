//! Business-logic service layer.
//!
//! Services are repository-agnostic: every function takes an implementation
//! of the repository traits and contains the logic that must behave the same
//! regardless of the storage backend — the points & tier engine, the
//! redemption transaction, the pickup state machine and the notification
//! rules. Input validation and authentication live one layer up, in
//! [`crate::routes`].

pub mod accounts;
pub mod auth;
pub mod awards;
pub mod mail;
pub mod notifications;
pub mod pickups;
pub mod points;
pub mod rewards;
