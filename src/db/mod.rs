//! Store module for the waste-management backend.
//!
//! This module provides abstractions over the backing store via the
//! Repository pattern, allowing different storage backends to be swapped
//! easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Routes (validated DTOs, auth checks)                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (crate::services) - Business Logic       │
//! │  - Points & tier engine                                  │
//! │  - Redemption transaction                                │
//! │  - Pickup workflow                                       │
//! └───────────────────┬─────────────────────────────────────┘
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface    │
//! │  - AccountRepository      - RewardRepository             │
//! │  - CollectionRepository   - PickupRepository             │
//! │  - NotificationRepository                                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Local Repository (in-memory)                            │
//! │  (a production document store slots in behind the same   │
//! │   traits)                                                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```
//! use greenquest::db::{repositories::LocalRepository, AccountRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = LocalRepository::new();
//! assert!(repo.health_check().await?);
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repository::{
    AccountRepository, AccountStats, CollectionRepository, CollectionStats, FullRepository,
    NotificationRepository, PickupRepository, PointsUpdate, RedemptionOutcome, RepositoryError,
    RepositoryResult, RewardRepository, TransitionOutcome,
};
