//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to the port's
//!   error type; unique violations surface as duplicates.
//!
//! # Example
//!
//! ```ignore
//! use docketsync::outbound::persistence::{DbPool, DieselDocketRepository, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/docketsync");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselDocketRepository::new(pool);
//! ```

mod diesel_connote_repository;
mod diesel_docket_repository;
mod diesel_profile_repository;
mod diesel_role_permission_repository;
mod diesel_tracking_history_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_connote_repository::DieselConnoteRepository;
pub use diesel_docket_repository::DieselDocketRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_role_permission_repository::DieselRolePermissionRepository;
pub use diesel_tracking_history_repository::DieselTrackingHistoryRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
