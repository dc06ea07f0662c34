//! # cinerent-db: Database Layer for CineRent
//!
//! This crate provides database access for CineRent.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CineRent Data Flow                               │
//! │                                                                         │
//! │  RentalService::create_rent                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    cinerent-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ FilmRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ RentRepo      │    │ 001_init.sql │  │   │
//! │  │   │ RentalLookup  │    │ CategoryRepo  │    │              │  │   │
//! │  │   │               │    │ PersonRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (cinerent.db)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`lookup`] - `RentalLookup` for the availability calculator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cinerent_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("cinerent.db")).await?;
//! let film = db.films().get_by_id("uuid-here").await?;
//! let open = db.rents().list_open_by_film("uuid-here").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lookup;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::category::CategoryRepository;
pub use repository::film::FilmRepository;
pub use repository::person::PersonRepository;
pub use repository::rent::RentRepository;
pub use repository::generate_id;
