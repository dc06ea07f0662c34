//! # cinerent-service: Rental Workflows for CineRent
//!
//! Orchestrates the pure calculators in `cinerent-core` against the SQLite
//! store in `cinerent-db`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. ServiceConfig::load() ──── env vars with defaults                  │
//! │  2. logging::init_tracing(&config)                                      │
//! │  3. RentalService::from_config(&config).await                           │
//! │       └── Database::new(...) runs migrations                           │
//! │  4. service.create_rent(...) / return_rent(...) / quote(...)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Environment configuration
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - `ServiceError` with machine-readable codes
//! - [`rental`] - `RentalService` and its input types

pub mod config;
pub mod error;
pub mod logging;
pub mod rental;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use logging::init_tracing;
pub use rental::{
    NewClient, NewFilm, NewPerson, NewRent, QuoteRequest, RentUpdate, RentalService,
};
