//! # cinerent-core: Pure Business Logic for CineRent
//!
//! This crate holds the rental rules of CineRent as pure functions with zero
//! I/O dependencies. The only seam to the outside world is the
//! [`availability::RentalLookup`] trait, implemented by `cinerent-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CineRent Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 cinerent-service (RentalService)                │   │
//! │  │    create_rent, return_rent, quote, refresh_availability       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ cinerent-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────┐  ┌─────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │ availability │  │validation│ │   │
//! │  │   │   Film    │  │ RentCost  │  │ RentalLookup │  │  rules  │  │   │
//! │  │   │   Rent    │  │  Money    │  │              │  │         │  │   │
//! │  │   └───────────┘  └───────────┘  └──────────────┘  └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  cinerent-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Film, Rent, Category, Person, Client)
//! - [`money`] - Money type with checked integer arithmetic
//! - [`dates`] - Whole-day date arithmetic
//! - [`pricing`] - Rental cost calculator
//! - [`availability`] - Availability calculator and the lookup seam
//! - [`validation`] - Field and business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cinerent_core::money::Money;
//! use cinerent_core::pricing::{get_rent_cost, RentCost};
//!
//! let start = NaiveDate::from_ymd_opt(2050, 1, 1).unwrap();
//! let due = NaiveDate::from_ymd_opt(2050, 1, 2).unwrap();
//!
//! let cost = get_rent_cost(2, start, due, None, Money::from_cents(1000));
//! assert_eq!(cost, RentCost::Amount(Money::from_cents(2000)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod dates;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use availability::{compute_availability, get_availability, RentalLookup};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{get_rent_cost, RentCost};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of days between a rental's start and its contracted return.
///
/// ## Business Reason
/// Long rentals tie up copies that walk-in customers ask for. The service
/// layer may lower or raise this through configuration.
pub const MAX_RENTAL_DAYS: i64 = 15;
