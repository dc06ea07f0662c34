//! # Error Types
//!
//! Domain-specific error types for cinerent-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cinerent-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cinerent-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  cinerent-service errors                                               │
//! │  └── ServiceError     - What callers see (code + message)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A cost that comes out non-positive is NOT an error. It is the
//! [`RentCost::NotApplicable`](crate::pricing::RentCost) value. A cost too
//! large for i64 cents becomes [`CoreError::CostOverflow`] once a caller
//! needs to bill it.

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced film does not exist.
    ///
    /// Propagated to the caller as-is; the calculators never retry.
    #[error("Film not found: {0}")]
    FilmNotFound(String),

    /// The referenced rent does not exist.
    #[error("Rent not found: {0}")]
    RentNotFound(String),

    /// More copies requested than are currently free.
    ///
    /// ## User Workflow
    /// ```text
    /// New rent (amount: 5)
    ///      │
    ///      ▼
    /// get_availability(film) = 3
    ///      │
    ///      ▼
    /// InsufficientAvailability { film_id, available: 3, requested: 5 }
    /// ```
    #[error("Insufficient availability for film {film_id}: available {available}, requested {requested}")]
    InsufficientAvailability {
        film_id: String,
        available: i64,
        requested: i64,
    },

    /// Rent is not in a state that allows the requested operation.
    #[error("Rent {rent_id} is {current_state}, cannot perform operation")]
    InvalidRentState {
        rent_id: String,
        current_state: String,
    },

    /// The computed cost does not fit in i64 cents.
    #[error("Rent cost is too large to represent")]
    CostOverflow,

    /// The backing store failed while serving a lookup.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Structural checks that run before any business rule or database read.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or positive.
    #[error("{field} has to be '0' or positive")]
    Negative { field: String },

    /// Invalid format (email, phone, id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// The date has not happened yet.
    #[error("{field} {date} has not happened yet")]
    DateInFuture { field: String, date: NaiveDate },

    /// The date must come strictly after the rental start.
    #[error("{field} {date} has to be after the start date {start}")]
    DateNotAfter {
        field: String,
        date: NaiveDate,
        start: NaiveDate,
    },

    /// Contracted rental period is longer than allowed.
    #[error("return_date has to be before {max_days} days from the start date (got {days})")]
    RentalTooLong { days: i64, max_days: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
