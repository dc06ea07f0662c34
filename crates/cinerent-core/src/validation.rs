//! # Validation Module
//!
//! Input validation for CineRent.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Structural (pure, THIS MODULE)                               │
//! │  ├── non-negative numbers, positive amounts                            │
//! │  ├── date ordering and the rental length limit                        │
//! │  └── email / phone formats                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Business rules (need a read first)                           │
//! │  └── ensure_amount_available(requested, availability)                  │
//! │      run explicitly by RentalService after get_availability()          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE constraints (film title, category name)                    │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::dates::days_between;
use crate::error::{CoreError, CoreResult, ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field (title, name).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an email address: something, `@`, something, `.`, something.
///
/// ## Example
/// ```rust
/// use cinerent_core::validation::validate_email;
///
/// assert!(validate_email("ana@rent.io").is_ok());
/// assert!(validate_email("ana@rent").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "is not an email address".to_string(),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates a phone number in the `XXX-XXXX-XXXX` format.
///
/// ## Example
/// ```rust
/// use cinerent_core::validation::validate_phone;
///
/// assert!(validate_phone("555-1234-5678").is_ok());
/// assert!(validate_phone("5551234567").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let groups: Vec<&str> = phone.split('-').collect();
    let shaped = groups.len() == 3
        && groups
            .iter()
            .zip([3usize, 4, 4])
            .all(|(group, len)| group.len() == len && group.chars().all(|c| c.is_ascii_digit()));

    if !shaped {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "use the format XXX-XXXX-XXXX".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a count or price is zero or positive.
///
/// ## Example
/// ```rust
/// use cinerent_core::validation::validate_non_negative;
///
/// assert!(validate_non_negative("stock", 0).is_ok());
/// assert!(validate_non_negative("stock", -1).is_err());
/// ```
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates the number of copies in a rent (> 0).
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that a date (release date, date of birth) has already happened.
pub fn validate_not_in_future(field: &str, date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if date > today {
        return Err(ValidationError::DateInFuture {
            field: field.to_string(),
            date,
        });
    }

    Ok(())
}

/// Validates the dates of a rent.
///
/// ## Rules
/// - `return_date` strictly after `start_date`
/// - `return_date` at most `max_days` after `start_date`
/// - `actual_return_date`, when set, strictly after `start_date`
///
/// ```text
///  start ───────── return_date (≤ max_days) ─────── actual (late ok)
///    │◄── must be > 0 days ──►│
/// ```
pub fn validate_rent_dates(
    start_date: NaiveDate,
    return_date: NaiveDate,
    actual_return_date: Option<NaiveDate>,
    max_days: i64,
) -> ValidationResult<()> {
    if return_date <= start_date {
        return Err(ValidationError::DateNotAfter {
            field: "return_date".to_string(),
            date: return_date,
            start: start_date,
        });
    }

    let days = days_between(return_date, start_date);
    if days > max_days {
        return Err(ValidationError::RentalTooLong { days, max_days });
    }

    if let Some(actual) = actual_return_date {
        validate_actual_return(start_date, actual)?;
    }

    Ok(())
}

/// Validates the day the copies came back: strictly after `start_date`.
///
/// Only the start matters here. The contracted period was checked when the
/// rent was written, so a later change to the rental limit does not block
/// returns of rents already out.
pub fn validate_actual_return(start_date: NaiveDate, actual_return_date: NaiveDate) -> ValidationResult<()> {
    if actual_return_date <= start_date {
        return Err(ValidationError::DateNotAfter {
            field: "actual_return_date".to_string(),
            date: actual_return_date,
            start: start_date,
        });
    }

    Ok(())
}

// =============================================================================
// Business Rules
// =============================================================================

/// Checks that `requested` copies fit in the current availability.
///
/// Needs a prior [`get_availability`](crate::availability::get_availability)
/// read, so it is kept apart from the structural validators above.
pub fn ensure_amount_available(film_id: &str, requested: i64, available: i64) -> CoreResult<()> {
    if requested > available {
        return Err(CoreError::InsufficientAvailability {
            film_id: film_id.to_string(),
            available,
            requested,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
