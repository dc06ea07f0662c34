//! # Service Error Type
//!
//! Unified error type for rental workflows.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in CineRent                               │
//! │                                                                         │
//! │  RentalService::create_rent(...)                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Validation Error? ─── ValidationError ──► CoreError ──┐               │
//! │         │                                              │               │
//! │         ▼                                              ▼               │
//! │  Database Error? ───── DbError::QueryFailed ─────► ServiceError        │
//! │         │                                        { code, message }     │
//! │         ▼                                              │               │
//! │  Not enough copies? ── InsufficientAvailability ───────┘               │
//! │                                                                         │
//! │  Storage details are logged, callers get a generic message.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use cinerent_core::{CoreError, ValidationError};
use cinerent_db::DbError;

/// Error returned from service operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_AVAILABILITY",
///   "message": "Insufficient availability for film 7f..: available 1, requested 2"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for service responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Not enough free copies (409)
    InsufficientAvailability,

    /// Operation not allowed in the current state (422)
    BusinessLogic,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ServiceError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ServiceError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ServiceError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ServiceError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to service errors.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ServiceError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ServiceError::validation("Invalid reference")
            }
            DbError::ConnectionFailed(_) => {
                ServiceError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ServiceError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ServiceError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ServiceError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ServiceError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to service errors.
impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::FilmNotFound(id) => ServiceError::not_found("Film", &id),
            CoreError::RentNotFound(id) => ServiceError::not_found("Rent", &id),
            e @ CoreError::InsufficientAvailability { .. } => {
                ServiceError::new(ErrorCode::InsufficientAvailability, e.to_string())
            }
            CoreError::InvalidRentState {
                rent_id,
                current_state,
            } => ServiceError::new(
                ErrorCode::BusinessLogic,
                format!("Rent {} is {}", rent_id, current_state),
            ),
            e @ CoreError::CostOverflow => ServiceError::validation(e.to_string()),
            CoreError::Storage(e) => {
                tracing::error!("Storage failure: {}", e);
                ServiceError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            CoreError::Validation(e) => ServiceError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::validation(err.to_string())
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let err = ServiceError::not_found("Film", "abc");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Film not found: abc");
    }

    #[test]
    fn test_insufficient_availability_code() {
        let err: ServiceError = CoreError::InsufficientAvailability {
            film_id: "f1".to_string(),
            available: 1,
            requested: 2,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientAvailability);
        assert!(err.message.contains("available 1, requested 2"));
    }

    #[test]
    fn test_storage_details_hidden() {
        let err: ServiceError = CoreError::Storage("disk on fire".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_cost_overflow_is_a_validation_error() {
        let err: ServiceError = CoreError::CostOverflow.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Rent cost is too large to represent");
    }

    #[test]
    fn test_validation_message_kept() {
        let err: ServiceError = ValidationError::RentalTooLong {
            days: 20,
            max_days: 15,
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("15 days"));
    }
}
