//! # Domain Types
//!
//! Core domain types used throughout CineRent.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│      Film       │◄──│      Rent       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  title          │   │  film_id (FK)   │       │
//! │  └─────────────────┘   │  price_by_day   │   │  client_id (FK) │       │
//! │                        │  stock          │   │  amount         │       │
//! │                        │  availability   │   │  dates, state   │       │
//! │                        └─────────────────┘   │  cost_cents     │       │
//! │                                              └────────┬────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐            │                │
//! │  │     Person      │◄──│     Client      │◄───────────┘                │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity is keyed by a UUID v4 string. Only Film and Rent carry
//! behaviour; the rest are records referenced by id.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::dates;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A film category (genre).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: String,
    /// Unique display name.
    pub name: String,
    pub description: String,
}

// =============================================================================
// Film Type
// =============================================================================

/// Whether a film is a single movie or an episodic series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FilmType {
    Movie,
    Series,
}

// =============================================================================
// Film
// =============================================================================

/// A film title held in stock for rental.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Film {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Unique title.
    pub title: String,

    pub description: String,

    #[ts(as = "String")]
    pub release_date: NaiveDate,

    pub category_id: String,

    /// Daily rental price per copy, in cents.
    pub price_by_day_cents: i64,

    /// Total copies owned. Never negative.
    pub stock: i64,

    /// Cached result of the last availability computation.
    ///
    /// May be stale; [`crate::availability::get_availability`] is the source
    /// of truth.
    pub availability: Option<i64>,

    pub film_type: FilmType,

    /// Film this one follows, if any.
    pub prequel_id: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Film {
    /// Returns the daily price as Money.
    #[inline]
    pub fn price_by_day(&self) -> Money {
        Money::from_cents(self.price_by_day_cents)
    }
}

// =============================================================================
// Rent State
// =============================================================================

/// Lifecycle state of a rental.
///
/// ```text
/// Open ──(actual_return_date recorded)──► Close
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RentState {
    /// Copies are out with the client.
    Open,
    /// Copies are back on the shelf.
    Close,
}

impl RentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentState::Open => "open",
            RentState::Close => "close",
        }
    }
}

impl fmt::Display for RentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Rent
// =============================================================================

/// A rental of one or more copies of a film by a client.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Rent {
    pub id: String,
    pub film_id: String,
    pub client_id: String,

    /// Number of copies rented. Always positive.
    pub amount: i64,

    #[ts(as = "String")]
    pub start_date: NaiveDate,

    /// Contracted return date.
    #[ts(as = "String")]
    pub return_date: NaiveDate,

    /// Set once the copies are physically back.
    #[ts(as = "Option<String>")]
    pub actual_return_date: Option<NaiveDate>,

    pub state: RentState,

    /// Cost computed at the last write, `None` when not applicable.
    pub cost_cents: Option<i64>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Rent {
    /// Whether the rent still holds copies.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == RentState::Open
    }
}

// =============================================================================
// Person
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Feminine,
}

/// What a person is to the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PersonType {
    /// Cast and crew.
    FilmRelated,
    /// Someone who rents films.
    Client,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub gender: Gender,
    #[ts(as = "String")]
    pub date_of_birth: NaiveDate,
    pub person_type: PersonType,
}

impl Person {
    /// Age in whole years on the given day.
    pub fn age_on(&self, today: NaiveDate) -> Option<i64> {
        dates::age_in_years(Some(self.date_of_birth), today)
    }
}

// =============================================================================
// Client
// =============================================================================

/// Contact record of a person who rents films.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Client {
    pub id: String,
    /// Person behind this client; must be of type `client`.
    pub person_id: String,
    pub address: String,
    /// `XXX-XXXX-XXXX`
    pub phone: String,
    pub email: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rent_state_display() {
        assert_eq!(RentState::Open.to_string(), "open");
        assert_eq!(RentState::Close.to_string(), "close");
    }

    #[test]
    fn test_enum_serde_names() {
        assert_eq!(serde_json::to_string(&RentState::Open).unwrap(), "\"open\"");
        assert_eq!(
            serde_json::to_string(&PersonType::FilmRelated).unwrap(),
            "\"film_related\""
        );
        assert_eq!(serde_json::to_string(&FilmType::Series).unwrap(), "\"series\"");
    }

    #[test]
    fn test_person_age() {
        let person = Person {
            id: "p1".to_string(),
            name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            gender: Gender::Feminine,
            date_of_birth: NaiveDate::from_ymd_opt(1999, 3, 16).unwrap(),
            person_type: PersonType::Client,
        };
        let today = NaiveDate::from_ymd_opt(2022, 3, 13).unwrap();
        assert_eq!(person.age_on(today), Some(22));
    }
}
