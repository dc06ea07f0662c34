//! # Availability Calculator
//!
//! How many copies of a film can be rented right now.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_availability(lookup, film_id)                                      │
//! │       │                                                                 │
//! │       ├── lookup.find_film_by_id ────────► None? → FilmNotFound         │
//! │       │                                                                 │
//! │       ├── lookup.find_open_rentals_by_film_id                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stock − Σ amount(open rents)      (may be negative: overbooked)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two reads are not tied together by a transaction. A rent created
//! between them yields a stale figure, which callers tolerate.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::{Film, Rent};

// =============================================================================
// Lookup Seam
// =============================================================================

/// The two reads the availability calculator needs from persistence.
///
/// Implemented by `cinerent_db::Database`; tests use an in-memory fake.
#[async_trait]
pub trait RentalLookup: Send + Sync {
    /// Fetches a film, `Ok(None)` if it does not exist.
    async fn find_film_by_id(&self, film_id: &str) -> CoreResult<Option<Film>>;

    /// Lists the rents of a film whose state is `open`.
    async fn find_open_rentals_by_film_id(&self, film_id: &str) -> CoreResult<Vec<Rent>>;
}

// =============================================================================
// Calculator
// =============================================================================

/// Stock minus the copies held by open rents.
///
/// Closed rents in `rentals` are skipped, so a caller handing over a film's
/// full rent history still gets the right figure.
///
/// ## Example
/// ```rust
/// use cinerent_core::availability::compute_availability;
/// use cinerent_core::types::Rent;
///
/// let none: Vec<Rent> = Vec::new();
/// assert_eq!(compute_availability(4, &none), 4);
/// ```
pub fn compute_availability<'a, I>(stock: i64, rentals: I) -> i64
where
    I: IntoIterator<Item = &'a Rent>,
{
    let rented: i64 = rentals
        .into_iter()
        .filter(|rent| rent.is_open())
        .map(|rent| rent.amount)
        .sum();

    stock - rented
}

/// Current availability of a film.
///
/// ## Returns
/// * `Ok(n)` - copies free to rent, negative when overbooked
/// * `Err(CoreError::FilmNotFound)` - no such film
/// * `Err(CoreError::Storage)` - the lookup failed
pub async fn get_availability<L>(lookup: &L, film_id: &str) -> CoreResult<i64>
where
    L: RentalLookup + ?Sized,
{
    let film = lookup
        .find_film_by_id(film_id)
        .await?
        .ok_or_else(|| CoreError::FilmNotFound(film_id.to_string()))?;

    let open_rentals = lookup.find_open_rentals_by_film_id(film_id).await?;
    let availability = compute_availability(film.stock, &open_rentals);

    debug!(
        film_id = %film_id,
        stock = film.stock,
        open_rentals = open_rentals.len(),
        availability,
        "Computed availability"
    );

    Ok(availability)
}

// =============================================================================
// Unit Tests
// =============================================================================
