//! # Repository Module
//!
//! Database repository implementations for CineRent.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  RentalService                                                         │
//! │       │                                                                 │
//! │       │  db.rents().list_open_by_film(film_id)                         │
//! │       ▼                                                                 │
//! │  RentRepository                                                        │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list_open_by_film(&self, film_id)                                 │
//! │  ├── insert(&self, rent)                                               │
//! │  └── update(&self, rent)                                               │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`film::FilmRepository`] - Film CRUD and the availability cache
//! - [`rent::RentRepository`] - Rent CRUD and open-rent scans
//! - [`category::CategoryRepository`] - Category CRUD
//! - [`person::PersonRepository`] - Persons and their client records

use uuid::Uuid;

pub mod category;
pub mod film;
pub mod person;
pub mod rent;

/// Generates a new entity ID (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
