//! # Film Repository
//!
//! Database operations for films.
//!
//! ## Availability Cache
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  films.availability is a CACHE, not the source of truth                 │
//! │                                                                         │
//! │  get_availability() ──► stock − Σ open rents ──► set_availability()     │
//! │                                                                         │
//! │  Only RentalService writes it, after every rent change and on reads.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use cinerent_core::Film;

const FILM_COLUMNS: &str = r#"
    id, title, description, release_date, category_id, price_by_day_cents,
    stock, availability, film_type, prequel_id, created_at, updated_at
"#;

/// Repository for film database operations.
#[derive(Debug, Clone)]
pub struct FilmRepository {
    pool: SqlitePool,
}

impl FilmRepository {
    /// Creates a new FilmRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FilmRepository { pool }
    }

    /// Gets a film by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Film>> {
        debug!(id = %id, "Getting film by ID");

        let film = sqlx::query_as::<_, Film>(&format!(
            "SELECT {FILM_COLUMNS} FROM films WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(film)
    }

    /// Lists films ordered by title.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Film>> {
        let films = sqlx::query_as::<_, Film>(&format!(
            "SELECT {FILM_COLUMNS} FROM films ORDER BY title LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(films)
    }

    /// Lists the films of a category.
    pub async fn list_by_category(&self, category_id: &str) -> DbResult<Vec<Film>> {
        let films = sqlx::query_as::<_, Film>(&format!(
            "SELECT {FILM_COLUMNS} FROM films WHERE category_id = ?1 ORDER BY title"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(films)
    }

    /// Inserts a new film.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - title already taken
    /// * `Err(DbError::ForeignKeyViolation)` - unknown category or prequel
    pub async fn insert(&self, film: &Film) -> DbResult<()> {
        debug!(id = %film.id, title = %film.title, "Inserting film");

        sqlx::query(&format!(
            "INSERT INTO films ({FILM_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
        ))
        .bind(&film.id)
        .bind(&film.title)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(&film.category_id)
        .bind(film.price_by_day_cents)
        .bind(film.stock)
        .bind(film.availability)
        .bind(film.film_type)
        .bind(&film.prequel_id)
        .bind(film.created_at)
        .bind(film.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } if field.ends_with("title") => {
                DbError::duplicate(field, &film.title)
            }
            other => other,
        })?;

        Ok(())
    }

    /// Updates an existing film. The cached availability is left untouched.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Film doesn't exist
    pub async fn update(&self, film: &Film) -> DbResult<()> {
        debug!(id = %film.id, "Updating film");

        let result = sqlx::query(
            r#"
            UPDATE films SET
                title = ?2,
                description = ?3,
                release_date = ?4,
                category_id = ?5,
                price_by_day_cents = ?6,
                stock = ?7,
                film_type = ?8,
                prequel_id = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&film.id)
        .bind(&film.title)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(&film.category_id)
        .bind(film.price_by_day_cents)
        .bind(film.stock)
        .bind(film.film_type)
        .bind(&film.prequel_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Film", &film.id));
        }

        Ok(())
    }

    /// Stores a freshly computed availability in the cache column.
    pub async fn set_availability(&self, id: &str, availability: i64) -> DbResult<()> {
        debug!(id = %id, availability, "Caching film availability");

        let result = sqlx::query("UPDATE films SET availability = ?2 WHERE id = ?1")
            .bind(id)
            .bind(availability)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Film", id));
        }

        Ok(())
    }

    /// Deletes a film. Fails with a foreign key violation while rents exist.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting film");

        let result = sqlx::query("DELETE FROM films WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Film", id));
        }

        Ok(())
    }

    /// Counts films (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM films")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
