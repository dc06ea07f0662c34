//! # Rent Repository
//!
//! Database operations for rents.
//!
//! ## Open Rent Scan
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_open_by_film(film_id)                                             │
//! │                                                                         │
//! │  SELECT ... FROM rents WHERE film_id = ? AND state = 'open'             │
//! │             └── served by idx_rents_film_state                          │
//! │                                                                         │
//! │  Feeds availability: stock − Σ amount of the returned rows              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use cinerent_core::{Rent, RentState};

const RENT_COLUMNS: &str = r#"
    id, film_id, client_id, amount, start_date, return_date,
    actual_return_date, state, cost_cents, created_at, updated_at
"#;

/// Repository for rent database operations.
#[derive(Debug, Clone)]
pub struct RentRepository {
    pool: SqlitePool,
}

impl RentRepository {
    /// Creates a new RentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RentRepository { pool }
    }

    /// Gets a rent by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Rent>> {
        debug!(id = %id, "Getting rent by ID");

        let rent = sqlx::query_as::<_, Rent>(&format!(
            "SELECT {RENT_COLUMNS} FROM rents WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rent)
    }

    /// Lists rents, most recent start first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Rent>> {
        let rents = sqlx::query_as::<_, Rent>(&format!(
            "SELECT {RENT_COLUMNS} FROM rents ORDER BY start_date DESC, created_at DESC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rents)
    }

    /// Lists every rent of a film regardless of state.
    pub async fn list_by_film(&self, film_id: &str) -> DbResult<Vec<Rent>> {
        let rents = sqlx::query_as::<_, Rent>(&format!(
            "SELECT {RENT_COLUMNS} FROM rents WHERE film_id = ?1 ORDER BY start_date"
        ))
        .bind(film_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rents)
    }

    /// Lists the open rents of a film.
    pub async fn list_open_by_film(&self, film_id: &str) -> DbResult<Vec<Rent>> {
        debug!(film_id = %film_id, "Listing open rents");

        let rents = sqlx::query_as::<_, Rent>(&format!(
            "SELECT {RENT_COLUMNS} FROM rents WHERE film_id = ?1 AND state = ?2 ORDER BY start_date"
        ))
        .bind(film_id)
        .bind(RentState::Open)
        .fetch_all(&self.pool)
        .await?;

        Ok(rents)
    }

    /// Lists every rent of a client.
    pub async fn list_by_client(&self, client_id: &str) -> DbResult<Vec<Rent>> {
        let rents = sqlx::query_as::<_, Rent>(&format!(
            "SELECT {RENT_COLUMNS} FROM rents WHERE client_id = ?1 ORDER BY start_date"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rents)
    }

    /// Inserts a new rent.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - unknown film or client
    pub async fn insert(&self, rent: &Rent) -> DbResult<()> {
        debug!(
            id = %rent.id,
            film_id = %rent.film_id,
            amount = rent.amount,
            "Inserting rent"
        );

        sqlx::query(&format!(
            "INSERT INTO rents ({RENT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        ))
        .bind(&rent.id)
        .bind(&rent.film_id)
        .bind(&rent.client_id)
        .bind(rent.amount)
        .bind(rent.start_date)
        .bind(rent.return_date)
        .bind(rent.actual_return_date)
        .bind(rent.state)
        .bind(rent.cost_cents)
        .bind(rent.created_at)
        .bind(rent.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing rent, including its state and cost.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Rent doesn't exist
    pub async fn update(&self, rent: &Rent) -> DbResult<()> {
        debug!(id = %rent.id, state = %rent.state, "Updating rent");

        let result = sqlx::query(
            r#"
            UPDATE rents SET
                film_id = ?2,
                client_id = ?3,
                amount = ?4,
                start_date = ?5,
                return_date = ?6,
                actual_return_date = ?7,
                state = ?8,
                cost_cents = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&rent.id)
        .bind(&rent.film_id)
        .bind(&rent.client_id)
        .bind(rent.amount)
        .bind(rent.start_date)
        .bind(rent.return_date)
        .bind(rent.actual_return_date)
        .bind(rent.state)
        .bind(rent.cost_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Rent", &rent.id));
        }

        Ok(())
    }

    /// Deletes a rent.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting rent");

        let result = sqlx::query("DELETE FROM rents WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Rent", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = fixtures::database().await;
        let (film, client) = fixtures::seeded(&db, 4).await;

        let rent = fixtures::rent(&film.id, &client.id, 2);
        db.rents().insert(&rent).await.unwrap();

        let stored = db.rents().get_by_id(&rent.id).await.unwrap().unwrap();
        assert_eq!(stored.amount, 2);
        assert_eq!(stored.state, RentState::Open);
        assert_eq!(stored.start_date, rent.start_date);
        assert_eq!(stored.actual_return_date, None);
        assert_eq!(stored.cost_cents, Some(2000));
    }

    #[tokio::test]
    async fn test_open_scan_skips_closed_rents() {
        let db = fixtures::database().await;
        let (film, client) = fixtures::seeded(&db, 10).await;

        let open = fixtures::rent(&film.id, &client.id, 2);
        let mut closed = fixtures::rent(&film.id, &client.id, 3);
        closed.state = RentState::Close;
        closed.actual_return_date = Some(closed.return_date);

        db.rents().insert(&open).await.unwrap();
        db.rents().insert(&closed).await.unwrap();

        let open_rents = db.rents().list_open_by_film(&film.id).await.unwrap();
        assert_eq!(open_rents.len(), 1);
        assert_eq!(open_rents[0].id, open.id);

        assert_eq!(db.rents().list_by_film(&film.id).await.unwrap().len(), 2);
        assert_eq!(db.rents().list_by_client(&client.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_closes_rent() {
        let db = fixtures::database().await;
        let (film, client) = fixtures::seeded(&db, 4).await;

        let mut rent = fixtures::rent(&film.id, &client.id, 1);
        db.rents().insert(&rent).await.unwrap();

        rent.state = RentState::Close;
        rent.actual_return_date = Some(fixtures::date(2050, 1, 5));
        rent.cost_cents = None;
        db.rents().update(&rent).await.unwrap();

        let stored = db.rents().get_by_id(&rent.id).await.unwrap().unwrap();
        assert_eq!(stored.state, RentState::Close);
        assert_eq!(stored.actual_return_date, Some(fixtures::date(2050, 1, 5)));
        assert_eq!(stored.cost_cents, None);
        assert!(db.rents().list_open_by_film(&film.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_film_rejected() {
        let db = fixtures::database().await;
        let (_, client) = fixtures::seeded(&db, 4).await;

        let rent = fixtures::rent("no-such-film", &client.id, 1);
        let err = db.rents().insert(&rent).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = fixtures::database().await;
        let (film, client) = fixtures::seeded(&db, 4).await;

        let rent = fixtures::rent(&film.id, &client.id, 1);
        db.rents().insert(&rent).await.unwrap();
        db.rents().delete(&rent.id).await.unwrap();

        assert!(db.rents().get_by_id(&rent.id).await.unwrap().is_none());
        assert!(matches!(
            db.rents().delete(&rent.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
