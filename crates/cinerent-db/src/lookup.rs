//! # Rental Lookup
//!
//! Backs the core's [`RentalLookup`] seam with the SQLite repositories, so
//! `get_availability(&db, film_id)` works against the real store.

use async_trait::async_trait;

use crate::pool::Database;
use cinerent_core::{CoreResult, Film, Rent, RentalLookup};

#[async_trait]
impl RentalLookup for Database {
    async fn find_film_by_id(&self, film_id: &str) -> CoreResult<Option<Film>> {
        Ok(self.films().get_by_id(film_id).await?)
    }

    async fn find_open_rentals_by_film_id(&self, film_id: &str) -> CoreResult<Vec<Rent>> {
        Ok(self.rents().list_open_by_film(film_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::fixtures;
    use cinerent_core::{get_availability, CoreError, RentState};

    #[tokio::test]
    async fn test_availability_from_database() {
        let db = fixtures::database().await;
        let (film, client) = fixtures::seeded(&db, 4).await;

        assert_eq!(get_availability(&db, &film.id).await.unwrap(), 4);

        let first = fixtures::rent(&film.id, &client.id, 1);
        let mut second = fixtures::rent(&film.id, &client.id, 2);
        db.rents().insert(&first).await.unwrap();
        db.rents().insert(&second).await.unwrap();
        assert_eq!(get_availability(&db, &film.id).await.unwrap(), 1);

        second.state = RentState::Close;
        db.rents().update(&second).await.unwrap();
        assert_eq!(get_availability(&db, &film.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unknown_film() {
        let db = fixtures::database().await;
        let err = get_availability(&db, "missing").await.unwrap_err();
        assert!(matches!(err, CoreError::FilmNotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_closed_pool_is_storage_error() {
        let db = fixtures::database().await;
        db.close().await;
        let err = get_availability(&db, "any").await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
    }
}
