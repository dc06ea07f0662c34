//! # Person Repository
//!
//! Persons and the client records attached to them.
//!
//! ```text
//! persons (1) ◄──── (0..1) clients ◄──── (*) rents
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use cinerent_core::{Client, Person};

/// Repository for person and client database operations.
#[derive(Debug, Clone)]
pub struct PersonRepository {
    pool: SqlitePool,
}

impl PersonRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PersonRepository { pool }
    }

    // =========================================================================
    // Persons
    // =========================================================================

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Person>> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, name, last_name, gender, date_of_birth, person_type
            FROM persons WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(person)
    }

    pub async fn insert(&self, person: &Person) -> DbResult<()> {
        debug!(id = %person.id, "Inserting person");

        sqlx::query(
            r#"
            INSERT INTO persons (id, name, last_name, gender, date_of_birth, person_type)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&person.id)
        .bind(&person.name)
        .bind(&person.last_name)
        .bind(person.gender)
        .bind(person.date_of_birth)
        .bind(person.person_type)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Clients
    // =========================================================================

    pub async fn get_client(&self, id: &str) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, person_id, address, phone, email FROM clients WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn list_clients(&self) -> DbResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, person_id, address, phone, email FROM clients ORDER BY email",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Inserts a client record. A person has at most one.
    pub async fn insert_client(&self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, person_id = %client.person_id, "Inserting client");

        sqlx::query(
            r#"
            INSERT INTO clients (id, person_id, address, phone, email)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&client.id)
        .bind(&client.person_id)
        .bind(&client.address)
        .bind(&client.phone)
        .bind(&client.email)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &client.person_id),
            other => other,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use cinerent_core::{Gender, PersonType};

    #[tokio::test]
    async fn test_person_round_trip() {
        let db = fixtures::database().await;
        let person = fixtures::person(PersonType::FilmRelated);
        db.persons().insert(&person).await.unwrap();

        let stored = db.persons().get_by_id(&person.id).await.unwrap().unwrap();
        assert_eq!(stored.gender, Gender::Feminine);
        assert_eq!(stored.person_type, PersonType::FilmRelated);
        assert_eq!(stored.date_of_birth, fixtures::date(1906, 12, 9));
    }

    #[tokio::test]
    async fn test_one_client_per_person() {
        let db = fixtures::database().await;
        let (_, client) = fixtures::seeded(&db, 1).await;

        assert!(db.persons().get_client(&client.id).await.unwrap().is_some());

        let second = fixtures::client(&client.person_id);
        let err = db.persons().insert_client(&second).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(db.persons().list_clients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_client_requires_person() {
        let db = fixtures::database().await;
        let err = db
            .persons()
            .insert_client(&fixtures::client("nobody"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
