//! # Rental Service
//!
//! Workflows that tie the calculators to storage.
//!
//! ## Creating a Rent
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_rent(NewRent)                                                   │
//! │       │                                                                 │
//! │       ├── 1. structural validation (amount, dates, max days)           │
//! │       ├── 2. film + client exist                                       │
//! │       ├── 3. get_availability(db, film_id)                             │
//! │       ├── 4. ensure_amount_available(amount, availability)             │
//! │       │       └── fails → nothing written                              │
//! │       ├── 5. get_rent_cost(...)                                        │
//! │       ├── 6. insert rent (state open)                                  │
//! │       └── 7. refresh the film's cached availability                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 3 to 6 are not wrapped in a transaction; two concurrent rents may
//! both pass step 4. Availability then goes negative and is reported as such.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use cinerent_core::pricing::cost_of_rent;
use cinerent_core::validation::{
    ensure_amount_available, validate_amount, validate_email, validate_name,
    validate_actual_return, validate_non_negative, validate_not_in_future, validate_phone,
    validate_rent_dates,
};
use cinerent_core::{
    get_availability, get_rent_cost, Category, Client, CoreError, Film, FilmType, Gender,
    Person, PersonType, Rent, RentCost, RentState, ValidationError, MAX_RENTAL_DAYS,
};
use cinerent_db::{generate_id, Database};

use crate::config::ServiceConfig;
use crate::error::{ErrorCode, ServiceError, ServiceResult};

// =============================================================================
// Inputs
// =============================================================================

/// Fields of a film, used for both creation and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFilm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_date: NaiveDate,
    pub category_id: String,
    pub price_by_day_cents: i64,
    pub stock: i64,
    pub film_type: FilmType,
    #[serde(default)]
    pub prequel_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRent {
    pub film_id: String,
    pub client_id: String,
    pub amount: i64,
    pub start_date: NaiveDate,
    pub return_date: NaiveDate,
}

/// Editable fields of an open rent. Film and client are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentUpdate {
    pub amount: i64,
    pub start_date: NaiveDate,
    pub return_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub person_type: PersonType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub person_id: String,
    #[serde(default)]
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Price of a prospective or past rental, without persisting anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub film_id: String,
    pub amount: i64,
    pub start_date: NaiveDate,
    pub return_date: NaiveDate,
    #[serde(default)]
    pub actual_return_date: Option<NaiveDate>,
}

// =============================================================================
// Service
// =============================================================================

/// Rental workflows over a shared [`Database`].
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct RentalService {
    db: Database,
    max_rental_days: i64,
}

impl RentalService {
    pub fn new(db: Database) -> Self {
        RentalService {
            db,
            max_rental_days: MAX_RENTAL_DAYS,
        }
    }

    /// Opens the configured database (running migrations) and builds the service.
    pub async fn from_config(config: &ServiceConfig) -> ServiceResult<Self> {
        let db = Database::new(config.db_config()).await?;
        Ok(RentalService::new(db).with_max_rental_days(config.max_rental_days))
    }

    pub fn with_max_rental_days(mut self, days: i64) -> Self {
        self.max_rental_days = days;
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub async fn health_check(&self) -> bool {
        self.db.health_check().await
    }

    // =========================================================================
    // Catalogue
    // =========================================================================

    pub async fn create_category(&self, name: &str, description: &str) -> ServiceResult<Category> {
        validate_name("name", name)?;

        let category = Category {
            id: generate_id(),
            name: name.trim().to_string(),
            description: description.to_string(),
        };
        self.db.categories().insert(&category).await?;

        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.db.categories().list().await?)
    }

    /// Removes a category that no film belongs to.
    pub async fn delete_category(&self, category_id: &str) -> ServiceResult<()> {
        let category = self.find_category(category_id).await?;

        let films = self.db.films().list_by_category(&category.id).await?;
        if !films.is_empty() {
            return Err(ServiceError::new(
                ErrorCode::BusinessLogic,
                format!("Category {} still has {} films", category.name, films.len()),
            ));
        }

        self.db.categories().delete(&category.id).await?;
        info!(category_id = %category.id, "Category deleted");
        Ok(())
    }

    /// Adds a film. Its cached availability starts at the full stock.
    pub async fn create_film(&self, input: NewFilm) -> ServiceResult<Film> {
        debug!(title = %input.title, "create_film");
        self.validate_film(&input)?;

        let now = Utc::now();
        let film = Film {
            id: generate_id(),
            title: input.title.trim().to_string(),
            description: input.description,
            release_date: input.release_date,
            category_id: input.category_id,
            price_by_day_cents: input.price_by_day_cents,
            stock: input.stock,
            availability: Some(input.stock),
            film_type: input.film_type,
            prequel_id: input.prequel_id,
            created_at: now,
            updated_at: now,
        };
        self.db.films().insert(&film).await?;

        info!(film_id = %film.id, title = %film.title, stock = film.stock, "Film created");
        Ok(film)
    }

    /// Fetches a film with a freshly computed availability.
    pub async fn get_film(&self, film_id: &str) -> ServiceResult<Film> {
        let mut film = self.find_film(film_id).await?;
        let availability = self.cache_availability(&film).await?;
        film.availability = Some(availability);
        Ok(film)
    }

    /// Lists films, refreshing each cached availability.
    pub async fn list_films(&self, limit: u32) -> ServiceResult<Vec<Film>> {
        let mut films = self.db.films().list(limit).await?;
        for film in films.iter_mut() {
            film.availability = Some(self.cache_availability(film).await?);
        }
        Ok(films)
    }

    /// Lists the films of one category, refreshing each cached availability.
    pub async fn list_films_by_category(&self, category_id: &str) -> ServiceResult<Vec<Film>> {
        let category = self.find_category(category_id).await?;

        let mut films = self.db.films().list_by_category(&category.id).await?;
        for film in films.iter_mut() {
            film.availability = Some(self.cache_availability(film).await?);
        }
        Ok(films)
    }

    /// Replaces a film's fields and recomputes its availability.
    pub async fn update_film(&self, film_id: &str, input: NewFilm) -> ServiceResult<Film> {
        debug!(film_id = %film_id, "update_film");
        self.validate_film(&input)?;

        if input.prequel_id.as_deref() == Some(film_id) {
            return Err(ServiceError::validation("a film cannot be its own prequel"));
        }

        let mut film = self.find_film(film_id).await?;
        film.title = input.title.trim().to_string();
        film.description = input.description;
        film.release_date = input.release_date;
        film.category_id = input.category_id;
        film.price_by_day_cents = input.price_by_day_cents;
        film.stock = input.stock;
        film.film_type = input.film_type;
        film.prequel_id = input.prequel_id;

        self.db.films().update(&film).await?;
        film.availability = Some(self.cache_availability(&film).await?);

        info!(film_id = %film_id, stock = film.stock, "Film updated");
        Ok(film)
    }

    /// Removes a film with no rent history, open or closed.
    pub async fn delete_film(&self, film_id: &str) -> ServiceResult<()> {
        let film = self.find_film(film_id).await?;

        let rents = self.db.rents().list_by_film(&film.id).await?;
        if !rents.is_empty() {
            return Err(ServiceError::new(
                ErrorCode::BusinessLogic,
                format!("Film {} has {} rents and cannot be deleted", film.id, rents.len()),
            ));
        }

        self.db.films().delete(&film.id).await?;
        info!(film_id = %film.id, title = %film.title, "Film deleted");
        Ok(())
    }

    // =========================================================================
    // Availability
    // =========================================================================

    /// Current availability, without touching the cache.
    pub async fn availability(&self, film_id: &str) -> ServiceResult<i64> {
        Ok(get_availability(&self.db, film_id).await?)
    }

    /// Recomputes availability and stores it on the film.
    pub async fn refresh_availability(&self, film_id: &str) -> ServiceResult<i64> {
        let film = self.find_film(film_id).await?;
        self.cache_availability(&film).await
    }

    async fn cache_availability(&self, film: &Film) -> ServiceResult<i64> {
        let availability = get_availability(&self.db, &film.id).await?;

        if availability < 0 {
            warn!(film_id = %film.id, availability, "Film is overbooked");
        }

        if film.availability != Some(availability) {
            self.db.films().set_availability(&film.id, availability).await?;
        }
        Ok(availability)
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Cost of a rental at the film's current price. Nothing is written.
    pub async fn quote(&self, request: &QuoteRequest) -> ServiceResult<RentCost> {
        validate_amount(request.amount)?;
        validate_rent_dates(
            request.start_date,
            request.return_date,
            request.actual_return_date,
            self.max_rental_days,
        )?;

        let film = self.find_film(&request.film_id).await?;

        let cost = get_rent_cost(
            request.amount,
            request.start_date,
            request.return_date,
            request.actual_return_date,
            film.price_by_day(),
        );
        Ok(cost.representable()?)
    }

    // =========================================================================
    // Rents
    // =========================================================================

    pub async fn get_rent(&self, rent_id: &str) -> ServiceResult<Rent> {
        self.find_rent(rent_id).await
    }

    pub async fn list_rents(&self, limit: u32) -> ServiceResult<Vec<Rent>> {
        Ok(self.db.rents().list(limit).await?)
    }

    /// Rent history of a client, open and closed, oldest start first.
    pub async fn client_rents(&self, client_id: &str) -> ServiceResult<Vec<Rent>> {
        let client = self.find_client(client_id).await?;
        Ok(self.db.rents().list_by_client(&client.id).await?)
    }

    /// Opens a rent if enough copies are free.
    pub async fn create_rent(&self, input: NewRent) -> ServiceResult<Rent> {
        debug!(film_id = %input.film_id, amount = input.amount, "create_rent");

        validate_amount(input.amount)?;
        validate_rent_dates(input.start_date, input.return_date, None, self.max_rental_days)?;

        let film = self.find_film(&input.film_id).await?;
        self.find_client(&input.client_id).await?;

        let available = get_availability(&self.db, &film.id).await?;
        ensure_amount_available(&film.id, input.amount, available)?;

        let cost = get_rent_cost(
            input.amount,
            input.start_date,
            input.return_date,
            None,
            film.price_by_day(),
        )
        .representable()?;

        let now = Utc::now();
        let rent = Rent {
            id: generate_id(),
            film_id: film.id.clone(),
            client_id: input.client_id,
            amount: input.amount,
            start_date: input.start_date,
            return_date: input.return_date,
            actual_return_date: None,
            state: RentState::Open,
            cost_cents: cost.cents(),
            created_at: now,
            updated_at: now,
        };
        self.db.rents().insert(&rent).await?;
        self.cache_availability(&film).await?;

        info!(
            rent_id = %rent.id,
            film_id = %rent.film_id,
            amount = rent.amount,
            cost = ?rent.cost_cents,
            "Rent created"
        );
        Ok(rent)
    }

    /// Changes the amount or dates of an open rent and reprices it.
    pub async fn update_rent(&self, rent_id: &str, input: RentUpdate) -> ServiceResult<Rent> {
        debug!(rent_id = %rent_id, "update_rent");

        validate_amount(input.amount)?;
        validate_rent_dates(input.start_date, input.return_date, None, self.max_rental_days)?;

        let mut rent = self.find_rent(rent_id).await?;
        ensure_open(&rent)?;

        let film = self.find_film(&rent.film_id).await?;

        // Shrinking never needs free copies, even on an overbooked film
        if input.amount > rent.amount {
            // The rent's own copies are part of the open sum; hand them back first
            let available = get_availability(&self.db, &film.id).await? + rent.amount;
            ensure_amount_available(&film.id, input.amount, available)?;
        }

        rent.amount = input.amount;
        rent.start_date = input.start_date;
        rent.return_date = input.return_date;
        rent.cost_cents = cost_of_rent(&rent, film.price_by_day()).representable()?.cents();

        self.db.rents().update(&rent).await?;
        self.cache_availability(&film).await?;

        info!(rent_id = %rent_id, amount = rent.amount, cost = ?rent.cost_cents, "Rent updated");
        Ok(rent)
    }

    /// Records the copies as back, closes the rent and stores the final cost.
    pub async fn return_rent(&self, rent_id: &str, returned_on: NaiveDate) -> ServiceResult<Rent> {
        debug!(rent_id = %rent_id, %returned_on, "return_rent");

        let mut rent = self.find_rent(rent_id).await?;
        ensure_open(&rent)?;
        validate_actual_return(rent.start_date, returned_on)?;

        let film = self.find_film(&rent.film_id).await?;

        rent.actual_return_date = Some(returned_on);
        rent.state = RentState::Close;
        rent.cost_cents = cost_of_rent(&rent, film.price_by_day()).representable()?.cents();

        self.db.rents().update(&rent).await?;
        let availability = self.cache_availability(&film).await?;
        let late = returned_on > rent.return_date;

        info!(
            rent_id = %rent_id,
            late,
            cost = ?rent.cost_cents,
            availability,
            "Rent returned"
        );
        Ok(rent)
    }

    /// Removes a rent and releases any copies it held.
    pub async fn delete_rent(&self, rent_id: &str) -> ServiceResult<()> {
        let rent = self.find_rent(rent_id).await?;
        self.db.rents().delete(rent_id).await?;
        self.refresh_availability(&rent.film_id).await?;

        info!(rent_id = %rent_id, film_id = %rent.film_id, "Rent deleted");
        Ok(())
    }

    // =========================================================================
    // People
    // =========================================================================

    pub async fn create_person(&self, input: NewPerson) -> ServiceResult<Person> {
        validate_name("name", &input.name)?;
        validate_name("last_name", &input.last_name)?;
        validate_not_in_future("date_of_birth", input.date_of_birth, Utc::now().date_naive())?;

        let person = Person {
            id: generate_id(),
            name: input.name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            gender: input.gender,
            date_of_birth: input.date_of_birth,
            person_type: input.person_type,
        };
        self.db.persons().insert(&person).await?;

        debug!(
            person_id = %person.id,
            age = ?person.age_on(Utc::now().date_naive()),
            "Person created"
        );
        Ok(person)
    }

    /// Attaches client contact details to a person of type `client`.
    pub async fn register_client(&self, input: NewClient) -> ServiceResult<Client> {
        validate_phone(&input.phone)?;
        validate_email(&input.email)?;

        let person = self
            .db
            .persons()
            .get_by_id(&input.person_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Person", &input.person_id))?;

        if person.person_type != PersonType::Client {
            return Err(ValidationError::NotAllowed {
                field: "person_type".to_string(),
                allowed: vec!["client".to_string()],
            }
            .into());
        }

        let client = Client {
            id: generate_id(),
            person_id: person.id,
            address: input.address,
            phone: input.phone.trim().to_string(),
            email: input.email.trim().to_string(),
        };
        self.db.persons().insert_client(&client).await?;

        info!(client_id = %client.id, "Client registered");
        Ok(client)
    }

    pub async fn list_clients(&self) -> ServiceResult<Vec<Client>> {
        Ok(self.db.persons().list_clients().await?)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn validate_film(&self, input: &NewFilm) -> ServiceResult<()> {
        validate_name("title", &input.title)?;
        validate_not_in_future("release_date", input.release_date, Utc::now().date_naive())?;
        validate_non_negative("price_by_day", input.price_by_day_cents)?;
        validate_non_negative("stock", input.stock)?;
        Ok(())
    }

    async fn find_film(&self, film_id: &str) -> ServiceResult<Film> {
        self.db
            .films()
            .get_by_id(film_id)
            .await?
            .ok_or_else(|| CoreError::FilmNotFound(film_id.to_string()).into())
    }

    async fn find_category(&self, category_id: &str) -> ServiceResult<Category> {
        self.db
            .categories()
            .get_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", category_id))
    }

    async fn find_rent(&self, rent_id: &str) -> ServiceResult<Rent> {
        self.db
            .rents()
            .get_by_id(rent_id)
            .await?
            .ok_or_else(|| CoreError::RentNotFound(rent_id.to_string()).into())
    }

    async fn find_client(&self, client_id: &str) -> ServiceResult<Client> {
        self.db
            .persons()
            .get_client(client_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Client", client_id))
    }
}

fn ensure_open(rent: &Rent) -> ServiceResult<()> {
    if !rent.is_open() {
        return Err(CoreError::InvalidRentState {
            rent_id: rent.id.clone(),
            current_state: rent.state.to_string(),
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cinerent_db::DbConfig;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn service() -> RentalService {
        RentalService::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    async fn film(service: &RentalService, stock: i64) -> Film {
        let category = service.create_category("Drama", "").await.unwrap();
        service
            .create_film(NewFilm {
                title: "Stalker".to_string(),
                description: String::new(),
                release_date: date(1979, 5, 25),
                category_id: category.id,
                price_by_day_cents: 1000,
                stock,
                film_type: FilmType::Movie,
                prequel_id: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_film_starts_fully_available() {
        let service = service().await;
        let film = film(&service, 3).await;
        assert_eq!(film.availability, Some(3));
        assert_eq!(service.availability(&film.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_future_release_rejected() {
        let service = service().await;
        let category = service.create_category("Drama", "").await.unwrap();
        let err = service
            .create_film(NewFilm {
                title: "Tomorrow".to_string(),
                description: String::new(),
                release_date: date(2999, 1, 1),
                category_id: category.id,
                price_by_day_cents: 100,
                stock: 1,
                film_type: FilmType::Movie,
                prequel_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_quote_does_not_persist() {
        let service = service().await;
        let film = film(&service, 2).await;

        let cost = service
            .quote(&QuoteRequest {
                film_id: film.id.clone(),
                amount: 2,
                start_date: date(2050, 1, 1),
                return_date: date(2050, 1, 2),
                actual_return_date: Some(date(2050, 1, 5)),
            })
            .await
            .unwrap();

        assert_eq!(cost.cents(), Some(9200));
        assert!(service.list_rents(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quote_unknown_film() {
        let service = service().await;
        let err = service
            .quote(&QuoteRequest {
                film_id: "missing".to_string(),
                amount: 1,
                start_date: date(2050, 1, 1),
                return_date: date(2050, 1, 2),
                actual_return_date: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_quote_too_large_is_rejected() {
        let service = service().await;
        let mut film = film(&service, 1).await;
        film.price_by_day_cents = 1_000_000_000_000_000;
        service.database().films().update(&film).await.unwrap();

        let err = service
            .quote(&QuoteRequest {
                film_id: film.id.clone(),
                amount: 1000,
                start_date: date(2050, 1, 1),
                return_date: date(2050, 1, 16),
                actual_return_date: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("too large"));
    }

    #[tokio::test]
    async fn test_category_listing_and_deletion() {
        let service = service().await;
        let film = film(&service, 1).await;
        let empty = service.create_category("Documentary", "").await.unwrap();

        let drama = service.list_films_by_category(&film.category_id).await.unwrap();
        assert_eq!(drama.len(), 1);
        assert_eq!(drama[0].availability, Some(1));
        assert!(service.list_films_by_category(&empty.id).await.unwrap().is_empty());

        let err = service.delete_category(&film.category_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        service.delete_category(&empty.id).await.unwrap();
        assert_eq!(service.list_categories().await.unwrap().len(), 1);

        let err = service.list_films_by_category(&empty.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_health_check() {
        let service = service().await;
        assert!(service.health_check().await);
    }

    #[tokio::test]
    async fn test_register_client_requires_client_person() {
        let service = service().await;
        let crew = service
            .create_person(NewPerson {
                name: "Andrei".to_string(),
                last_name: "Tarkovsky".to_string(),
                gender: Gender::Male,
                date_of_birth: date(1932, 4, 4),
                person_type: PersonType::FilmRelated,
            })
            .await
            .unwrap();

        let err = service
            .register_client(NewClient {
                person_id: crew.id,
                address: String::new(),
                phone: "555-1234-5678".to_string(),
                email: "andrei@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("person_type"));
    }

    #[tokio::test]
    async fn test_register_client_checks_phone() {
        let service = service().await;
        let err = service
            .register_client(NewClient {
                person_id: "whoever".to_string(),
                address: String::new(),
                phone: "5551234".to_string(),
                email: "x@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
