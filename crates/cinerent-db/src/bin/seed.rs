//! # Seed Data Generator
//!
//! Populates a development database with a film catalogue, clients and
//! a handful of open rentals.
//!
//! ## Usage
//! ```bash
//! # 60 films (default)
//! cargo run -p cinerent-db --bin seed
//!
//! # Custom amount
//! cargo run -p cinerent-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p cinerent-db --bin seed -- --db ./data/cinerent.db
//! ```
//!
//! ## Generated Data
//! - One category per genre below
//! - Films named `{title}` or `{title} {n}` for sequels, price 1.50 - 9.50
//!   per day, stock 1 - 12; every sequel points at its prequel
//! - Client persons with valid phone and email
//! - One open rent on every third film, then availability is recomputed

use anyhow::Context;
use chrono::{Days, NaiveDate, Utc};
use std::env;
use tracing_subscriber::EnvFilter;

use cinerent_core::pricing::cost_of_rent;
use cinerent_core::{
    get_availability, Category, Client, Film, FilmType, Gender, Person, PersonType, Rent,
    RentState,
};
use cinerent_db::{generate_id, Database, DbConfig};

/// Genres with a few title stems each
const CATALOGUE: &[(&str, &[&str])] = &[
    ("Drama", &["The Long Winter", "Harbour Lights", "Paper Houses", "Quiet Rooms"]),
    ("Comedy", &["Second Helpings", "The Wrong Bus", "Uncle Partridge", "Lost Luggage"]),
    ("Science Fiction", &["Orbital", "The Ninth Moon", "Signal Decay", "Glass Planet"]),
    ("Thriller", &["Night Ferry", "Cold Ledger", "The Fifth Key", "Undertow"]),
    ("Animation", &["Paper Dragons", "Tin Garden", "Mossy and Flint", "Cloud Diver"]),
];

const CLIENTS: &[(&str, &str, Gender)] = &[
    ("Ada", "Lovelace", Gender::Feminine),
    ("Alan", "Turing", Gender::Male),
    ("Grace", "Hopper", Gender::Feminine),
    ("Edsger", "Dijkstra", Gender::Male),
    ("Barbara", "Liskov", Gender::Feminine),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 60;
    let mut db_path = String::from("./cinerent_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1]
                        .parse()
                        .with_context(|| format!("invalid --count value '{}'", args[i + 1]))?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("CineRent Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of films to generate (default: 60)");
                println!("  -d, --db <PATH>    Database file path (default: ./cinerent_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("CineRent Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Films:    {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .context("failed to open database")?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.films().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} films", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    // Clients
    let mut clients = Vec::with_capacity(CLIENTS.len());
    for (idx, (name, last_name, gender)) in CLIENTS.iter().enumerate() {
        let (person, client) = generate_client(name, last_name, *gender, idx);
        db.persons().insert(&person).await?;
        db.persons().insert_client(&client).await?;
        clients.push(client);
    }
    println!("✓ Created {} clients", clients.len());

    // Catalogue
    let mut films: Vec<Film> = Vec::with_capacity(count);
    'outer: for sequel in 0.. {
        for (genre, titles) in CATALOGUE {
            if films.len() >= count {
                break 'outer;
            }

            let category = match db.categories().list().await?.into_iter().find(|c| c.name == *genre)
            {
                Some(category) => category,
                None => {
                    let category = Category {
                        id: generate_id(),
                        name: genre.to_string(),
                        description: format!("{} titles", genre),
                    };
                    db.categories().insert(&category).await?;
                    category
                }
            };

            for (title_idx, title) in titles.iter().enumerate() {
                if films.len() >= count {
                    break 'outer;
                }

                // The film one round earlier with the same stem is the prequel
                let prequel_id = (sequel > 0).then(|| {
                    films
                        .iter()
                        .find(|f| f.title == film_title(title, sequel - 1))
                        .map(|f| f.id.clone())
                });

                let film = generate_film(
                    &category.id,
                    title,
                    sequel,
                    prequel_id.flatten(),
                    films.len() + title_idx,
                );
                db.films()
                    .insert(&film)
                    .await
                    .with_context(|| format!("failed to insert '{}'", film.title))?;
                films.push(film);
            }
        }
    }
    println!("✓ Generated {} films", films.len());

    // Rentals
    let today = Utc::now().date_naive();
    let mut rented = 0;
    for (idx, film) in films.iter().enumerate().filter(|(idx, _)| idx % 3 == 0) {
        let client = &clients[idx % clients.len()];
        let rent = generate_rent(film, &client.id, today, idx);
        db.rents().insert(&rent).await?;

        let availability = get_availability(&db, &film.id).await?;
        db.films().set_availability(&film.id, availability).await?;
        rented += 1;
    }
    println!("✓ Opened {} rentals", rented);

    println!();
    println!("✓ Seed complete in {:?}", start.elapsed());

    Ok(())
}

fn film_title(stem: &str, sequel: usize) -> String {
    if sequel == 0 {
        stem.to_string()
    } else {
        format!("{} {}", stem, sequel + 1)
    }
}

fn generate_film(
    category_id: &str,
    stem: &str,
    sequel: usize,
    prequel_id: Option<String>,
    seed: usize,
) -> Film {
    let now = Utc::now();
    let stock = 1 + (seed % 12) as i64;

    // 1.50 - 9.50 in 0.50 steps
    let price_by_day_cents = 150 + ((seed * 7) % 17) as i64 * 50;

    let release_date = NaiveDate::from_ymd_opt(1990 + (seed % 30) as i32, 1 + (seed % 12) as u32, 1)
        .unwrap_or_default();

    Film {
        id: generate_id(),
        title: film_title(stem, sequel),
        description: format!("{} (part {})", stem, sequel + 1),
        release_date,
        category_id: category_id.to_string(),
        price_by_day_cents,
        stock,
        availability: Some(stock),
        film_type: if seed % 5 == 0 { FilmType::Series } else { FilmType::Movie },
        prequel_id,
        created_at: now,
        updated_at: now,
    }
}

fn generate_client(name: &str, last_name: &str, gender: Gender, seed: usize) -> (Person, Client) {
    let person = Person {
        id: generate_id(),
        name: name.to_string(),
        last_name: last_name.to_string(),
        gender,
        date_of_birth: NaiveDate::from_ymd_opt(1960 + (seed * 7) as i32, 6, 15).unwrap_or_default(),
        person_type: PersonType::Client,
    };

    let client = Client {
        id: generate_id(),
        person_id: person.id.clone(),
        address: format!("{} Reel Street", 10 + seed),
        phone: format!("555-{:04}-{:04}", 1000 + seed, 2000 + seed * 3),
        email: format!("{}.{}@example.com", name.to_lowercase(), last_name.to_lowercase()),
    };

    (person, client)
}

fn generate_rent(film: &Film, client_id: &str, today: NaiveDate, seed: usize) -> Rent {
    let now = Utc::now();
    let days = 1 + (seed % 7) as u64;
    let return_date = today.checked_add_days(Days::new(days)).unwrap_or(today);

    let mut rent = Rent {
        id: generate_id(),
        film_id: film.id.clone(),
        client_id: client_id.to_string(),
        amount: 1,
        start_date: today,
        return_date,
        actual_return_date: None,
        state: RentState::Open,
        cost_cents: None,
        created_at: now,
        updated_at: now,
    };
    rent.cost_cents = cost_of_rent(&rent, film.price_by_day()).cents();
    rent
}
