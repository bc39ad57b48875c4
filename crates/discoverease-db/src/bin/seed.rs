//! # Seed Data Generator
//!
//! Populates the database with a sample app catalog for development.
//!
//! ## Usage
//! ```bash
//! # Generate the full catalog (default)
//! cargo run -p discoverease-db --bin seed
//!
//! # Generate at most 20 apps
//! cargo run -p discoverease-db --bin seed -- --count 20
//!
//! # Specify database path
//! cargo run -p discoverease-db --bin seed -- --db ./data/DiscoverEase.db
//! ```
//!
//! ## Generated Catalog
//! Each developer publishes several apps in one genre. Every app gets:
//! - App_Id: `{DEVELOPER_ID}-{INDEX}`
//! - Size: 8 - 407 MB
//! - Price: every third app is free, others $0.99 - $9.99
//! - Rating: 1.0 - 5.0, with some apps left unrated
//!
//! All rows are written in one transaction, so every app lands with its
//! developer and pricing row.

use chrono::NaiveDate;
use discoverease_core::{Application, Developer, Pricing};
use discoverease_db::{
    ApplicationRepository, Database, DbConfig, DeveloperRepository, PricingRepository,
};
use std::env;

/// (Developer_Id, Developer, Genre, app names)
const DEVELOPERS: &[(&str, &str, &str, &[&str])] = &[
    (
        "DEV100",
        "Brightside Games",
        "Puzzle",
        &[
            "Block Drop",
            "Color Link",
            "Tile Twist",
            "Gem Cascade",
            "Pipe Dream",
            "Sudoku Daily",
            "Word Maze",
        ],
    ),
    (
        "DEV200",
        "Northwind Labs",
        "Productivity",
        &["Task Board", "Focus Timer", "Quick Notes", "Habit Track"],
    ),
    (
        "DEV300",
        "Pixel Forge",
        "Action",
        &[
            "Sky Raiders",
            "Neon Runner",
            "Blade Storm",
            "Tank Rally",
            "Star Courier",
        ],
    ),
    (
        "DEV400",
        "Trailhead Media",
        "Health and Fitness",
        &["Step Counter", "Yoga Flow", "Water Log"],
    ),
    (
        "DEV500",
        "Open Page",
        "Book",
        &["Story Shelf", "Audio Tales"],
    ),
    (
        "DEV600",
        "Harbor Apps",
        "Role-Playing",
        &["Dungeon Tide", "Iron Crown", "Frost Keep", "Moon Warden"],
    ),
];

const AGE_GROUPS: &[&str] = &["4+", "9+", "12+", "17+"];

/// Parses the `--count` value: a whole number greater than zero.
fn parse_count(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(format!(
            "--count expects a positive whole number, got '{}'",
            value
        )),
        Ok(n) => Ok(n),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = usize::MAX;
    let mut db_path = String::from("./DiscoverEase.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                match args.get(i + 1).map(|value| parse_count(value)) {
                    Some(Ok(n)) => count = n,
                    Some(Err(msg)) => {
                        eprintln!("error: {}", msg);
                        std::process::exit(2);
                    }
                    None => {
                        eprintln!("error: --count needs a value");
                        std::process::exit(2);
                    }
                }
                i += 1;
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("DiscoverEase Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Maximum number of apps to generate (default: all)");
                println!("  -d, --db <PATH>    Database file path (default: ./DiscoverEase.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 DiscoverEase Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.applications().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} apps", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating catalog...");

    let start = std::time::Instant::now();
    let mut generated = 0;
    let mut tx = db.pool().begin().await?;

    'developers: for (dev_idx, (developer_id, developer, genre, apps)) in DEVELOPERS.iter().enumerate()
    {
        if generated >= count {
            break;
        }

        DeveloperRepository::insert(
            &mut tx,
            &Developer {
                developer_id: developer_id.to_string(),
                developer: developer.to_string(),
            },
        )
        .await?;

        for (app_idx, app_name) in apps.iter().enumerate() {
            if generated >= count {
                break 'developers;
            }

            let (application, pricing) =
                generate_app(developer_id, genre, app_name, dev_idx * 100 + app_idx);

            ApplicationRepository::insert(&mut tx, &application).await?;
            PricingRepository::insert(&mut tx, &pricing).await?;
            generated += 1;
        }
    }

    tx.commit().await?;

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} apps in {:?}", generated, elapsed);
    println!("  Applications: {}", db.applications().count().await?);
    println!("  Developers:   {}", db.developers().count().await?);
    println!("  Pricing:      {}", db.pricing().count().await?);

    // Verify the reporting views
    println!();
    println!("Verifying report views...");
    let top = db.reports().top_developers(3).await?;
    for row in &top {
        println!("  {}: {} apps", row.developer, row.total_apps);
    }
    let free = db.reports().free_apps_by_genre("Puzzle", 15).await?;
    println!("  Free Puzzle apps: {}", free.len());

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Generates one application and its pricing row from a seed index.
fn generate_app(
    developer_id: &str,
    genre: &str,
    name: &str,
    seed: usize,
) -> (Application, Pricing) {
    let app_id = format!("{}-{:03}", developer_id, seed % 100);

    // Size: 8 - 407 MB
    let size = 8.0 + ((seed * 37) % 400) as f64;

    // Every third app is free, the rest $0.99 - $9.99
    let price = if seed % 3 == 0 {
        0.0
    } else {
        0.99 + ((seed * 13) % 10) as f64
    };

    // Every fifth app has no ratings yet
    let avg_user_rating = if seed % 5 == 4 {
        None
    } else {
        Some(1.0 + ((seed * 7) % 9) as f64 * 0.5)
    };

    let year = 2015 + (seed % 8) as i32;
    let month = 1 + (seed % 12) as u32;
    let day = 1 + (seed % 28) as u32;
    let released_date = NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default();
    let updated_date = (seed % 4 != 0)
        .then(|| NaiveDate::from_ymd_opt(year + 1, month, day))
        .flatten();

    let application = Application {
        app_id: app_id.clone(),
        app_name: name.to_string(),
        developer_id: developer_id.to_string(),
        genre: genre.to_string(),
        size,
        app_version: format!("{}.{}", 1 + seed % 4, seed % 10),
        ios_version: format!("{}.0", 11 + seed % 6),
        released_date,
        updated_date,
        avg_user_rating,
        age_group: AGE_GROUPS[seed % AGE_GROUPS.len()].to_string(),
    };

    let pricing = Pricing {
        app_id,
        price,
        currency: "USD".to_string(),
    };

    (application, pricing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("20"), Ok(20));
        assert_eq!(parse_count(" 3 "), Ok(3));
        assert!(parse_count("abc").is_err());
        assert!(parse_count("-1").is_err());
        assert!(parse_count("0").is_err());
    }
}
