//! # Menu Seeder
//!
//! Populates an empty database with a sample menu.
//!
//! ## Usage
//! ```bash
//! # Seed the default database with the built-in menu
//! cargo run -p bistro-db --bin seed
//!
//! # Specify database path
//! cargo run -p bistro-db --bin seed -- --db ./data/bistro.db
//!
//! # Load the menu from a JSON file instead
//! cargo run -p bistro-db --bin seed -- --menu ./menu.json
//! ```
//!
//! ## Menu File Format
//! A JSON array of items; prices are in minor units (paise).
//! ```json
//! [
//!   { "name": "Butter Chicken", "category": "Mains", "unit_price": 25000 },
//!   { "name": "Naan", "category": "Breads", "unit_price": 4000,
//!     "description": "Tandoor-baked flatbread" }
//! ]
//! ```

use std::env;
use std::path::Path;

use bistro_core::{Money, NewMenuItem};
use bistro_db::{Database, DbConfig, DbError, MenuCatalog};

/// Built-in sample menu: (category, name, price in minor units, description)
const SAMPLE_MENU: &[(&str, &str, i64, &str)] = &[
    ("Starters", "Paneer Tikka", 22_000, "Chargrilled cottage cheese, mint chutney"),
    ("Starters", "Samosa", 6_000, "Two pastries with spiced potato"),
    ("Starters", "Chicken 65", 24_000, "Fried chicken, curry leaves, red chilli"),
    ("Mains", "Butter Chicken", 25_000, "Tandoori chicken in tomato butter gravy"),
    ("Mains", "Palak Paneer", 21_000, "Cottage cheese in spinach gravy"),
    ("Mains", "Dal Makhani", 18_000, "Black lentils slow-cooked overnight"),
    ("Mains", "Chicken Biryani", 28_000, "Dum-cooked basmati with chicken"),
    ("Mains", "Veg Biryani", 22_000, "Dum-cooked basmati with vegetables"),
    ("Breads", "Naan", 4_000, "Tandoor-baked flatbread"),
    ("Breads", "Butter Naan", 5_000, "Naan brushed with butter"),
    ("Breads", "Garlic Naan", 6_000, "Naan with garlic and coriander"),
    ("Breads", "Tandoori Roti", 3_000, "Whole wheat flatbread"),
    ("Desserts", "Gulab Jamun", 9_000, "Two milk dumplings in syrup"),
    ("Desserts", "Rasmalai", 11_000, "Cottage cheese discs in saffron milk"),
    ("Beverages", "Masala Chai", 5_000, "Spiced tea"),
    ("Beverages", "Sweet Lassi", 8_000, "Churned yoghurt drink"),
];

fn sample_menu() -> Vec<NewMenuItem> {
    SAMPLE_MENU
        .iter()
        .map(|(category, name, price, description)| {
            NewMenuItem::new(*name, *category, Money::from_minor(*price)).with_description(*description)
        })
        .collect()
}

fn load_menu(path: &Path) -> Result<Vec<NewMenuItem>, DbError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| DbError::InvalidSeed(format!("{}: {}", path.display(), e)))?;
    let items: Vec<NewMenuItem> = serde_json::from_str(&raw)
        .map_err(|e| DbError::InvalidSeed(format!("{}: {}", path.display(), e)))?;

    if items.is_empty() {
        return Err(DbError::InvalidSeed(format!("{}: menu is empty", path.display())));
    }
    Ok(items)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("BISTRO_DB_PATH").unwrap_or_else(|_| String::from("./bistro.db"));
    let mut menu_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--menu" | "-m" => {
                if i + 1 < args.len() {
                    menu_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bistro Menu Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: $BISTRO_DB_PATH or ./bistro.db)");
                println!("  -m, --menu <FILE>    JSON menu file (default: built-in sample menu)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("Bistro Menu Seeder");
    println!("==================");
    println!("Database: {}", db_path);
    println!();

    let items = match &menu_path {
        Some(path) => load_menu(Path::new(path))?,
        None => sample_menu(),
    };

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.menu().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to reseed.");
        return Ok(());
    }

    let inserted = db.menu().insert_all(&items).await?;
    println!("✓ Inserted {} menu items", inserted);

    println!();
    for item in db.menu().list_items().await? {
        println!("  {:<10} {:<18} {:>8}", item.category, item.name, item.unit_price.to_string());
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
