//! # Seed Data Generator
//!
//! Populates the local store with demo tables and history for development.
//!
//! ## Usage
//! ```bash
//! # 6 open tables, 10 closed ones (default)
//! cargo run -p mesa-db --bin seed
//!
//! # Custom amounts
//! cargo run -p mesa-db --bin seed -- --tables 12 --history 40
//!
//! # Specify database path
//! cargo run -p mesa-db --bin seed -- --db ./data/mesa.db
//! ```
//!
//! Every table is built through `OrderManager` from the bundled menu, the
//! same way the waiter app builds them, so the stored documents have exactly
//! the production layout and dish names.

use chrono::{Duration, Local};
use std::env;

use mesa_core::{Dish, Menu, OrderManager, SaveOutcome};
use mesa_db::{Database, DbConfig};

/// Free-text notes used round-robin
const NOTES: &[&str] = &["", "sin cebolla", "", "poco ají", "", "para llevar"];

const REQUESTS: &[&str] = &["", "cumpleaños, traer vela", "", "todo junto", "rápido por favor"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut tables: usize = 6;
    let mut history: usize = 10;
    let mut force = false;
    let mut db_path = String::from("./mesa_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tables" | "-t" => {
                if i + 1 < args.len() {
                    tables = args[i + 1].parse().unwrap_or(tables);
                    i += 1;
                }
            }
            "--history" | "-H" => {
                if i + 1 < args.len() {
                    history = args[i + 1].parse().unwrap_or(history);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Mesa Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -t, --tables <N>   Open tables to create (default: 6)");
                println!("  -H, --history <N>  Closed tables to archive (default: 10)");
                println!("  -d, --db <PATH>    Database file path (default: ./mesa_dev.db)");
                println!("  -f, --force        Replace existing order data");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Mesa Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Tables:   {}", tables);
    println!("History:  {}", history);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.orders().load_all().await?;
    if !force && (!existing.tables.is_empty() || !existing.history.is_empty()) {
        println!(
            "⚠ Store already has {} tables and {} history entries",
            existing.tables.len(),
            existing.history.len()
        );
        println!("  Skipping seed. Pass --force to replace them.");
        return Ok(());
    }

    let menu = Menu::bundled()?;
    let dishes: Vec<&Dish> = menu.iter().collect();
    println!("✓ Loaded {} dishes from the bundled menu", dishes.len());

    let mut orders = OrderManager::new();
    let start = Local::now() - Duration::hours(4);

    // Closed tables first, oldest first, so history ends up most-recent-first
    for n in 0..history {
        let opened = start + Duration::minutes(n as i64 * 7);
        let name = format!("{}", 100 + n);
        let table_name = open_table(&mut orders, &dishes, &name, n, opened)?;
        orders.close_table(&table_name, opened + Duration::minutes(45));
    }

    for n in 0..tables {
        let opened = Local::now() - Duration::minutes((tables - n) as i64 * 5);
        let name = if n % 4 == 3 && n < 16 {
            format!("Familia {}", ["Pérez", "Chang", "Quispe", "Rojas"][n / 4 % 4])
        } else {
            format!("{}", n + 1)
        };
        open_table(&mut orders, &dishes, &name, n, opened)?;
    }

    let dirty = orders.take_dirty();
    db.orders().save_changes(&orders, dirty).await?;

    println!();
    println!(
        "✓ Seeded {} open tables and {} history entries",
        orders.tables().len(),
        orders.history().len()
    );
    for (name, table) in orders.tables() {
        println!(
            "  {:<20} {:>2} items  {:>8}  opened {}",
            name,
            table.item_count(),
            table.total(),
            table.created_at
        );
    }

    Ok(())
}

/// Builds a draft from a deterministic selection of dishes and saves it.
///
/// Dishes with variations get one picked round-robin.
fn open_table(
    orders: &mut OrderManager,
    dishes: &[&Dish],
    name: &str,
    seed: usize,
    opened: chrono::DateTime<Local>,
) -> Result<String, Box<dyn std::error::Error>> {
    let lines = 1 + seed % 4;
    for line in 0..lines {
        let dish = dishes[(seed * 3 + line * 5) % dishes.len()];
        let choice = dish
            .variations
            .as_ref()
            .filter(|v| !v.is_empty())
            .map(|v| v[(seed + line) % v.len()].as_str());
        let chosen = dish.with_variation(choice)?;

        let quantity = 1 + ((seed + line) % 3) as u32;
        orders.add_item(&chosen, NOTES[(seed + line) % NOTES.len()], quantity)?;
    }
    orders.set_table_name(name);
    orders.set_requests(REQUESTS[seed % REQUESTS.len()]);

    match orders.save(opened) {
        SaveOutcome::Created { table_name } => Ok(table_name),
        other => Err(format!("unexpected save outcome for {}: {:?}", name, other).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_items_come_from_the_bundled_menu() {
        let menu = Menu::bundled().unwrap();
        let dishes: Vec<&Dish> = menu.iter().collect();
        let mut orders = OrderManager::new();

        for n in 0..8 {
            open_table(&mut orders, &dishes, &format!("{}", n + 1), n, Local::now()).unwrap();
        }

        assert_eq!(orders.tables().len(), 8);
        for table in orders.tables().values() {
            for item in &table.order {
                let listed = menu.require(&item.dish.code).unwrap();
                assert!(item.dish.name.starts_with(&listed.name));
                assert_eq!(item.dish.price, listed.price);
            }
        }
    }
}
