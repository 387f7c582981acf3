//! # Demo Seed Runner
//!
//! Creates (or opens) a GuardBook database and seeds the demo sites and
//! guards once.
//!
//! ## Usage
//! ```bash
//! # Default database path (./data/guardbook.db)
//! cargo run -p guardbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p guardbook-db --bin seed -- --db ./guardbook.db
//! ```
//!
//! Safe to run repeatedly: the seed is marker-guarded and never re-inserts.

use std::env;

use guardbook_db::{Database, DbConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut db_path = "./data/guardbook.db".to_string();

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" if i + 1 < args.len() => {
                db_path = args[i + 1].clone();
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Usage: seed [--db <path>]");
                std::process::exit(2);
            }
        }
    }

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).expect("failed to create database directory");
        }
    }

    let db = match Database::new(DbConfig::new(&db_path)).await {
        Ok(db) => db,
        Err(err) => {
            eprintln!("Failed to open database at {db_path}: {err}");
            std::process::exit(1);
        }
    };

    let sites = db.sites().count().await.unwrap_or(0);
    let guards = db.guards().count().await.unwrap_or(0);
    println!("Database ready at {db_path}: {sites} sites, {guards} guards");

    db.close().await;
}
