use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use fintrack_rs::{PasswordHash, ValidatedPassword, initialize_db};

/// A utility for creating a test database for the FinTrack Lite server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;

    conn.execute(
        "INSERT INTO user (email, display_name, password) VALUES (?1, ?2, ?3)",
        ("test@example.com", "Test", password_hash.to_string()),
    )?;

    println!("Creating sample transactions...");

    let transactions = [
        (5_000_000.0, "2024-03-25", "Gaji bulanan", "salary", "income"),
        (350_000.0, "2024-03-05", "Belanja bulanan", "food", "expense"),
        (25_000.0, "2024-03-07", "Gojek ke kantor", "transport", "expense"),
        (150_000.0, "2024-03-12", "Nonton dan makan malam", "entertainment", "expense"),
        (200_000.0, "2024-03-15", "Token listrik", "utilities", "expense"),
        (320_000.0, "2024-03-18", "Sepatu baru", "shopping", "expense"),
        (5_000_000.0, "2024-02-25", "Gaji bulanan", "salary", "income"),
        (80_000.0, "2024-02-10", "Obat flu", "healthcare", "expense"),
        (450_000.0, "2024-02-18", "Buku kuliah", "education", "expense"),
        (60_000.0, "2024-02-20", "Kado ulang tahun", "other", "expense"),
    ];

    for (amount, date, description, category, type_) in transactions {
        conn.execute(
            "INSERT INTO \"transaction\" (user_id, amount, date, description, category, type)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (1, amount, date, description, category, type_),
        )?;
    }

    println!("Success!");

    Ok(())
}
