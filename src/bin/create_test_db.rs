use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use cashbook::{
    NewAccount, NewTransaction, PasswordHash, SavingsAction, TransactionKind, ValidatedPassword,
    create_account, create_transaction, create_user, initialize_db, transfer,
};

/// A utility for creating a test database for the cashbook server.
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
    let user = create_user("test@example.com", "Test User", password_hash, &conn)?;

    println!("Creating accounts...");

    for (name, kind, balance, icon) in [
        ("Cash", "Cash", 1_500.0, "💵"),
        ("Everyday", "Bank", 12_000.0, "🏦"),
        ("E-wallet", "E-wallet", 800.0, "📱"),
    ] {
        create_account(
            NewAccount {
                user_id: user.id,
                name: name.to_owned(),
                kind: kind.to_owned(),
                balance,
                icon: icon.to_owned(),
            },
            &conn,
        )?;
    }

    println!("Creating transactions...");

    let today = OffsetDateTime::now_utc().date();
    let transactions = [
        ("Monthly salary", 25_000.0, "Salary", 20, TransactionKind::Income),
        ("Rent", 8_000.0, "Housing", 18, TransactionKind::Expense),
        ("Groceries", 2_350.5, "Food", 12, TransactionKind::Expense),
        ("Electricity", 1_820.0, "Utilities", 9, TransactionKind::Expense),
        ("Jeepney fare", 260.0, "Transport", 5, TransactionKind::Expense),
        ("Freelance gig", 4_000.0, "Side income", 3, TransactionKind::Income),
        ("Dinner out", 950.0, "Food", 1, TransactionKind::Expense),
    ];

    for (name, amount, category, days_ago, kind) in transactions {
        create_transaction(
            NewTransaction {
                user_id: user.id,
                name: name.to_owned(),
                amount,
                category: category.to_owned(),
                date: today - Duration::days(days_ago),
                kind,
            },
            &conn,
        )?;
    }

    println!("Moving money into savings...");

    transfer(user.id, SavingsAction::Deposit, 5_000.0, today, &conn)?;

    println!("Success! Log in with the email 'test@example.com' and the password 'test'.");

    Ok(())
}
