use clap::Parser;
use clap::error::ErrorKind;
#[cfg(feature = "storage-rocksdb")]
use miette::IntoDiagnostic;
use miette::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tillpoint::application::engine::CheckoutEngine;
use tillpoint::domain::account::Credentials;
use tillpoint::domain::ports::{AccountStoreBox, DispatchNotifierBox, VendorStoreBox};
use tillpoint::error::{CheckoutError, SettlementError};
use tillpoint::infrastructure::dispatch::ConsoleDispatcher;
use tillpoint::infrastructure::in_memory::{InMemoryAccountStore, InMemoryVendorStore};
#[cfg(feature = "storage-rocksdb")]
use tillpoint::infrastructure::rocksdb::RocksDbStore;
use tillpoint::infrastructure::{AccountProfile, VendorProfile};
use tracing_subscriber::EnvFilter;

/// Seed values for records provisioned on first lookup, standing in for a
/// real directory backend.
const DEMO_ACCOUNT: AccountProfile = AccountProfile { cash_balance: 300 };
const DEMO_VENDOR: VendorProfile = VendorProfile {
    stock: 100,
    unit_price: 70,
};

#[derive(Parser)]
#[command(author, version, about = "Settle a retail purchase between a buyer and a vendor")]
struct Cli {
    /// Vendor identifier (location tag)
    vendor: String,

    /// Buyer username
    username: String,

    /// Buyer password
    password: String,

    /// Number of units to buy
    quantity: u64,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_engine(cli: &Cli) -> Result<CheckoutEngine> {
    let dispatcher: DispatchNotifierBox = Box::new(ConsoleDispatcher);

    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = &cli.db_path {
        let store = RocksDbStore::open(db_path)
            .into_diagnostic()?
            .with_provisioning(DEMO_ACCOUNT, DEMO_VENDOR);
        let accounts: AccountStoreBox = Box::new(store.clone());
        let vendors: VendorStoreBox = Box::new(store);
        return Ok(CheckoutEngine::new(accounts, vendors, dispatcher));
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    if cli.db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }

    let accounts: AccountStoreBox = Box::new(InMemoryAccountStore::with_provisioning(DEMO_ACCOUNT));
    let vendors: VendorStoreBox = Box::new(InMemoryVendorStore::with_provisioning(DEMO_VENDOR));
    Ok(CheckoutEngine::new(accounts, vendors, dispatcher))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    // Usage errors exit 1, not clap's default 2, which is reserved for
    // the insufficient-funds refusal.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => {
            let _ = err.print();
            return Ok(ExitCode::FAILURE);
        }
    };

    let engine = build_engine(&cli)?;
    let credentials = Credentials::new(&cli.username, &cli.password);

    println!("Welcome, {}.", cli.username);

    match engine.purchase(&credentials, &cli.vendor, cli.quantity).await {
        Ok(outcome) => {
            println!(
                "You bought {} units from {} for {}.",
                outcome.receipt.quantity, outcome.vendor.id, outcome.receipt.cost
            );
            println!(
                "Remaining balance: {}. Loyalty points: {}.",
                outcome.account.cash_balance, outcome.account.loyalty_points
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            match &err {
                CheckoutError::Settlement(SettlementError::InsufficientStock { .. }) => {
                    println!("Sorry, not enough stock available.");
                }
                CheckoutError::Settlement(SettlementError::InsufficientFunds { .. }) => {
                    println!("Sorry, you cannot afford that much.");
                }
                other => eprintln!("{other}"),
            }
            Ok(ExitCode::from(exit_code(&err)))
        }
    }
}

fn exit_code(err: &CheckoutError) -> u8 {
    match err {
        CheckoutError::Settlement(SettlementError::InsufficientFunds { .. }) => 2,
        _ => 1,
    }
}
