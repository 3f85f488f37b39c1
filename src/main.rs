//! Order Tracker - interactive product, customer and order database
//!
//! Opens the SQLite file, loads the demonstration data and runs the menu on
//! stdin/stdout until the operator exits.

use clap::Parser;
use order_tracker::{load_demo_data, Args, Shell, Store};
use std::io;

fn main() {
    let args = Args::parse();

    // RUST_LOG overrides the default filter, e.g. RUST_LOG=order_tracker=debug
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.default_log_filter()),
    )
    .init();

    log::info!("Starting order_tracker...");
    log::info!("Database path: {}", args.database.display());

    let store = match Store::open(&args.database, args.commit_mode()) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open database: {}", e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if args.skip_seed {
        log::info!("Skipping demonstration data");
    } else if let Err(e) = load_demo_data(&store) {
        log::error!("Failed to load demonstration data: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(&store, stdin.lock(), stdout.lock());
    let session = shell.run();
    drop(shell);

    if let Err(e) = store.close() {
        log::error!("Failed to close database: {}", e);
    }

    if let Err(e) = session {
        log::error!("Session ended with an error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
