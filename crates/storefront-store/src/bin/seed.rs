//! # Seed Data Generator
//!
//! Populates a storage file with a demo catalogue for development.
//!
//! ## Usage
//! ```bash
//! # Generate 24 products (default) at the configured storage path
//! cargo run -p storefront-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p storefront-store --bin seed -- --count 60
//!
//! # Specify storage path
//! cargo run -p storefront-store --bin seed -- --path ./data/storefront.json
//! ```
//!
//! ## Generated Products
//! Each product has:
//! - Name: `{Colour} {Item}`
//! - Price: $4.99 - $49.99, derived from its position
//! - A one-line description
//! - No image (the storefront shows a placeholder)

use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

use storefront_core::{Money, ProductDraft};
use storefront_store::{init_tracing, FileStorage, StaticCredentials, StoreState, StorefrontConfig};

const DEFAULT_COUNT: usize = 24;

const ITEMS: &[(&str, &str)] = &[
    ("Mug", "Ceramic mug, dishwasher safe, 350ml."),
    ("T-Shirt", "Soft cotton tee with a relaxed fit."),
    ("Cap", "Six-panel cap with an adjustable strap."),
    ("Tote Bag", "Heavy canvas tote for groceries and books."),
    ("Notebook", "A5 dotted notebook, 120 pages."),
    ("Water Bottle", "Insulated steel bottle, keeps drinks cold for 24h."),
    ("Hoodie", "Brushed fleece hoodie with a kangaroo pocket."),
    ("Sticker Pack", "Five vinyl stickers, weatherproof."),
];

const COLOURS: &[&str] = &["Black", "White", "Forest", "Navy", "Sand", "Rust"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--path" | "-p" => {
                if i + 1 < args.len() {
                    path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  -c, --count <N>      Number of products to generate (default: {})",
                    DEFAULT_COUNT
                );
                println!("  -p, --path <PATH>    Storage file path (default: from storefront.toml)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = StorefrontConfig::load_or_default(None);
    if let Some(path) = path {
        config.storage.path = path;
    }

    println!("Storefront Seed Data Generator");
    println!("==============================");
    println!("Storage:  {}", config.storage.path.display());
    println!("Products: {}", count);
    println!();

    let storage = FileStorage::open(&config.storage.path)?;
    let mut state = StoreState::open(
        storage,
        config.checkout.clone(),
        StaticCredentials::from(config.admin.clone()),
    );

    let existing = state.products().len();
    if existing > 0 {
        println!("Storage already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the storage file to regenerate.");
        return Ok(());
    }

    let mut generated = 0;
    for seed in 0..count {
        let draft = generate_product(seed);
        let name = draft.name.clone();

        if let Err(e) = state.add_product(draft) {
            eprintln!("Failed to add {}: {}", name, e);
            continue;
        }
        generated += 1;
    }

    state.close()?;
    info!(generated, "Seed complete");

    println!("Generated {} products", generated);
    println!("Seed complete!");

    Ok(())
}

/// Builds the `seed`-th demo product.
fn generate_product(seed: usize) -> ProductDraft {
    let (item, description) = ITEMS[seed % ITEMS.len()];
    let colour = COLOURS[(seed / ITEMS.len()) % COLOURS.len()];

    // $4.99 - $49.99, always ending in .99
    let dollars = 4 + ((seed * 7) % 46) as i64;
    let price = Money::from_major_minor(dollars, 99);

    let name = if seed < ITEMS.len() * COLOURS.len() {
        format!("{} {}", colour, item)
    } else {
        format!("{} {} #{}", colour, item, seed / (ITEMS.len() * COLOURS.len()) + 1)
    };

    ProductDraft::new(name, price, description)
}
