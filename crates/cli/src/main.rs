//! Partsbin CLI
//!
//! Admin tool and web server runner.

use anyhow::Result;
use clap::{Parser, Subcommand};
use partsbin_api::{create_router, AppState};
use partsbin_database::{Database, NewComponent, Page};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "partsbin")]
#[command(about = "Partsbin - Electronic Component Inventory API")]
#[command(version)]
struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "partsbin.db")]
    database: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },

    /// List stored components
    List,

    /// Show one component with its related records
    Show {
        /// Component id
        id: i64,
    },

    /// Insert a few demo components
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    // Connect to database
    let db = Database::connect(&cli.database).await?;

    match cli.command {
        Commands::Serve { bind } => {
            serve(db, bind).await?;
        }
        Commands::List => {
            list(&db).await?;
        }
        Commands::Show { id } => {
            show(&db, id).await?;
        }
        Commands::Seed => {
            seed(&db).await?;
        }
    }

    Ok(())
}

async fn serve(db: Database, bind: SocketAddr) -> Result<()> {
    let state = Arc::new(AppState::new(db));
    let router = create_router(state);

    info!("Starting Partsbin server on {}", bind);
    info!("API available at http://{}/api/v1", bind);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn list(db: &Database) -> Result<()> {
    let components = db.list_components(&Page::default()).await?;

    println!(
        "{:<6} {:<12} {:<16} {:<8} {:<10}",
        "ID", "CODE", "PART NUMBER", "STOCK", "PRICE"
    );
    println!("{}", "-".repeat(56));

    for component in components {
        println!(
            "{:<6} {:<12} {:<16} {:<8} {:<10.2}",
            component.id,
            component.code,
            component.part_number.as_deref().unwrap_or("-"),
            component.stock,
            component.price
        );
    }

    Ok(())
}

async fn show(db: &Database, id: i64) -> Result<()> {
    let Some(component) = db.get_component_by_id(id).await? else {
        println!("No component with id {}.", id);
        return Ok(());
    };

    println!("Component: {} (id {})", component.code, component.id);
    println!("Description: {}", component.description.as_deref().unwrap_or("-"));
    println!("Category: {}", component.category.as_deref().unwrap_or("-"));
    println!("Maker: {}", component.maker.as_deref().unwrap_or("-"));
    println!("Stock: {}", component.stock);
    println!("Price: {:.2}", component.price);

    let details = db.details_for(id).await?;
    if !details.is_empty() {
        println!("\nDetails:");
        for detail in details {
            println!(
                "  #{} datasheet: {} material: {}",
                detail.id,
                detail.datasheet.as_deref().unwrap_or("-"),
                detail.material.as_deref().unwrap_or("-")
            );
        }
    }

    let transistors = db.transistors_for(id).await?;
    if !transistors.is_empty() {
        println!("\nBipolar transistors:");
        for transistor in transistors {
            println!(
                "  #{} type: {} Vce: {}",
                transistor.id,
                transistor.transistor_type.as_deref().unwrap_or("-"),
                transistor
                    .collector_emitter_voltage
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
        }
    }

    Ok(())
}

async fn seed(db: &Database) -> Result<()> {
    let demo = [
        NewComponent {
            code: "BC548".to_string(),
            description: Some("NPN general purpose transistor".to_string()),
            image: Some("bc548.jpg".to_string()),
            part_number: Some("BC548B".to_string()),
            category: Some("transistor".to_string()),
            maker: Some("ON Semiconductor".to_string()),
            stock: 120,
            price: 0.15,
        },
        NewComponent {
            code: "R-10K".to_string(),
            description: Some("10k ohm carbon film resistor".to_string()),
            image: None,
            part_number: Some("CFR-25JB-52-10K".to_string()),
            category: Some("resistor".to_string()),
            maker: Some("Yageo".to_string()),
            stock: 500,
            price: 0.02,
        },
        NewComponent {
            code: "C-100N".to_string(),
            description: Some("100nF ceramic capacitor".to_string()),
            image: None,
            part_number: Some("K104K15X7RF5TL2".to_string()),
            category: Some("capacitor".to_string()),
            maker: Some("Vishay".to_string()),
            stock: 300,
            price: 0.05,
        },
    ];

    for new in demo {
        let created = db.create_component(new).await?;
        println!("Seeded {} (id {})", created.code, created.id);
    }

    Ok(())
}
