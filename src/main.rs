use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Settings;
use database::{connect, run_migrations, seed_if_empty, DbRepository};
use std::path::PathBuf;

/// The main entry point for the Docboard application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; settings have defaults.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = configuration::load_settings(&cli.config)?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    match cli.command {
        Commands::Serve(args) => handle_serve(args, settings).await,
        Commands::Seed => handle_seed(&settings).await,
        Commands::List => handle_list(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// An ordered document list, served over HTTP.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML settings file.
    #[arg(long, global = true, default_value = "docboard.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Insert the starter documents if the store is empty.
    Seed,
    /// Print the documents in display order.
    List,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, mut settings: Settings) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    settings.validate()?;

    web_server::run_server(&settings).await
}

async fn open_repository(settings: &Settings) -> anyhow::Result<DbRepository> {
    let db_pool = connect(&settings.database.url, settings.database.max_connections).await?;
    run_migrations(&db_pool).await?;
    Ok(DbRepository::new(db_pool))
}

async fn handle_seed(settings: &Settings) -> anyhow::Result<()> {
    let db_repo = open_repository(settings).await?;
    let inserted = seed_if_empty(&db_repo).await?;
    if inserted == 0 {
        println!("Store already contains documents; nothing seeded.");
    } else {
        println!("Seeded {} documents.", inserted);
    }
    Ok(())
}

async fn handle_list(settings: &Settings) -> anyhow::Result<()> {
    let db_repo = open_repository(settings).await?;
    let mut session = db_repo.session().await?;
    let documents = session.list_all().await?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Type", "Title", "Position"]);
    for document in &documents {
        table.add_row(vec![
            document.id.to_string(),
            document.doc_type.clone(),
            document.title.clone(),
            document.position.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
