use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use housebook::app;
use housebook::config::{default_config_path, Config};
use housebook::sheet::SheetClient;

#[derive(Parser)]
#[command(name = "housebook")]
#[command(about = "Household finance dashboard")]
struct Cli {
    /// Path to config file (defaults to ./housebook.toml, then the
    /// user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render the asset report
    Report {
        /// Restrict the report to one configured user
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Show the current price table
    Prices,
    /// Dump the raw records of a sheet tab
    Records {
        /// Tab id (gid) to fetch
        tab: String,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load_or_default(&config_path)?;

    match cli.command {
        Some(Command::Report { user }) => {
            let sheet = SheetClient::new(config.sheet.export_url.clone());
            let prices = app::build_price_service(&config);
            let reports = app::asset_reports(&config, &sheet, &prices, user.as_deref()).await?;
            for report in &reports {
                print!("{}", app::render_report(report, &config));
            }
        }
        Some(Command::Prices) => {
            let prices = app::build_price_service(&config);
            let table = prices.snapshot().await;
            print!("{}", app::render_price_table(&table, &config));
        }
        Some(Command::Records { tab }) => {
            let sheet = SheetClient::new(config.sheet.export_url.clone());
            let records = sheet.fetch_records(&tab).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Some(Command::Config) => {
            println!("Config file: {}", config_path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
        None => {
            println!("Housebook - Household Finance Dashboard");
            println!("=======================================\n");
            println!("Config: {}\n", config_path.display());
            println!("Commands:");
            println!("  report     Render the asset report");
            println!("  prices     Show the current price table");
            println!("  records    Dump the raw records of a sheet tab");
            println!("  config     Show current configuration\n");
            println!("Run 'housebook --help' for more options.");
        }
    }

    Ok(())
}
