// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

use wearable_catalog::{Catalog, CatalogConfig, Shell};

fn main() -> Result<()> {
    initialize_tracing();

    let config = CatalogConfig::from_env();
    tracing::debug!(?config, "configuration loaded");

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "browse" {
        // Browser mode
        run_browser(config)?;
    } else {
        // Menu mode (default)
        run_shell(config)?;
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with the menus on stdout
fn initialize_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run_shell(config: CatalogConfig) -> Result<()> {
    let catalog = Catalog::new(config.data_file.clone());

    let stdin = io::stdin();
    let mut shell = Shell::new(catalog, config, stdin.lock(), io::stdout());
    shell.run()?;

    Ok(())
}

#[cfg(feature = "tui")]
fn run_browser(config: CatalogConfig) -> Result<()> {
    use anyhow::Context;

    if !config.data_file.exists() {
        eprintln!("❌ Catalog file not found: {}", config.data_file.display());
        eprintln!("   Run the menu (no arguments), add devices and choose 'Save All' first.");
        std::process::exit(1);
    }

    let mut catalog = Catalog::new(config.data_file.clone());
    catalog
        .load()
        .with_context(|| format!("Failed to load {}", config.data_file.display()))?;

    println!("✓ Loaded {} devices\n", catalog.count());
    println!("Starting browser... (Press 'q' to quit)\n");

    let mut app = ui::App::new(catalog);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_browser(_config: CatalogConfig) -> Result<()> {
    eprintln!("❌ Browser mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
