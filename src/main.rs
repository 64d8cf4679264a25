// Entrypoint for the CLI application.
// - Installs a tracing subscriber (`RUST_LOG`, default `warn`).
// - Builds a client from the `TOAST_*` environment and hands it to the menu.

use anyhow::Context;
use toast_client::{ui::main_menu, ToastClient};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let client = ToastClient::from_env().context("Failed to create Toast client")?;

    // Blocks until the user picks "Exit".
    main_menu(client)?;
    Ok(())
}
