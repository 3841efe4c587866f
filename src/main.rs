use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use destination_import::cli::Cli;
use destination_import::emit::format_summary;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let request = cli.to_request();
    let report = request.run().with_context(|| {
        format!(
            "importing {} with {}",
            request.locations.display(),
            request.gun_laws.display()
        )
    })?;

    println!();
    print!("{}", format_summary(&report));
    println!();
    println!("Data written to {}", request.output.display());
    Ok(())
}
