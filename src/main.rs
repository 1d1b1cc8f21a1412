use clap::Parser;
use tracing_subscriber::EnvFilter;

use sundial::config::Credentials;
use sundial::server;

/// Sundial: sunrise/sunset lookup service.
///
/// Serves GET /get_sunrise_sunset?date=YYYY-MM-DD&country=<place> and
/// answers with local sunrise/sunset times plus the resolved city/state.
///
/// Requires OPENCAGE_API_KEY and GOOGLE_API_KEY in the environment
/// (a .env file is honored).
#[derive(Parser)]
#[command(name = "sundial", version, about, long_about = None)]
struct Cli {
    /// Host to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, short = 'p', default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sundial=info")),
        )
        .init();

    let credentials = Credentials::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    server::start(&cli.host, cli.port, &credentials).await;
}
