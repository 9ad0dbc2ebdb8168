//! Bank-of-China FX rate watcher: scrape the published quote tables,
//! persist a snapshot or history store, and push threshold alerts.

mod clock;
mod config;
mod error;
mod extract;
mod fetch;
mod models;
mod notify;
mod pipeline;
mod store;

use clap::Parser;
use config::Config;
use dotenv::dotenv;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "ratewatch")]
#[command(about = "Scrape Bank-of-China FX quotes into a local JSON store", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Accumulate dated history instead of replacing the latest quotes
    #[arg(long, default_value_t = false)]
    history: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = Config::load_or_default(&args.config, args.history);
    if args.history {
        pipeline::run_history(&config).await;
    } else {
        pipeline::run_current(&config).await;
    }
    // Every partial failure is logged inside the pipeline; the run itself
    // always exits 0.
}
