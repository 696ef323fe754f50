use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

mod config;
mod jil;
mod loader;
mod sink;

use crate::jil::{ProcessCollection, Renderer};

/// jilgen CLI.
#[derive(Parser)]
#[command(name = "jilgen")]
#[command(about = "Generate AutoSys JIL files from declarative YAML job definitions")]
#[command(version)]
struct Cli {
    /// YAML job definition document
    input: PathBuf,

    /// Output JIL file path (default: the input path with a .jil extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the rendered JIL to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

fn main() {
    let cli = Cli::parse();

    // Load configuration from environment
    let config::Config { log_dir } = config::Config::from_env()
        .expect("Failed to load configuration");

    // Create logs directory if it doesn't exist
    std::fs::create_dir_all(&log_dir)
        .expect("Failed to create logs directory");

    // Initialize file-based logging with daily rotation and level separation
    // Log files will be created as: logs/info.2024-12-22.log, logs/error.2024-12-22.log
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(&log_dir, "info.log");
    let error_file = tracing_appender::rolling::daily(&log_dir, "error.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    // Console layer on stderr, keeping stdout free for rendered JIL when
    // --stdout is used
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(error_layer)
        .init();

    info!("Starting jilgen");
    info!("  - Input document: {}", cli.input.display());

    // Load the declarative document and build the process collection
    let document = loader::load(&cli.input)
        .expect("Failed to load job document");
    let collection = ProcessCollection::from_document(document);

    info!("Process collection holds {} job records", collection.len());

    // Render the collection into JIL text
    let renderer = Renderer::new();
    let rendered = renderer.render(&collection);

    if cli.stdout {
        print!("{}", rendered);
        return;
    }

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("jil"));

    sink::write(&output, &rendered)
        .expect("Failed to write JIL file");

    info!("JIL generation completed successfully");
}
