//! WideCell Sample Binary
//!
//! Provisions an emulated table, writes sample rows and checks them.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use widecell::{scenario, Config};

/// WideCell sample scenario
#[derive(Parser, Debug)]
#[command(name = "widecell-sample")]
#[command(about = "Write and read back typed cells in an emulated wide-column table")]
#[command(version)]
struct Args {
    /// Project id
    #[arg(short, long, default_value = "some_random_project_id")]
    project: String,

    /// Instance id
    #[arg(short, long, default_value = "some_random_instance_id")]
    instance: String,

    /// Table id
    #[arg(short, long, default_value = "some_random_table_id")]
    table: String,

    /// Column family for every cell
    #[arg(short, long, default_value = "W")]
    family: String,

    /// Max versions kept per cell
    #[arg(short = 'm', long, default_value = "1")]
    max_versions: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,widecell=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("WideCell sample v{}", widecell::VERSION);
    tracing::info!("Instance: {}/{}", args.project, args.instance);

    // Build config from args
    let config = Config::builder()
        .project_id(&args.project)
        .instance_id(&args.instance)
        .table_id(&args.table)
        .column_family(&args.family)
        .max_versions(args.max_versions)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    match scenario::run(&config) {
        Ok(report) => {
            tracing::info!(
                "Read {} rows; prefix 123 -> {:?}",
                report.total_rows,
                report.prefix_keys
            );
        }
        Err(e) => {
            tracing::error!("Scenario failed: {}", e);
            std::process::exit(1);
        }
    }
}
