//! Pipeline runner
//!
//! Usage: customer_kpi [clean|kpi|report|all]
//!
//! Environment:
//!   DATA_DIR         data root (default: data)
//!   PIPELINE_CONFIG  optional JSON config; DATA_DIR overrides its data_dir
//!   RUST_LOG         log filter

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use customer_kpi_rust::{run_pipeline, PipelineConfig, Stage};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "customer_kpi_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let stage: Stage = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => Stage::All,
    };

    let data_dir = std::env::var("DATA_DIR").ok().map(PathBuf::from);

    let mut config = match std::env::var("PIPELINE_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading pipeline config from {}", path);
            PipelineConfig::load(&PathBuf::from(path))?
        }
        Err(_) => PipelineConfig::from_data_dir("data"),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    let outcome = run_pipeline(&config, stage)?;

    if let Some(kpis) = outcome.kpis {
        println!("\n=== KPI Summary ===");
        for (kpi, value) in kpis.iter() {
            let display = value.map_or_else(|| "undefined".to_string(), |v| kpi.format_value(v));
            println!("  {:<20} {}", kpi.name(), display);
        }
    }

    println!("\nFiles written:");
    for path in &outcome.written {
        println!("  {}", path.display());
    }

    Ok(())
}
