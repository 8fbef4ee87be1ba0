//! Example demonstrating startup property loading with cache fallback.
//!
//! Run with a source list, e.g.:
//!
//! ```text
//! RUST_LOG=cached_props=debug cargo run --example load_properties -- \
//!     '!https://config.example.com/system.properties,/etc/app/local.properties'
//! ```
//!
//! Run it once with the network up, then again with it down: the second run
//! applies the cached snapshot.

use cached_props::prelude::*;
use std::collections::BTreeMap;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let raw = std::env::args().nth(1);

    println!("=== Property Loading Example ===\n");
    for spec in parse_source_specs(raw.as_deref()) {
        println!(
            "  {} {}",
            if spec.force() { "force" } else { "fill " },
            spec.location()
        );
    }
    println!();

    // Pre-set value: only a forced source may replace it
    global().set("app.mode", "launch-default");

    let settings = LoaderSettings::load(None, "CACHED_PROPS")?;
    println!("Cache dir: {}\n", settings.cache_dir.display());

    let loader = PropertyLoader::builder().with_settings(settings).build()?;
    let mut store = global();
    let reports = loader.load_all(raw.as_deref(), &mut store)?;

    for report in &reports {
        println!(
            "{}: refreshed={} applied={} skipped={}",
            report.location, report.refreshed, report.applied, report.skipped
        );
    }

    println!("\nProperties:");
    let snapshot = global().snapshot();
    let sorted: BTreeMap<_, _> = snapshot.iter().collect();
    for (key, value) in sorted {
        println!("  {key}={value}");
    }

    Ok(())
}
