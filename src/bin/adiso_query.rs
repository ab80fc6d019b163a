use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use adiso_search::{EngineConfig, QueryAnalyzer, ReferenceData};

/// Diagnostic tool: analyze a query from the command line and print the
/// resulting intent as JSON.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: adiso-query <free text query>");
        std::process::exit(2);
    }

    let config = EngineConfig::from_env()?;
    let reference = Arc::new(ReferenceData::load(&config)?);
    let analyzer = QueryAnalyzer::new(reference, &config)?;

    let intent = analyzer.analyze(&args.join(" "));
    println!("{}", serde_json::to_string_pretty(&intent)?);

    Ok(())
}
