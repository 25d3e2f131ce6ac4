//! Export binary - prints every stored signup as CSV
//!
//! Usage:
//!   cargo run --bin export > signups.csv
//!
//! Optional environment variables:
//! - DATA_DIR (defaults to data)

use anyhow::Result;
use sustain_site::config::Config;
use serde_json::Value;
use sustain_site::store::{SignupStore, SIGNUPS_FILE};
use tracing::info;

const HEADER: [&str; 5] = ["firstName", "lastName", "email", "comments", "timestamp"];

/// Quote a CSV field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Text of one stored field. Missing and null fields are blank.
fn field_text(record: &Value, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn csv_row(record: &Value) -> String {
    HEADER
        .iter()
        .map(|key| csv_field(&field_text(record, key)))
        .collect::<Vec<_>>()
        .join(",")
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sustain_site=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    // Read-only: do not create the data directory
    let store = SignupStore::at(config.data_dir.join(SIGNUPS_FILE));
    let records = store.load().await;

    println!("{}", HEADER.join(","));
    for record in &records {
        println!("{}", csv_row(record));
    }

    info!("Exported {} signups from {}", records.len(), store.path().display());
    Ok(())
}
