//! Preview binary - renders one page the way a browser session would and
//! prints the resulting HTML
//!
//! Usage:
//!   cargo run --bin preview -- home                # Render in the default language
//!   cargo run --bin preview -- goals Español       # Render, then switch language
//!
//! Optional environment variables:
//! - CONTENT_BASE_URL (defaults to http://localhost:8080)
//! - DEFAULT_LANGUAGE (defaults to English)

use anyhow::{Context, Result};
use sustain_site::config::Config;
use sustain_site::content::ContentLoader;
use sustain_site::i18n::Language;
use sustain_site::page::{PageKind, PageSession, SessionOptions};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only the HTML
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sustain_site=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: preview <home|goals|about|signup> [language]");
        std::process::exit(1);
    }
    let kind: PageKind = args[1].parse().context("Invalid page argument")?;
    let language = args.get(2).map(Language::new);

    let config = Config::from_env()?;
    let loader = ContentLoader::new(&config.content_base_url);
    let options = SessionOptions {
        initial_language: config.default_language.clone(),
        ..SessionOptions::default()
    };

    let mut session = PageSession::open(kind, &loader, options).await;

    if session.dictionary_fell_back() {
        warn!("Translations unavailable, rendering untranslated");
    }
    if let Some(language) = language {
        if !session.dictionary().languages().contains(&language.name()) && !language.is_canonical() {
            warn!("No translations for '{}'", language);
        }
        session.set_language(language);
    }

    info!(
        "Rendered {} page in {} ({} documents failed)",
        session.kind(),
        session.language(),
        session.failed_documents().len()
    );
    print!("{}", session.to_html());
    Ok(())
}
