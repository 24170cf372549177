//! Wordladders terminal front end.

use anyhow::Context;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordladders_core::{Rules, RulesOverride};

mod app;
mod commands;
mod loader;

use app::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;

    let dict_path = args
        .dictionary
        .or_else(|| std::env::var("WORDLADDERS_DICT").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("dictionary/english.txt"));

    info!(path = %dict_path.display(), "loading dictionary");
    let dictionary = loader::load_wordlist(&dict_path, loader::LoadOptions::default()).await?;
    info!(words = dictionary.len(), "dictionary ready");

    let rules = match args.rules {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading rules file {}", path.display()))?;
            let overrides: RulesOverride = serde_json::from_str(&text)
                .with_context(|| format!("parsing rules file {}", path.display()))?;
            Rules::merged(overrides, &mut rand::thread_rng())?
        }
        None => Rules::default(),
    };

    let mut app = App::new(rules, dictionary)?;
    app.run().await
}

struct Args {
    dictionary: Option<PathBuf>,
    rules: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        dictionary: None,
        rules: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--rules" => {
                let path = iter.next().context("--rules needs a file path")?;
                args.rules = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("usage: wordladders [DICTIONARY] [--rules FILE]");
                std::process::exit(0);
            }
            path if !path.starts_with('-') => {
                args.dictionary = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
    }
    Ok(args)
}
