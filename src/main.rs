mod cli;

use anyhow::Context;
use checklist_review::config::Config;
use checklist_review::logic::{import, outreach, RulesEngine};
use checklist_review::models::{ChecklistReview, ChecksConfig};
use chrono::{DateTime, Utc};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct ReviewReport<'a> {
    generated_at: DateTime<Utc>,
    total: usize,
    flagged: usize,
    reviews: Vec<&'a ChecklistReview>,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // The check registry is built once and shared read-only from here on
    let engine = RulesEngine::new();

    match cli.command {
        Commands::Init => {
            Config::setup_interactive(&engine, cli.config.as_ref())?;
            Ok(())
        }
        Commands::Check => {
            let config = load_config(cli.config.as_ref());
            let issues = engine.validate(&config.checks);
            if issues.is_empty() {
                let selected = engine
                    .rules()
                    .filter(|r| engine.is_selected(*r, &config.checks))
                    .count();
                println!(
                    "Config OK: {} of {} checks selected",
                    selected,
                    engine.rules().count()
                );
                Ok(())
            } else {
                for issue in &issues {
                    println!("  - {}", issue);
                }
                eprintln!("{} config issue(s) found", issues.len());
                std::process::exit(1);
            }
        }
        Commands::Checks => {
            let config = load_config(cli.config.as_ref());
            print_checks(&engine, &config.checks);
            Ok(())
        }
        Commands::Review { input, format, all } => {
            let config = load_config(cli.config.as_ref());
            for issue in engine.validate(&config.checks) {
                tracing::warn!("Config: {}", issue);
            }
            run_review(&engine, &config, &input, format, all)
        }
    }
}

fn load_config(config_override: Option<&PathBuf>) -> Config {
    match Config::load(config_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `checklist-review init` to create a config file");
            std::process::exit(1);
        }
    }
}

fn run_review(
    engine: &RulesEngine,
    config: &Config,
    input: &Path,
    format: OutputFormat,
    all: bool,
) -> anyhow::Result<()> {
    let checklists = import::load_checklists(input)
        .with_context(|| format!("Failed to load checklists from {}", input.display()))?;

    let reviews = engine.evaluate_batch(&checklists, &config.checks);
    let flagged = reviews.iter().filter(|r| r.is_flagged()).count();

    match format {
        OutputFormat::Json => {
            let report = ReviewReport {
                generated_at: Utc::now(),
                total: reviews.len(),
                flagged,
                reviews: reviews
                    .iter()
                    .filter(|r| all || r.is_flagged() || !r.faults.is_empty())
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        }
        OutputFormat::Text => {
            let emails = outreach::compose_all(&reviews, &checklists, &config.outreach);
            for (i, email) in emails.iter().enumerate() {
                if i > 0 {
                    println!("{}", "-".repeat(72));
                }
                println!("{}", email);
            }

            let faults: Vec<_> = reviews.iter().flat_map(|r| &r.faults).collect();
            if !faults.is_empty() {
                println!("Check faults:");
                for fault in faults {
                    println!("  - {}", fault);
                }
            }
        }
    }

    eprintln!("Reviewed {} checklists: {} flagged", reviews.len(), flagged);

    Ok(())
}

fn print_checks(engine: &RulesEngine, checks: &ChecksConfig) {
    for rule in engine.rules() {
        let mark = if engine.is_selected(rule, checks) { "x" } else { " " };
        println!("[{}] {:<24} {}", mark, rule.id(), rule.label());

        let thresholds = engine.thresholds_for(rule, checks);
        for spec in rule.thresholds() {
            println!(
                "      {} = {} (default {})",
                spec.key,
                thresholds.get(spec.key),
                spec.default_value
            );
        }
    }
}
