//! One-shot command line for the digit classifier.
//!
//! Usage:
//!   ferrite-digits <image> [--invert true|false]
//!   ferrite-digits history
//!
//! Without `--invert` the polarity is detected from the image corners.
//! Endpoint and history file come from the FERRITE_DIGITS_* variables.
use std::process::ExitCode;

use ferrite_digits::{
    config, init_tracing, Config, FormController, HistoryStore, Polarity, PredictionClient,
    SourceImage,
};
use tracing::error;

fn main() -> ExitCode {
    init_tracing();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("-h") | Some("--help") => {
            print_usage();
            ExitCode::SUCCESS
        }
        Some("history") => {
            print_history(&HistoryStore::open(&config.history_path));
            ExitCode::SUCCESS
        }
        Some(path) => run_once(&config, path, &args[1..]),
    }
}

fn print_usage() {
    println!("{} {}", config::APP_NAME, config::APP_VERSION);
    println!("Usage:");
    println!("  ferrite-digits <image> [--invert true|false]");
    println!("  ferrite-digits history");
}

fn run_once(config: &Config, path: &str, rest: &[String]) -> ExitCode {
    let manual = match parse_invert(rest) {
        Ok(m) => m,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Cannot read '{}': {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let client = match PredictionClient::new(&config.endpoint) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut form = FormController::new(HistoryStore::open(&config.history_path));
    form.select_file(SourceImage::new(path, bytes));
    if let Some(polarity) = manual {
        form.set_auto_detect(false);
        form.set_manual_polarity(polarity);
    }

    match form.submit(&client) {
        Ok(result) => {
            println!("Predicción: {}", result.prediction);
            println!("Precisión: {}", result.accuracy);
            println!("Tiempo: {}", result.process_time);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("⚠ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_invert(rest: &[String]) -> Result<Option<Polarity>, String> {
    match rest {
        [] => Ok(None),
        [flag, value] if flag == "--invert" => Polarity::from_flag(value)
            .map(Some)
            .ok_or_else(|| format!("--invert expects true or false, got '{}'", value)),
        _ => Err(format!("Unexpected arguments: {}", rest.join(" "))),
    }
}

fn print_history(store: &HistoryStore) {
    let entries = store.read_all();
    if entries.is_empty() {
        println!("No hay registros.");
        return;
    }
    for entry in entries {
        let when = entry.timestamp_label().unwrap_or_default();
        println!(
            "{}  Predicción: {}, Precisión: {}  (invert={})",
            when, entry.result.prediction, entry.result.accuracy, entry.invert.as_flag()
        );
    }
}
