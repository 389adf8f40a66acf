//! CLI for inspecting record stores
//!
//! Usage:
//!   cstore show <name> [format]
//!   cstore convert <name> <format> <target-name> <target-format>
//!   cstore remove <name> [format]
//!
//! Stores live under `CSTORE_BASE_DIR`; `format` defaults to
//! `CSTORE_DEFAULT_FORMAT`.

use anyhow::Context;
use cstore::{Config, Format, StoreError, StoreRegistry};
use std::env;
use std::path::Path;
use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Load environment from .env file if present
    let dotenv = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let _guard = init_logging(config.log_dir.as_deref());

    if let Err(e) = dotenv {
        debug!("No .env file found or error loading it: {}", e);
    }

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        print_usage(program(&args));
        std::process::exit(1);
    }

    if let Err(e) = run(&config, &args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

/// 2 when the record does not exist, 1 for every other failure
fn exit_code(err: &anyhow::Error) -> i32 {
    let not_found = err
        .downcast_ref::<StoreError>()
        .map(StoreError::is_not_found)
        .unwrap_or(false);
    if not_found {
        2
    } else {
        1
    }
}

fn run(config: &Config, args: &[String]) -> anyhow::Result<()> {
    let mut registry = StoreRegistry::from_config(config)?;
    let name = args[2].as_str();

    match args[1].as_str() {
        "show" => {
            let format = format_arg(args.get(3), config.default_format)?;
            let store = registry.create(name, format)?;

            let record: serde_json::Value = store.load()?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        "convert" => {
            if args.len() < 6 {
                print_usage(program(args));
                std::process::exit(1);
            }
            let source = registry.create(name, args[3].as_str())?;
            let target = registry.create(&args[4], args[5].as_str())?;

            let record: serde_json::Value = source.load()?;
            target.save_without_validate(&record).with_context(|| {
                format!("cannot write {} as {}", source.name(), target.format())
            })?;
            println!("{} -> {}", source.path().display(), target.path().display());
        }
        "remove" => {
            let format = format_arg(args.get(3), config.default_format)?;
            let store = registry.create(name, format)?;
            store.remove()?;
            println!("Removed {}", store.path().display());
        }
        other => {
            warn!("Unknown command: {}", other);
            print_usage(program(args));
            std::process::exit(1);
        }
    }

    Ok(())
}

fn format_arg(arg: Option<&String>, default: Format) -> cstore::Result<Format> {
    match arg {
        Some(tag) => tag.parse(),
        None => Ok(default),
    }
}

/// Console logging on stderr, plus JSON files when `log_dir` is set
fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).unwrap_or_else(|e| {
                eprintln!("Warning: Could not create log directory {}: {}", dir.display(), e);
            });
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "cstore.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .json()
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,cstore=info")),
        )
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

fn program(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("cstore")
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} show <name> [format]", program);
    eprintln!("  {} convert <name> <format> <target-name> <target-format>", program);
    eprintln!("  {} remove <name> [format]", program);
    eprintln!();
    eprintln!("Formats: toml, json, yaml");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cstore::format::load_from_yaml_file;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            registry_name: "cli".to_string(),
            base_dir: temp_dir.path().to_path_buf(),
            default_format: Format::Json,
            log_dir: None,
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("cstore")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_show_existing_record() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        fs::write(temp_dir.path().join("sample.json"), "{\"name\":\"sample name\"}\n").unwrap();

        run(&config, &args(&["show", "sample.json"])).unwrap();
        run(&config, &args(&["show", "sample.json", "json"])).unwrap();
    }

    #[test]
    fn test_show_missing_record_exits_with_2() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let err = run(&config, &args(&["show", "absent.toml", "toml"])).unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_convert_json_to_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let record = json!({ "name": "sample name", "tags": ["a", "b"] });
        fs::write(temp_dir.path().join("sample.json"), record.to_string()).unwrap();

        run(
            &config,
            &args(&["convert", "sample.json", "json", "sample.yaml", "yaml"]),
        )
        .unwrap();

        let converted: serde_json::Value =
            load_from_yaml_file(&temp_dir.path().join("sample.yaml")).unwrap();
        assert_eq!(converted, record);
    }

    #[test]
    fn test_remove_deletes_then_reports_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let path = temp_dir.path().join("sample.json");
        fs::write(&path, "{}\n").unwrap();

        run(&config, &args(&["remove", "sample.json"])).unwrap();
        assert!(!path.exists());

        let err = run(&config, &args(&["remove", "sample.json"])).unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_invalid_format_exits_with_1() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let err = run(&config, &args(&["show", "sample.xml", "xml"])).unwrap_err();
        assert_eq!(exit_code(&err), 1);
        assert_eq!(err.downcast_ref::<StoreError>().unwrap().code(), "invalid_format");
    }
}
