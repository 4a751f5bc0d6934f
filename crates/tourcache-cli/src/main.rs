//! tourcache - browse the published tour sheet from the terminal.
//!
//! Reads the sheet URL from `SHEET_URL` (a `.env` file is honoured) or from
//! `~/.config/tourcache/config.json`, then lists, searches or looks up tours.

mod output;

use std::io;

use anyhow::{bail, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tourcache_core::{Config, TourService};

const USAGE: &str = "\
Usage: tourcache [--json] <command>

Commands:
  list                 Show every tour
  search <query>...    Show tours matching each query (case-insensitive)
  get <id>             Show one tour by row number or ID column
  stats                Fetch, then show cache statistics

Options:
  --json               Print JSON instead of a table
  -h, --help           Show this help

Environment:
  SHEET_URL            Published CSV export of the tour sheet
  RUST_LOG             Log filter (default: warn)";

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Search(Vec<String>),
    Get(String),
    Stats,
    Help,
}

#[derive(Debug, PartialEq)]
struct Args {
    json: bool,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut json = false;
    let mut rest = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                return Ok(Args {
                    json,
                    command: Command::Help,
                })
            }
            _ => rest.push(arg.clone()),
        }
    }

    let command = match rest.split_first() {
        None => Command::Help,
        Some((cmd, tail)) => match cmd.as_str() {
            "list" => Command::List,
            "search" if tail.is_empty() => Command::Search(vec![String::new()]),
            "search" => Command::Search(tail.to_vec()),
            "get" => match tail {
                [id] => Command::Get(id.clone()),
                _ => bail!("get expects exactly one id"),
            },
            "stats" => Command::Stats,
            other => bail!("Unknown command: {}", other),
        },
    };

    Ok(Args { json, command })
}

/// Initialize the tracing subscriber for logging
fn init_tracing() -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let (writer, guard) = tracing_appender::non_blocking(io::stderr());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&raw)?;
    if args.command == Command::Help {
        return output::print_usage(&mut io::stdout(), USAGE);
    }

    let config = Config::load()?;
    let service = TourService::new(config)?;
    info!(command = ?args.command, "tourcache starting");

    run(&service, args).await
}

async fn run(service: &TourService, args: Args) -> Result<()> {
    let mut stdout = io::stdout();
    let printer = output::Printer::new(service.config(), args.json);

    match args.command {
        Command::List => {
            let tours = service.fetch_tours().await?;
            printer.tours(&mut stdout, &tours)?;
        }
        Command::Search(queries) => {
            // Queries share the service, so only the first one fetches
            let results =
                futures::future::join_all(queries.iter().map(|q| service.search_tours(q))).await;
            for (query, result) in queries.iter().zip(results) {
                printer.search(&mut stdout, query, &result?)?;
            }
        }
        Command::Get(id) => match service.get_tour_by_id(&id).await? {
            Some(tour) => printer.tour(&mut stdout, &tour)?,
            None => bail!("Tour not found: {}", id),
        },
        Command::Stats => {
            service.fetch_tours().await?;
            printer.stats(&mut stdout, &service.stats(), &service.last_diagnostics())?;
        }
        Command::Help => output::print_usage(&mut stdout, USAGE)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_args(&args(&["list"])).unwrap().command, Command::List);
        assert_eq!(parse_args(&args(&["stats"])).unwrap().command, Command::Stats);
        assert_eq!(
            parse_args(&args(&["get", "T-4"])).unwrap().command,
            Command::Get("T-4".to_string())
        );
        assert_eq!(
            parse_args(&args(&["search", "cairo", "nile"])).unwrap().command,
            Command::Search(vec!["cairo".to_string(), "nile".to_string()])
        );
    }

    #[test]
    fn test_parse_flags() {
        let parsed = parse_args(&args(&["--json", "list"])).unwrap();
        assert!(parsed.json);
        assert_eq!(parse_args(&args(&[])).unwrap().command, Command::Help);
        assert_eq!(parse_args(&args(&["list", "-h"])).unwrap().command, Command::Help);
    }

    #[test]
    fn test_bare_search_lists_everything() {
        assert_eq!(
            parse_args(&args(&["search"])).unwrap().command,
            Command::Search(vec![String::new()])
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["get"])).is_err());
        assert!(parse_args(&args(&["get", "1", "2"])).is_err());
        assert!(parse_args(&args(&["delete"])).is_err());
    }
}
