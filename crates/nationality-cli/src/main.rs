//! nationality — Command-line interface for nationality-core
//!
//! Inspect the country catalog behind the nationality picker, check how
//! codes resolve, and replay keyboard sessions against a headless picker.
//!
//! Usage examples
//! --------------
//!
//! - Show catalog size and cache counters
//!   $ nationality stats
//!
//! - Resolve a code exactly (case-sensitive) vs. look up its flag (case-insensitive)
//!   $ nationality resolve KR
//!   $ nationality flag kr
//!
//! - Search names
//!   $ nationality search kor
//!
//! - Replay a picker session; every commit is sent to a logging backend
//!   $ nationality select --keys enter,k,o,r,down,enter
//!   $ nationality --verbose select --keys enter,enter --fail
//!
//! Data source
//! -----------
//!
//! The builtin catalog is used unless `--catalog <path>` points to a JSON
//! array of `{code, name, flag}` objects (`.json.gz` with the `compact`
//! feature).
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use futures::executor::LocalPool;
use futures::future::{self, FutureExt, LocalBoxFuture};
use futures::task::LocalSpawnExt;
use nationality_core::prelude::*;
use std::sync::Arc;
use tracing::info;

/// Stand-in for the profile endpoint: logs each update and optionally
/// rejects it.
struct LoggingBackend {
    fail: bool,
}

impl NationalityMutation for LoggingBackend {
    type Error = String;

    fn mutate(&self, code: Option<String>) -> LocalBoxFuture<'static, Result<(), String>> {
        info!(code = ?code, "profile update requested");
        let result = if self.fail {
            Err(format!("backend rejected {}", code.as_deref().unwrap_or("<none>")))
        } else {
            Ok(())
        };
        future::ready(result).boxed_local()
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_db(args: &CliArgs) -> anyhow::Result<NationalityDb> {
    let options = DbOptions::default().with_cache_capacity(args.cache_capacity);
    match &args.catalog {
        #[cfg(feature = "json")]
        Some(path) => NationalityDb::load_from_path(path, options)
            .with_context(|| format!("loading catalog {path}")),
        #[cfg(not(feature = "json"))]
        Some(_) => bail!("--catalog requires the `json` feature"),
        None => Ok(NationalityDb::with_options(options)?),
    }
}

fn print_country(c: &Country) {
    println!("{} {} ({})", c.flag(), c.name(), c.code());
}

fn run_session(db: Arc<NationalityDb>, keys: &[String], fail: bool) -> anyhow::Result<()> {
    let keys = keys
        .iter()
        .map(|k| k.trim().parse::<SelectorKey>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(anyhow::Error::msg)?;

    let flow = UpdateFlow::new(LoggingBackend { fail })
        .with_success_handler(|code| println!("  saved: {}", code.unwrap_or("<cleared>")))
        .with_error_handler(|err: &String| eprintln!("  update failed: {err}"));

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let strategy = Immediate::new(flow.clone(), move |task: LocalBoxFuture<'static, ()>| {
        if let Err(err) = spawner.spawn_local(task) {
            eprintln!("  could not schedule update: {err}");
        }
    });

    let mut picker = NationalitySelector::with_strategy(db, strategy);
    for key in keys {
        let outcome = picker.handle_key(key);
        pool.run_until_stalled();

        let focus = picker
            .focused()
            .map(|c| c.name().to_owned())
            .unwrap_or_else(|| "-".into());
        println!(
            "{key:?} -> {outcome:?} [open={} query={:?} focus={} ({}/{})]",
            picker.is_open(),
            picker.query(),
            focus,
            picker.focused_index(),
            picker.filtered_len(),
        );
    }

    let selected = picker.selected_country();
    println!("selected: {} {} [{:?}]", selected.flag(), selected.name(), flow.status());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let db = Arc::new(open_db(&args)?);

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            println!("Catalog statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Cache capacity: {}", stats.cache_capacity);
        }

        Commands::Countries => {
            for c in db.countries() {
                print_country(c);
            }
        }

        Commands::Resolve { code } => {
            let c = db.resolve(Some(&code));
            if c.is_sentinel() && code != SENTINEL_CODE {
                eprintln!("No country with code {code:?} (codes are case-sensitive)");
            }
            print_country(c);
        }

        Commands::Flag { code } => println!("{}", db.flag_for(Some(&code))),

        Commands::Name { code } => println!("{}", db.name_for(Some(&code))),

        Commands::Search { query } => {
            let matches = db.search(Some(&query));
            if matches.is_empty() {
                println!("No countries found matching: {query}");
            } else {
                for c in matches {
                    print_country(c);
                }
            }
        }

        Commands::Select { keys, fail } => {
            if keys.is_empty() {
                bail!("no keys given; try --keys enter,down,enter");
            }
            run_session(db, &keys, fail)?;
        }
    }

    Ok(())
}
