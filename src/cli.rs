//! Command-line front-end for the `domain2ip` binary.
//!
//! Thin plumbing around the [`dns`](crate::dns) core: argument parsing,
//! domain-file loading, banner/color handling, and output serialization.
//! Usage errors exit with code 2; per-item resolution errors are reported
//! in the results and leave the exit code at 0.

use crate::dns::{default_resolver, resolve_many, ResultEntry, ResultsMap};
use clap::Parser;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "domain2ip",
    version,
    about = "Resolve domain names to IPv4 and IPv6 addresses"
)]
pub struct Args {
    /// Domains or URLs to resolve
    pub domains: Vec<String>,

    /// File containing domains, one per line; blank lines and `#` comments
    /// are skipped
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Emit results as indented JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress the banner
    #[arg(short, long)]
    pub quiet: bool,

    /// Resolution timeout in seconds
    #[arg(long, default_value_t = 5.0)]
    pub timeout: f64,

    /// Number of concurrent resolution workers
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

fn supports_color(no_color: bool) -> bool {
    !no_color && console::user_attended()
}

/// Loads raw domains from a file: one per line, trimmed, with blank and
/// `#`-prefixed lines dropped.
pub fn load_domains(path: &Path) -> std::io::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn join_or_none<I>(addrs: I) -> String
where
    I: Iterator,
    I::Item: ToString,
{
    let joined = addrs.map(|a| a.to_string()).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}

/// Renders the results map as human-readable per-domain blocks.
pub fn format_human(results: &ResultsMap) -> String {
    let mut out = String::new();
    for (domain, entry) in results {
        // Infallible for String targets.
        let _ = writeln!(out, "\nDomain: {domain}");
        match entry {
            ResultEntry::Failed { error } => {
                let _ = writeln!(out, "  Error: {error}");
            }
            ResultEntry::Resolved(result) => {
                let _ = writeln!(out, "  IPv4: {}", join_or_none(result.ipv4.iter()));
                let _ = writeln!(out, "  IPv6: {}", join_or_none(result.ipv6.iter()));
            }
        }
    }
    out
}

/// Runs the tool; returns the process exit code.
pub async fn run(args: Args) -> i32 {
    if !args.timeout.is_finite() || args.timeout <= 0.0 {
        eprintln!("error: --timeout must be greater than 0.");
        return 2;
    }

    if args.concurrency < 1 {
        eprintln!("error: --concurrency must be at least 1.");
        return 2;
    }

    let mut raw_domains: Vec<String> = Vec::new();
    if let Some(path) = &args.file {
        match load_domains(path) {
            Ok(domains) => raw_domains.extend(domains),
            Err(e) => {
                eprintln!("File error: {e}");
                return 2;
            }
        }
    }
    raw_domains.extend(args.domains.iter().cloned());

    if raw_domains.is_empty() {
        eprintln!("error: no domains or URLs provided.");
        return 2;
    }

    if !args.quiet && supports_color(args.no_color) {
        println!("{}", console::style("domain2ip").green().bold());
    }

    tracing::debug!(
        inputs = raw_domains.len(),
        timeout = args.timeout,
        workers = args.concurrency,
        "starting batch resolution"
    );

    let resolver = default_resolver();
    let results = resolve_many(
        resolver,
        &raw_domains,
        Duration::from_secs_f64(args.timeout),
        args.concurrency,
    )
    .await;

    if args.json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize results: {e}");
                return 2;
            }
        }
    } else {
        print!("{}", format_human(&results));
    }

    0
}
