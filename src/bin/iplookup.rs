//! iplookup: CLI tool for importing IP range files and resolving addresses.

use clap::{Args, Parser, Subcommand};
use iplookup::config::{Config, ImportConfig};
use iplookup::index::{reserved_ranges, RangeIndex, DISTINCT_INFO_COUNT_HINT, RANGE_COUNT_HINT};
use iplookup::key::ip_to_key;
use iplookup::{Error, ImportService, ImportStats, LookupService, Result, SharedLookup};
use serde_json::json;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iplookup")]
#[command(version = "0.1.0")]
#[command(about = "Resolve IP addresses against an in-memory range index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Source URI: http(s)://, file:// or a local path
    #[arg(short, long)]
    source: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory compressed downloads are extracted into
    #[arg(short, long)]
    download_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a range source and look up addresses
    Lookup {
        #[command(flatten)]
        source: SourceArgs,

        /// Addresses to look up
        #[arg(required = true)]
        ips: Vec<String>,
    },

    /// Import a range source and print index statistics
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the reserved networks, or look addresses up in them
    Reserved {
        /// Addresses to check
        ips: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lookup { source, ips } => lookup(&source, &ips),
        Commands::Stats { source } => stats(&source),
        Commands::Reserved { ips } => reserved(&ips),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn lookup(args: &SourceArgs, ips: &[String]) -> Result<()> {
    let ips = ips
        .iter()
        .map(|s| parse_ip(s))
        .collect::<Result<Vec<_>>>()?;

    let (service, _) = build(args)?;
    let shared = SharedLookup::new(service);
    let snapshot = shared.load();

    for ip in ips {
        let info = snapshot.try_get(ip);
        let line = json!({
            "ip": ip.to_string(),
            "found": info.is_some(),
            "reserved": snapshot.is_reserved(ip),
            "info": info,
        });
        println!("{}", line);
    }
    Ok(())
}

fn stats(args: &SourceArgs) -> Result<()> {
    let (service, import) = build(args)?;

    let report = json!({
        "status": "SERVING",
        "index": {
            "ip_ranges": service.range_count(),
            "distinct_info_count": service.info_count(),
        },
        "import_task": {
            "rows": import.rows,
            "dropped": import.dropped,
            "duration_ms": import.duration.as_millis() as u64,
        },
    });
    println!("{}", report);
    Ok(())
}

fn reserved(ips: &[String]) -> Result<()> {
    let table = reserved_ranges();

    if ips.is_empty() {
        for (network, description) in table.networks() {
            println!("{:<18} {}", network.to_string(), description);
        }
        return Ok(());
    }

    for s in ips {
        let ip = parse_ip(s)?;
        let info = table.try_get(ip_to_key(ip));
        let line = json!({
            "ip": ip.to_string(),
            "found": info.is_some(),
            "info": info,
        });
        println!("{}", line);
    }
    Ok(())
}

/// Resolve the import configuration and run the import.
fn build(args: &SourceArgs) -> Result<(LookupService, ImportStats)> {
    let config = resolve_config(args)?;
    config.validate()?;

    let index = if config.preallocate {
        RangeIndex::with_capacity(RANGE_COUNT_HINT, DISTINCT_INFO_COUNT_HINT)
    } else {
        RangeIndex::new()
    };
    let mut service = LookupService::with_index(index);

    let stats = ImportService::new(&config).import(&config.file_uri, &mut service)?;
    Ok((service, stats))
}

fn resolve_config(args: &SourceArgs) -> Result<ImportConfig> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?.import,
        None => ImportConfig::default(),
    };

    // Command-line flags override the file
    if let Some(source) = &args.source {
        config.file_uri = source.clone();
    }
    if let Some(dir) = &args.download_dir {
        config.download_dir = Some(dir.clone());
    }
    Ok(config)
}

fn parse_ip(s: &str) -> Result<IpAddr> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidIpAddress(s.to_string()))
}
