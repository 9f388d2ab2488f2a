use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;
use std::path::{Path, PathBuf};
use std::process;

use surfacemap::{
    config::ScanConfig,
    network::limits,
    output::{
        read_wire_report, write_export, ExportReport, OutputConfig, OutputFormat, OutputManager,
    },
    report::assess_target,
    risk::RiskCatalog,
    scanner::ScanTarget,
    ScanError,
};

fn build_cli() -> Command {
    Command::new("surfacemap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Attack surface mapper: TCP port scan with service risk assessment")
        .arg(
            Arg::new("target")
                .value_name("IP")
                .help("IPv4 or IPv6 address to scan")
                .required_unless_present("export-from")
                .index(1),
        )
        .arg(
            Arg::new("start-port")
                .short('s')
                .long("start-port")
                .value_name("PORT")
                .help("First port of the range (default 1)")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("end-port")
                .short('e')
                .long("end-port")
                .value_name("PORT")
                .help("Last port of the range, inclusive (default 1024)")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("COUNT")
                .help("Number of concurrent probe workers (default 200)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("MS")
                .help("Per-port connect timeout in milliseconds (default 500)")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .value_name("DIR")
                .help("Write a JSON security report into DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("export-from")
                .long("export-from")
                .value_name("FILE")
                .help("Export a report saved earlier with --output json instead of scanning")
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with("target")
                .requires("export"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path (default ~/.surfacemap.toml)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

/// File (or default) configuration with command line overrides applied
fn resolve_config(matches: &ArgMatches) -> anyhow::Result<ScanConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ScanConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScanConfig::load_default_config(),
    };

    if let Some(&threads) = matches.get_one::<usize>("threads") {
        config = config.with_threads(threads);
    }
    if let Some(&timeout) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(timeout);
    }
    let start = matches.get_one::<u16>("start-port").copied().unwrap_or(config.start_port);
    let end = matches.get_one::<u16>("end-port").copied().unwrap_or(config.end_port);
    config = config.with_ports(start, end);

    config.validate()?;
    Ok(config)
}

/// Export a saved JSON report without scanning again
fn export_saved_report(source: &Path, dir: &Path) -> anyhow::Result<PathBuf> {
    let report = read_wire_report(source)
        .with_context(|| format!("failed to load report {}", source.display()))?;
    let path = write_export(&ExportReport::from(report), dir)
        .with_context(|| format!("failed to export report into {}", dir.display()))?;
    Ok(path)
}

async fn run(matches: &ArgMatches, output: &OutputManager) -> anyhow::Result<()> {
    if let Some(source) = matches.get_one::<PathBuf>("export-from") {
        // clap enforces --export alongside --export-from
        let dir = matches
            .get_one::<PathBuf>("export")
            .context("--export-from requires --export <DIR>")?;
        let path = export_saved_report(source, dir)?;
        eprintln!("{} {}", "Report written to".green(), path.display());
        return Ok(());
    }

    let config = resolve_config(matches)?;
    let wanted = u64::try_from(config.threads).unwrap_or(u64::MAX);
    limits::raise_descriptor_limit(wanted.saturating_add(limits::RESERVED_DESCRIPTORS));

    // Presence is enforced by clap
    let host = matches
        .get_one::<String>("target")
        .map(String::as_str)
        .unwrap_or_default();
    let target = ScanTarget::parse(host, config.start_port, config.end_port)?;

    let report = assess_target(&target, &config, RiskCatalog::builtin()).await?;
    output.write_report(&report)?;

    if let Some(dir) = matches.get_one::<PathBuf>("export") {
        let path = write_export(&ExportReport::from(&report), dir)
            .with_context(|| format!("failed to export report into {}", dir.display()))?;
        eprintln!("{} {}", "Report written to".green(), path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_flag("verbose"));

    let format = matches
        .get_one::<String>("output")
        .and_then(|f| f.parse::<OutputFormat>().ok())
        .unwrap_or_default();
    let output = OutputManager::new(OutputConfig {
        format,
        colored: !matches.get_flag("no-color"),
    });

    if let Err(err) = run(&matches, &output).await {
        let precondition = err
            .downcast_ref::<ScanError>()
            .map(ScanError::is_precondition)
            .unwrap_or(false);
        if !precondition {
            log::error!("{:#}", err);
        }

        let message = format!("{:#}", err);
        match format {
            OutputFormat::Json => println!("{}", output.render_error(&message)),
            OutputFormat::Text => eprintln!("{}", output.render_error(&message)),
        }
        process::exit(1);
    }
}
