use bsonfilter::config::{self, AppConfig};
use bsonfilter::render::{OutputFormat, to_extjson};
use bsonfilter::{FilterError, logger, parse_filter, parse_request};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "bsonfilter", version, about = "Parse JSON query payloads into BSON documents")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Extended JSON flavour used for output
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a filter payload (extended JSON or plain JSON)
    Filter {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Parse a request envelope {filter, sort, projection, limit, skip}
    Request {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
        /// Emit a `find` command for this collection
        #[arg(long)]
        collection: Option<String>,
    },
}

fn init_logging(cfg: &AppConfig) {
    let res = match &cfg.log_config {
        Some(path) => logger::init_path(path),
        None if cfg.log_dir.is_some() || cfg.log_level.is_some() => logger::configure_logging(
            cfg.log_dir.as_deref(),
            cfg.log_level.as_deref(),
            cfg.log_retention,
        ),
        None => logger::configure_from_env(),
    };
    if let Err(e) = res {
        eprintln!("warning: logging disabled: {e}");
    }
}

fn read_input(file: Option<&Path>) -> std::io::Result<Vec<u8>> {
    match file {
        Some(p) => std::fs::read(p),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn report_filter_error(e: &FilterError) {
    eprintln!("invalid filter: {e}");
    if let Some(decode) = e.as_decode() {
        eprintln!("  extended JSON: {}", decode.extended());
        eprintln!("  plain JSON:    {}", decode.plain());
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let cfg = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {e}");
            return ExitCode::from(1);
        }
    };
    init_logging(&cfg);
    let format = cli.format.unwrap_or_else(|| cfg.output_format());

    let (file, collection) = match &cli.command {
        Commands::Filter { file } => (file.as_deref(), None),
        Commands::Request { file, collection } => {
            (file.as_deref(), collection.clone().or_else(|| cfg.default_collection.clone()))
        }
    };
    let body = match read_input(file) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("read error: {e}");
            return ExitCode::from(1);
        }
    };
    log::info!("parsing {} bytes", body.len());

    let parsed = match &cli.command {
        Commands::Filter { .. } => parse_filter(&body),
        Commands::Request { .. } => parse_request(&body).map(|req| match &collection {
            Some(name) => req.to_find_command(name),
            None => req.to_document(),
        }),
    };
    let doc = match parsed {
        Ok(d) => d,
        Err(e) => {
            log::warn!("rejected payload: {e}");
            report_filter_error(&e);
            return ExitCode::from(2);
        }
    };

    match serde_json::to_string_pretty(&to_extjson(doc, format)) {
        Ok(s) => {
            println!("{s}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("output error: {e}");
            ExitCode::from(1)
        }
    }
}
