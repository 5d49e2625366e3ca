pub mod analyze;
pub mod clean;
pub mod cli;
pub mod dedup;
pub mod error;
pub mod export;
pub mod impute;
pub mod ingest;
pub mod io_utils;
pub mod mapping;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_cleanse", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Clean(args) => clean::execute(&args),
        Commands::Analyze(args) => handle_analyze(&args),
        Commands::Preview(args) => handle_preview(&args),
    }
}

fn handle_analyze(args: &cli::AnalyzeArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let table = ingest::load_table(&args.input, delimiter, encoding)
        .with_context(|| format!("Loading table from {:?}", args.input))?;

    let profiles = analyze::analyze(&table);
    let headers = vec![
        "column".to_string(),
        "unique".to_string(),
        "rows".to_string(),
        "classification".to_string(),
    ];
    let rows = profiles
        .iter()
        .map(|profile| {
            vec![
                profile.column.clone(),
                profile.unique_values.to_string(),
                profile.total_rows.to_string(),
                profile.classification.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render::print_table(&headers, &rows);
    info!("Profiled {} text column(s)", profiles.len());
    Ok(())
}

fn handle_preview(args: &cli::PreviewArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let table = ingest::load_table(&args.input, delimiter, encoding)
        .with_context(|| format!("Loading table from {:?}", args.input))?;

    let headers = table
        .columns()
        .iter()
        .map(|column| column.name.clone())
        .collect::<Vec<_>>();
    let shown = table.row_count().min(args.rows);
    let rows = (0..shown)
        .map(|row| {
            table
                .columns()
                .iter()
                .map(|column| column.display_at(row).unwrap_or_default())
                .collect()
        })
        .collect::<Vec<_>>();
    render::print_table(&headers, &rows);
    info!("Displayed {} row(s) from {:?}", shown, args.input);
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
