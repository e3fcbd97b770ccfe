use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use xsv_cli::render::{delimiters_table, metadata_json, metadata_table};
use xsv_ingest::{FileSource, MetadataOptions, compute_metadata};
use xsv_model::XsvMetadata;

use crate::cli::{InspectArgs, OutputFormatArg};

pub fn run_delimiters() {
    println!("{}", delimiters_table());
}

pub fn run_inspect(args: &InspectArgs) -> Result<XsvMetadata> {
    let span = info_span!("inspect", file = %args.file.display());
    let _guard = span.enter();
    let started = Instant::now();

    let options = MetadataOptions::default()
        .with_delimiter(args.delimiter)
        .with_line_limit(args.lines)
        .with_chunk_size(args.chunk_size);
    let source = FileSource::open(&args.file)?;
    let metadata = compute_metadata(&source, &options)
        .with_context(|| format!("inspect {}", args.file.display()))?;

    info!(
        columns = metadata.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "inspection complete"
    );
    Ok(metadata)
}

pub fn print_metadata(metadata: &XsvMetadata, format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Table => {
            println!(
                "Delimiter: {}",
                xsv_cli::format::delimiter_label(metadata.delimiter)
            );
            println!("{}", metadata_table(metadata));
        }
        OutputFormatArg::Json => {
            let json = metadata_json(metadata).context("serialize metadata")?;
            println!("{json}");
        }
    }
    Ok(())
}
