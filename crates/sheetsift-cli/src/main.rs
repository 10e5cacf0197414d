//! sheetsift CLI - inspect what the extractor makes of a spreadsheet

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sheetsift::prelude::*;
use sheetsift::{sniff, CsvReadOptions};
use sheetsift_xlsx::ZipContainer;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetsift")]
#[command(
    author,
    version,
    about = "Extract typed, styled tables from XLSX and CSV files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the detected file format
    Sniff {
        /// Input file
        input: PathBuf,
    },

    /// Parse the first sheet and print the table as JSON
    Inspect {
        /// Input spreadsheet file (xlsx, csv)
        input: PathBuf,

        /// JSON attribute schema (`fixedAttributes`, `noLabelAttributes`)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Turn numeric CSV fields into numbers
        #[arg(long)]
        detect_types: bool,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse the first sheet and print its values as CSV, fixed attributes first
    #[command(alias = "csv")]
    ToCsv {
        /// Input spreadsheet file (xlsx, csv)
        input: PathBuf,

        /// JSON attribute schema
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// List the entries of an XLSX archive
    Entries {
        /// Input XLSX file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sniff { input } => sniff_file(&input),
        Commands::Inspect {
            input,
            schema,
            detect_types,
            pretty,
            output,
        } => inspect(&input, schema.as_deref(), detect_types, pretty, output.as_deref()),
        Commands::ToCsv {
            input,
            schema,
            delimiter,
        } => to_csv(&input, schema.as_deref(), delimiter),
        Commands::Entries { input } => list_entries(&input),
    }
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    std::fs::read(input).with_context(|| format!("Failed to read '{}'", input.display()))
}

fn load_schema(path: Option<&Path>) -> Result<AttributeSchema> {
    let Some(path) = path else {
        return Ok(AttributeSchema::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema '{}'", path.display()))?;
    AttributeSchema::from_json_str(&json)
        .with_context(|| format!("Invalid schema '{}'", path.display()))
}

fn parse_file(input: &Path, schema: Option<&Path>, detect_types: bool) -> Result<ParsedTable> {
    let bytes = read_input(input)?;
    let options = ParseOptions::new()
        .with_schema(load_schema(schema)?)
        .with_csv(CsvReadOptions::new().with_auto_detect_types(detect_types));
    parse_with_options(&bytes, &options)
        .with_context(|| format!("Failed to parse '{}'", input.display()))
}

fn sniff_file(input: &Path) -> Result<()> {
    let bytes = read_input(input)?;
    let kind = sniff(&bytes).with_context(|| format!("Unrecognized file '{}'", input.display()))?;
    let label = match kind {
        FileKind::Container => "xlsx",
        FileKind::LegacyBinary => "xls (unsupported)",
        FileKind::DelimitedText => "csv",
    };
    println!("{}\t{}", input.display(), label);
    Ok(())
}

fn inspect(
    input: &Path,
    schema: Option<&Path>,
    detect_types: bool,
    pretty: bool,
    output: Option<&Path>,
) -> Result<()> {
    let table = parse_file(input, schema, detect_types)?;

    let json = if pretty {
        serde_json::to_string_pretty(&table)
    } else {
        serde_json::to_string(&table)
    }
    .context("Failed to serialize table")?;

    if let Some(output_path) = output {
        std::fs::write(output_path, &json)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!(
            "Wrote {} rows to '{}'",
            table.total_rows,
            output_path.display()
        );
    } else {
        let mut stdout = io::stdout();
        stdout
            .write_all(json.as_bytes())
            .and_then(|_| stdout.write_all(b"\n"))
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn to_csv(input: &Path, schema: Option<&Path>, delimiter: char) -> Result<()> {
    let table = parse_file(input, schema, false)?;
    io::stdout()
        .write_all(table_to_csv(&table, delimiter).as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}

/// Render the table as delimited text, header line first
fn table_to_csv(table: &ParsedTable, delimiter: char) -> String {
    let sep = delimiter.to_string();
    let mut out = String::new();

    let header: Vec<String> = table
        .headers
        .iter()
        .map(|h| quote_field(h, delimiter))
        .collect();
    out.push_str(&header.join(&sep));
    out.push('\n');

    for row in &table.rows {
        let fields: Vec<String> = table
            .headers
            .iter()
            .map(|name| {
                row.get(name)
                    .map(|cell| cell_value_to_csv_string(&cell.value, delimiter))
                    .unwrap_or_default()
            })
            .collect();
        out.push_str(&fields.join(&sep));
        out.push('\n');
    }

    out
}

/// Convert a CellValue to a CSV-safe string
fn cell_value_to_csv_string(value: &CellValue, delimiter: char) -> String {
    let text = match value {
        CellValue::Number(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        CellValue::String(s) => s.to_string(),
        CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
    };
    quote_field(&text, delimiter)
}

fn quote_field(text: &str, delimiter: char) -> String {
    if text.contains(delimiter) || text.contains('"') || text.contains('\n') || text.contains('\r')
    {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn list_entries(input: &Path) -> Result<()> {
    let bytes = read_input(input)?;
    if sniff(&bytes).ok() != Some(FileKind::Container) {
        bail!("'{}' is not an XLSX archive", input.display());
    }
    let container = ZipContainer::parse(&bytes)
        .with_context(|| format!("Failed to read archive '{}'", input.display()))?;

    for entry in container.entries() {
        println!(
            "{}\t{}\t{}\t{}",
            entry.compression_method, entry.compressed_size, entry.uncompressed_size, entry.name
        );
    }
    eprintln!("{} entries", container.len());

    Ok(())
}
