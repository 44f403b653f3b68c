//! octojira CLI - Map Octane IDs to JIRA IDs from test-run exports
//!
//! # Main Commands
//!
//! ```bash
//! octojira map input.xlsx          # Write octane_jira_mapping_output.xlsx
//! octojira serve                   # Start HTTP server (port 3000)
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! octojira inspect input.xlsx      # Dump sheet name, first rows and headers
//! ```

use clap::{Parser, Subcommand};
use octojira::{map_file, read_file, write_to_file, MappingRow, OUTPUT_FILE_NAME};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "octojira")]
#[command(about = "Map Octane IDs to JIRA IDs from test-run exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a test-run export to the Octane/JIRA mapping table
    Map {
        /// Input Excel file
        input: PathBuf,

        /// Output file (default: octane_jira_mapping_output.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worksheet to read (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Dump the sheet name, first rows and headers of an Excel file
    Inspect {
        /// Input Excel file
        input: PathBuf,

        /// Number of rows to show (header row included)
        #[arg(short, long, default_value = "15")]
        rows: usize,

        /// Worksheet to read (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Map {
            input,
            output,
            sheet,
        } => cmd_map(&input, output.as_deref(), sheet.as_deref()),

        Commands::Inspect { input, rows, sheet } => cmd_inspect(&input, rows, sheet.as_deref()),

        Commands::Serve { port } => cmd_serve(port).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_map(
    input: &Path,
    output: Option<&Path>,
    sheet: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    let outcome = map_file(input, sheet)?;

    eprintln!("   Sheet: {}", outcome.sheet.sheet_name);
    eprintln!("   Columns: {}", outcome.sheet.headers.join(", "));
    eprintln!("   Rows: {}", outcome.sheet.row_count);

    eprintln!("\n⚙️  Mapped {} rows", outcome.rows.len());
    print_preview(&outcome.rows);

    if !outcome.skipped.is_empty() {
        eprintln!(
            "\n⚠️  Skipped {} rows (missing required fields):",
            outcome.skipped.len()
        );
        for skip in outcome.skipped.iter().take(5) {
            eprintln!("   • Row {}: missing {}", skip.row, skip.missing_fields.join(", "));
        }
        if outcome.skipped.len() > 5 {
            eprintln!("   ... +{} more", outcome.skipped.len() - 5);
        }
    }

    let path = output.unwrap_or(Path::new(OUTPUT_FILE_NAME));
    write_to_file(path, &outcome.rows)?;
    eprintln!("\n💾 Output written to: {}", path.display());

    Ok(())
}

fn print_preview(rows: &[MappingRow]) {
    for row in rows.iter().take(10) {
        eprintln!("   {} | {} | {}", row.test_team, row.octane_id, row.jira_id);
    }
    if rows.len() > 10 {
        eprintln!("   ... +{} more", rows.len() - 10);
    }
}

fn cmd_inspect(
    input: &Path,
    rows: usize,
    sheet: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_file(input, sheet)?;

    println!("Sheet name: {}", data.sheet_name);

    println!("\nFirst {} rows:", rows);
    println!("Row 1: {}", data.headers.join(" | "));
    for (i, record) in data.records.iter().take(rows.saturating_sub(1)).enumerate() {
        let cells: Vec<String> = data
            .headers
            .iter()
            .map(|h| fmt_cell(record.get(h)))
            .collect();
        println!("Row {}: {}", i + 2, cells.join(" | "));
    }

    println!("\nColumn headers:");
    for (idx, header) in data.headers.iter().enumerate() {
        println!("Column {}: {}", idx + 1, header);
    }

    Ok(())
}

fn fmt_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

async fn cmd_serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    octojira::server::start_server(port).await
}
