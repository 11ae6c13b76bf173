//! CLI application logic.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use cascadoc_css::{CssStylesheetSerializer, SerializerPreferences};
use cascadoc_ooxml::DocxPackage;

#[derive(Parser)]
#[command(name = "cascadoc")]
#[command(author, version, about = "Extract docx styles as CSS", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the styles of a DOCX file to a CSS stylesheet
    Convert {
        /// Input DOCX file
        input: PathBuf,

        /// Output CSS file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the @page rule
        #[arg(long)]
        no_page_rule: bool,

        /// Emit an @media screen block that renders the page like a sheet of paper
        #[arg(long)]
        simulate_page: bool,

        /// Reset all attached counters on body instead of only root counters
        #[arg(long)]
        counters_in_body: bool,
    },

    /// Dump the parsed style model as JSON
    DumpStyles {
        /// Input DOCX file
        input: PathBuf,

        /// Output JSON file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse arguments and dispatch to the appropriate command
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            no_page_rule,
            simulate_page,
            counters_in_body,
        } => {
            let preferences = SerializerPreferences {
                include_page_rule: !no_page_rule,
                simulate_printed_page: simulate_page,
                initialize_counters_in_body: counters_in_body,
            };
            convert_command(&input, output.as_deref(), preferences)
        }
        Commands::DumpStyles { input, output } => {
            dump_styles_command(&input, output.as_deref())
        }
    }
}

/// Execute the convert command
pub fn convert_command(
    input: &Path,
    output: Option<&Path>,
    preferences: SerializerPreferences,
) -> Result<()> {
    let package = open_package(input)?;
    let serializer = CssStylesheetSerializer::with_preferences(preferences);
    let css = serializer
        .serialize(&package.stylesheet)
        .with_context(|| format!("Failed to serialize styles from: {}", input.display()))?;
    info!("serialized {} bytes of CSS", css.len());
    write_output(output, &css)
}

/// Execute the dump-styles command
pub fn dump_styles_command(input: &Path, output: Option<&Path>) -> Result<()> {
    let package = open_package(input)?;
    let json = serde_json::to_string_pretty(&package.stylesheet)
        .context("Failed to serialize style model to JSON")?;
    write_output(output, &json)
}

fn open_package(input: &Path) -> Result<DocxPackage> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    DocxPackage::open(input)
        .with_context(|| format!("Failed to open DOCX file: {}", input.display()))
}

fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
