//! ratesheet CLI - carrier rate sheet reconstruction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use ratesheet::{
    detect_kind, load_document, mentioned_services, parse_zone_locator, render, BracketPolicy,
    Document, ExtractOptions, JsonFormat, RateSheetExtractor, ZipZoneRow, SERVICE_CATALOG,
};

#[derive(Parser)]
#[command(name = "ratesheet")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Reconstruct carrier rate sheets from extracted PDF pages", long_about = None)]
struct Cli {
    /// Input document (extracted pages as JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Origin postal code
    #[arg(long, env = "RATESHEET_ORIGIN")]
    origin: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct the full rate sheet
    Parse {
        /// Input document (extracted pages as JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Origin postal code for the zone dataset
        #[arg(long, env = "RATESHEET_ORIGIN")]
        origin: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Warn instead of failing on unrecognized documents or a missing zone matrix
        #[arg(long)]
        lenient: bool,

        /// Keep the last rate when a freight bracket is printed twice
        #[arg(long)]
        last_bracket_wins: bool,

        /// Minimum zone numbers in a zone header row
        #[arg(long, default_value_t = ratesheet::parser::DEFAULT_MIN_HEADER_ZONES)]
        min_header_zones: usize,
    },

    /// List detected services and their pages
    Services {
        /// Input document (extracted pages as JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the zone dataset for an origin
    Zones {
        /// Input document (extracted pages as JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Origin postal code
        #[arg(long, env = "RATESHEET_ORIGIN")]
        origin: String,

        /// Warn instead of failing when the zone matrix is missing
        #[arg(long)]
        lenient: bool,

        /// Output JSON instead of tab-separated text
        #[arg(long)]
        json: bool,
    },

    /// Parse a US zone locator (plain text, or extracted pages as JSON)
    UsZones {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output JSON instead of tab-separated text
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON rate sheet
    Json,
    /// Tab-separated text blocks
    Text,
}

struct ParseArgs {
    origin: Option<String>,
    format: OutputFormat,
    compact: bool,
    lenient: bool,
    last_bracket_wins: bool,
    min_header_zones: usize,
}

impl Default for ParseArgs {
    fn default() -> Self {
        Self {
            origin: None,
            format: OutputFormat::Json,
            compact: false,
            lenient: false,
            last_bracket_wins: false,
            min_header_zones: ratesheet::parser::DEFAULT_MIN_HEADER_ZONES,
        }
    }
}

impl ParseArgs {
    fn extract_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new().with_min_header_zones(self.min_header_zones);
        if let Some(origin) = &self.origin {
            options = options.with_origin(origin.clone());
        }
        if self.lenient {
            options = options.lenient();
        }
        if self.last_bracket_wins {
            options = options.with_bracket_policy(BracketPolicy::LastWins);
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Parse {
            input,
            origin,
            output,
            format,
            compact,
            lenient,
            last_bracket_wins,
            min_header_zones,
        }) => cmd_parse(
            &input,
            output.as_deref(),
            &ParseArgs {
                origin,
                format,
                compact,
                lenient,
                last_bracket_wins,
                min_header_zones,
            },
        ),
        Some(Commands::Services { input }) => cmd_services(&input),
        Some(Commands::Zones {
            input,
            origin,
            lenient,
            json,
        }) => cmd_zones(&input, &origin, lenient, json),
        Some(Commands::UsZones {
            input,
            output,
            json,
        }) => cmd_us_zones(&input, output.as_deref(), json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: parse if input is provided
            if let Some(input) = cli.input {
                let args = ParseArgs {
                    origin: cli.origin,
                    ..ParseArgs::default()
                };
                cmd_parse(&input, None, &args)
            } else {
                println!("{}", "Usage: ratesheet <FILE>".yellow());
                println!("       ratesheet --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_parse(
    input: &Path,
    output: Option<&Path>,
    args: &ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;
    log::debug!("Loaded {} pages from {}", doc.page_count(), input.display());
    let options = args.extract_options();
    log::debug!("Extract options: {:?}", options);
    let extractor = RateSheetExtractor::with_options(options);

    let pb = ProgressBar::new(extractor.locate(&doc.pages).len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Reading zone index...");

    let mut sheet = extractor.extract_with(&doc.pages, |service| {
        pb.set_message(service.name.clone());
        pb.inc(1);
    })?;
    sheet.metadata.source = doc.source.clone();
    pb.finish_with_message("Done!");

    let rendered = match args.format {
        OutputFormat::Json => {
            let format = if args.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            render::to_json(&sheet, format)?
        }
        OutputFormat::Text => render::to_text(&sheet)?,
    };

    write_output(output, &rendered)?;

    eprintln!(
        "{} {} services, {} amounts",
        "Extracted".green().bold(),
        sheet.services.len(),
        sheet.rate_count()
    );
    Ok(())
}

fn cmd_services(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;
    let extractor = RateSheetExtractor::new().lenient();
    let located = extractor.locate(&doc.pages);

    println!("{}", "Detected Services".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "Document: {}",
        detect_kind(&doc.plain_text(), SERVICE_CATALOG).to_string().bold()
    );

    if located.is_empty() {
        println!("{}", "No services found".yellow());
        return Ok(());
    }

    for service in &located {
        let kind = if service.descriptor.is_freight() {
            "freight"
        } else {
            "flat"
        };
        println!(
            "{}: pages {} ({})",
            service.descriptor.name.bold(),
            service.span,
            kind.dimmed()
        );
    }

    // Named somewhere in the text but without a title page
    for name in mentioned_services(&doc.pages, SERVICE_CATALOG) {
        if !located.iter().any(|service| service.descriptor.name == name) {
            println!("{}: {}", name.bold(), "no rate pages found".yellow());
        }
    }

    Ok(())
}

fn cmd_zones(
    input: &Path,
    origin: &str,
    lenient: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;
    let mut extractor = RateSheetExtractor::new().with_origin(origin);
    if lenient {
        extractor = extractor.lenient();
    }
    let sheet = extractor.extract_document(&doc)?;

    match (&sheet.origin_zone, &sheet.zones) {
        (Some(zone), Some(rows)) => {
            eprintln!("{} {} -> {}", "Origin".green().bold(), origin, zone);
            if json {
                println!("{}", render::to_json_value(rows, JsonFormat::Pretty)?);
            } else {
                print!("{}", render::zones_to_text(rows)?);
            }
            Ok(())
        }
        _ => Err(format!("Origin {} not found in the postal code index", origin).into()),
    }
}

fn cmd_us_zones(
    input: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_locator_text(input)?;
    log::debug!("Read {} bytes of zone locator text", text.len());
    let rows = parse_zone_locator(&text)?;

    let rendered = if json {
        serde_json::to_string_pretty(&rows)?
    } else {
        zip_rows_to_text(&rows)
    };
    write_output(output, &rendered)?;

    eprintln!("{} {} ZIP ranges", "Parsed".green().bold(), rows.len());
    Ok(())
}

fn read_locator_text(input: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let is_json = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let doc: Document = load_document(input)?;
        Ok(doc.plain_text())
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn zip_rows_to_text(rows: &[ZipZoneRow]) -> String {
    let mut out = String::from("Start Postal Code\tEnd Postal Code\tZone\n");
    for row in rows {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            row.start,
            row.end,
            row.zone.as_deref().unwrap_or("")
        ));
    }
    out
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "ratesheet".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Carrier rate sheet reconstruction tool");
    println!();
    println!("License: MIT");
}
