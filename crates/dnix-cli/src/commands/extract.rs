//! Extract command - extract identity fields from a single OCR text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use dnix_core::{DocumentFieldExtractor, DocumentParser, ExtractionResult, Field};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file, or "-" to read from stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which strategy found each field
    #[arg(long)]
    show_strategy: bool,

    /// Print extraction warnings to stderr
    #[arg(long)]
    validate: bool,

    /// Fail unless a document number or given name was found
    #[arg(long)]
    require_identity: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used for per-file batch output.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let extractor = DocumentFieldExtractor::from_config(&config)?;

    let text = read_input(&args.input)?;
    info!("Extracting fields from {}", args.input.display());

    let result = extractor.parse(&text);

    if args.validate && !result.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = format_result(&result, args.format, args.show_strategy)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if args.require_identity && !result.fields.has_minimum_identity() {
        anyhow::bail!("Could not detect identity document information");
    }

    Ok(())
}

fn read_input(input: &PathBuf) -> anyhow::Result<String> {
    let bytes = if input.as_os_str() == "-" {
        let mut buffer = Vec::new();
        std::io::stdin().read_to_end(&mut buffer)?;
        buffer
    } else {
        if !input.exists() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
        fs::read(input)?
    };

    // OCR engines occasionally emit invalid UTF-8 for unrecognized glyphs.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    show_strategy: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if show_strategy => Ok(format!("{}\n", serde_json::to_string_pretty(result)?)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&result.fields)?)),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result, show_strategy)),
    }
}

/// CSV header shared by single-file output and the batch summary.
pub fn csv_field_header() -> Vec<&'static str> {
    let mut header: Vec<&'static str> = Field::ALL.iter().map(|f| f.as_str()).collect();
    header.push("birthDateIso");
    header
}

/// CSV cells for the fields of one result, in header order.
pub fn csv_field_record(result: &ExtractionResult) -> Vec<String> {
    let fields = &result.fields;
    let mut record: Vec<String> = Field::ALL
        .iter()
        .map(|f| fields.value(*f).unwrap_or_default())
        .collect();
    record.push(
        fields
            .birth_date_parsed()
            .map(|d| d.to_string())
            .unwrap_or_default(),
    );
    record
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(csv_field_header())?;
    wtr.write_record(csv_field_record(result))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(result: &ExtractionResult, show_strategy: bool) -> String {
    let fields = &result.fields;
    let mut output = String::new();

    for field in Field::ALL {
        let value = fields.value(field).unwrap_or_else(|| "-".to_string());
        output.push_str(&format!("{:<16} {}\n", format!("{}:", field.label()), value));
    }

    if let Some(date) = fields.birth_date_parsed() {
        output.push_str(&format!("{:<16} {}\n", "Birth date (ISO):", date));
    }

    if show_strategy && !result.matches.is_empty() {
        output.push('\n');
        output.push_str("Strategies:\n");
        for m in &result.matches {
            output.push_str(&format!(
                "  {:<16} {} ({:.2})\n",
                m.field.as_str(),
                m.strategy.as_str(),
                m.confidence
            ));
        }
    }

    if !fields.has_minimum_identity() {
        output.push_str("\nNo identity information detected\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnix_core::extract;

    fn parse(text: &str) -> ExtractionResult {
        DocumentFieldExtractor::new().parse(text)
    }

    #[test]
    fn test_csv_output() {
        let result = parse("Documento / Document\n30.123.456\nSexo / Sex\nF");
        let csv = format_csv(&result).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("documentNumber,givenName,surname,birthDate,sex,birthDateIso")
        );
        assert_eq!(lines.next(), Some("30123456,,,,F,"));
    }

    #[test]
    fn test_text_output_lists_every_field() {
        let result = parse("Sexo / Sex\nM");
        let text = format_text(&result, false);

        assert!(text.starts_with("Document number: -\n"));
        assert!(text.contains("Sex:             M\n"));
        assert!(text.contains("No identity information detected"));
    }

    #[test]
    fn test_json_output_is_camel_case() {
        let result = parse("Documento / Document\n30.123.456");
        let json = format_result(&result, OutputFormat::Json, false).unwrap();

        assert!(json.contains("\"documentNumber\": \"30123456\""));
        assert!(!json.contains("givenName"));
        assert_eq!(extract("Documento / Document\n30.123.456"), result.fields);
    }
}
