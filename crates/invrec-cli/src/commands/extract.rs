//! Extract command - parse recognized text into a structured draft.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use invrec_core::{ExtractedDocument, ExtractionPipeline};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file holding recognized text
    #[arg(required = true)]
    input: PathBuf,

    /// Recognition confidence reported for the text (0-100)
    #[arg(long, default_value_t = 100.0)]
    confidence: f32,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let text = fs::read_to_string(&args.input)?;
    info!(
        "Extracting from {} characters of recognized text",
        text.len()
    );

    let pipeline = ExtractionPipeline::with_config(config.pipeline);
    let document = pipeline.extract(&text, args.confidence);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&document)?,
        OutputFormat::Text => format_text(&document),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let missing = document.missing_fields();
    if !missing.is_empty() {
        eprintln!(
            "{} Manual entry needed for: {}",
            style("!").yellow(),
            missing.join(", ")
        );
    }

    Ok(())
}

fn format_text(document: &ExtractedDocument) -> String {
    let mut output = String::new();

    output.push_str(&format!("Locale:   {}\n", document.locale));
    output.push_str(&format!(
        "Number:   {}\n",
        document.invoice_number.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Issued:   {}\n",
        document.issue_date.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Due:      {}\n",
        document.due_date.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Supplier: {}\n",
        document.supplier.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!("Currency: {}\n", document.currency));

    if !document.items.is_empty() {
        output.push_str("\nItems:\n");
        for item in &document.items {
            output.push_str(&format!(
                "  {} x {} @ {} (VAT {}%)\n",
                item.quantity, item.name, item.unit_price, item.vat_percent
            ));
        }
    }

    output
}
