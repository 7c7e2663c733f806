//! Reconcile command - compare an order document against an invoice.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Args;
use console::style;
use tracing::info;

use invrec_core::{
    Document, DocumentType, ReconciliationEngine, Severity, Status, ValidationReport,
};

/// Arguments for the reconcile command.
#[derive(Args)]
pub struct ReconcileArgs {
    /// Order document (JSON)
    #[arg(long)]
    order: PathBuf,

    /// Invoice document (JSON)
    #[arg(long)]
    invoice: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON report
    Json,
    /// CSV rows, one per discrepancy
    Csv,
    /// Styled text summary
    Text,
}

pub fn run(args: ReconcileArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let order = load_document(&args.order, DocumentType::Order)?;
    let invoice = load_document(&args.invoice, DocumentType::Invoice)?;

    info!(
        "Reconciling order {} against invoice {}",
        order.id, invoice.id
    );

    let engine = ReconciliationEngine::new().with_tolerance(config.reconcile.tolerance);
    let report = engine.compare(&order, &invoice, Utc::now());

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Csv => format_csv(&report)?,
        OutputFormat::Text => format_text(&report),
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

    Ok(())
}

fn load_document(path: &Path, expected: DocumentType) -> anyhow::Result<Document> {
    if !path.exists() {
        anyhow::bail!("Document file not found: {}", path.display());
    }
    let content = fs::read_to_string(path)?;
    let document: Document = serde_json::from_str(&content)?;
    if document.doc_type != expected {
        anyhow::bail!(
            "{} is not an {} document",
            path.display(),
            expected
        );
    }
    Ok(document)
}

fn format_csv(report: &ValidationReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["category", "severity", "message"])?;
    for result in &report.results {
        wtr.write_record([
            format!("{:?}", result.category).to_lowercase(),
            format!("{:?}", result.severity).to_lowercase(),
            result.message.clone(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ValidationReport) -> String {
    let mut output = String::new();

    output.push_str("Categories:\n");
    output.push_str(&format!(
        "  items:  {}\n",
        status_glyph(report.summary.items_status)
    ));
    output.push_str(&format!(
        "  vat:    {}\n",
        status_glyph(report.summary.vat_status)
    ));
    output.push_str(&format!(
        "  dates:  {}\n",
        status_glyph(report.summary.dates_status)
    ));
    output.push_str(&format!(
        "  totals: {}\n",
        status_glyph(report.summary.totals_status)
    ));
    output.push_str(&format!(
        "  final:  {}\n",
        status_glyph(report.summary.final_status)
    ));

    if !report.results.is_empty() {
        output.push_str("\nFindings:\n");
        for result in &report.results {
            let marker = match result.severity {
                Severity::Error => style("✗").red(),
                Severity::Warning => style("!").yellow(),
            };
            output.push_str(&format!("  {} {}\n", marker, result.message));
        }
    }

    output.push_str("\nTotals (order vs invoice):\n");
    output.push_str(&format!(
        "  subtotal: {:.2} vs {:.2}\n",
        report.order_totals.subtotal, report.invoice_totals.subtotal
    ));
    output.push_str(&format!(
        "  VAT:      {:.2} vs {:.2}\n",
        report.order_totals.vat_total, report.invoice_totals.vat_total
    ));
    output.push_str(&format!(
        "  grand:    {:.2} vs {:.2}\n",
        report.order_totals.grand_total, report.invoice_totals.grand_total
    ));

    output
}

fn status_glyph(status: Status) -> String {
    match status {
        Status::Valid => format!("{} valid", style("✓").green()),
        Status::Warning => format!("{} warning", style("!").yellow()),
        Status::Error => format!("{} error", style("✗").red()),
    }
}
