//! Process command - extract fields from a single invoice PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use scanvoice_core::models::config::ScanvoiceConfig;
use scanvoice_core::models::fields::{InvoiceFields, PipelineOutput};
use scanvoice_core::pipeline::InvoicePipeline;

use crate::fetch;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF: local path, http(s) URL, or Google Drive share link
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Directory for intermediate page images (default: a temp dir)
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Keep the intermediate page images after the run
    #[arg(long)]
    keep_images: bool,

    /// Print the reconstructed OCR text alongside the fields
    #[arg(long)]
    show_text: bool,
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

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        ScanvoiceConfig::from_file(std::path::Path::new(path))?
    } else {
        ScanvoiceConfig::default()
    };

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    // Remote inputs land in a temp file that lives until the run is done.
    let mut _downloaded = None;
    let pdf_path = if fetch::is_remote(&args.input) {
        pb.set_message("Downloading PDF...");
        pb.set_position(5);

        let file = fetch::download_pdf(&args.input).await?;
        let path = file.path().to_path_buf();
        _downloaded = Some(file);
        path
    } else {
        let path = PathBuf::from(&args.input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        path
    };

    // Page images collide by filename, so each run gets its own scratch
    // directory unless the caller pins one.
    let mut scratch = None;
    let work_dir = match &args.work_dir {
        Some(dir) => dir.clone(),
        None => {
            let dir = tempfile::tempdir()?;
            let path = dir.path().to_path_buf();
            scratch = Some(dir);
            path
        }
    };

    pb.set_message("Extracting...");
    pb.set_position(20);

    let pipeline = InvoicePipeline::new(config);
    let result = pipeline.run(&pdf_path, &work_dir)?;

    pb.finish_with_message("Done");

    if args.show_text {
        println!("{}", style("Raw OCR text:").bold());
        println!("{}", result.joined_text());
        println!();
    }

    let output = format_output(&result, args.format)?;

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

    if args.keep_images {
        let kept = match scratch.take() {
            Some(dir) => dir.keep(),
            None => work_dir,
        };
        println!(
            "{} Page images kept at {}",
            style("ℹ").blue(),
            kept.display()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_output(result: &PipelineOutput, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(&result.fields),
        OutputFormat::Text => Ok(format_text(&result.fields)),
    }
}

pub fn format_csv(fields: &InvoiceFields) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["total_amount", "invoice_date", "account_name", "company_name"])?;
    wtr.write_record([
        fields.total_amount.clone().unwrap_or_default(),
        fields
            .invoice_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        fields.account_name.clone().unwrap_or_default(),
        display_company(fields).unwrap_or_default(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(fields: &InvoiceFields) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total Value:  {}\n",
        fields.total_amount.as_deref().unwrap_or("not found")
    ));
    output.push_str(&format!(
        "Invoice Date: {}\n",
        fields
            .invoice_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "not found".to_string())
    ));
    output.push_str(&format!(
        "Account Name: {}\n",
        fields.account_name.as_deref().unwrap_or("not found")
    ));
    output.push_str(&format!(
        "Company Name: {}\n",
        display_company(fields).unwrap_or_else(|| "not found".to_string())
    ));

    output
}

/// The company line sometimes arrives with a label still attached
/// ("Seller: Acme Pvt. Ltd."); report only the part after the last colon.
pub fn display_company(fields: &InvoiceFields) -> Option<String> {
    fields
        .company_name
        .as_ref()
        .map(|name| name.rsplit(':').next().unwrap_or(name.as_str()).trim().to_string())
}
