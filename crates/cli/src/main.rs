use anyhow::Context as _;
use clap::Parser;
use einvoice::{generate, logging, Args, BrowserBackend, GenerateReport, USAGE};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.log_json);

    match run(&args) {
        Ok(Some(report)) => {
            if let Some(html_path) = &report.html_path {
                println!("HTML written: {}", html_path.display());
            }
            println!("PDF written: {}", report.pdf_path.display());
            if let Some(pdf) = &report.pdf_info {
                info!(pages = pdf.page_count, version = %pdf.version, bytes = pdf.size, "done");
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("{USAGE}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// `Ok(None)` when no input file was given
fn run(args: &Args) -> anyhow::Result<Option<GenerateReport>> {
    let Some(options) = args.options() else {
        return Ok(None);
    };

    let backend = BrowserBackend::new(args.chrome.clone());
    let report = generate(&options, &backend)
        .with_context(|| format!("failed to generate {}", options.output.display()))?;
    Ok(Some(report))
}
