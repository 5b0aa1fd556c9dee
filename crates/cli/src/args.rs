//! Command line arguments

use crate::GenerateOptions;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use template::{OverflowPolicy, TotalsPolicy};

/// Printed when no input file is given
pub const USAGE: &str = "error: an input JSON file is required\n\
usage: einvoice -i <input.json> [-o <output.pdf>] [--html]";

/// Longest accepted rendering deadline, one day
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

#[derive(Debug, Parser)]
#[command(
    name = "einvoice",
    version,
    about = "Generate a Taiwan e-invoice proof (format two) PDF from JSON"
)]
pub struct Args {
    /// Invoice JSON file
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Invoice JSON file (when -i is not given)
    #[arg(value_name = "INPUT")]
    pub input_positional: Option<PathBuf>,

    /// PDF output path
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "invoice.pdf")]
    pub output: PathBuf,

    /// Also write the rendered HTML next to the PDF
    #[arg(long)]
    pub html: bool,

    /// Layout template to use instead of the built-in one
    #[arg(long, value_name = "PATH", env = "EINVOICE_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Browser executable (defaults to CHROME_PATH, then a PATH search)
    #[arg(long, value_name = "PATH", env = "EINVOICE_CHROME")]
    pub chrome: Option<PathBuf>,

    /// Rendering deadline in seconds
    #[arg(
        long,
        value_name = "SECS",
        env = "EINVOICE_TIMEOUT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub timeout: u64,

    /// Let the item table grow past 16 rows instead of failing
    #[arg(long)]
    pub allow_overflow: bool,

    /// Fail when total amount differs from sales plus tax
    #[arg(long)]
    pub strict_totals: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// Input path from `-i`, falling back to the positional argument
    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().or(self.input_positional.as_deref())
    }

    /// Generation options, `None` when no input was given
    pub fn options(&self) -> Option<GenerateOptions> {
        let input = self.input_path()?;

        let mut options = GenerateOptions::new(input, &self.output);
        options.emit_html = self.html;
        options.template = self.template.clone();
        options.timeout = Duration::from_secs(self.timeout);
        if self.allow_overflow {
            options.overflow = OverflowPolicy::Grow;
        }
        if self.strict_totals {
            options.totals = TotalsPolicy::Strict;
        }
        Some(options)
    }
}
